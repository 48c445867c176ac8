//! Sign-in / sign-up form state and its validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::ClientError;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const MIN_PASSWORD_LEN: usize = 6;

/// Compiled once. A pattern that fails to compile is logged and every
/// address is then rejected.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(EMAIL_PATTERN)
        .inspect_err(|err| tracing::error!("invalid email pattern: {err}"))
        .ok()
});

pub mod messages {
    pub const TITLE: &str = "متتبع المصروفات";
    pub const SUBTITLE: &str = "إدارة مصروفاتك المنزلية بسهولة";
    pub const INVALID_EMAIL: &str = "البريد الإلكتروني غير صالح";
    pub const SHORT_PASSWORD: &str = "كلمة المرور يجب أن تكون 6 أحرف على الأقل";
    pub const BAD_CREDENTIALS: &str = "البريد الإلكتروني أو كلمة المرور غير صحيحة";
    pub const SIGN_IN_FAILED: &str = "حدث خطأ في تسجيل الدخول";
    pub const ALREADY_REGISTERED: &str = "هذا البريد الإلكتروني مسجل مسبقاً";
    pub const SIGN_UP_FAILED: &str = "حدث خطأ في إنشاء الحساب";
    pub const SIGNED_UP: &str = "تم إنشاء الحساب! يرجى تأكيد البريد الإلكتروني";
    pub const SESSION_EXPIRED: &str = "انتهت الجلسة، يرجى تسجيل الدخول مجدداً";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "تسجيل الدخول",
            Self::SignUp => "إنشاء حساب جديد",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "تسجيل الدخول",
            Self::SignUp => "إنشاء حساب",
        }
    }

    pub fn switch_hint(self) -> &'static str {
        match self {
            Self::SignIn => "ليس لديك حساب؟ إنشاء حساب جديد",
            Self::SignUp => "لديك حساب؟ تسجيل الدخول",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct AuthState {
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub mode: AuthMode,
    pub pending: bool,
}

impl AuthState {
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        let focus = if email.is_empty() {
            AuthField::Email
        } else {
            AuthField::Password
        };
        Self {
            email,
            password: String::new(),
            focus,
            mode: AuthMode::SignIn,
            pending: false,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn input(&mut self, ch: char) {
        if !ch.is_control() {
            self.active_field_mut().push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.active_field_mut().pop();
    }

    /// First violated rule, in field order.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !is_valid_email(self.email.trim()) {
            return Err(messages::INVALID_EMAIL);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(messages::SHORT_PASSWORD);
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

pub fn sign_in_error_message(err: &ClientError) -> &'static str {
    if err
        .message()
        .is_some_and(|message| message.contains("Invalid login credentials"))
    {
        messages::BAD_CREDENTIALS
    } else {
        messages::SIGN_IN_FAILED
    }
}

pub fn sign_up_error_message(err: &ClientError) -> &'static str {
    if err
        .message()
        .is_some_and(|message| message.contains("already registered"))
    {
        messages::ALREADY_REGISTERED
    } else {
        messages::SIGN_UP_FAILED
    }
}
