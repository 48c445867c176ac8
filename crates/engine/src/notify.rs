//! User-facing notifications.
//!
//! Notices are fire-and-forget: the store never waits on delivery.

use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Collects notices in memory; the UI drains it once per frame.
#[derive(Clone, Debug, Default)]
pub struct NoticeQueue {
    inner: Rc<RefCell<Vec<Notice>>>,
}

impl NoticeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }
}

impl Notifier for NoticeQueue {
    fn notify(&self, notice: Notice) {
        self.inner.borrow_mut().push(notice);
    }
}

/// Localized notification texts.
pub mod messages {
    pub const LOAD_FAILED: &str = "حدث خطأ في تحميل المصروفات";
    pub const EXPENSE_ADDED: &str = "تمت إضافة المصروف بنجاح";
    pub const DEBT_ADDED: &str = "تمت إضافة الدين بنجاح";
    pub const ADD_FAILED: &str = "حدث خطأ في إضافة المصروف";
    pub const EXPENSE_UPDATED: &str = "تم تحديث المصروف بنجاح";
    pub const UPDATE_FAILED: &str = "حدث خطأ في تحديث المصروف";
    pub const EXPENSE_DELETED: &str = "تم حذف المصروف بنجاح";
    pub const DELETE_FAILED: &str = "حدث خطأ في حذف المصروف";
    pub const SETTLE_FAILED: &str = "حدث خطأ في تسديد الدين";

    pub fn debt_settled(payee: &str) -> String {
        format!("تم تسديد دين {payee} بنجاح")
    }
}
