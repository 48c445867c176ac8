//! Wire types of the hosted backend: the REST collection of expense rows and
//! the auth endpoints.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Numeric columns may come back as JSON numbers or, depending on the
/// backend settings, as strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub mod expense {
    use super::*;

    /// Name of the REST collection.
    pub const TABLE: &str = "expenses";

    /// A row of the `expenses` collection as returned by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseRow {
        pub id: String,
        pub user_id: String,
        #[serde(deserialize_with = "super::number_or_string")]
        pub amount: f64,
        pub category: String,
        pub payee: String,
        pub notes: Option<String>,
        /// Calendar day, `YYYY-MM-DD`.
        pub date: NaiveDate,
        /// RFC3339 timestamp, including timezone offset.
        pub created_at: DateTime<FixedOffset>,
        /// `null` on rows written before debt tracking existed.
        #[serde(default)]
        pub is_paid: Option<bool>,
    }

    /// Insert body; the backend assigns `id` and `created_at`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseInsert {
        pub user_id: String,
        pub amount: f64,
        pub category: String,
        pub payee: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
        pub date: NaiveDate,
        pub is_paid: bool,
    }

    /// Partial update body: absent fields are left untouched.
    ///
    /// `notes: Some(None)` serializes as `null` and clears the column.
    #[derive(Debug, Default, Serialize)]
    pub struct ExpenseUpdate {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub payee: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub notes: Option<Option<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub is_paid: Option<bool>,
    }

    /// Error body of the REST endpoints.
    #[derive(Debug, Default, Deserialize)]
    pub struct RestError {
        pub code: Option<String>,
        pub message: Option<String>,
        pub details: Option<String>,
        pub hint: Option<String>,
    }
}

pub mod auth {
    use super::*;

    /// Body of the password sign-in and sign-up calls.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefreshGrant {
        pub refresh_token: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AuthUser {
        pub id: String,
        pub email: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct AuthSession {
        pub access_token: String,
        pub refresh_token: String,
        pub token_type: Option<String>,
        /// Seconds until `access_token` expires.
        pub expires_in: Option<u64>,
        /// Unix time at which `access_token` expires.
        #[serde(default)]
        pub expires_at: Option<i64>,
        pub user: AuthUser,
    }

    /// Sign-up returns a full session when e-mail confirmation is off, and
    /// only the pending user otherwise.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum SignUpResponse {
        Session(AuthSession),
        Pending(AuthUser),
    }

    /// Error body of the auth endpoints. Older and newer servers use
    /// different field names, so every field is optional.
    #[derive(Debug, Default, Deserialize)]
    pub struct AuthError {
        pub error: Option<String>,
        pub error_description: Option<String>,
        pub error_code: Option<String>,
        pub msg: Option<String>,
        pub message: Option<String>,
    }

    impl AuthError {
        /// The most descriptive message the server sent.
        pub fn text(&self) -> String {
            self.msg
                .as_deref()
                .or(self.error_description.as_deref())
                .or(self.message.as_deref())
                .or(self.error.as_deref())
                .or(self.error_code.as_deref())
                .unwrap_or("unknown error")
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{auth::*, expense::*};

    #[test]
    fn row_accepts_numeric_strings_and_missing_paid_flag() {
        let row: ExpenseRow = serde_json::from_str(
            r#"{
                "id": "7f1c",
                "user_id": "u1",
                "amount": "25000.50",
                "category": "groceries",
                "payee": "سوق الخير",
                "notes": null,
                "date": "2026-10-12",
                "created_at": "2026-10-12T08:15:00.123456+00:00"
            }"#,
        )
        .unwrap();
        assert_eq!(row.amount, 25000.5);
        assert_eq!(row.is_paid, None);
        assert_eq!(row.date.to_string(), "2026-10-12");
    }

    #[test]
    fn update_only_serializes_supplied_fields() {
        let body = ExpenseUpdate {
            is_paid: Some(true),
            notes: Some(None),
            ..ExpenseUpdate::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "is_paid": true, "notes": null }));
    }

    #[test]
    fn sign_up_distinguishes_pending_users() {
        let pending: SignUpResponse =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.co","aud":"authenticated"}"#).unwrap();
        assert!(matches!(pending, SignUpResponse::Pending(_)));

        let session: SignUpResponse = serde_json::from_str(
            r#"{"access_token":"t","refresh_token":"r","token_type":"bearer",
                "expires_in":3600,"expires_at":1791964800,
                "user":{"id":"u1","email":"a@b.co"}}"#,
        )
        .unwrap();
        assert!(matches!(
            session,
            SignUpResponse::Session(AuthSession { expires_at: Some(1791964800), .. })
        ));
    }

    #[test]
    fn auth_error_prefers_the_most_specific_message() {
        let legacy: AuthError = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        )
        .unwrap();
        assert_eq!(legacy.text(), "Invalid login credentials");

        let current: AuthError = serde_json::from_str(
            r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#,
        )
        .unwrap();
        assert_eq!(current.text(), "User already registered");
    }
}
