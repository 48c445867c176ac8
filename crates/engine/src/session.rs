//! Signed-in session passed explicitly to the expense store.

/// Identity of the signed-in user plus the credentials the remote store
/// needs to act on their behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            access_token: access_token.into(),
        }
    }
}
