//! Access-token lifetime of the signed-in user.
//!
//! Times are Unix seconds so a session saved by a previous run keeps its
//! deadline.

use api_types::auth::AuthSession;
use engine::Session;

/// Tokens are refreshed this many seconds before they run out.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// The identity and token the expense store works with.
pub fn engine_session(session: &AuthSession) -> Session {
    Session::new(
        session.user.id.as_str(),
        session.user.email.clone().unwrap_or_default(),
        session.access_token.as_str(),
    )
}

/// Fills in the absolute deadline when the server only sent a lifetime.
pub fn stamp_expiry(session: &mut AuthSession, now: i64) {
    if session.expires_at.is_none() {
        session.expires_at = session
            .expires_in
            .and_then(|secs| i64::try_from(secs).ok())
            .map(|secs| now.saturating_add(secs));
    }
}

/// Whether the access token is expired or about to be. Sessions without a
/// known deadline are only refreshed once the backend rejects them.
pub fn refresh_due(session: &AuthSession, now: i64) -> bool {
    session
        .expires_at
        .is_some_and(|at| at.saturating_sub(now) <= REFRESH_MARGIN_SECS)
}

#[cfg(test)]
mod tests {
    use api_types::auth::AuthUser;

    use super::*;

    const NOW: i64 = 1_791_964_800;

    fn session(expires_in: Option<u64>, expires_at: Option<i64>) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: Some("bearer".to_string()),
            expires_in,
            expires_at,
            user: AuthUser {
                id: "u1".to_string(),
                email: Some("sara@example.com".to_string()),
            },
        }
    }

    #[test]
    fn lifetime_becomes_a_deadline() {
        let mut fresh = session(Some(3600), None);
        stamp_expiry(&mut fresh, NOW);
        assert_eq!(fresh.expires_at, Some(NOW + 3600));

        let mut dated = session(Some(3600), Some(NOW + 10));
        stamp_expiry(&mut dated, NOW);
        assert_eq!(dated.expires_at, Some(NOW + 10));
    }

    #[test]
    fn refresh_is_due_inside_the_margin() {
        assert!(!refresh_due(&session(None, Some(NOW + 3600)), NOW));
        assert!(refresh_due(&session(None, Some(NOW + REFRESH_MARGIN_SECS)), NOW));
        assert!(refresh_due(&session(None, Some(NOW - 5)), NOW));
        assert!(!refresh_due(&session(Some(3600), None), NOW));
    }

    #[test]
    fn engine_session_carries_user_and_token() {
        let engine = engine_session(&session(None, None));
        assert_eq!(engine, Session::new("u1", "sara@example.com", "access"));
    }
}
