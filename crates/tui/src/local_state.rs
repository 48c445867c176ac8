use std::{fs, path::Path};

use api_types::auth::AuthSession;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Data kept between runs: the last signed-in e-mail and the session, so the
/// user does not have to sign in on every start.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocalState {
    pub last_email: Option<String>,
    pub session: Option<AuthSession>,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn remember(&mut self, session: AuthSession) {
        if let Some(email) = session.user.email.clone() {
            self.last_email = Some(email);
        }
        self.session = Some(session);
    }

    pub fn forget_session(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use api_types::auth::AuthUser;

    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("masarif-{}-{name}", std::process::id()))
            .join("state.json")
            .to_string_lossy()
            .into_owned()
    }

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: Some("bearer".to_string()),
            expires_in: Some(3600),
            expires_at: None,
            user: AuthUser {
                id: "u1".to_string(),
                email: Some("sara@example.com".to_string()),
            },
        }
    }

    #[test]
    fn missing_file_is_an_empty_state() {
        let state = LocalState::load(&temp_path("missing")).unwrap();
        assert_eq!(state, LocalState::default());
    }

    #[test]
    fn session_survives_a_save_and_load() {
        let path = temp_path("roundtrip");
        let mut state = LocalState::default();
        state.remember(session());
        state.save(&path).unwrap();

        let loaded = LocalState::load(&path).unwrap();
        assert_eq!(loaded.last_email.as_deref(), Some("sara@example.com"));
        assert_eq!(loaded.session, Some(session()));

        let mut signed_out = loaded;
        signed_out.forget_session();
        signed_out.save(&path).unwrap();
        let reloaded = LocalState::load(&path).unwrap();
        assert!(reloaded.session.is_none());
        assert_eq!(reloaded.last_email.as_deref(), Some("sara@example.com"));

        let _ = fs::remove_dir_all(Path::new(&path).parent().unwrap());
    }
}
