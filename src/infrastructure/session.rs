use crate::domain::SessionUser;
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variable overriding the session file location.
pub const SESSION_ENV: &str = "GATHERLY_SESSION";

const DEFAULT_SESSION_PATH: &str = "~/.config/gatherly/session.json";

fn default_api_url() -> String {
    "https://api.gatherly.org/graphql".to_string()
}

/// Credentials and account info saved when a personal token is created
/// in the web app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub token: String,
    pub user: SessionUser,
}

pub struct SessionStore;

impl SessionStore {
    /// Where the session file is expected, tilde expanded.
    pub fn path() -> String {
        let raw =
            std::env::var(SESSION_ENV).unwrap_or_else(|_| DEFAULT_SESSION_PATH.to_string());
        shellexpand::tilde(&raw).into_owned()
    }

    pub fn load() -> Result<Session, String> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &str) -> Result<Session, String> {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Session>(&content) {
                Ok(session) => {
                    if session.token.trim().is_empty() {
                        Err(format!("{} has an empty token", path))
                    } else if session.api_url.trim().is_empty() {
                        Err(format!("{} has an empty api_url", path))
                    } else {
                        Ok(session)
                    }
                }
                Err(e) => Err(format!("Invalid session file - {}", e)),
            },
            Err(e) => Err(format!("cannot read {}: {}", path, e)),
        }
    }
}
