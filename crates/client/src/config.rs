//! Client configuration, read from the environment.
//!
//! | Variable                      | Default                                  |
//! |-------------------------------|------------------------------------------|
//! | `USERDESK_BACKEND`            | `firebase` (`memory` for local runs)     |
//! | `FIREBASE_API_KEY`            | required for `firebase`                  |
//! | `FIREBASE_PROJECT_ID`         | required for `firebase`                  |
//! | `USERDESK_AUTH_URL`           | `https://identitytoolkit.googleapis.com` |
//! | `USERDESK_FIRESTORE_URL`      | `https://firestore.googleapis.com`       |
//! | `USERDESK_REQUEST_TIMEOUT_MS` | `30000`                                  |

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::infrastructure::firebase::{DEFAULT_AUTH_URL, DEFAULT_FIRESTORE_URL};

/// Upper bound on any single external call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set for the firebase backend")]
    Missing(&'static str),

    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} has an invalid value `{value}`: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
    pub auth_url: Url,
    pub firestore_url: Url,
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("api_key", &"<redacted>")
            .field("project_id", &self.project_id)
            .field("auth_url", &self.auth_url.as_str())
            .field("firestore_url", &self.firestore_url.as_str())
            .finish()
    }
}

/// Which adapters back the identity and document ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Firebase(FirebaseConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: Backend,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let request_timeout = match get("USERDESK_REQUEST_TIMEOUT_MS") {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidValue {
                        name: "USERDESK_REQUEST_TIMEOUT_MS",
                        value: raw,
                        reason: "must be greater than zero",
                    })
                }
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        name: "USERDESK_REQUEST_TIMEOUT_MS",
                        value: raw,
                        reason: "expected milliseconds",
                    })
                }
            },
        };

        let backend = match get("USERDESK_BACKEND").as_deref() {
            None | Some("firebase") => Backend::Firebase(FirebaseConfig {
                api_key: get("FIREBASE_API_KEY").ok_or(ConfigError::Missing("FIREBASE_API_KEY"))?,
                project_id: get("FIREBASE_PROJECT_ID")
                    .ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
                auth_url: parse_url(
                    "USERDESK_AUTH_URL",
                    get("USERDESK_AUTH_URL").as_deref().unwrap_or(DEFAULT_AUTH_URL),
                )?,
                firestore_url: parse_url(
                    "USERDESK_FIRESTORE_URL",
                    get("USERDESK_FIRESTORE_URL")
                        .as_deref()
                        .unwrap_or(DEFAULT_FIRESTORE_URL),
                )?,
            }),
            Some("memory") => Backend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "USERDESK_BACKEND",
                    value: other.to_string(),
                    reason: "expected `firebase` or `memory`",
                })
            }
        };

        Ok(Self {
            backend,
            request_timeout,
        })
    }

    /// In-memory backend with default timeouts.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        name,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            name,
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    Ok(url)
}
