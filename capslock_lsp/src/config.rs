//! Server settings for capslock LSP.
//!
//! Read from `initializationOptions` and `workspace/didChangeConfiguration`.
//! Settings may be nested under a `"capslock"` key or passed flat.

use serde::Deserialize;
use serde_json::Value;

/// Settings section name clients use to scope our options
pub const SETTINGS_SECTION: &str = "capslock";

const DEFAULT_MAX_PROBLEMS: usize = 1000;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Upper bound on diagnostics published per document
    pub max_number_of_problems: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_number_of_problems: DEFAULT_MAX_PROBLEMS,
        }
    }
}

impl ServerConfig {
    /// Parse settings from a client-supplied JSON object.
    ///
    /// Returns `None` for `null` (nothing sent) and for payloads that do not
    /// deserialize; the latter is logged so the caller can keep its config.
    pub fn from_settings(settings: &Value) -> Option<Self> {
        if settings.is_null() {
            return None;
        }

        let section = settings.get(SETTINGS_SECTION).unwrap_or(settings);
        match ServerConfig::deserialize(section) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid settings: {}", e);
                None
            }
        }
    }
}
