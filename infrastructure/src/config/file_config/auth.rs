//! Identity configuration from TOML (`[auth]` section)

use serde::{Deserialize, Serialize};

/// The owner identity is supplied by an upstream gateway in a request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Header carrying the authenticated user id
    pub user_header: String,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            user_header: "x-user-id".to_string(),
        }
    }
}
