//! Chat behavior configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Run turns on the same session one at a time
    pub serialize_turns: bool,
}
