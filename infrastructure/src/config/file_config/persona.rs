//! Persona configuration from TOML (`[persona]` section)

use counsel_domain::Persona;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePersonaConfig {
    /// Replaces the built-in career counselor prompt when set.
    pub system_prompt: Option<String>,
}

impl FilePersonaConfig {
    pub fn to_persona(&self) -> Persona {
        match self.system_prompt.as_deref().map(str::trim) {
            Some(prompt) if !prompt.is_empty() => Persona::new(prompt),
            _ => Persona::career_counselor(),
        }
    }
}
