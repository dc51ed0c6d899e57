use serde::{Deserialize, Serialize};

use super::VagrantBox;

/// A user or organization owning boxes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip)]
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub avatar_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_markdown: String,
    /// Derived on read; never stored
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boxes: Vec<VagrantBox>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }
}
