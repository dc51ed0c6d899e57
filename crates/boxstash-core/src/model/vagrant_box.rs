use serde::{Deserialize, Serialize};

use super::Version;
use crate::time::internet_time;

/// A named, versioned artifact owned by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VagrantBox {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    #[serde(skip)]
    pub user_id: i64,
    pub username: String,
    pub is_private: bool,
    #[serde(with = "internet_time")]
    pub created_at: i64,
    #[serde(with = "internet_time")]
    pub updated_at: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description_html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description_markdown: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,
    pub downloads: i64,
    /// Derived on read: greatest released version string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<Version>,
    /// Derived on read
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<Version>,
}

impl VagrantBox {
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// `username/name`, the key used in log output and error context
    pub fn slug(&self) -> String {
        format!("{}/{}", self.username, self.name)
    }
}
