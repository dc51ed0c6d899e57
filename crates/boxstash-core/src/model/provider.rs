use serde::{Deserialize, Serialize};

use crate::time::internet_time;

/// A provider-specific payload of a version (e.g. "virtualbox")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    pub hosted: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hosted_token: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub original_url: String,
    #[serde(with = "internet_time")]
    pub created_at: i64,
    #[serde(with = "internet_time")]
    pub updated_at: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub download_url: String,
    #[serde(skip)]
    pub version_id: i64,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
