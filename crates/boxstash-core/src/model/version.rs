use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Provider;
use crate::errors::{ExError, ExErrorKind};
use crate::time::internet_time;

/// Release lifecycle of a version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    #[default]
    Unreleased,
    Released,
    Revoked,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Unreleased => "unreleased",
            VersionStatus::Released => "released",
            VersionStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionStatus {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unreleased" => Ok(VersionStatus::Unreleased),
            "released" => Ok(VersionStatus::Released),
            "revoked" => Ok(VersionStatus::Revoked),
            other => Err(ExError::new(ExErrorKind::Serialization)
                .with_entity("version")
                .with_message(format!("unknown version status '{}'", other))),
        }
    }
}

/// A single version of a box
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Version {
    #[serde(skip)]
    pub id: i64,
    pub version: String,
    pub status: VersionStatus,
    #[serde(with = "internet_time")]
    pub created_at: i64,
    #[serde(with = "internet_time")]
    pub updated_at: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description_html: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description_markdown: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub release_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revoke_url: String,
    #[serde(skip)]
    pub box_id: i64,
    /// Derived on read
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<Provider>,
}

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn is_released(&self) -> bool {
        self.status == VersionStatus::Released
    }
}

/// Pick the "current" version of a box
///
/// The greatest `version` string among released versions, compared as plain
/// strings: "9.0" sorts above "10.0". Ties keep the first occurrence.
pub fn current_version(versions: &[Version]) -> Option<Version> {
    let mut current: Option<&Version> = None;
    for v in versions.iter().filter(|v| v.is_released()) {
        match current {
            Some(c) if v.version <= c.version => {}
            _ => current = Some(v),
        }
    }
    current.cloned()
}
