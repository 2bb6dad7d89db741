//! JSON schemas structures for serde deserialization.

use std::fmt;

use chrono::{DateTime, FixedOffset};


#[derive(serde::Deserialize, Debug, Clone)]
pub struct Manifest {
    /// A map associating the latest versions.
    #[serde(default)]
    pub latest: ManifestLatest,
    /// List of all versions, kept as raw values so that a single invalid entry
    /// doesn't fail the whole manifest.
    #[serde(default)]
    pub versions: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct ManifestLatest {
    pub release: Option<String>,
    pub snapshot: Option<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ManifestVersion {
    pub id: String,
    pub r#type: Channel,
    pub url: String,
    #[serde(default)]
    pub release_time: Option<DateTime<FixedOffset>>,
}

/// Channel of a version listed in the manifest. The upstream manifest also lists
/// historic versions, so this is wider than just release/snapshot.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Release => "release",
            Channel::Snapshot => "snapshot",
            Channel::OldBeta => "old_beta",
            Channel::OldAlpha => "old_alpha",
        })
    }
}
