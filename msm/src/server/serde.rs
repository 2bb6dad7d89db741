//! JSON schemas structures for serde deserialization.
//!
//! Every field is optional because the document schema is externally defined and
//! may drift, missing fields resolve to documented defaults at parse time.


#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetail {
    #[serde(default)]
    pub downloads: Downloads,
    #[serde(default)]
    pub java_version: Option<JavaVersion>,
    #[serde(default)]
    pub minimum_launcher_version: Option<i32>,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct Downloads {
    #[serde(default)]
    pub server: Option<Download>,
    #[serde(default)]
    pub client: Option<Download>,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct Download {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersion {
    #[serde(default)]
    pub major_version: Option<i32>,
}
