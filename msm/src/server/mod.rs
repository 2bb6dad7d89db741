//! Server version handle with lazily resolved detail document and idempotent
//! download of the server file.

pub mod serde;

use std::path::{Path, PathBuf};
use std::fs;
use std::io;

use chrono::{DateTime, FixedOffset};
use once_cell::unsync::OnceCell;

use crate::manifest::Channel;
use crate::download;


/// A single server version as listed by the version manifest. The per-version
/// detail document (download URL, sizes, runtime requirements) is requested on
/// first access and then kept for the lifetime of the instance, a failed request
/// is not kept and will be retried on the next access.
#[derive(Debug)]
pub struct ServerVersion {
    /// Version id, as listed in the manifest.
    id: String,
    /// Channel of the version.
    channel: Channel,
    /// URL of the per-version detail document.
    metadata_url: Box<str>,
    /// Release time of the version, if the manifest provides it.
    release_time: Option<DateTime<FixedOffset>>,
    /// Directory where the server file is downloaded.
    dir: PathBuf,
    /// Lazily resolved detail document.
    detail: OnceCell<Detail>,
}

impl ServerVersion {

    /// Create a new server version from its manifest entry fields and the
    /// directory where its server file should be downloaded.
    pub fn new(id: impl Into<String>, channel: Channel, metadata_url: impl Into<Box<str>>, dir: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            channel,
            metadata_url: metadata_url.into(),
            release_time: None,
            dir: dir.into(),
            detail: OnceCell::new(),
        }
    }

    /// See [`ServerVersion::release_time`].
    #[inline]
    pub fn set_release_time(&mut self, release_time: Option<DateTime<FixedOffset>>) -> &mut Self {
        self.release_time = release_time;
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    #[inline]
    pub fn metadata_url(&self) -> &str {
        &self.metadata_url
    }

    #[inline]
    pub fn release_time(&self) -> Option<DateTime<FixedOffset>> {
        self.release_time
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the server file, inside the server directory. This is a pure
    /// function of the directory and the version id, the file may not exist.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(format!("minecraft_server.{}.jar", self.id))
    }

    /// Return the detail document of this version, requesting and parsing it on
    /// the first successful call, later calls return the kept document without
    /// any network access.
    pub fn detail(&self) -> Result<&Detail> {
        self.detail.get_or_try_init(|| {
            crate::tokio::sync(request_detail(&self.metadata_url))
        })
    }

    /// URL of the server file, this forces the detail document resolution.
    /// Empty if the document has no server download.
    pub fn server_url(&self) -> Result<&str> {
        Ok(self.detail()?.server_url())
    }

    /// Size in bytes of the server file, this forces the detail document
    /// resolution. Zero if the document has no server download.
    pub fn server_size(&self) -> Result<u64> {
        Ok(self.detail()?.server_size())
    }

    /// Size in bytes of the client file, this forces the detail document
    /// resolution. Zero if the document has no client download.
    pub fn client_size(&self) -> Result<u64> {
        Ok(self.detail()?.client_size())
    }

    /// Major version of the Java runtime required by this version, this forces
    /// the detail document resolution. `-1` if the document doesn't state it.
    pub fn java_major_version(&self) -> Result<i32> {
        Ok(self.detail()?.java_major_version())
    }

    /// Minimum launcher version required by this version, this forces the detail
    /// document resolution. `-1` if the document doesn't state it.
    pub fn min_launcher_version(&self) -> Result<i32> {
        Ok(self.detail()?.min_launcher_version())
    }

    /// Download the server file to [`ServerVersion::file_path`], creating the
    /// server directory and its missing parents beforehand. If the file already
    /// exists it is considered downloaded and nothing is requested, the file is
    /// not checked against the expected size or any hash.
    pub fn download(&self, handler: impl download::Handler) -> Result<DownloadStatus> {

        fs::create_dir_all(&self.dir)
            .map_err(|error| Error::Io {
                error,
                file: self.dir.clone().into_boxed_path(),
            })?;

        let file = self.file_path();
        if file.exists() {
            return Ok(DownloadStatus::AlreadyDownloaded);
        }

        let detail = self.detail()?;

        download::single(detail.server_url(), file)
            .set_size_hint(Some(detail.server_size()).filter(|&size| size != 0))
            .download(handler)?;

        Ok(DownloadStatus::Downloaded)

    }

}

/// Internal async request of the detail document.
async fn request_detail(url: &str) -> Result<Detail> {

    let client = crate::http::builder().build()?;
    let res = client.get(url).send().await?.error_for_status()?;
    let body = res.bytes().await?;

    let mut deserializer = serde_json::Deserializer::from_slice(&body);
    let detail: serde::VersionDetail = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|error| Error::Json {
            error,
            url: url.into(),
        })?;

    Ok(Detail::new(detail))

}

/// The per-version detail document, with schema-drift defaults resolved at parse
/// time: missing URLs default to an empty string, missing sizes to zero and
/// missing version requirements to `-1`.
#[derive(Debug, Clone)]
pub struct Detail {
    server_url: Box<str>,
    server_size: u64,
    client_url: Box<str>,
    client_size: u64,
    java_major_version: i32,
    min_launcher_version: i32,
}

impl Detail {

    fn new(raw: serde::VersionDetail) -> Self {

        let server = raw.downloads.server.unwrap_or_default();
        let client = raw.downloads.client.unwrap_or_default();

        Self {
            server_url: server.url.into(),
            server_size: server.size,
            client_url: client.url.into(),
            client_size: client.size,
            java_major_version: raw.java_version
                .and_then(|java| java.major_version)
                .unwrap_or(-1),
            min_launcher_version: raw.minimum_launcher_version.unwrap_or(-1),
        }

    }

    #[inline]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    #[inline]
    pub fn server_size(&self) -> u64 {
        self.server_size
    }

    #[inline]
    pub fn client_url(&self) -> &str {
        &self.client_url
    }

    #[inline]
    pub fn client_size(&self) -> u64 {
        self.client_size
    }

    #[inline]
    pub fn java_major_version(&self) -> i32 {
        self.java_major_version
    }

    #[inline]
    pub fn min_launcher_version(&self) -> i32 {
        self.min_launcher_version
    }

}

/// Status of a terminated download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// The server file has been downloaded.
    Downloaded,
    /// The server file was already present, nothing has been requested.
    AlreadyDownloaded,
}

/// The error type for a failed detail resolution or download.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP error while requesting the detail document.
    #[error("reqwest: {error}")]
    Reqwest {
        #[from]
        error: reqwest::Error,
    },
    /// The detail document is not a valid JSON document.
    #[error("json: {error} @ {url}")]
    Json {
        #[source]
        error: serde_path_to_error::Error<serde_json::Error>,
        url: Box<str>,
    },
    /// System I/O error while preparing the server directory.
    #[error("io: {error} @ {file}")]
    Io {
        #[source]
        error: io::Error,
        file: Box<Path>,
    },
    /// Error while downloading the server file.
    #[error("download: {error}")]
    Download {
        #[from]
        error: download::Error,
    },
}

/// Type alias for a result with the server error type.
pub type Result<T> = std::result::Result<T, Error>;
