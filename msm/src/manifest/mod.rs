//! Resolution of the Mojang version manifest into a table of server versions.

pub mod serde;

use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use crate::server::ServerVersion;

pub use serde::Channel;


/// Static URL to the version manifest provided by Mojang.
pub const VERSION_MANIFEST_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Literal table key resolving to the latest release version.
pub const LATEST_RELEASE: &str = "latest_release";
/// Literal table key resolving to the latest snapshot version.
pub const LATEST_SNAPSHOT: &str = "latest_snapshot";


/// Request the version manifest at the given URL and resolve it into a fresh
/// [`VersionTable`], each listed version being bound to the given server directory.
/// The table is rebuilt on every call, nothing is cached across calls.
///
/// Manifest entries that are missing one of their mandatory fields (`id`, `type`,
/// `url`) are skipped and reported to the handler, a partially invalid manifest
/// stays usable. A missing `versions` or `latest` key is tolerated and treated
/// as empty.
pub fn request(url: &str, dir: impl Into<PathBuf>, mut handler: impl Handler) -> Result<VersionTable> {

    let manifest = crate::tokio::sync(request_manifest(url))?;
    let dir = dir.into();

    let mut map = HashMap::with_capacity(manifest.versions.len() + 2);
    for (index, value) in manifest.versions.into_iter().enumerate() {

        let version = match serde_path_to_error::deserialize::<_, serde::ManifestVersion>(value) {
            Ok(version) => version,
            Err(error) => {
                handler.handle_invalid_version(index, &error);
                continue;
            }
        };

        let mut server = ServerVersion::new(
            version.id.clone(),
            version.r#type,
            version.url,
            dir.clone());

        server.set_release_time(version.release_time);

        map.insert(version.id, Some(Rc::new(server)));

    }

    // Aliases resolve to the already built entries, sharing the instance (and so
    // its detail cache), or to nothing when the pointed-to id is not listed.
    let latest_release = manifest.latest.release
        .and_then(|id| map.get(&id).cloned())
        .flatten();
    let latest_snapshot = manifest.latest.snapshot
        .and_then(|id| map.get(&id).cloned())
        .flatten();

    map.insert(LATEST_RELEASE.to_owned(), latest_release);
    map.insert(LATEST_SNAPSHOT.to_owned(), latest_snapshot);

    Ok(VersionTable {
        map,
    })

}

/// Internal async request of the manifest document.
async fn request_manifest(url: &str) -> Result<serde::Manifest> {

    let client = crate::http::builder().build()?;
    let res = client.get(url).send().await?.error_for_status()?;
    let body = res.bytes().await?;

    let mut deserializer = serde_json::Deserializer::from_slice(&body);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|error| Error::Json { error })

}

/// A handle for watching the manifest resolution.
pub trait Handler {

    /// Notification of a manifest version entry that could not be interpreted and
    /// has been skipped, with its index in the manifest `versions` list.
    fn handle_invalid_version(&mut self, index: usize, error: &serde_path_to_error::Error<serde_json::Error>) {
        let _ = (index, error);
    }

}

/// Blanket implementation if no handler is needed.
impl Handler for () { }

impl<H: Handler + ?Sized> Handler for &'_ mut H {
    fn handle_invalid_version(&mut self, index: usize, error: &serde_path_to_error::Error<serde_json::Error>) {
        (*self).handle_invalid_version(index, error)
    }
}

/// The error type for a failed manifest resolution.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP error while requesting the manifest document.
    #[error("reqwest: {error}")]
    Reqwest {
        #[from]
        error: reqwest::Error,
    },
    /// The manifest body is not a valid JSON document.
    #[error("json: {error}")]
    Json {
        #[source]
        error: serde_path_to_error::Error<serde_json::Error>,
    },
}

/// Type alias for a result of manifest resolution.
pub type Result<T> = std::result::Result<T, Error>;


/// A table mapping version ids to their server version. On top of every id listed
/// in the manifest, the two literal alias keys [`LATEST_RELEASE`] and
/// [`LATEST_SNAPSHOT`] are always present, they share the instance of the version
/// they point to, or map to nothing when that id is not listed.
#[derive(Debug)]
pub struct VersionTable {
    map: HashMap<String, Option<Rc<ServerVersion>>>,
}

impl VersionTable {

    /// Get the server version with the given id, or one of the two aliases. An
    /// unknown id is not an error, it just resolves to nothing.
    pub fn get(&self, id: &str) -> Option<&Rc<ServerVersion>> {
        self.map.get(id).and_then(Option::as_ref)
    }

    /// Return true if the given id is a key of the table, aliases included. Note
    /// that an alias key may be present while resolving to nothing.
    pub fn contains_key(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Number of keys in the table, aliases included.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all keys and their resolved version, aliases included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Rc<ServerVersion>>)> {
        self.map.iter().map(|(id, server)| (id.as_str(), server.as_ref()))
    }

}
