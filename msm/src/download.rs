//! Single-file HTTP(S) download with a blocking interface.

use std::path::Path;
use std::io;

use reqwest::{Response, StatusCode};

use tokio::io::AsyncWriteExt;
use tokio::fs::{self, File};


/// Create a single download entry from its source URL and destination file.
#[inline]
pub fn single(url: impl Into<Box<str>>, file: impl Into<Box<Path>>) -> Entry {
    Entry {
        url: url.into(),
        file: file.into(),
        size_hint: None,
    }
}

/// A single download entry, to be downloaded with [`Entry::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Url of the file to download, supporting only HTTP/HTTPS protocols.
    url: Box<str>,
    /// Path to the file to ultimately download.
    file: Box<Path>,
    /// Expected size of the file, only used as the progress total when the server
    /// doesn't advertise a content length, the downloaded file is not checked
    /// against it.
    size_hint: Option<u64>,
}

impl Entry {

    /// See [`Entry::size_hint`].
    #[inline]
    pub fn set_size_hint(&mut self, size: Option<u64>) -> &mut Self {
        self.size_hint = size;
        self
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Block while downloading this entry, missing parent directories of the
    /// destination file are created. If the transfer fails after the destination
    /// file has been created, the partial file is removed.
    pub fn download(&self, mut handler: impl Handler) -> Result<()> {
        crate::tokio::sync(download_impl(self, &mut handler))
    }

}

/// A handle for watching a single download progress.
pub trait Handler {

    /// Notification of a download progress, the downloaded size so far and the total
    /// expected size, if known. This is called anyway at the beginning and at the
    /// end of the download.
    fn handle_download_progress(&mut self, size: u64, total_size: Option<u64>) {
        let _ = (size, total_size);
    }

}

/// Blanket implementation if no handler is needed.
impl Handler for () { }

impl<H: Handler + ?Sized> Handler for &'_ mut H {
    fn handle_download_progress(&mut self, size: u64, total_size: Option<u64>) {
        (*self).handle_download_progress(size, total_size)
    }
}

/// The error type for a failed download.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP transport error while requesting the file.
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Invalid HTTP status code while requesting the file.
    #[error("invalid status: {0}")]
    InvalidStatus(u16),
    /// System I/O error while writing the downloaded file.
    #[error("io: {0}")]
    Io(#[from] io::Error),
}

/// Type alias for a result of download.
pub type Result<T> = std::result::Result<T, Error>;


/// Download async entrypoint.
async fn download_impl(entry: &Entry, handler: &mut impl Handler) -> Result<()> {

    let client = crate::http::builder().build()?;

    let res = client.get(&*entry.url).send().await?;
    if res.status() != StatusCode::OK {
        return Err(Error::InvalidStatus(res.status().as_u16()));
    }

    let total_size = res.content_length().or(entry.size_hint);

    if let Some(parent) = entry.file.parent() {
        fs::create_dir_all(parent).await?;
    }

    handler.handle_download_progress(0, total_size);

    // Don't leave a partial file behind on failure, it would be indistinguishable
    // from a completed download.
    match download_body(res, &entry.file, total_size, handler).await {
        Err(e) => {
            let _ = fs::remove_file(&*entry.file).await;
            Err(e)
        }
        ok => ok,
    }

}

/// Stream the response body to the destination file.
async fn download_body(
    mut res: Response,
    file: &Path,
    total_size: Option<u64>,
    handler: &mut impl Handler,
) -> Result<()> {

    let mut dst = File::create(file).await?;
    let mut size = 0u64;

    while let Some(chunk) = res.chunk().await? {
        size += chunk.len() as u64;
        dst.write_all(&chunk).await?;
        handler.handle_download_progress(size, total_size);
    }

    dst.flush().await?;
    Ok(())

}
