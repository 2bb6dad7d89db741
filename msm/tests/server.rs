use std::fs;

use msm::download;
use msm::manifest::Channel;
use msm::server::{DownloadStatus, Error, ServerVersion};

use tempfile::TempDir;

use mockito::{Matcher, Server};


/// Detail document with a server download and a java requirement, no client
/// download and no minimum launcher version.
const DETAIL: &str = r#"{
    "downloads": {"server": {"url": "http://x/server.jar", "size": 12345}},
    "javaVersion": {"majorVersion": 17}
}"#;


fn tempdir() -> TempDir {
    tempfile::Builder::new()
        .prefix("")
        .suffix(".server")
        .tempdir_in(env!("CARGO_TARGET_TMPDIR"))
        .unwrap()
}


#[test]
fn detail_requested_once() {

    let mut server = Server::new();
    let mock = server.mock("GET", "/1.20.4.json")
        .with_status(200)
        .with_body(DETAIL)
        .expect(1)
        .create();

    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, "server_versions");

    // Every accessor forces the same kept document, only one request happens.
    assert_eq!(version.server_url().unwrap(), "http://x/server.jar");
    assert_eq!(version.server_size().unwrap(), 12345);
    assert_eq!(version.java_major_version().unwrap(), 17);
    assert_eq!(version.min_launcher_version().unwrap(), -1);
    assert_eq!(version.client_size().unwrap(), 0);
    version.detail().unwrap();

    mock.assert();

}

#[test]
fn detail_not_kept_on_failure() {

    let mut server = Server::new();
    let failing = server.mock("GET", "/1.20.4.json")
        .with_status(500)
        .expect(1)
        .create();

    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, "server_versions");

    assert!(matches!(version.detail().unwrap_err(), Error::Reqwest { .. }));
    failing.assert();

    // Newest matching mock wins, the retried request now succeeds and the
    // document is kept from this attempt on.
    let succeeding = server.mock("GET", "/1.20.4.json")
        .with_status(200)
        .with_body(DETAIL)
        .expect(1)
        .create();

    assert_eq!(version.server_url().unwrap(), "http://x/server.jar");
    assert_eq!(version.server_size().unwrap(), 12345);
    succeeding.assert();

}

#[test]
fn detail_defaults() {

    let mut server = Server::new();
    server.mock("GET", "/1.20.4.json")
        .with_status(200)
        .with_body("{}")
        .create();

    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, "server_versions");

    let detail = version.detail().unwrap();
    assert_eq!(detail.server_url(), "");
    assert_eq!(detail.server_size(), 0);
    assert_eq!(detail.client_url(), "");
    assert_eq!(detail.client_size(), 0);
    assert_eq!(detail.java_major_version(), -1);
    assert_eq!(detail.min_launcher_version(), -1);

}

#[test]
fn download_skips_existing() {

    let mut server = Server::new();
    let mock = server.mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let dir = tempdir();
    fs::write(dir.path().join("minecraft_server.1.20.4.jar"), "previous").unwrap();

    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, dir.path());

    // The existing file is the only idempotence signal, nothing is requested,
    // not even the detail document.
    assert_eq!(version.download(()).unwrap(), DownloadStatus::AlreadyDownloaded);
    assert_eq!(fs::read_to_string(version.file_path()).unwrap(), "previous");
    mock.assert();

}

#[test]
fn download_creates_directories() {

    let mut server = Server::new();

    let detail_mock = server.mock("GET", "/1.20.4.json")
        .with_status(200)
        .with_body(format!(r#"{{"downloads": {{"server": {{"url": "{}/server.jar", "size": 12}}}}}}"#, server.url()))
        .create();

    let jar_mock = server.mock("GET", "/server.jar")
        .with_status(200)
        .with_body("Hello world!")
        .create();

    let root = tempdir();
    let dir = root.path().join("missing").join("nested");

    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, dir.clone());

    #[derive(Default)]
    struct LastProgress {
        last: Option<(u64, Option<u64>)>,
    }

    impl download::Handler for LastProgress {
        fn handle_download_progress(&mut self, size: u64, total_size: Option<u64>) {
            self.last = Some((size, total_size));
        }
    }

    let mut handler = LastProgress::default();
    assert_eq!(version.download(&mut handler).unwrap(), DownloadStatus::Downloaded);

    assert!(dir.is_dir());
    assert_eq!(fs::read_to_string(version.file_path()).unwrap(), "Hello world!");
    assert_eq!(handler.last, Some((12, Some(12))));

    detail_mock.assert();
    jar_mock.assert();

}

#[test]
fn download_failure_leaves_no_file() {

    let mut server = Server::new();

    server.mock("GET", "/1.20.4.json")
        .with_status(200)
        .with_body(format!(r#"{{"downloads": {{"server": {{"url": "{}/server.jar", "size": 12}}}}}}"#, server.url()))
        .create();

    server.mock("GET", "/server.jar")
        .with_status(404)
        .create();

    let dir = tempdir();
    let url = format!("{}/1.20.4.json", server.url());
    let version = ServerVersion::new("1.20.4", Channel::Release, url, dir.path());

    let error = version.download(()).unwrap_err();
    assert!(matches!(error, Error::Download { error: download::Error::InvalidStatus(404) }));

    // No partial or empty file that a later call would mistake for a completed
    // download.
    assert!(!version.file_path().exists());

}
