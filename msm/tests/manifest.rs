use std::path::Path;
use std::rc::Rc;

use msm::manifest::{self, Channel};

use mockito::Server;


/// Root manifest with a single release version pointed to by both aliases.
const MANIFEST: &str = r#"{
    "latest": {"release": "1.20.4", "snapshot": "1.20.4"},
    "versions": [
        {"id": "1.20.4", "type": "release", "url": "http://x/1.20.4.json"}
    ]
}"#;


#[test]
fn resolve() {

    let mut server = Server::new();
    let mock = server.mock("GET", "/manifest.json")
        .with_status(200)
        .with_body(MANIFEST)
        .expect(1)
        .create();

    let url = format!("{}/manifest.json", server.url());
    let table = manifest::request(&url, "server_versions", ()).unwrap();
    mock.assert();

    // One listed version plus the two alias keys.
    assert_eq!(table.len(), 3);

    let version = table.get("1.20.4").unwrap();
    assert_eq!(version.id(), "1.20.4");
    assert_eq!(version.channel(), Channel::Release);
    assert_eq!(version.metadata_url(), "http://x/1.20.4.json");
    assert_eq!(version.file_path(), Path::new("server_versions").join("minecraft_server.1.20.4.jar"));

    // Both aliases must share the instance of the pointed-to version.
    assert!(Rc::ptr_eq(version, table.get(manifest::LATEST_RELEASE).unwrap()));
    assert!(Rc::ptr_eq(version, table.get(manifest::LATEST_SNAPSHOT).unwrap()));

    // An unknown id is an empty lookup, not an error.
    assert!(table.get("9.9.9").is_none());
    assert!(!table.contains_key("9.9.9"));

}

#[test]
fn unresolved_aliases() {

    let mut server = Server::new();
    server.mock("GET", "/manifest.json")
        .with_status(200)
        .with_body(r#"{
            "latest": {"release": "9.9.9"},
            "versions": [
                {"id": "1.20.4", "type": "release", "url": "http://x/1.20.4.json"}
            ]
        }"#)
        .create();

    let url = format!("{}/manifest.json", server.url());
    let table = manifest::request(&url, "server_versions", ()).unwrap();

    // Alias keys are present but resolve to nothing, because the release pointer
    // targets an unlisted id and the snapshot pointer is absent.
    assert!(table.contains_key(manifest::LATEST_RELEASE));
    assert!(table.get(manifest::LATEST_RELEASE).is_none());
    assert!(table.contains_key(manifest::LATEST_SNAPSHOT));
    assert!(table.get(manifest::LATEST_SNAPSHOT).is_none());

    assert!(table.get("1.20.4").is_some());

}

#[test]
fn missing_versions() {

    let mut server = Server::new();
    server.mock("GET", "/manifest.json")
        .with_status(200)
        .with_body(r#"{"latest": {"release": "1.20.4"}}"#)
        .create();

    let url = format!("{}/manifest.json", server.url());
    let table = manifest::request(&url, "server_versions", ()).unwrap();

    // Tolerated and treated as an empty list, only the alias keys remain.
    assert_eq!(table.len(), 2);
    assert!(table.get(manifest::LATEST_RELEASE).is_none());

}

#[test]
fn invalid_version_skipped() {

    let mut server = Server::new();
    server.mock("GET", "/manifest.json")
        .with_status(200)
        .with_body(r#"{
            "latest": {"release": "1.20.4"},
            "versions": [
                {"id": "1.20.4", "type": "release", "url": "http://x/1.20.4.json"},
                {"id": "broken", "type": "release"},
                {"id": "1.20.3", "type": "snapshot", "url": "http://x/1.20.3.json"}
            ]
        }"#)
        .create();

    #[derive(Default)]
    struct InvalidHandler {
        indices: Vec<usize>,
    }

    impl manifest::Handler for InvalidHandler {
        fn handle_invalid_version(&mut self, index: usize, _error: &serde_path_to_error::Error<serde_json::Error>) {
            self.indices.push(index);
        }
    }

    let mut handler = InvalidHandler::default();
    let url = format!("{}/manifest.json", server.url());
    let table = manifest::request(&url, "server_versions", &mut handler).unwrap();

    // The entry missing its url is skipped, the rest of the manifest is usable.
    assert_eq!(handler.indices, [1]);
    assert!(table.get("1.20.4").is_some());
    assert!(table.get("1.20.3").is_some());
    assert!(!table.contains_key("broken"));
    assert_eq!(table.len(), 4);

    assert!(Rc::ptr_eq(table.get(manifest::LATEST_RELEASE).unwrap(), table.get("1.20.4").unwrap()));

}

#[test]
fn invalid_json() {

    let mut server = Server::new();
    server.mock("GET", "/manifest.json")
        .with_status(200)
        .with_body("certainly not json")
        .create();

    let url = format!("{}/manifest.json", server.url());
    let error = manifest::request(&url, "server_versions", ()).unwrap_err();
    assert!(matches!(error, manifest::Error::Json { .. }));

}

#[test]
fn invalid_status() {

    let mut server = Server::new();
    server.mock("GET", "/manifest.json")
        .with_status(500)
        .create();

    let url = format!("{}/manifest.json", server.url());
    let error = manifest::request(&url, "server_versions", ()).unwrap_err();
    assert!(matches!(error, manifest::Error::Reqwest { .. }));

}
