// Decoding and loading of the remote tags.json document.

use std::io::Write;

use pharo_core::config::CatalogConfig;
use pharo_tags::{related_other_tags, CatalogError, CatalogLoader, SharedCatalog, TagCatalog};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const DOCUMENT: &str = r#"{
  "topicTags": {
    "assetTopicTags": [{"tag": "FX", "name": "Currencies"}],
    "countryTopicTags": [
      {"tag": "usa", "name": "USA", "region": "americas",
       "relatedOtherTags": [{"tag": "fed", "name": "Fed"}]}
    ],
    "generalTopicTags": [],
    "regionTopicTags": [{"tag": "americas", "name": "Americas"}]
  },
  "sourceTags": [
    {"tag": "reuters", "name": "Reuters", "showHashtag": "true",
     "relatedOtherTags": [{"tag": "wire", "name": "Wire"}]},
    {"tag": "desk", "name": "Desk Note"}
  ],
  "commonTags": [{"tag": "breaking", "name": "Breaking"}],
  "groupTags": [{"tag": "research", "relatedPositions": ["Analyst"]}]
}"#;

#[test]
fn decodes_full_document() {
    let catalog = TagCatalog::from_json(DOCUMENT).unwrap();

    assert_eq!(catalog.all_topic_tags().count(), 3);
    assert!(catalog.topic_tags.internal_topic_tags.is_empty());
    assert_eq!(catalog.topic_region("usa"), Some("americas"));
    assert!(catalog.source_shows_hashtag("reuters"));
    assert!(!catalog.source_shows_hashtag("desk"));
    assert_eq!(catalog.group_tags_for("Credit Analyst"), vec!["research"]);
}

#[test]
fn related_groups_from_document() {
    let catalog = TagCatalog::from_json(DOCUMENT).unwrap();
    let groups = related_other_tags(&catalog, Some("usa"), Some("reuters"));

    assert_eq!(groups[0].options[0].value, "breaking");
    assert_eq!(groups[1].options[0].value, "fed");
    assert_eq!(groups[2].options[0].value, "wire");
}

#[test]
fn malformed_document_is_error() {
    let err = TagCatalog::from_json(r#"{"sourceTags": 42}"#).unwrap_err();
    assert!(err.to_string().starts_with("malformed catalog document"));
}

#[test]
fn null_top_level_lists_become_empty() {
    let catalog = TagCatalog::from_json(
        r#"{"topicTags":null,"sourceTags":null,"groupTags":null,
            "commonTags":[{"tag":"a","name":"A"}]}"#,
    )
    .unwrap();

    assert!(catalog.source_tags.is_empty());
    assert!(catalog.group_tags.is_empty());
    assert_eq!(catalog.all_topic_tags().count(), 0);
    assert_eq!(catalog.common_tags.len(), 1);
    assert_eq!(catalog.common_tags[0].tag, "a");
}

#[test]
fn load_file_reads_document() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();

    let catalog = CatalogLoader::load_file(file.path()).unwrap();
    assert_eq!(catalog.source_tags.len(), 2);
}

#[tokio::test]
async fn unreachable_remote_degrades_to_empty() {
    let loader = CatalogLoader::new(CatalogConfig {
        tags_url: "http://127.0.0.1:1/tags.json".to_string(),
        settings_url: "http://127.0.0.1:1/settings.json".to_string(),
        timeout_secs: 2,
    });

    assert!(loader.fetch_tags().await.is_err());

    let remote = loader.load().await;
    assert!(remote.tags.is_empty());
    assert!(remote.settings.is_null());
}

#[tokio::test]
async fn background_refresh_leaves_catalog_empty_on_failure() {
    let shared = SharedCatalog::new();
    let loader = CatalogLoader::new(CatalogConfig {
        tags_url: "http://127.0.0.1:1/tags.json".to_string(),
        settings_url: "http://127.0.0.1:1/settings.json".to_string(),
        timeout_secs: 2,
    });

    let remote = shared.spawn_refresh(loader).await.unwrap();
    assert!(remote.tags.is_empty());
    assert!(shared.snapshot().is_empty());
}

/// Serve every connection with the same raw HTTP response.
async fn serve(status_line: &'static str, body: &'static str) -> CatalogConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    CatalogConfig {
        tags_url: format!("http://{addr}/tags.json"),
        settings_url: format!("http://{addr}/settings.json"),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn not_found_degrades_to_empty() {
    let loader = CatalogLoader::new(serve("HTTP/1.1 404 Not Found", "").await);

    match loader.fetch_tags().await {
        Err(CatalogError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/tags.json"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    let remote = loader.load().await;
    assert!(remote.tags.is_empty());
    assert!(remote.settings.is_null());
}

#[tokio::test]
async fn invalid_json_degrades_to_empty() {
    let loader = CatalogLoader::new(serve("HTTP/1.1 200 OK", "<html>not json</html>").await);

    assert!(matches!(
        loader.fetch_tags().await,
        Err(CatalogError::Malformed(_))
    ));

    let remote = loader.load().await;
    assert!(remote.tags.is_empty());
    assert!(remote.settings.is_null());
}

#[tokio::test]
async fn served_document_is_loaded() {
    let loader = CatalogLoader::new(serve("HTTP/1.1 200 OK", DOCUMENT).await);

    let remote = loader.load().await;
    assert_eq!(remote.tags.source_tags.len(), 2);
    assert!(remote.settings.is_object());
}
