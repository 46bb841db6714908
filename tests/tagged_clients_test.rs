use httpmock::prelude::*;
use mcc_domain::{ClientRegistry, DrafthouseClient, FeedsClient, MccError, Tagged, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

/// Consumer that depends on the Market feed client only.
struct MarketFeed {
    client: Tagged<FeedsClient>,
}

impl MarketFeed {
    async fn markets(&self) -> mcc_domain::Result<serde_json::Value> {
        self.client.get_json("markets.json").await
    }
}

fn config_for(drafthouse_url: &str, feeds_url: &str) -> TomlConfig {
    let toml_content = format!(
        r#"
[venue]
name = "Ritz"
utc_offset = "-05:00"

[clients.drafthouse]
base_url = "{}/s/mother/v2"
user_agent = "mcc-drafthouse-test"
headers = {{ "x-api-key" = "drafthouse-key" }}

[clients.feeds]
base_url = "{}/market/"
user_agent = "mcc-feeds-test"
"#,
        drafthouse_url, feeds_url
    );

    TomlConfig::from_toml_str(&toml_content).unwrap()
}

#[tokio::test]
async fn test_each_tag_reaches_its_own_upstream() {
    let drafthouse_server = MockServer::start_async().await;
    let feeds_server = MockServer::start_async().await;

    let sessions_mock = drafthouse_server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/s/mother/v2/sessions")
                .header("user-agent", "mcc-drafthouse-test")
                .header("x-api-key", "drafthouse-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{ "sessionId": 1, "film": "Jaws" }]));
        })
        .await;

    let markets_mock = feeds_server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/market/markets.json")
                .header("user-agent", "mcc-feeds-test");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "markets": ["austin", "nyc"] }));
        })
        .await;

    let config = config_for(&drafthouse_server.base_url(), &feeds_server.base_url());
    let registry = ClientRegistry::from_config(&config.clients).unwrap();

    let drafthouse = registry.resolve::<DrafthouseClient>().unwrap();
    let sessions = drafthouse.get_json("sessions").await.unwrap();
    assert_eq!(sessions[0]["film"], "Jaws");

    let feed = MarketFeed {
        client: registry.resolve::<FeedsClient>().unwrap(),
    };
    let markets = feed.markets().await.unwrap();
    assert_eq!(markets["markets"][1], "nyc");

    sessions_mock.assert_async().await;
    markets_mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/market/missing.json");
            then.status(404);
        })
        .await;

    let config = config_for(&server.base_url(), &server.base_url());
    let registry = ClientRegistry::from_config(&config.clients).unwrap();
    let feeds = registry.resolve::<FeedsClient>().unwrap();

    match feeds.get_json("/missing.json").await {
        Err(MccError::UpstreamStatus {
            client,
            status,
            url,
        }) => {
            assert_eq!(client, "feeds");
            assert_eq!(status, 404);
            assert!(url.ends_with("/market/missing.json"));
        }
        other => panic!("expected UpstreamStatus, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_json_body_is_serialization_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/market/broken");
            then.status(200).body("not json");
        })
        .await;

    let config = config_for(&server.base_url(), &server.base_url());
    let registry = ClientRegistry::from_config(&config.clients).unwrap();
    let feeds = registry.resolve::<FeedsClient>().unwrap();

    let err = feeds.get_json("broken").await.unwrap_err();
    assert!(matches!(err, MccError::SerializationError(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_missing_section_surfaces_as_wiring_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[clients.drafthouse]\nbase_url = \"https://drafthouse.com/\"\n")
        .unwrap();

    let config = TomlConfig::from_file(temp_file.path()).unwrap();
    let registry = ClientRegistry::from_config(&config.clients).unwrap();

    assert!(registry.resolve::<DrafthouseClient>().is_ok());
    let err = registry.resolve::<FeedsClient>().unwrap_err();
    assert!(matches!(err, MccError::MissingBinding { tag: "feeds" }));
    assert_eq!(err.exit_code(), 3);
}
