use super::*;

use std::collections::HashMap;
use std::sync::Mutex;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

/// In-memory provider keyed by source id, recording every fetch.
#[derive(Default)]
struct FakeProvider {
    articles: HashMap<String, Vec<feeds::Article>>,
    broken: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[feeds::feed_trait]
impl feeds::FeedProvider for FakeProvider {
    async fn fetch_articles(
        &self,
        source: &feeds::Source,
    ) -> feeds::Result<Vec<feeds::Article>> {
        self.calls.lock().unwrap().push(source.id.clone());
        if self.broken.contains(&source.id) {
            return Err(feeds::Error::Request {
                url: source.url.clone(),
                reason: "connection refused".into(),
            });
        }
        Ok(self.articles.get(&source.id).cloned().unwrap_or_default())
    }

    async fn fetch_metadata(
        &self,
        url: &str,
    ) -> feeds::Result<feeds::FeedMetadata> {
        if url.contains("broken") {
            return Err(feeds::Error::Parse {
                url: url.to_string(),
                reason: "not a feed".into(),
            });
        }
        Ok(feeds::FeedMetadata {
            title: format!("Feed at {url}"),
            description: "Fetched description".into(),
            categories: vec!["news".into()],
        })
    }
}

fn article(
    title: &str,
    published: Option<&str>,
    categories: &[&str],
) -> feeds::Article {
    let mut builder = feeds::ArticleBuilder::new();
    builder
        .title(title)
        .feed_name("test")
        .description(format!("About {title}"))
        .link(format!("https://example.com/{title}"));
    if let Some(published) = published {
        builder.publication_date(feeds::DateTime::try_from(published).unwrap());
    }
    for category in categories {
        builder.category(*category);
    }
    builder.build()
}

/// Source 1 (X) = [10:00 Jan 3, 09:00 Jan 1], source 2 (Y) = [09:30 Jan 2].
fn scenario_provider() -> FakeProvider {
    let mut provider = FakeProvider::default();
    provider.articles.insert(
        "1".into(),
        vec![
            article("x-0900", Some("2024-01-01T09:00:00Z"), &["uk"]),
            article("x-1000", Some("2024-01-03T10:00:00Z"), &["tech", "uk"]),
        ],
    );
    provider.articles.insert(
        "2".into(),
        vec![article("y-0930", Some("2024-01-02T09:30:00Z"), &["tech"])],
    );
    provider
}

fn scenario_registry() -> feeds::SourceRegistry {
    let mut x = feeds::Source::new("1", "https://example.com/x.xml");
    x.title = "X".into();
    x.description = "Source X".into();
    x.categories = vec!["uk".into()];
    let mut y = feeds::Source::new("2", "https://example.com/y.xml");
    y.title = "Y".into();
    feeds::SourceRegistry::new(vec![x, y]).unwrap()
}

fn state(provider: Arc<FakeProvider>) -> AppState {
    AppState {
        registry: Arc::new(scenario_registry()),
        provider,
    }
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(
        response.headers()[axum::http::header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_titles(uri: &str) -> Vec<String> {
    let (status, body) =
        get(router(state(Arc::new(scenario_provider()))), uri).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let list: ArticleList = serde_json::from_value(body).unwrap();
    list.articles.into_iter().map(|a| a.title).collect()
}

#[tokio::test]
async fn sources_are_listed_in_registry_order() {
    tracing_subscriber::fmt::try_init().ok();

    let app = router(state(Arc::new(FakeProvider::default())));
    let (status, body) = get(app, "/sources").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "sources": [
                {
                    "sourceID": "1",
                    "categories": ["uk"],
                    "sourceURL": "https://example.com/x.xml",
                    "summary": "Source X",
                    "title": "X",
                },
                {
                    "sourceID": "2",
                    "sourceURL": "https://example.com/y.xml",
                    "summary": "",
                    "title": "Y",
                },
            ]
        })
    );
}

#[tokio::test]
async fn feeds_are_merged_newest_first() {
    tracing_subscriber::fmt::try_init().ok();

    assert_eq!(get_titles("/feeds").await, vec!["x-1000", "y-0930", "x-0900"]);
}

#[tokio::test]
async fn feeds_article_fields() {
    let app = router(state(Arc::new(scenario_provider())));
    let (_, body) = get(app, "/feeds?count=1").await;
    assert_eq!(
        body,
        serde_json::json!({
            "articles": [{
                "title": "x-1000",
                "publicationTime": "2024-01-03T10:00:00Z",
                "publicationUnixTimestamp": 1_704_276_000i64,
                "categories": ["tech", "uk"],
                "feedTitle": "test",
                "description": "About x-1000",
                "link": "https://example.com/x-1000",
            }]
        })
    );
}

#[tokio::test]
async fn feeds_filtered_by_category() {
    assert_eq!(
        get_titles("/feeds?categories=tech").await,
        vec!["x-1000", "y-0930"]
    );
    assert_eq!(
        get_titles("/feeds?categories=missing,uk").await,
        vec!["x-1000", "x-0900"]
    );
}

#[tokio::test]
async fn feeds_capped_by_count() {
    assert_eq!(get_titles("/feeds?count=1").await, vec!["x-1000"]);
    assert_eq!(get_titles("/feeds?count=100").await.len(), 3);
}

#[tokio::test]
async fn feeds_cut_off_by_max_timestamp() {
    // 2024-01-02T12:00:00Z
    assert_eq!(
        get_titles("/feeds?maxtimestamp=1704196800").await,
        vec!["y-0930", "x-0900"]
    );
}

#[tokio::test]
async fn feeds_from_selected_sources() {
    assert_eq!(get_titles("/feeds?sources=2").await, vec!["y-0930"]);
    assert_eq!(
        get_titles("/feeds?sources=2,1&categories=uk").await,
        vec!["x-1000", "x-0900"]
    );
}

#[tokio::test]
async fn unknown_source_is_a_bad_request() {
    let provider = Arc::new(scenario_provider());
    let (status, body) =
        get(router(state(provider.clone())), "/feeds?sources=1,7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        serde_json::json!({
            "status": "Invalid request",
            "error": "could not find source with ID 7",
        })
    );
    // No merge was attempted.
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn invalid_parameters_are_bad_requests() {
    for uri in [
        "/feeds?count=0",
        "/feeds?count=-3",
        "/feeds?count=ten",
        "/feeds?maxtimestamp=0",
        "/feeds?maxtimestamp=soon",
        "/feeds?categories=tech,,uk",
        "/feeds?categories=tech,%20uk",
        "/feeds?sources=1,",
    ] {
        let (status, body) =
            get(router(state(Arc::new(scenario_provider()))), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {body}");
        assert_eq!(body["status"], "Invalid request");
    }
}

#[tokio::test]
async fn repeated_parameters_use_the_first_value() {
    let (status, body) = get(
        router(state(Arc::new(scenario_provider()))),
        "/feeds?count=1&count=2&categories=tech&categories=uk",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let list: ArticleList = serde_json::from_value(body).unwrap();
    let titles: Vec<String> =
        list.articles.into_iter().map(|a| a.title).collect();
    assert_eq!(titles, vec!["x-1000"]);

    // A repeated invalid value is still reported as json.
    let (status, body) = get(
        router(state(Arc::new(scenario_provider()))),
        "/feeds?count=0&count=2",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "count query parameter must be > 0");
}

#[test]
fn params_from_query_pairs() {
    let pairs = [
        ("sources", "2"),
        ("unknown", "x"),
        ("count", "3"),
        ("sources", "1"),
    ]
    .map(|(key, value)| (key.to_string(), value.to_string()));
    let params = FeedQueryParams::from_pairs(&pairs);
    assert_eq!(params.count.as_deref(), Some("3"));
    assert_eq!(params.sources.as_deref(), Some("2"));
    assert_eq!(params.maxtimestamp, None);
    assert_eq!(params.categories, None);
}

#[tokio::test]
async fn fetch_failure_is_an_internal_error() {
    let mut provider = scenario_provider();
    provider.broken.push("2".into());
    let (status, body) = get(router(state(Arc::new(provider))), "/feeds").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "Internal server error");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("source Y"), "{error}");
    assert!(error.contains("connection refused"), "{error}");
}

#[tokio::test]
async fn dateless_article_fails_the_request() {
    let mut provider = scenario_provider();
    provider
        .articles
        .get_mut("2")
        .unwrap()
        .push(article("y-undated", None, &["tech"]));
    let (status, body) = get(router(state(Arc::new(provider))), "/feeds").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("articles").is_none());
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("missing publication date")
    );
}

#[test]
fn query_defaults() {
    let query = FeedQuery::try_from(&FeedQueryParams::default()).unwrap();
    assert_eq!(query, FeedQuery::default());
    assert_eq!(query.count, DEFAULT_COUNT);
    assert_eq!(query.cutoff, feeds::DateTime::max());
    assert!(query.filters().is_empty());

    // Empty values are treated as missing.
    let params = FeedQueryParams {
        count: Some(String::new()),
        maxtimestamp: Some(String::new()),
        categories: Some(String::new()),
        sources: Some(String::new()),
    };
    assert_eq!(FeedQuery::try_from(&params).unwrap(), FeedQuery::default());
}

#[test]
fn query_parses_every_parameter() {
    let params = FeedQueryParams {
        count: Some("25".into()),
        maxtimestamp: Some("1704276000".into()),
        categories: Some("tech,uk".into()),
        sources: Some("2,1".into()),
    };
    let query = FeedQuery::try_from(&params).unwrap();
    assert_eq!(query.count, 25);
    assert_eq!(query.cutoff.to_rfc3339(), "2024-01-03T10:00:00Z");
    assert_eq!(query.categories, vec!["tech", "uk"]);
    assert_eq!(query.filters().len(), 1);

    let sources = query.select_sources(&scenario_registry()).unwrap();
    let ids: Vec<&str> = sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn query_validation_messages() {
    let error = |params: FeedQueryParams| {
        FeedQuery::try_from(&params).unwrap_err().to_string()
    };

    assert_eq!(
        error(FeedQueryParams {
            count: Some("0".into()),
            ..Default::default()
        }),
        "count query parameter must be > 0"
    );
    // Counts must fit in 32 bits.
    assert!(
        error(FeedQueryParams {
            count: Some("3000000000".into()),
            ..Default::default()
        })
        .starts_with("invalid count query parameter")
    );
    assert_eq!(
        error(FeedQueryParams {
            maxtimestamp: Some("-1".into()),
            ..Default::default()
        }),
        "maxtimestamp query parameter must be > 0"
    );
    assert_eq!(
        error(FeedQueryParams {
            maxtimestamp: Some(i64::MAX.to_string()),
            ..Default::default()
        }),
        "maxtimestamp query parameter is out of range"
    );
    assert_eq!(
        error(FeedQueryParams {
            categories: Some("tech,".into()),
            ..Default::default()
        }),
        "empty category"
    );
    assert_eq!(
        error(FeedQueryParams {
            sources: Some(" 1".into()),
            ..Default::default()
        }),
        "source \" 1\" contains leading or trailing whitespaces"
    );
}

#[test]
fn config_defaults_to_builtin_sources() {
    let config: Config = toml::from_str("").unwrap();
    let ids: Vec<&str> = config.sources.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(config.address(None), DEFAULT_ADDRESS);
}

#[test]
fn config_address_precedence() {
    let config: Config =
        toml::from_str("address = \"127.0.0.1:9000\"").unwrap();
    assert_eq!(config.address(None), "127.0.0.1:9000");
    assert_eq!(config.address(Some(":8081")), "0.0.0.0:8081");
}

#[test]
fn config_serialization() {
    let config_path = "../../config/rssreader.toml";
    let config_data = std::fs::read_to_string(config_path).unwrap();
    let config = toml::from_str::<Config>(&config_data).unwrap();
    assert_eq!(config.user_agent.as_deref(), Some("rssreader/0.1"));
    assert_eq!(config.sources.len(), 4);
    assert_eq!(config.sources[2].title.as_deref(), Some("Reuters: UK"));

    let e: Result<String, toml::ser::Error> = toml::to_string_pretty(&config);
    assert!(e.is_ok(), "{e:?}");
}

#[test]
fn config_load_creates_missing_file() {
    let dir = std::env::temp_dir()
        .join(format!("rssreader-config-{}", std::process::id()));
    let path = dir.join("nested").join("rssreader.toml");
    std::fs::remove_dir_all(&dir).ok();

    let config = Config::load(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.sources.len(), 4);

    std::fs::write(&path, "address = \":9090\"\n").unwrap();
    let config = Config::load(&path).unwrap();
    assert_eq!(config.address(None), "0.0.0.0:9090");

    std::fs::write(&path, "sources = 3\n").unwrap();
    assert!(Config::load(&path).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn registry_resolves_missing_metadata() {
    let config: Config = toml::from_str(
        r#"
        [[sources]]
        id = "a"
        url = "https://example.com/a.xml"

        [[sources]]
        id = "b"
        url = "https://example.com/b.xml"
        title = "B"
        categories = ["tech"]
        "#,
    )
    .unwrap();
    let registry = config.registry(&FakeProvider::default()).await.unwrap();

    let a = registry.get("a").unwrap();
    assert_eq!(a.title, "Feed at https://example.com/a.xml");
    assert_eq!(a.description, "Fetched description");
    assert_eq!(a.categories, vec!["news"]);

    let b = registry.get("b").unwrap();
    assert_eq!(b.title, "B");
    assert_eq!(b.description, "");
    assert_eq!(b.categories, vec!["tech"]);
}

#[tokio::test]
async fn registry_fails_on_unreadable_or_duplicate_sources() {
    let config: Config = toml::from_str(
        r#"
        [[sources]]
        id = "a"
        url = "https://example.com/broken.xml"
        "#,
    )
    .unwrap();
    let error = config.registry(&FakeProvider::default()).await.unwrap_err();
    assert!(error.to_string().contains("source a"), "{error}");

    let config: Config = toml::from_str(
        r#"
        [[sources]]
        id = "a"
        url = "https://example.com/a.xml"
        title = "A"

        [[sources]]
        id = "a"
        url = "https://example.com/b.xml"
        title = "B"
        "#,
    )
    .unwrap();
    let error = config.registry(&FakeProvider::default()).await.unwrap_err();
    assert!(error.to_string().contains("more than once"), "{error}");
}

#[test]
fn cli_parses_feeds_arguments() {
    let cli = Cli::try_parse_from([
        "rssreader",
        "--debug",
        "feeds",
        "--count",
        "5",
        "--categories",
        "tech",
    ])
    .unwrap();
    assert!(cli.debug);
    match cli.command {
        CommandMode::Feeds(params) => {
            let query = FeedQuery::try_from(&params).unwrap();
            assert_eq!(query.count, 5);
            assert_eq!(query.categories, vec!["tech"]);
        }
        _ => panic!("expected the feeds command"),
    }
}
