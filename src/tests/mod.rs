use std::path::Path;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::record::{Animal, Attribute};
use crate::runner::{ApiSettings, Options, RecordSource, Runner, RunnerError};
use crate::source::api::{ApiClient, ApiKey};
use crate::source::AnimalLookup;

const KEY: &str = "0123456789abcdefghij0123456789abcdefghij";

fn fixed(animals: Vec<Animal>) -> Box<dyn AnimalLookup> {
    Box::new(move |_: &str| Ok::<_, RunnerError>(animals.clone()))
}

fn animals_json() -> &'static str {
    r#"[
        {"name":"Fox","characteristics":{"diet":"Omnivore","skin_type":"Fur"}},
        {"name":"Viper","locations":["Asia"],"characteristics":{"skin_type":"Scales","type":"Reptile"}}
    ]"#
}

fn file_options(dir: &Path, data: Option<&str>, template: Option<&str>) -> Options {
    let data_path = dir.join("animals_data.json");
    let template_path = dir.join("animals_template.html");
    if let Some(data) = data {
        std::fs::write(&data_path, data).unwrap();
    }
    if let Some(template) = template {
        std::fs::write(&template_path, template).unwrap();
    }
    Options {
        source: RecordSource::FilePath(data_path.to_string_lossy().to_string()),
        template: template_path.to_string_lossy().to_string(),
        output: dir.join("animals.html").to_string_lossy().to_string(),
        ..Options::default()
    }
}

#[test]
fn fox_example_renders_into_template() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(
        dir.path(),
        Some(r#"[{"name":"Fox","characteristics":{"diet":"Omnivore"}}]"#),
        Some("<ul>__REPLACE_ANIMALS_INFO__</ul>"),
    );
    let runner = Runner::new(options).unwrap();
    let page = runner.generate(None).unwrap();

    let written = std::fs::read_to_string(dir.path().join("animals.html")).unwrap();
    assert_eq!(written, page.html);
    assert!(written.starts_with("<ul>"));
    assert!(written.ends_with("</ul>"));
    assert!(written.contains("Fox"));
    assert!(written.contains("Omnivore"));
    assert!(!written.contains("Location"));
    assert!(!written.contains("Type"));
    assert!(!written.contains(crate::template::MARKER));
    assert_eq!(page.cards, 1);
    assert!(page.marker_found);
}

#[test]
fn filter_value_restricts_cards() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(
        dir.path(),
        Some(animals_json()),
        Some("<ul>__REPLACE_ANIMALS_INFO__</ul>"),
    );
    let runner = Runner::new(options).unwrap();
    let page = runner.generate(Some("Scales")).unwrap();
    assert_eq!(page.cards, 1);
    assert!(page.html.contains("Viper"));
    assert!(!page.html.contains(">Fox<"));

    let page = runner.generate(Some("Feathers")).unwrap();
    assert_eq!(page.cards, 0);
    assert_eq!(page.html, "<ul></ul>");
}

#[test]
fn missing_data_file_is_not_found_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), None, Some("__REPLACE_ANIMALS_INFO__"));
    let runner = Runner::new(options).unwrap();
    let err = runner.generate(None).unwrap_err();
    assert!(matches!(err, RunnerError::NotFound { kind: "data file", .. }));
    assert!(!dir.path().join("animals.html").exists());
}

#[test]
fn empty_data_file_is_rejected_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), Some(""), Some("__REPLACE_ANIMALS_INFO__"));
    let runner = Runner::new(options).unwrap();
    let err = runner.generate(None).unwrap_err();
    assert!(matches!(err, RunnerError::EmptyInput { .. }));
    assert!(!dir.path().join("animals.html").exists());
}

#[test]
fn malformed_data_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(
        dir.path(),
        Some(r#"{"name":"not a list"}"#),
        Some("__REPLACE_ANIMALS_INFO__"),
    );
    let runner = Runner::new(options).unwrap();
    assert!(matches!(
        runner.generate(None).unwrap_err(),
        RunnerError::Malformed { .. }
    ));
}

#[test]
fn failed_run_keeps_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), Some(animals_json()), None);
    std::fs::write(dir.path().join("animals.html"), "previous").unwrap();
    let runner = Runner::new(options).unwrap();
    assert!(matches!(
        runner.generate(None).unwrap_err(),
        RunnerError::NotFound { kind: "template", .. }
    ));
    let kept = std::fs::read_to_string(dir.path().join("animals.html")).unwrap();
    assert_eq!(kept, "previous");
}

#[test]
fn blank_template_is_rejected_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), Some(animals_json()), Some("   \n"));
    let runner = Runner::new(options).unwrap();
    assert!(matches!(
        runner.generate(None).unwrap_err(),
        RunnerError::EmptyInput { kind: "template", .. }
    ));
    assert!(!dir.path().join("animals.html").exists());
}

#[test]
fn template_without_marker_is_written_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let options = file_options(dir.path(), Some(animals_json()), Some("<p>static</p>"));
    let page = Runner::new(options).unwrap().generate(None).unwrap();
    assert!(!page.marker_found);
    assert_eq!(page.html, "<p>static</p>");
}

#[test]
fn empty_lookup_result_renders_not_found_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = file_options(dir.path(), None, Some("<main>__REPLACE_ANIMALS_INFO__</main>"));
    options.source = RecordSource::Api {
        query: "dragon".to_string(),
    };
    let runner = Runner::with_lookup(options, fixed(Vec::new())).unwrap();
    let page = runner.generate(None).unwrap();
    assert!(page.not_found);
    assert!(page
        .html
        .contains("<h2>The animal \"dragon\" doesn't exist.</h2>"));
}

#[test]
fn lookup_results_render_like_file_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = file_options(dir.path(), None, Some("__REPLACE_ANIMALS_INFO__"));
    options.source = RecordSource::Api {
        query: "viper".to_string(),
    };
    options.filter_by = Attribute::Type;
    let animals: Vec<Animal> = serde_json::from_str(animals_json()).unwrap();
    let runner = Runner::with_lookup(options, fixed(animals)).unwrap();
    let page = runner.generate(Some("Reptile")).unwrap();
    assert_eq!(page.cards, 1);
    assert!(page.html.contains("<strong>Location:</strong> Asia"));
}

#[test]
fn api_source_without_key_fails_before_lookup() {
    let options = Options {
        source: RecordSource::Api {
            query: "fox".to_string(),
        },
        ..Options::default()
    };
    assert!(matches!(
        Runner::new(options),
        Err(RunnerError::MissingApiKey)
    ));
}

#[test]
fn api_key_of_39_characters_is_a_configuration_error() {
    let err = ApiKey::parse(Some(&KEY[1..])).unwrap_err();
    assert!(matches!(err, RunnerError::InvalidApiKey { length: 39 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_lookup_sends_name_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/animals"))
        .and(query_param("name", "fox"))
        .and(header("X-Api-Key", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_string(animals_json()))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/v1/animals", server.uri());
    let animals = tokio::task::spawn_blocking(move || {
        let key = ApiKey::parse(Some(KEY))?;
        ApiClient::new(&url, key, None)?.lookup("fox")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(animals.len(), 2);
    assert_eq!(animals[0].name(), Some("Fox"));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_empty_list_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let url = server.uri();
    let animals = tokio::task::spawn_blocking(move || {
        ApiClient::new(&url, ApiKey::parse(Some(KEY))?, None)?.lookup("unicorn")
    })
    .await
    .unwrap()
    .unwrap();
    assert!(animals.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn api_non_200_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"Invalid API Key."}"#))
        .mount(&server)
        .await;

    let url = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        ApiClient::new(&url, ApiKey::parse(Some(KEY))?, None)?.lookup("fox")
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        RunnerError::Upstream { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Invalid API Key."));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn api_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let url = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        ApiClient::new(&url, ApiKey::parse(Some(KEY))?, None)?.lookup("fox")
    })
    .await
    .unwrap()
    .unwrap_err();
    assert!(matches!(
        err,
        RunnerError::Malformed {
            kind: "API response",
            ..
        }
    ));
}

#[test]
fn unreachable_api_is_a_request_error() {
    // nothing listens on the discard port
    let url = "http://127.0.0.1:9/v1/animals";
    let client = ApiClient::new(url, ApiKey::parse(Some(KEY)).unwrap(), None).unwrap();
    match client.lookup("fox").unwrap_err() {
        RunnerError::Request { url: failed, .. } => assert_eq!(failed, url),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn runner_with_invalid_key_never_calls_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let url = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        let options = Options {
            source: RecordSource::Api {
                query: "fox".to_string(),
            },
            api: ApiSettings {
                url,
                key: Some(ApiKey::parse(Some(&KEY[1..]))?),
                timeout: None,
            },
            ..Options::default()
        };
        Runner::new(options).map(|_| ())
    })
    .await
    .unwrap()
    .unwrap_err();
    assert!(matches!(err, RunnerError::InvalidApiKey { length: 39 }));
}

#[tokio::test(flavor = "multi_thread")]
async fn api_runner_generates_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("name", "viper"))
        .respond_with(ResponseTemplate::new(200).set_body_string(animals_json()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut options = file_options(dir.path(), None, Some("<ul>__REPLACE_ANIMALS_INFO__</ul>"));
    options.source = RecordSource::Api {
        query: " viper ".to_string(),
    };
    options.api = ApiSettings {
        url: server.uri(),
        key: Some(ApiKey::parse(Some(KEY)).unwrap()),
        timeout: Some(std::time::Duration::from_secs(5)),
    };
    let page = tokio::task::spawn_blocking(move || Runner::new(options)?.generate(None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(page.cards, 2);
    assert!(dir.path().join("animals.html").exists());
}

#[test]
fn bundled_sample_page_renders() {
    let dir = tempfile::tempdir().unwrap();
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("static");
    let options = Options {
        source: RecordSource::FilePath(
            root.join("animals_data.json").to_string_lossy().to_string(),
        ),
        template: root
            .join("animals_template.html")
            .to_string_lossy()
            .to_string(),
        output: dir.path().join("animals.html").to_string_lossy().to_string(),
        ..Options::default()
    };
    let page = Runner::new(options).unwrap().generate(Some("Fur")).unwrap();
    assert_eq!(page.cards, 2);
    assert!(page.html.contains("Arctic Fox"));
    assert!(page.html.contains("Fennec Fox"));
    assert!(!page.html.contains("Gaboon Viper"));
    assert!(!page.html.contains(crate::template::MARKER));
}
