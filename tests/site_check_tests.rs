// tests/site_check_tests.rs
use std::io::Write;
use std::net::SocketAddr;
use std::path::PathBuf;

use keeperupper::cli::{self, Args};
use keeperupper::client::HttpFetcher;
use keeperupper::printer::Capture;
use keeperupper::report::{render_error, OutputMode};
use keeperupper::Error;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn args(config: PathBuf) -> Args {
    Args {
        config,
        simple: false,
        timeout: None,
        name: None,
        json: false,
        dead_on_error: false,
        metrics: false,
        verbose: 0,
    }
}

/// Accepts connections and never answers them.
async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });
    addr
}

async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Three sites: `a` answers as expected, `b` answers 500, `c` never answers.
async fn example_setup(server: &mut mockito::Server) -> (NamedTempFile, Vec<mockito::Mock>) {
    let mocks = vec![
        server.mock("GET", "/a").with_status(200).create_async().await,
        server.mock("GET", "/b").with_status(500).create_async().await,
    ];
    let silent = silent_server().await;

    let config = write_config(
        ".ini",
        &format!(
            "[a]\nURL = {url}/a\nTimeout = 5\nExpected = 200\n\n\
             [b]\nURL = {url}/b\nTimeout = 5\nExpected = 200\n\n\
             [c]\nURL = http://{silent}/\nTimeout = 1\nExpected = 200\n",
            url = server.url()
        ),
    );

    (config, mocks)
}

#[tokio::test]
async fn test_plain_report_for_all_sites() {
    let mut server = mockito::Server::new_async().await;
    let (config, _mocks) = example_setup(&mut server).await;
    let capture = Capture::new();

    let results = cli::run(&args(config.path().to_path_buf()), HttpFetcher::new().unwrap(), &capture)
        .await
        .unwrap();

    assert_eq!(results.alive, vec!["a"]);
    assert_eq!(results.dead, vec!["b", "c"]);
    assert_eq!(
        capture.stdout(),
        "sites that were alive: \"a\". sites that were dead: \"b\", \"c\".\n"
    );
}

#[tokio::test]
async fn test_simple_report() {
    let mut server = mockito::Server::new_async().await;
    let (config, _mocks) = example_setup(&mut server).await;
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.simple = true;

    cli::run(&args, HttpFetcher::new().unwrap(), &capture).await.unwrap();

    assert_eq!(capture.stdout(), "1 sites were up. 2 sites were unreachable.\n");
}

#[tokio::test]
async fn test_json_report() {
    let mut server = mockito::Server::new_async().await;
    let (config, _mocks) = example_setup(&mut server).await;
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.json = true;

    cli::run(&args, HttpFetcher::new().unwrap(), &capture).await.unwrap();

    assert_eq!(capture.stdout(), "{\"alive\": [\"a\"], \"dead\": [\"b\", \"c\"]}\n");
}

#[tokio::test]
async fn test_single_site_only_requests_that_site() {
    let mut server = mockito::Server::new_async().await;
    let a = server.mock("GET", "/a").with_status(200).expect(0).create_async().await;
    let b = server.mock("GET", "/b").with_status(500).expect(1).create_async().await;
    let config = write_config(
        ".ini",
        &format!(
            "[a]\nURL = {url}/a\nTimeout = 5\nExpected = 200\n\
             [b]\nURL = {url}/b\nTimeout = 5\nExpected = 200\n",
            url = server.url()
        ),
    );
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.name = Some("b".to_string());

    cli::run(&args, HttpFetcher::new().unwrap(), &capture).await.unwrap();

    assert_eq!(capture.stdout(), "b was dead.\n");
    a.assert_async().await;
    b.assert_async().await;
}

#[tokio::test]
async fn test_unknown_site_fails_without_requests() {
    let mut server = mockito::Server::new_async().await;
    let a = server.mock("GET", "/a").with_status(200).expect(0).create_async().await;
    let config = write_config(
        ".ini",
        &format!("[a]\nURL = {}/a\nTimeout = 5\nExpected = 200\n", server.url()),
    );
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.name = Some("missing".to_string());

    let err = cli::run(&args, HttpFetcher::new().unwrap(), &capture)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SiteNotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("site missing not found in config file {}", config.path().display())
    );
    assert!(capture.stdout().is_empty());
    a.assert_async().await;
}

#[tokio::test]
async fn test_timeout_override_applies_to_every_site() {
    let silent = silent_server().await;
    let config = write_config(
        ".ini",
        &format!("[slow]\nURL = http://{silent}/\nTimeout = 60\nExpected = 200\n"),
    );
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.timeout = Some(1);

    let started = std::time::Instant::now();
    let results = cli::run(&args, HttpFetcher::new().unwrap(), &capture)
        .await
        .unwrap();

    assert_eq!(results.dead, vec!["slow"]);
    assert!(started.elapsed() < std::time::Duration::from_secs(30));
}

#[tokio::test]
async fn test_refused_connection_aborts_the_run() {
    let mut server = mockito::Server::new_async().await;
    let _a = server.mock("GET", "/a").with_status(200).create_async().await;
    let closed = closed_port().await;
    let config = write_config(
        ".ini",
        &format!(
            "[a]\nURL = {}/a\nTimeout = 5\nExpected = 200\n\
             [gone]\nURL = http://{closed}/\nTimeout = 2\nExpected = 200\n",
            server.url()
        ),
    );
    let capture = Capture::new();

    let err = cli::run(&args(config.path().to_path_buf()), HttpFetcher::new().unwrap(), &capture)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { ref site, .. } if site == "gone"));
    assert!(capture.stdout().is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_dead_when_asked() {
    let closed = closed_port().await;
    let config = write_config(
        ".ini",
        &format!("[gone]\nURL = http://{closed}/\nTimeout = 2\nExpected = 200\n"),
    );
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.dead_on_error = true;
    args.simple = true;

    cli::run(&args, HttpFetcher::new().unwrap(), &capture).await.unwrap();

    assert_eq!(capture.stdout(), "0 sites were up. 1 sites were unreachable.\n");
}

#[tokio::test]
async fn test_yaml_config_and_metrics() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server.mock("GET", "/health").with_status(204).create_async().await;
    let config = write_config(
        ".yaml",
        &format!(
            "api:\n  URL: {}/health\n  Timeout: 5\n  Expected: 204\n",
            server.url()
        ),
    );
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.metrics = true;

    cli::run(&args, HttpFetcher::new().unwrap(), &capture).await.unwrap();

    assert_eq!(
        capture.stdout(),
        "sites that were alive: \"api\". sites that were dead: .\n"
    );
    assert!(capture
        .stderr()
        .contains("keeperupper_checks_total{site=\"api\",status=\"alive\"} 1"));
}

#[tokio::test]
async fn test_broken_config_is_reported_before_checks() {
    let config = write_config(".json", "{\"a\": {\"URL\": \"http://a.test\"");
    let capture = Capture::new();
    let mut args = args(config.path().to_path_buf());
    args.json = true;

    let err = cli::run(&args, HttpFetcher::new().unwrap(), &capture)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ConfigLoad { .. }));
    let line = render_error(&err.to_string(), OutputMode::Json);
    assert!(line.starts_with("{\"error\": \"unable to load config file "));
}
