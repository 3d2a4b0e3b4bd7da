use chan_downloader::imageboards::extractors::error::ExtractorError;
use chan_downloader::imageboards::extractors::ChanExtractor;
use chan_downloader::requests::FetchError;
use chan_downloader::{FetchOutcome, Fetcher, HttpFetcher, Queue, QueueOpts, ServerConfig};
use futures::StreamExt;
use tempdir::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn server_config(mock_server: &MockServer) -> ServerConfig {
    ServerConfig {
        api_url: mock_server.uri(),
        media_url: format!("{}/media", mock_server.uri()),
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn non_success_status_is_a_fetch_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tech/threads.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = server_config(&mock_server);
    let fetcher = HttpFetcher::new(&config).unwrap();

    let result = fetcher.fetch(&config.thread_list_url("tech")).await;
    assert!(matches!(result, Err(FetchError::BadStatus { status }) if status.as_u16() == 503));

    let listing = ChanExtractor::new(&fetcher, &config)
        .list_threads("tech")
        .await;
    assert!(matches!(listing, Err(ExtractorError::Fetch { .. })));
}

#[tokio::test]
async fn streams_the_whole_body() {
    let mock_server = MockServer::start().await;
    let body: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    Mock::given(method("GET"))
        .and(path("/media/file_store/abc.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&mock_server)
        .await;

    let config = server_config(&mock_server);
    let fetcher = HttpFetcher::new(&config).unwrap();

    let mut remote = fetcher
        .fetch_stream(&config.file_url("abc.webm"))
        .await
        .unwrap();

    let mut received = Vec::new();
    while let Some(chunk) = remote.stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(remote.content_length, Some(body.len() as u64));
    assert_eq!(received, body);
}

#[tokio::test]
async fn falls_back_to_legacy_storage() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/file_store/1419180338125.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/tech/src/1419180338125.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"old picture".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = server_config(&mock_server);
    let fetcher = HttpFetcher::new(&config).unwrap();
    let dir = TempDir::new("chan-http-legacy").unwrap();
    let queue = Queue::new(config, fetcher, QueueOpts::default(), None);

    let file = chan_downloader::FileDescriptor {
        name: String::from("screenshot.png"),
        address: String::from("1419180338125.png"),
    };
    let outcome = queue.fetch_file(dir.path(), "tech", &file).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Downloaded);
    assert_eq!(
        std::fs::read(dir.path().join("screenshot.png")).unwrap(),
        b"old picture"
    );

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec![
            "/media/file_store/1419180338125.png",
            "/media/tech/src/1419180338125.png"
        ]
    );
}

#[tokio::test]
async fn downloads_a_board_then_skips_it() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tech/threads.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"page": 0, "threads": [{"no": 42}]}]"#),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tech/res/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"posts": [{"no": 42, "filename": "rust", "ext": ".png", "tim": "f00d",
                "extra_files": [{"filename": "ferris", "ext": ".gif", "tim": "beef"}]}]}"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/file_store/f00d.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png bytes".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/file_store/beef.gif"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"gif bytes".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = server_config(&mock_server);
    let fetcher = HttpFetcher::new(&config).unwrap();
    let dir = TempDir::new("chan-http-board").unwrap();
    let opts = QueueOpts {
        verbose: false,
        output: dir.path().to_path_buf(),
    };
    let queue = Queue::new(config, fetcher, opts, None);

    let first = queue.download("tech", None).await;
    let second = queue.download("tech", None).await;

    assert_eq!(first.downloaded, 2);
    assert_eq!(second.downloaded, 0);
    assert_eq!(second.already_present, 2);

    let folder = dir.path().join("8ch").join("tech").join("42");
    assert_eq!(std::fs::read(folder.join("rust.png")).unwrap(), b"png bytes");
    assert_eq!(std::fs::read(folder.join("ferris.gif")).unwrap(), b"gif bytes");
}
