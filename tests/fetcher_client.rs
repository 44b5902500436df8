use acrescimos::fetcher::{FetchError, fetch_page};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{headers, method, path},
};

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(
                    "<html><head><title>Test</title></head><body>Olá Mundo</body></html>"
                        .as_bytes(),
                )
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/test", mock_server.uri());
    let result = fetch_page(&url).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body_utf8.contains("Olá Mundo"));
    assert_eq!(result.url_final.as_str(), url);
    assert_eq!(result.charset, "UTF-8");
}

#[tokio::test]
async fn test_fetch_sends_browser_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(headers(
            "accept-language",
            vec!["pt-BR", "pt;q=0.9", "en;q=0.8"],
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body>ok</body></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetch_page(&format!("{}/", mock_server.uri())).await.unwrap();
    assert!(result.body_utf8.contains("ok"));

    let requests = mock_server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn test_fetch_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notfound"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/notfound", mock_server.uri());
    let result = fetch_page(&url).await;

    match result {
        Err(err @ FetchError::Http { .. }) => {
            assert_eq!(err.status().unwrap().as_u16(), 404);
            assert!(!err.is_timeout());
        }
        _ => panic!("Expected HTTP 404 error"),
    }
}

#[tokio::test]
async fn test_fetch_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/redirect"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/final"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes("<html><body>Final page</body></html>".as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/redirect", mock_server.uri());
    let result = fetch_page(&url).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body_utf8.contains("Final page"));
    assert!(result.url_final.as_str().ends_with("/final"));
}

#[tokio::test]
async fn test_fetch_gzip_compression() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    let original_content =
        "<html><head><title>Compressed</title></head><body>This content is gzipped!</body></html>";

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(original_content.as_bytes()).unwrap();
    let compressed_data = encoder.finish().unwrap();

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gzipped"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed_data)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .insert_header("Content-Encoding", "gzip"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/gzipped", mock_server.uri());
    let result = fetch_page(&url).await.unwrap();

    assert!(result.status.is_success());
    assert!(result.body_utf8.contains("This content is gzipped!"));
}

#[tokio::test]
async fn test_fetch_latin1_page() {
    let mock_server = MockServer::start().await;
    // "Grêmio" in ISO-8859-1
    let body: Vec<u8> = b"<html><body>Gr\xeamio</body></html>".to_vec();

    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let result = fetch_page(&format!("{}/latin1", mock_server.uri()))
        .await
        .unwrap();
    assert!(result.body_utf8.contains("Grêmio"));
    assert_eq!(result.charset, "windows-1252");
}

#[tokio::test]
async fn test_fetch_unsupported_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/image"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]) // JPEG header
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/image", mock_server.uri());
    let result = fetch_page(&url).await;

    match result {
        Err(FetchError::UnsupportedContentType(content_type)) => {
            assert_eq!(content_type, "image/jpeg");
        }
        _ => panic!("Expected UnsupportedContentType error"),
    }
}

#[tokio::test]
async fn test_fetch_body_too_large() {
    let mock_server = MockServer::start().await;

    // 6MB > 5MB limit
    let large_body = "x".repeat(6 * 1024 * 1024);

    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(large_body.as_bytes())
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/large", mock_server.uri());
    let result = fetch_page(&url).await;

    match result {
        Err(FetchError::BodyTooLarge(size)) => {
            assert_eq!(size, 6 * 1024 * 1024);
        }
        _ => panic!("Expected BodyTooLarge error"),
    }
}

#[tokio::test]
async fn test_fetch_invalid_url() {
    let result = fetch_page("not-a-valid-url").await;

    match result {
        Err(FetchError::InvalidUrl(_)) => {}
        _ => panic!("Expected InvalidUrl error"),
    }
}
