//! Integration tests for boxview-client.
//!
//! These tests verify the client API surface without requiring a running server.

use boxview_client::{
    format_date, mimetype_from_content_type, Client, ClientConfig, ClientError,
    CreateDocumentOptions, DocumentSource, FileUpload,
};
use chrono::{NaiveDate, Utc};

#[test]
fn test_client_construction() {
    let client = Client::new("my-api-key");
    assert!(client.is_ok());
}

#[test]
fn test_client_requires_api_key() {
    match Client::new("") {
        Err(ClientError::InvalidArgument(msg)) => assert!(msg.contains("API key")),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_client_from_env_without_key() {
    std::env::remove_var("BOX_VIEW_API_KEY");
    assert!(matches!(
        Client::from_env(),
        Err(ClientError::InvalidArgument(_))
    ));
}

#[test]
fn test_client_invalid_url() {
    let config = ClientConfig::new("key")
        .unwrap()
        .with_base_url("view-api.box.com/1");

    match Client::with_config(config) {
        Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("http://")),
        _ => panic!("Expected InvalidUrl error"),
    }
}

#[test]
fn test_client_builder_pattern() {
    use std::time::Duration;

    let config = ClientConfig::new("my-api-key")
        .unwrap()
        .with_base_url("https://view-api.example.com/1/")
        .with_timeout(Duration::from_secs(60));

    let client = Client::with_config(config).unwrap();
    assert_eq!(client.config().timeout(), Duration::from_secs(60));
}

#[test]
fn test_format_date_variants() {
    let now = Utc::now().naive_utc();
    let formatted = format_date(now).unwrap();

    assert_eq!(formatted, now.format("%Y-%m-%dT%H:%M:%S").to_string());
    assert_eq!(format_date(formatted.clone()).unwrap(), formatted);

    let date = NaiveDate::from_ymd_opt(2013, 8, 30).unwrap();
    assert_eq!(format_date(date).unwrap(), "2013-08-30");
}

#[test]
fn test_mimetype_extraction() {
    assert_eq!(mimetype_from_content_type("text/plain"), "text/plain");
    assert_eq!(
        mimetype_from_content_type("text/plain; charset=utf-8"),
        "text/plain"
    );
}

#[test]
fn test_document_source_requires_url_or_file() {
    assert!(matches!(
        DocumentSource::from_parts(None, None),
        Err(ClientError::InvalidArgument(_))
    ));
    assert!(DocumentSource::from_parts(None, Some(FileUpload::new(Vec::<u8>::new()))).is_ok());
}

#[tokio::test]
async fn test_create_document_with_empty_url_fails_without_request() {
    // Nothing listens here; a request would surface as Http, not InvalidArgument.
    let config = ClientConfig::new("key")
        .unwrap()
        .with_base_url("http://127.0.0.1:9");
    let client = Client::with_config(config).unwrap();

    let result = client
        .create_document(
            DocumentSource::Url(String::new()),
            &CreateDocumentOptions::default().with_name("Test Document"),
        )
        .await;

    assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
}

#[test]
fn test_error_display() {
    let error = ClientError::InvalidArgument("bad extension".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Invalid argument"));
    assert!(display.contains("bad extension"));
}

#[test]
fn test_remote_error_display() {
    let error = ClientError::Remote {
        status: 404,
        message: "Not found".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("404"));
    assert!(display.contains("Not found"));
    assert_eq!(error.status(), Some(404));
}
