//! Type-safe Rust client for the Box View document viewing API.
//!
//! Box View converts documents (PDF, Office, ...) into web-viewable
//! renderings. This crate maps the REST API onto typed async calls.
//!
//! # Features
//!
//! - Document management (create from URL or upload, get, list, rename, delete)
//! - Conversion status polling via [`Client::ready_to_view`]
//! - Content download as a stream, in memory or to a file (PDF/ZIP)
//! - Thumbnail download
//! - Viewing sessions and viewer URLs
//!
//! # Example
//!
//! ```no_run
//! use boxview_client::{Client, CreateDocumentOptions, DocumentSource, SessionOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(std::env::var("BOX_VIEW_API_KEY")?)?;
//!
//! let document = client
//!     .create_document(
//!         DocumentSource::Url("https://example.com/report.pdf".into()),
//!         &CreateDocumentOptions::default().with_name("Report"),
//!     )
//!     .await?;
//!
//! if client.ready_to_view(&document.id).await? {
//!     let session = client
//!         .create_session(&document.id, &SessionOptions::default())
//!         .await?;
//!     println!("{}", client.session_view_url(&session.id, None));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Validation failures are
//! reported as [`ClientError::InvalidArgument`] before any request is sent;
//! unexpected HTTP statuses become [`ClientError::Remote`]:
//!
//! ```no_run
//! # use boxview_client::{Client, ClientError};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new("my-api-key")?;
//! match client.get_document("missing").await {
//!     Ok(document) => println!("Found: {}", document.name),
//!     Err(ClientError::Remote { status: 404, .. }) => println!("Document not found"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod content;
mod documents;
mod error;
mod format;
mod sessions;
mod types;

pub use client::Client;
pub use config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_SESSION_URL, DEFAULT_TIMEOUT, DEFAULT_UPLOAD_URL,
};
pub use error::{ClientError, Result};
pub use format::{format_date, mimetype_from_content_type, DateParam};
pub use types::{
    ContentExtension, CreateDocumentOptions, Document, DocumentCollection, DocumentQuery,
    DocumentSource, DocumentStatus, FileSource, FileUpload, Session, SessionOptions, SessionUrls,
    Theme, Thumbnail,
};
