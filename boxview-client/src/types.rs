//! Type definitions for the Box View client.

use crate::error::{ClientError, Result};
use crate::format::DateParam;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::AsyncRead;

/// A document uploaded to Box View.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: String,
    /// Resource type, always `"document"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Conversion status.
    pub status: DocumentStatus,
    /// Document name.
    #[serde(default)]
    pub name: String,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last modified.
    pub modified_at: DateTime<Utc>,
}

/// Document conversion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Waiting for conversion.
    Queued,
    /// Conversion in progress.
    Processing,
    /// Converted and viewable.
    Done,
    /// Conversion failed.
    Error,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A page of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCollection {
    /// Number of documents matching the query.
    pub total_count: u64,
    /// Documents in this page.
    pub entries: Vec<Document>,
}

/// A viewing session for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier.
    pub id: String,
    /// Resource type, always `"session"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the session stops granting access.
    pub expires_at: DateTime<Utc>,
    /// Viewer URLs, returned by newer API revisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<SessionUrls>,
}

/// URLs for rendering a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUrls {
    /// Hosted viewer page.
    pub view: String,
    /// Base URL of the converted assets.
    pub assets: String,
    /// Realtime conversion updates, present while the document converts.
    #[serde(default)]
    pub realtime: Option<String>,
}

/// File contents to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// File name sent in the multipart part.
    pub filename: String,
}

impl FileUpload {
    /// Name used when the source has none.
    pub const DEFAULT_FILENAME: &'static str = "file";

    /// Create an upload with the default file name.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: Self::DEFAULT_FILENAME.to_string(),
        }
    }

    /// Set the file name.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Where a new document's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A publicly reachable URL that Box View fetches itself.
    Url(String),
    /// File contents uploaded with the request.
    File(FileUpload),
}

impl DocumentSource {
    /// Pick a source from optional parts. The URL wins when both are set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if neither is given.
    pub fn from_parts(url: Option<String>, file: Option<FileUpload>) -> Result<Self> {
        match (url, file) {
            (Some(url), _) => Ok(Self::Url(url)),
            (None, Some(file)) => Ok(Self::File(file)),
            (None, None) => Err(ClientError::InvalidArgument(
                "either url or file is required".to_string(),
            )),
        }
    }
}

impl From<FileUpload> for DocumentSource {
    fn from(file: FileUpload) -> Self {
        Self::File(file)
    }
}

/// A local file to upload, by path or as an open stream.
pub enum FileSource {
    /// Opened and read by the client.
    Path(PathBuf),
    /// Read to the end by the client. Uploaded as `file`.
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

impl FileSource {
    /// Wrap an async reader.
    pub fn reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self::Reader(Box::new(reader))
    }
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&std::path::Path> for FileSource {
    fn from(path: &std::path::Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Optional settings for document creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDocumentOptions {
    /// Document name.
    pub name: Option<String>,
    /// Thumbnail sizes to pre-render, as `(width, height)`.
    pub thumbnails: Vec<(u32, u32)>,
    /// Render pages as HTML instead of SVG.
    pub non_svg: Option<bool>,
}

impl CreateDocumentOptions {
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_thumbnail(mut self, width: u32, height: u32) -> Self {
        self.thumbnails.push((width, height));
        self
    }

    #[must_use]
    pub fn with_non_svg(mut self, non_svg: bool) -> Self {
        self.non_svg = Some(non_svg);
        self
    }

    /// Thumbnail sizes in wire form, e.g. `128x128,256x256`.
    pub(crate) fn thumbnails_param(&self) -> Option<String> {
        if self.thumbnails.is_empty() {
            return None;
        }
        Some(
            self.thumbnails
                .iter()
                .map(|(w, h)| format!("{}x{}", w, h))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Filters for listing documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQuery {
    /// Maximum number of documents to return.
    pub limit: Option<u32>,
    /// Only documents created before this moment.
    pub created_before: Option<DateParam>,
    /// Only documents created after this moment.
    pub created_after: Option<DateParam>,
}

impl DocumentQuery {
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn created_before(mut self, date: impl Into<DateParam>) -> Self {
        self.created_before = Some(date.into());
        self
    }

    #[must_use]
    pub fn created_after(mut self, date: impl Into<DateParam>) -> Self {
        self.created_after = Some(date.into());
        self
    }
}

/// Optional settings for session creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Session lifetime in minutes.
    pub duration: Option<u32>,
    /// Absolute expiry. Takes precedence over `duration` server-side.
    pub expires_at: Option<DateParam>,
    /// Allow downloading the original file.
    pub is_downloadable: Option<bool>,
    /// Allow selecting text in the viewer.
    pub is_text_selectable: Option<bool>,
}

impl SessionOptions {
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: impl Into<DateParam>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    #[must_use]
    pub fn downloadable(mut self, value: bool) -> Self {
        self.is_downloadable = Some(value);
        self
    }

    #[must_use]
    pub fn text_selectable(mut self, value: bool) -> Self {
        self.is_text_selectable = Some(value);
        self
    }
}

/// Rendered content formats other than the default HTML assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentExtension {
    /// The document as a PDF.
    Pdf,
    /// A ZIP archive of the rendered assets.
    Zip,
}

impl ContentExtension {
    /// The path suffix, including the dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Zip => ".zip",
        }
    }
}

impl FromStr for ContentExtension {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ".pdf" => Ok(Self::Pdf),
            ".zip" => Ok(Self::Zip),
            other => Err(ClientError::InvalidArgument(format!(
                "invalid content extension {:?}, allowed: .pdf, .zip",
                other
            ))),
        }
    }
}

impl fmt::Display for ContentExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a thumbnail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// The image was written to the destination.
    Ready {
        /// Image media type.
        mimetype: String,
    },
    /// The thumbnail is still being generated.
    Pending {
        /// Server-suggested wait before asking again.
        retry_after: Option<Duration>,
    },
}

/// Viewer color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Value of the `theme` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_deserialize() {
        let doc: Document = serde_json::from_value(json!({
            "type": "document",
            "id": "2da6cf9261824fb0a4fe532f94d14625",
            "status": "processing",
            "name": "Leaves of Grass",
            "created_at": "2013-08-30T00:17:37Z",
            "modified_at": "2013-08-30T00:17:37Z"
        }))
        .unwrap();

        assert_eq!(doc.kind, "document");
        assert_eq!(doc.status, DocumentStatus::Processing);
        assert_eq!(doc.created_at.to_rfc3339(), "2013-08-30T00:17:37+00:00");
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let status: DocumentStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, DocumentStatus::Unknown);
    }

    #[test]
    fn test_source_from_parts() {
        assert!(matches!(
            DocumentSource::from_parts(None, None),
            Err(ClientError::InvalidArgument(_))
        ));
        let upload = FileUpload::new(b"x".to_vec());
        assert_eq!(
            DocumentSource::from_parts(Some("https://a/b.pdf".into()), Some(upload)).unwrap(),
            DocumentSource::Url("https://a/b.pdf".into())
        );
        assert_eq!(
            DocumentSource::from_parts(None, Some(FileUpload::new(b"x".to_vec()))).unwrap(),
            DocumentSource::File(FileUpload::new(b"x".to_vec()))
        );
    }

    #[test]
    fn test_content_extension_parse() {
        assert_eq!(".pdf".parse::<ContentExtension>().unwrap(), ContentExtension::Pdf);
        assert_eq!(".zip".parse::<ContentExtension>().unwrap(), ContentExtension::Zip);
        for bad in [".docx", "pdf", "", ".PDF"] {
            assert!(matches!(
                bad.parse::<ContentExtension>(),
                Err(ClientError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_thumbnails_param() {
        let options = CreateDocumentOptions::default();
        assert_eq!(options.thumbnails_param(), None);

        let options = options.with_thumbnail(128, 128).with_thumbnail(256, 192);
        assert_eq!(options.thumbnails_param().as_deref(), Some("128x128,256x192"));
    }
}
