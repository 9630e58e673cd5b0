//! Document management operations.

use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::format::format_date;
use crate::types::{
    CreateDocumentOptions, Document, DocumentCollection, DocumentQuery, DocumentSource,
    DocumentStatus, FileSource, FileUpload,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;

/// Body for creating a document from a URL.
#[derive(Debug, Serialize)]
struct CreateFromUrlRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnails: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    non_svg: Option<bool>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    name: &'a str,
}

/// Response from listing documents.
#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    document_collection: DocumentCollection,
}

impl Client {
    /// Create a document from a URL or uploaded file contents.
    ///
    /// URL sources are sent as JSON to the API endpoint; file sources are
    /// sent as `multipart/form-data` to the upload endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for an empty URL, or
    /// [`ClientError::Remote`] if the server rejects the document.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::{Client, CreateDocumentOptions, DocumentSource};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let source = DocumentSource::Url("https://example.com/report.pdf".into());
    /// let options = CreateDocumentOptions::default().with_name("Report");
    /// let document = client.create_document(source, &options).await?;
    /// println!("Created {} ({:?})", document.id, document.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_document(
        &self,
        source: DocumentSource,
        options: &CreateDocumentOptions,
    ) -> Result<Document> {
        let response = match source {
            DocumentSource::Url(url) => {
                if url.trim().is_empty() {
                    return Err(ClientError::InvalidArgument(
                        "either url or file is required".to_string(),
                    ));
                }
                let body = CreateFromUrlRequest {
                    url: &url,
                    name: options.name.as_deref(),
                    thumbnails: options.thumbnails_param(),
                    non_svg: options.non_svg,
                };
                self.post("documents", &body).await?
            }
            DocumentSource::File(file) => {
                let form = upload_form(file, options);
                self.post_multipart("documents", form).await?
            }
        };

        let document: Document = self.handle_response(response, StatusCode::CREATED).await?;
        tracing::info!(
            document_id = %document.id,
            status = ?document.status,
            "Document created"
        );
        Ok(document)
    }

    /// Create a document by uploading a local file or stream.
    ///
    /// Paths are opened and closed by this call. Streams are read to the end
    /// and left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, or
    /// [`ClientError::Remote`] if the server rejects the document.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::{Client, CreateDocumentOptions};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let options = CreateDocumentOptions::default().with_name("Leaves of Grass");
    /// let document = client
    ///     .create_document_from_file("leaves-of-grass.pdf".into(), &options)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_document_from_file(
        &self,
        source: FileSource,
        options: &CreateDocumentOptions,
    ) -> Result<Document> {
        let upload = match source {
            FileSource::Path(path) => {
                let mut file = tokio::fs::File::open(&path).await?;
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).await?;

                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| FileUpload::DEFAULT_FILENAME.to_string());
                FileUpload::new(bytes).with_filename(filename)
            }
            FileSource::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader.read_to_end(&mut bytes).await?;
                FileUpload::new(bytes)
            }
        };

        self.create_document(DocumentSource::File(upload), options).await
    }

    /// Get a document by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Remote`] if the document is not found or the
    /// request is rejected.
    pub async fn get_document(&self, document_id: &str) -> Result<Document> {
        let path = format!("documents/{}", urlencoding::encode(document_id));
        let response = self.get(&path).await?;
        self.handle_response(response, StatusCode::OK).await
    }

    /// List documents, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] if a date filter is an empty
    /// string, or [`ClientError::Remote`] if the request is rejected.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::{Client, DocumentQuery};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let query = DocumentQuery::default()
    ///     .with_limit(10)
    ///     .created_before(chrono::Utc::now());
    /// let collection = client.get_documents(&query).await?;
    /// for document in collection.entries {
    ///     println!("{}: {}", document.id, document.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_documents(&self, query: &DocumentQuery) -> Result<DocumentCollection> {
        let mut query_params = Vec::new();

        if let Some(limit) = query.limit {
            query_params.push(format!("limit={}", limit));
        }
        if let Some(ref date) = query.created_before {
            let date = format_date(date.clone())?;
            query_params.push(format!("created_before={}", urlencoding::encode(&date)));
        }
        if let Some(ref date) = query.created_after {
            let date = format_date(date.clone())?;
            query_params.push(format!("created_after={}", urlencoding::encode(&date)));
        }

        let path = if query_params.is_empty() {
            "documents".to_string()
        } else {
            format!("documents?{}", query_params.join("&"))
        };

        let response = self.get(&path).await?;
        let list_response: ListDocumentsResponse =
            self.handle_response(response, StatusCode::OK).await?;

        Ok(list_response.document_collection)
    }

    /// Rename a document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Remote`] if the document is not found or the
    /// request is rejected.
    pub async fn update_document(&self, document_id: &str, name: &str) -> Result<Document> {
        let path = format!("documents/{}", urlencoding::encode(document_id));
        let response = self.put(&path, &UpdateRequest { name }).await?;
        self.handle_response(response, StatusCode::OK).await
    }

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Remote`] unless the server answers 204.
    pub async fn delete_document(&self, document_id: &str) -> Result<()> {
        let path = format!("documents/{}", urlencoding::encode(document_id));
        let response = self.delete(&path).await?;
        self.handle_no_content(response).await?;
        tracing::info!(document_id = %document_id, "Document deleted");
        Ok(())
    }

    /// Check whether a document has finished converting.
    ///
    /// Returns `true` only for the `done` status. Failed, in-progress and
    /// unrecognized statuses all return `false`.
    ///
    /// # Errors
    ///
    /// Returns an error only if fetching the document fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// if client.ready_to_view("2da6cf9261824fb0a4fe532f94d14625").await? {
    ///     println!("Document can be viewed");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn ready_to_view(&self, document_id: &str) -> Result<bool> {
        let document = self.get_document(document_id).await?;
        Ok(document.status == DocumentStatus::Done)
    }
}

fn upload_form(file: FileUpload, options: &CreateDocumentOptions) -> Form {
    let mut form = Form::new().part("file", Part::bytes(file.bytes).file_name(file.filename));

    if let Some(ref name) = options.name {
        form = form.text("name", name.clone());
    }
    if let Some(thumbnails) = options.thumbnails_param() {
        form = form.text("thumbnails", thumbnails);
    }
    if let Some(non_svg) = options.non_svg {
        form = form.text("non_svg", non_svg.to_string());
    }
    form
}
