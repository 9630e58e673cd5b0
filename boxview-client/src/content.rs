//! Rendered content retrieval.

use crate::client::{remote_error, response_mimetype, Client};
use crate::error::{ClientError, Result};
use crate::types::{ContentExtension, Thumbnail};
use reqwest::header::RETRY_AFTER;
use reqwest::{Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

fn content_path(document_id: &str, extension: Option<ContentExtension>) -> String {
    format!(
        "documents/{}/content{}",
        urlencoding::encode(document_id),
        extension.map(ContentExtension::as_str).unwrap_or_default()
    )
}

fn parse_extension(extension: Option<&str>) -> Result<Option<ContentExtension>> {
    extension
        .map(|ext| ext.parse::<ContentExtension>())
        .transpose()
}

/// Stream a response body into `dest` and flush it.
async fn copy_body<W>(mut response: Response, dest: &mut W) -> Result<u64>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        dest.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    dest.flush().await?;
    Ok(written)
}

impl Client {
    /// Download a document's rendered content into a writer.
    ///
    /// Without an extension the server returns its default rendering. With
    /// `.pdf` or `.zip` it returns a PDF or a ZIP of the rendered assets.
    /// The body is streamed, never fully buffered.
    ///
    /// # Returns
    ///
    /// Returns the content's media type, without parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for any extension other than
    /// `.pdf` or `.zip` (no request is sent), [`ClientError::Remote`] for a
    /// non-200 response, or [`ClientError::Io`] if writing fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::Client;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let mut pdf = Vec::new();
    /// let mimetype = client
    ///     .get_document_content(&mut pdf, "2da6cf9261824fb0a4fe532f94d14625", Some(".pdf"))
    ///     .await?;
    /// println!("{} bytes of {}", pdf.len(), mimetype);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_document_content<W>(
        &self,
        dest: &mut W,
        document_id: &str,
        extension: Option<&str>,
    ) -> Result<String>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let extension = parse_extension(extension)?;
        let response = self.get(&content_path(document_id, extension)).await?;
        let response = self.expect_status(response, StatusCode::OK).await?;

        let mimetype = response_mimetype(&response)?;
        let written = copy_body(response, dest).await?;
        tracing::debug!(
            document_id = %document_id,
            bytes = written,
            mimetype = %mimetype,
            "Content downloaded"
        );

        Ok(mimetype)
    }

    /// Download a document's content into memory.
    ///
    /// # Returns
    ///
    /// Returns the raw content and its media type.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_document_content`].
    pub async fn get_document_content_to_string(
        &self,
        document_id: &str,
        extension: Option<&str>,
    ) -> Result<(Vec<u8>, String)> {
        let mut buffer = Vec::new();
        let mimetype = self
            .get_document_content(&mut buffer, document_id, extension)
            .await?;
        Ok((buffer, mimetype))
    }

    /// Download a document's content into a file.
    ///
    /// The file is created (or truncated) and closed before this returns,
    /// whether the download succeeds or not.
    ///
    /// # Errors
    ///
    /// Same as [`Client::get_document_content`], plus [`ClientError::Io`] if
    /// the file cannot be created.
    pub async fn get_document_content_to_file(
        &self,
        path: impl AsRef<Path>,
        document_id: &str,
        extension: Option<&str>,
    ) -> Result<String> {
        parse_extension(extension)?;

        let mut file = tokio::fs::File::create(path.as_ref()).await?;
        self.get_document_content(&mut file, document_id, extension).await
    }

    /// Fetch only the media type of a document's content.
    ///
    /// Issues a HEAD request, so no content is transferred.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Remote`] for a non-200 response, or
    /// [`ClientError::InvalidResponse`] if no `Content-Type` is returned.
    pub async fn get_document_content_mimetype(&self, document_id: &str) -> Result<String> {
        let response = self.head(&content_path(document_id, None)).await?;
        let response = self.expect_status(response, StatusCode::OK).await?;
        response_mimetype(&response)
    }

    /// Download a thumbnail of a document's first page.
    ///
    /// Thumbnails are generated on demand. While generation is in progress
    /// the server answers 202 and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for a zero dimension, or
    /// [`ClientError::Remote`] for any status other than 200 or 202.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::{Client, Thumbnail};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let mut image = Vec::new();
    /// let document_id = "2da6cf9261824fb0a4fe532f94d14625";
    /// match client.get_thumbnail(&mut image, document_id, 128, 128).await? {
    ///     Thumbnail::Ready { mimetype } => println!("{} bytes of {}", image.len(), mimetype),
    ///     Thumbnail::Pending { retry_after } => println!("retry after {:?}", retry_after),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_thumbnail<W>(
        &self,
        dest: &mut W,
        document_id: &str,
        width: u32,
        height: u32,
    ) -> Result<Thumbnail>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        if width == 0 || height == 0 {
            return Err(ClientError::InvalidArgument(format!(
                "thumbnail dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let path = format!(
            "documents/{}/thumbnail?width={}&height={}",
            urlencoding::encode(document_id),
            width,
            height
        );
        let response = self.get(&path).await?;

        match response.status() {
            StatusCode::OK => {
                let mimetype = response_mimetype(&response)?;
                copy_body(response, dest).await?;
                Ok(Thumbnail::Ready { mimetype })
            }
            StatusCode::ACCEPTED => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                Ok(Thumbnail::Pending { retry_after })
            }
            _ => Err(remote_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_path() {
        assert_eq!(content_path("abc", None), "documents/abc/content");
        assert_eq!(
            content_path("abc", Some(ContentExtension::Pdf)),
            "documents/abc/content.pdf"
        );
        assert_eq!(
            content_path("abc", Some(ContentExtension::Zip)),
            "documents/abc/content.zip"
        );
    }

    #[test]
    fn test_parse_extension() {
        assert_eq!(parse_extension(None).unwrap(), None);
        assert_eq!(
            parse_extension(Some(".zip")).unwrap(),
            Some(ContentExtension::Zip)
        );
        assert!(matches!(
            parse_extension(Some(".docx")),
            Err(ClientError::InvalidArgument(_))
        ));
    }
}
