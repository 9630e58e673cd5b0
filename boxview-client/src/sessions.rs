//! Viewing session operations.

use crate::client::Client;
use crate::error::Result;
use crate::format::format_date;
use crate::types::{Session, SessionOptions, Theme};
use reqwest::StatusCode;
use serde::Serialize;

/// Body for creating a session.
#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    document_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_downloadable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_text_selectable: Option<bool>,
}

impl Client {
    /// Create a viewing session for a converted document.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`](crate::ClientError::InvalidArgument)
    /// if `expires_at` is an empty string, or
    /// [`ClientError::Remote`](crate::ClientError::Remote) if the server
    /// refuses the session (e.g. the document is not ready yet).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use boxview_client::{Client, SessionOptions, Theme};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("my-api-key")?;
    /// let options = SessionOptions::default().with_duration(60);
    /// let session = client
    ///     .create_session("2da6cf9261824fb0a4fe532f94d14625", &options)
    ///     .await?;
    /// println!("{}", client.session_view_url(&session.id, Some(Theme::Dark)));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_session(
        &self,
        document_id: &str,
        options: &SessionOptions,
    ) -> Result<Session> {
        let expires_at = options.expires_at.clone().map(format_date).transpose()?;

        let body = CreateSessionRequest {
            document_id,
            duration: options.duration,
            expires_at,
            is_downloadable: options.is_downloadable,
            is_text_selectable: options.is_text_selectable,
        };

        let response = self.post("sessions", &body).await?;
        let session: Session = self.handle_response(response, StatusCode::CREATED).await?;
        tracing::debug!(
            document_id = %document_id,
            expires_at = %session.expires_at,
            "Session created"
        );
        Ok(session)
    }

    /// URL of the hosted viewer for a session.
    pub fn session_view_url(&self, session_id: &str, theme: Option<Theme>) -> String {
        let url = format!(
            "{}/{}/view",
            self.config().session_url().trim_end_matches('/'),
            urlencoding::encode(session_id)
        );
        match theme {
            Some(theme) => format!("{}?theme={}", url, theme.as_str()),
            None => url,
        }
    }
}
