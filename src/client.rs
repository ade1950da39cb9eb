//! Google Drive API client for listing, downloading and exporting files.

use reqwest::{Client, Response};
use tokio::sync::RwLock;

use crate::auth::{Authenticator, Token};
use crate::config::MIME_FOLDER;
use crate::error::{DriveError, Result};
use crate::models::{ApiErrorResponse, FileListResponse, FileRecord, FolderMetadata};

/// Base URL for Google Drive API v3.
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested for each listed file.
const LIST_FIELDS: &str = "nextPageToken, files(id, name, parents, mimeType)";

/// Authenticated client for the Drive v3 API.
pub struct DriveClient {
    auth: Authenticator,
    token: RwLock<Token>,
    http: Client,
    base_url: String,
}

impl DriveClient {
    /// Build a client that sends `token` with every request.
    ///
    /// # Arguments
    /// * `auth` - Authenticator used to refresh the token once it expires
    /// * `token` - Token from the credential store
    pub fn new(auth: Authenticator, token: Token) -> Self {
        Self {
            auth,
            token: RwLock::new(token),
            http: Client::new(),
            base_url: DRIVE_API_BASE.to_string(),
        }
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current access token, refreshed first if it has expired.
    async fn access_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }

        let mut token = self.token.write().await;
        if token.is_expired() {
            tracing::info!("Access token expired, refreshing");
            let fresh = self.auth.refresh(&token).await?;
            *token = fresh;
        }
        Ok(token.access_token.clone())
    }

    /// List the files directly under a folder, skipping trashed items and
    /// sub-folders.
    ///
    /// # Arguments
    /// * `parent_id` - The ID of the parent folder
    pub async fn list_files(&self, parent_id: &str) -> Result<Vec<FileRecord>> {
        let query = list_query(parent_id);
        let mut all_files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let token = self.access_token().await?;
            let mut request = self
                .http
                .get(format!("{}/files", self.base_url))
                .bearer_auth(&token)
                .query(&[("q", query.as_str()), ("fields", LIST_FIELDS)]);

            if let Some(ref page) = page_token {
                request = request.query(&[("pageToken", page)]);
            }

            tracing::debug!("listing files in {}", parent_id);
            let response = check_status(request.send().await?).await?;
            let list_response: FileListResponse = response.json().await?;
            all_files.extend(list_response.files);

            match list_response.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(all_files)
    }

    /// Resolve a folder ID to its name.
    pub async fn folder_name(&self, folder_id: &str) -> Result<String> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{}/files/{}", self.base_url, folder_id))
            .bearer_auth(&token)
            .query(&[("fields", "name")])
            .send()
            .await?;

        let metadata: FolderMetadata = check_status(response).await?.json().await?;
        Ok(metadata.name)
    }

    /// Download the stored content of a file.
    pub async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let token = self.access_token().await?;

        tracing::debug!("downloading {}", file_id);
        let response = self
            .http
            .get(format!("{}/files/{}", self.base_url, file_id))
            .bearer_auth(&token)
            .query(&[("alt", "media")])
            .send()
            .await?;

        let bytes = check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Convert a native document server-side and download the result.
    ///
    /// # Arguments
    /// * `file_id` - The ID of the document to export
    /// * `mime_type` - Target format, e.g. `application/pdf`
    pub async fn export(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        let token = self.access_token().await?;

        tracing::debug!("exporting {} as {}", file_id, mime_type);
        let response = self
            .http
            .get(format!("{}/files/{}/export", self.base_url, file_id))
            .bearer_auth(&token)
            .query(&[("mimeType", mime_type)])
            .send()
            .await?;

        let bytes = check_status(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Query for the non-trashed, non-folder children of `parent_id`.
pub fn list_query(parent_id: &str) -> String {
    format!(
        "\"{}\" in parents and trashed=false and mimeType != '{}'",
        parent_id, MIME_FOLDER
    )
}

/// Turn a non-success response into an [`DriveError::ApiError`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&error_body) {
        return Err(DriveError::ApiError {
            status: api_error.error.code,
            message: api_error.error.message,
        });
    }
    Err(DriveError::ApiError {
        status: status.as_u16(),
        message: error_body,
    })
}
