//! File API HTTP Client
//!
//! [`FileApi`] is the seam between controllers and the REST API;
//! [`HttpClient`] implements it over reqwest with a bearer token read from
//! the session store on every call.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response, StatusCode};
use std::path::Path;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::model::{ApiErrorBody, AuthResponse, Credentials, FileRecord, TagsUpdate, ViewStats};
use crate::session::SessionStore;
use crate::validation::{mime_from_filename, UploadPolicy, ValidationError};

/// Session store shared across the client and controllers
pub type SharedSession = Arc<dyn SessionStore + Send + Sync>;

/// Operations offered by the file API
#[async_trait]
pub trait FileApi: Send + Sync {
    /// `POST /api/auth/login`, returns the session token
    async fn login(&self, credentials: &Credentials) -> ClientResult<String>;

    /// `POST /api/auth/register`, returns the session token
    async fn register(&self, credentials: &Credentials) -> ClientResult<String>;

    /// `GET /api/files/list`
    async fn list_files(&self) -> ClientResult<Vec<FileRecord>>;

    /// `POST /api/files/upload` (multipart, part `file`)
    async fn upload(&self, file: UploadFile) -> ClientResult<FileRecord>;

    /// `POST /api/files/:id/tags` with the full replacement list
    async fn update_tags(&self, id: &str, tags: &[String]) -> ClientResult<()>;

    /// `DELETE /api/files/:id`
    async fn delete_file(&self, id: &str) -> ClientResult<()>;

    /// `POST /api/files/:id/share`
    async fn share(&self, id: &str) -> ClientResult<FileRecord>;

    /// `GET /api/files/stats/:id`
    async fn view_count(&self, id: &str) -> ClientResult<u64>;
}

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    ///
    /// Unknown extensions fail with the same error as a disallowed type.
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        Self::from_path_with_policy(path, &UploadPolicy::default()).await
    }

    /// Like [`from_path`](Self::from_path), but the type and the size on
    /// disk are checked against `policy` before the contents are read.
    pub async fn from_path_with_policy(path: &Path, policy: &UploadPolicy) -> ClientResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_from_filename(&name)
            .ok_or_else(|| ValidationError::UnsupportedType(name.clone()))?;

        let size = tokio::fs::metadata(path).await?.len();
        policy.check(mime_type, size)?;
        let bytes = tokio::fs::read(path).await?;

        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// reqwest implementation of [`FileApi`]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SharedSession,
}

impl HttpClient {
    pub fn new(config: &ApiConfig, session: SharedSession) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_url(&self, id: &str, suffix: &str) -> String {
        format!("{}/api/files/{}{}", self.base_url, urlencoding::encode(id), suffix)
    }

    fn bearer(&self) -> ClientResult<String> {
        self.session
            .token()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
            .ok_or(ClientError::NoSession)
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> ClientResult<String> {
        let response = self
            .client
            .post(self.url(path))
            .json(credentials)
            .send()
            .await?;

        // A 401 here means bad credentials, not an expired session
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let auth: AuthResponse = response.json().await?;
        Ok(auth.token)
    }
}

/// Map non-2xx responses; 401 becomes [`ClientError::Unauthorized`]
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED {
        Err(ClientError::Unauthorized)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ApiErrorBody>(&text).ok();

    tracing::debug!(status, body = %text, "API request failed");
    ClientError::api(status, body)
}

#[async_trait]
impl FileApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        self.authenticate("/api/auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> ClientResult<String> {
        self.authenticate("/api/auth/register", credentials).await
    }

    async fn list_files(&self) -> ClientResult<Vec<FileRecord>> {
        let response = self
            .client
            .get(self.url("/api/files/list"))
            .header("Authorization", self.bearer()?)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn upload(&self, file: UploadFile) -> ClientResult<FileRecord> {
        let size = file.size();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        tracing::info!(name = %file.name, size, "Uploading file");

        let response = self
            .client
            .post(self.url("/api/files/upload"))
            .header("Authorization", self.bearer()?)
            .multipart(form)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn update_tags(&self, id: &str, tags: &[String]) -> ClientResult<()> {
        let response = self
            .client
            .post(self.file_url(id, "/tags"))
            .header("Authorization", self.bearer()?)
            .json(&TagsUpdate {
                tags: tags.to_vec(),
            })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn delete_file(&self, id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.file_url(id, ""))
            .header("Authorization", self.bearer()?)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn share(&self, id: &str) -> ClientResult<FileRecord> {
        let response = self
            .client
            .post(self.file_url(id, "/share"))
            .header("Authorization", self.bearer()?)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn view_count(&self, id: &str) -> ClientResult<u64> {
        let url = format!(
            "{}/api/files/stats/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        let response = self
            .client
            .get(url)
            .header("Authorization", self.bearer()?)
            .send()
            .await?;

        let stats: ViewStats = check(response).await?.json().await?;
        Ok(stats.views)
    }
}
