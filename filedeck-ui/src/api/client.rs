//! HTTP API Client
//!
//! Functions for communicating with the FileDeck REST API. Every request is
//! aborted after [`REQUEST_TIMEOUT_MS`]; authenticated calls read the bearer
//! token from local storage at send time.

use filedeck::model::{ApiErrorBody, AuthResponse, TagsUpdate, ViewStats};
use filedeck::{ClientError, ClientResult, Credentials, FileRecord, SessionStore};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use web_sys::{AbortController, FormData};

use crate::state::LocalStorageSession;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Client-wide request timeout
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// API base URL fixed at build time through `FILEDECK_API_URL`
pub fn get_api_base() -> &'static str {
    option_env!("FILEDECK_API_URL")
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
}

fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn file_endpoint(id: &str, suffix: &str) -> String {
    let id = String::from(js_sys::encode_uri_component(id));
    endpoint(get_api_base(), &format!("/api/files/{}{}", id, suffix))
}

/// Aborts the request it is attached to once the timeout fires.
/// Dropping it cancels the timer.
struct Deadline {
    controller: AbortController,
    _timer: Timeout,
}

impl Deadline {
    fn start() -> ClientResult<Self> {
        let controller = AbortController::new()
            .map_err(|e| ClientError::Network(format!("{:?}", e)))?;
        let abort = controller.clone();
        let timer = Timeout::new(REQUEST_TIMEOUT_MS, move || abort.abort());

        Ok(Self {
            controller,
            _timer: timer,
        })
    }

    fn attach(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.abort_signal(Some(&self.controller.signal()))
    }
}

fn transport_error(err: gloo_net::Error) -> ClientError {
    match err {
        gloo_net::Error::JsError(e) if e.name == "AbortError" => ClientError::Timeout,
        gloo_net::Error::SerdeError(e) => ClientError::Decode(e.to_string()),
        other => ClientError::Network(other.to_string()),
    }
}

fn bearer() -> ClientResult<String> {
    LocalStorageSession
        .token()
        .map(|t| format!("Bearer {}", t))
        .ok_or(ClientError::NoSession)
}

/// Map non-2xx responses; 401 becomes [`ClientError::Unauthorized`]
async fn check(response: Response) -> ClientResult<Response> {
    if response.ok() {
        Ok(response)
    } else if response.status() == 401 {
        Err(ClientError::Unauthorized)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ApiErrorBody>(&text).ok();

    ClientError::api(status, body)
}

async fn authenticate(path: &str, credentials: &Credentials) -> ClientResult<String> {
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::post(&endpoint(get_api_base(), path)))
        .json(credentials)
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    // A 401 here means bad credentials, not an expired session
    if !response.ok() {
        return Err(api_error(response).await);
    }

    let auth: AuthResponse = response.json().await.map_err(transport_error)?;
    Ok(auth.token)
}

// ============ API Functions ============

pub async fn login(credentials: &Credentials) -> ClientResult<String> {
    authenticate("/api/auth/login", credentials).await
}

/// Only email and password are sent
pub async fn register(credentials: &Credentials) -> ClientResult<String> {
    authenticate("/api/auth/register", credentials).await
}

/// Fetch all files of the signed-in user
pub async fn fetch_files() -> ClientResult<Vec<FileRecord>> {
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::get(&endpoint(get_api_base(), "/api/files/list")))
        .header("Authorization", &bearer()?)
        .send()
        .await
        .map_err(transport_error)?;

    check(response).await?.json().await.map_err(transport_error)
}

/// Upload a file as multipart form data (part `file`)
pub async fn upload_file(file: &web_sys::File) -> ClientResult<FileRecord> {
    let form = FormData::new().map_err(|e| ClientError::Network(format!("{:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ClientError::Network(format!("{:?}", e)))?;

    let deadline = Deadline::start()?;
    let response = deadline
        .attach(Request::post(&endpoint(get_api_base(), "/api/files/upload")))
        .header("Authorization", &bearer()?)
        .body(form)
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    check(response).await?.json().await.map_err(transport_error)
}

/// Replace a file's tag list
pub async fn update_tags(id: &str, tags: &[String]) -> ClientResult<()> {
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::post(&file_endpoint(id, "/tags")))
        .header("Authorization", &bearer()?)
        .json(&TagsUpdate {
            tags: tags.to_vec(),
        })
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    check(response).await?;
    Ok(())
}

pub async fn delete_file(id: &str) -> ClientResult<()> {
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::delete(&file_endpoint(id, "")))
        .header("Authorization", &bearer()?)
        .send()
        .await
        .map_err(transport_error)?;

    check(response).await?;
    Ok(())
}

/// Generate (or fetch) the share link; returns the updated record
pub async fn share_file(id: &str) -> ClientResult<FileRecord> {
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::post(&file_endpoint(id, "/share")))
        .header("Authorization", &bearer()?)
        .send()
        .await
        .map_err(transport_error)?;

    check(response).await?.json().await.map_err(transport_error)
}

pub async fn fetch_view_count(id: &str) -> ClientResult<u64> {
    let id = String::from(js_sys::encode_uri_component(id));
    let deadline = Deadline::start()?;

    let response = deadline
        .attach(Request::get(&endpoint(
            get_api_base(),
            &format!("/api/files/stats/{}", id),
        )))
        .header("Authorization", &bearer()?)
        .send()
        .await
        .map_err(transport_error)?;

    let stats: ViewStats = check(response).await?.json().await.map_err(transport_error)?;
    Ok(stats.views)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("http://localhost:3000/", "/api/files/list"),
            "http://localhost:3000/api/files/list"
        );
        assert_eq!(
            endpoint("https://files.example.com", "/api/auth/login"),
            "https://files.example.com/api/auth/login"
        );
    }
}
