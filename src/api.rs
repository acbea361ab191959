use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::Config;
use crate::session::Session;
use crate::types::{
    Credentials, LogEntry, LogPayload, LoginResponse, MessageResponse, ResetConfirm, ResetRequest,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}")]
    Status { status: u16, body: String },
    #[error("could not read response: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    Encode(String),
}

impl ApiError {
    /// The `message` field of a JSON error body, or the raw body text.
    pub fn server_message(&self) -> Option<String> {
        let ApiError::Status { body, .. } = self else {
            return None;
        };
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<MessageResponse>(body) {
            Ok(parsed) => parsed.message.filter(|m| !m.is_empty()),
            Err(_) => Some(body.to_string()),
        }
    }
}

/// Result of every authorized call. 401/403 are split out so each caller can
/// end the session the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Ok(T),
    AuthRejected,
    Failed(ApiError),
}

impl<T> ApiOutcome<T> {
    /// Sorts a response by status alone. Failures carry no body here.
    pub fn from_status(status: u16, value: T) -> Self {
        match classify_status(status) {
            StatusClass::Success => ApiOutcome::Ok(value),
            StatusClass::AuthRejected => ApiOutcome::AuthRejected,
            StatusClass::Failed => ApiOutcome::Failed(ApiError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Ok(value) => ApiOutcome::Ok(f(value)),
            ApiOutcome::AuthRejected => ApiOutcome::AuthRejected,
            ApiOutcome::Failed(err) => ApiOutcome::Failed(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    AuthRejected,
    Failed,
}

pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        401 | 403 => StatusClass::AuthRejected,
        _ => StatusClass::Failed,
    }
}

pub fn logs_url(config: &Config, email: &str) -> String {
    format!(
        "{}?email={}",
        config.endpoint("/api/logs"),
        urlencoding::encode(email)
    )
}

pub fn log_url(config: &Config, id: i64) -> String {
    format!("{}/{}", config.endpoint("/api/logs"), id)
}

async fn read_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

async fn send(request: Result<Request, gloo::net::Error>) -> Result<Response, ApiError> {
    let request = request.map_err(|e| ApiError::Encode(e.to_string()))?;
    request.send().await.map_err(|e| {
        log::warn!("request failed: {e}");
        ApiError::Network(e.to_string())
    })
}

/// Adds the bearer header, sends, and sorts the response into an outcome.
async fn authorized(
    builder: RequestBuilder,
    session: &Session,
    body: Option<&LogPayload>,
) -> ApiOutcome<Response> {
    let builder = builder.header("Authorization", &session.bearer());
    let request = match body {
        Some(payload) => builder.json(payload),
        None => builder.build(),
    };
    let response = match send(request).await {
        Ok(response) => response,
        Err(err) => return ApiOutcome::Failed(err),
    };
    let status = response.status();
    if classify_status(status) == StatusClass::Failed {
        return ApiOutcome::Failed(ApiError::Status {
            status,
            body: read_body(response).await,
        });
    }
    let outcome = ApiOutcome::from_status(status, response);
    if matches!(outcome, ApiOutcome::AuthRejected) {
        log::info!("authorization rejected with {status}");
    }
    outcome
}

async fn decode<T: DeserializeOwned>(outcome: ApiOutcome<Response>) -> ApiOutcome<T> {
    match outcome {
        ApiOutcome::Ok(response) => match response.json::<T>().await {
            Ok(value) => ApiOutcome::Ok(value),
            Err(e) => ApiOutcome::Failed(ApiError::Decode(e.to_string())),
        },
        ApiOutcome::AuthRejected => ApiOutcome::AuthRejected,
        ApiOutcome::Failed(err) => ApiOutcome::Failed(err),
    }
}

/// Logs owned by `email`. For the admin account the backend returns every user's logs.
pub async fn fetch_logs(config: &Config, session: &Session, email: &str) -> ApiOutcome<Vec<LogEntry>> {
    let outcome = decode::<Vec<LogEntry>>(
        authorized(Request::get(&logs_url(config, email)), session, None).await,
    )
    .await;
    if let ApiOutcome::Ok(logs) = &outcome {
        log::debug!("fetched {} logs for {email}", logs.len());
    }
    outcome
}

pub async fn fetch_all_logs(config: &Config, session: &Session) -> ApiOutcome<Vec<LogEntry>> {
    fetch_logs(config, session, &session.email).await
}

pub async fn create_log(config: &Config, session: &Session, payload: &LogPayload) -> ApiOutcome<LogEntry> {
    decode(authorized(Request::post(&config.endpoint("/api/logs")), session, Some(payload)).await).await
}

/// The caller re-fetches afterwards, so the response body is not parsed.
pub async fn update_log(config: &Config, session: &Session, id: i64, payload: &LogPayload) -> ApiOutcome<()> {
    authorized(Request::put(&log_url(config, id)), session, Some(payload))
        .await
        .map(|_| ())
}

pub async fn delete_log(config: &Config, session: &Session, id: i64) -> ApiOutcome<()> {
    authorized(Request::delete(&log_url(config, id)), session, None)
        .await
        .map(|_| ())
}

async fn post_json<B: serde::Serialize>(config: &Config, path: &str, body: &B) -> Result<Response, ApiError> {
    let response = send(Request::post(&config.endpoint(path)).json(body)).await?;
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status(),
            body: read_body(response).await,
        })
    }
}

pub async fn login(config: &Config, credentials: &Credentials) -> Result<String, ApiError> {
    let response = post_json(config, "/auth/login", credentials).await?;
    let parsed: LoginResponse = response
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(parsed.token)
}

pub async fn register(config: &Config, credentials: &Credentials) -> Result<(), ApiError> {
    post_json(config, "/auth/register", credentials).await.map(|_| ())
}

async fn message_of(response: Response) -> String {
    response
        .json::<MessageResponse>()
        .await
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_default()
}

/// Asks the backend to mail an OTP. Returns the server's message.
pub async fn request_password_reset(config: &Config, email: &str) -> Result<String, ApiError> {
    let body = ResetRequest { email: email.to_string() };
    let response = post_json(config, "/auth/reset-password", &body).await?;
    Ok(message_of(response).await)
}

pub async fn confirm_password_reset(config: &Config, confirm: &ResetConfirm) -> Result<String, ApiError> {
    let response = post_json(config, "/auth/reset-password-confirm", confirm).await?;
    Ok(message_of(response).await)
}
