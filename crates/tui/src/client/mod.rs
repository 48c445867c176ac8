//! HTTP client for the hosted backend: auth endpoints plus the REST
//! collection of expense rows.

mod auth;
mod records;

use reqwest::{Response, StatusCode, Url};
use thiserror::Error;

use api_types::{auth::AuthError, expense::RestError};

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("server: {0}")]
    Server(String),
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Maps a non-success response to an error, using the server message
    /// when the body carries one.
    async fn from_response(res: Response) -> Self {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Self::from_status(status, error_message(&body))
    }

    fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Server(message),
        }
    }

    /// Message sent by the server, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message)
            | Self::Conflict(message)
            | Self::Validation(message)
            | Self::Server(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// REST and auth endpoints use different error bodies; try both.
fn error_message(body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<RestError>(body)
        && let Some(message) = err.message
    {
        return message;
    }
    if let Ok(err) = serde_json::from_str::<AuthError>(body) {
        return err.text();
    }
    if body.trim().is_empty() {
        "unknown error".to_string()
    } else {
        body.trim().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        // `Url::join` replaces the last segment unless the path ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized).map_err(|err| AppError::BaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }
}
