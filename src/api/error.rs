//! HTTP error responses.
//!
//! Every failure leaves the API as a problem body
//! `{type, title, status, detail, instance}` where `instance` is the request path.
//! This is the only place where [`Error`] kinds are mapped onto status codes.

use crate::errors::Error;
use axum::{
    Json,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Problem description serialized into every error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem type URI; always `"about:blank"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Reason phrase of the status code
    pub title: String,
    /// Numeric status code
    pub status: u16,
    /// Human-readable explanation
    pub detail: String,
    /// Path of the request that failed
    pub instance: String,
}

/// An error on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
    instance: String,
}

impl ApiError {
    /// Builds an error response with an explicit status.
    pub fn new(status: StatusCode, detail: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            instance: instance.into(),
        }
    }

    /// Maps a core error onto its HTTP status.
    ///
    /// Database failures are logged in full but reported with a generic detail.
    #[must_use]
    pub fn from_error(err: Error, instance: &str) -> Self {
        let (status, detail) = match &err {
            Error::NotFound { .. } => {
                debug!(instance, "{err}");
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Error::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            Error::Configuration { message } => {
                error!(instance, "Configuration error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
            Error::Database(_) | Error::Settings { .. } | Error::Io(_) => {
                error!(instance, "Request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        Self::new(status, detail, instance)
    }

    /// Returns a mapper for `Result::map_err` bound to the request path.
    pub fn at(uri: &Uri) -> impl Fn(Error) -> Self + '_ {
        move |err| Self::from_error(err, uri.path())
    }

    /// Status code this error will be sent with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The problem body this error will be sent with.
    #[must_use]
    pub fn problem(&self) -> Problem {
        Problem {
            kind: "about:blank".to_string(),
            title: self
                .status
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
            status: self.status.as_u16(),
            detail: self.detail.clone(),
            instance: self.instance.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self.problem()),
        )
            .into_response()
    }
}
