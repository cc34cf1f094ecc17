//! Predictable JSON envelope returned by every handler.
//!
//! ```json
//! {"status": 200, "message": "ok", "data": {...}}
//! {"status": 200, "message": "ok", "data": [...], "links": {"next": "..."}}
//! ```
//!
//! The message constants are part of the client contract; clients match
//! on them to tell error classes apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

pub const PARAM_IS_NOT_INT_MESSAGE: &str = "Only integers as URL params allowed!";
pub const FAILED_DB_CONN_MESSAGE: &str = "Error while calling the database!";
pub const FAILED_PAYLOAD_VALIDATION_MESSAGE: &str = "Payload validation failed!";

/// Previous/next page links. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    #[serde(skip_serializing_if = "is_blank")]
    pub prev: Option<String>,

    #[serde(skip_serializing_if = "is_blank")]
    pub next: Option<String>,
}

impl PaginationLinks {
    pub fn new(prev: impl Into<String>, next: impl Into<String>) -> Self {
        let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());
        Self {
            prev: non_empty(prev.into()),
            next: non_empty(next.into()),
        }
    }

    /// True when neither link would be serialized.
    pub fn is_empty(&self) -> bool {
        is_blank(&self.prev) && is_blank(&self.next)
    }
}

fn is_blank(link: &Option<String>) -> bool {
    link.as_deref().map_or(true, str::is_empty)
}

/// Response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    #[serde(serialize_with = "status_code")]
    pub status: StatusCode,

    pub message: String,

    pub data: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data,
            links: None,
        }
    }

    /// Attach pagination links. Links with no non-empty field are dropped.
    pub fn with_links(mut self, links: Option<PaginationLinks>) -> Self {
        self.links = links.filter(|links| !links.is_empty());
        self
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Build the envelope response with `Content-Type: application/json` and
/// `status` as the HTTP status code.
pub fn respond<T: Serialize>(
    status: StatusCode,
    data: T,
    message: impl Into<String>,
    links: Option<PaginationLinks>,
) -> Response {
    Envelope::new(status, data, message)
        .with_links(links)
        .into_response()
}

fn status_code<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
