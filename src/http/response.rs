//! Response rendering.
//!
//! # Responsibilities
//! - Serialize a reason into each supported representation
//! - Carry status, content type and body as one value (`Reply`)
//!
//! # Design Decisions
//! - Bodies are rendered to memory before headers are written
//! - A render failure keeps the chosen status and sends what was produced

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::http::negotiate::MediaType;

/// Error type for body serialization.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML encoding failed: {0}")]
    Xml(String),
}

/// JSON body: `{"reason": "..."}`.
#[derive(Debug, Serialize)]
pub struct ReasonBody<'a> {
    pub reason: &'a str,
}

/// XML body: `<Response><Reason>...</Reason></Response>`.
#[derive(Debug, Serialize)]
#[serde(rename = "Response")]
struct XmlReasonBody<'a> {
    #[serde(rename = "Reason")]
    reason: &'a str,
}

/// Serialize `reason` as `media`.
pub fn render(reason: &str, media: MediaType) -> Result<String, RenderError> {
    match media {
        MediaType::Json => Ok(serde_json::to_string(&ReasonBody { reason })?),
        MediaType::Xml => quick_xml::se::to_string(&XmlReasonBody { reason })
            .map_err(|e| RenderError::Xml(e.to_string())),
        MediaType::PlainText | MediaType::Html => Ok(reason.to_string()),
    }
}

/// A fully decided response: status, representation and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: MediaType,
    pub body: String,
}

impl Reply {
    /// Render `reason` as `media`; failures are logged and yield an empty body.
    pub fn rendered(status: StatusCode, media: MediaType, reason: &str) -> Self {
        let body = match render(reason, media) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(content_type = %media, error = %e, "Failed to encode response");
                String::new()
            }
        };

        Self {
            status,
            content_type: media,
            body,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(self.content_type.as_str()),
            )],
            self.body,
        )
            .into_response()
    }
}
