//! The `/no` rejection handler.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use rand::Rng;
use std::time::Instant;

use crate::http::negotiate::{negotiate, MediaType};
use crate::http::request::{accept_header, AcceptHeader};
use crate::http::response::Reply;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::reasons::ReasonList;

/// Used only if the list is somehow empty; `ReasonList::load` rejects that.
const FALLBACK_REASON: &str = "No.";

/// Pick a reason and negotiate its representation.
pub fn handle(reasons: &ReasonList, accept: AcceptHeader<'_>) -> Reply {
    handle_with(reasons, accept, &mut rand::thread_rng())
}

/// Same as [`handle`] with a caller-supplied random source.
pub fn handle_with<R: Rng + ?Sized>(
    reasons: &ReasonList,
    accept: AcceptHeader<'_>,
    rng: &mut R,
) -> Reply {
    let reason = reasons.choose(rng).unwrap_or(FALLBACK_REASON);

    let negotiated = match accept {
        AcceptHeader::Missing => negotiate(None, &MediaType::SUPPORTED),
        AcceptHeader::Value(value) => negotiate(Some(value), &MediaType::SUPPORTED),
        AcceptHeader::Unreadable => None,
    };

    match negotiated {
        Some(media) => Reply::rendered(StatusCode::OK, media, reason),
        None => Reply::rendered(StatusCode::NOT_ACCEPTABLE, MediaType::Json, reason),
    }
}

/// Handler for the `/no` endpoint.
pub async fn rejection_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let accept = accept_header(&headers);

    let reply = handle(&state.reasons, accept);

    tracing::debug!(
        accept = ?accept,
        status = reply.status.as_u16(),
        content_type = %reply.content_type,
        "Rejection served"
    );
    metrics::record_request(reply.status.as_u16(), reply.content_type.as_str(), start_time);

    reply
}
