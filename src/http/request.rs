//! Request inspection.
//!
//! # Responsibilities
//! - Derive the client identifier used by the rate limiter
//! - Read the `Accept` preference string
//!
//! # Design Decisions
//! - Peer IP without the port, so reconnecting does not reset the limit
//! - `X-Forwarded-For` is honoured only when explicitly trusted

use axum::http::{header, HeaderMap};
use std::net::{IpAddr, SocketAddr};

pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Identify the client a request came from.
pub fn client_key(headers: &HeaderMap, peer: SocketAddr, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

/// What a request said about its preferred representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptHeader<'a> {
    /// No `Accept` header at all.
    Missing,
    /// A header made of visible ASCII.
    Value(&'a str),
    /// Present, but with bytes that cannot be read as a preference list.
    Unreadable,
}

/// Read the `Accept` header. Only the first occurrence is considered.
pub fn accept_header(headers: &HeaderMap) -> AcceptHeader<'_> {
    match headers.get(header::ACCEPT) {
        None => AcceptHeader::Missing,
        Some(value) => match value.to_str() {
            Ok(value) => AcceptHeader::Value(value),
            Err(_) => AcceptHeader::Unreadable,
        },
    }
}
