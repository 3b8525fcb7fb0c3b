/*
 * Copyright 2026 Sandline Contributors
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Shared wire types for the Sandline signaling server.
//!
//! This crate defines the WebSocket event contract between the signaling
//! server and its consumers (clients, frontend, integration tests).
//! It is intentionally framework-agnostic — no actix, no I/O.
//!
//! Every frame on the wire is a JSON envelope of the form
//! `{"event": "<name>", "data": {...}}`; the envelope is modeled as two
//! adjacently tagged enums, [`ClientEvent`] for inbound frames and
//! [`ServerEvent`] for outbound ones.

pub mod client;
pub mod error;
pub mod server;

pub use client::ClientEvent;
pub use error::ErrorCode;
pub use server::ServerEvent;

use serde::{Deserialize, Serialize};

/// Kind of media a direct call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
        let parsed: MediaKind = serde_json::from_str("\"audio\"").unwrap();
        assert_eq!(parsed, MediaKind::Audio);
    }
}
