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

//! Wire error codes for the `error` event.

use serde::{Deserialize, Serialize};

/// Machine-readable code carried by [`crate::ServerEvent::Error`].
///
/// Clients surface these as transient toasts; the server only promises
/// to deliver the structured reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCode {
    /// The caller already has a non-terminal call session.
    AlreadyInCall,
    /// The request was malformed or missing a required field.
    BadRequest,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::AlreadyInCall => write!(f, "already-in-call"),
            ErrorCode::BadRequest => write!(f, "bad-request"),
        }
    }
}
