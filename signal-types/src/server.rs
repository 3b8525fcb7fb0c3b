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

//! Server-to-client events.
//!
//! All of these are fire-and-forget: the server never waits for a
//! delivery acknowledgement, and a vanished recipient is not an error.

use crate::{ErrorCode, MediaKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An outbound frame pushed to a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent once right after connect so the client knows its own
    /// connection id (needed to label mesh negotiation and filter self).
    #[serde(rename_all = "camelCase")]
    SessionAssigned { connection_id: String },

    /// Full snapshot of online participant ids, broadcast to every
    /// connection after any presence churn.
    OnlineList(Vec<String>),

    /// Incoming direct call notification, sent to the callee.
    #[serde(rename_all = "camelCase")]
    CallIncoming {
        caller_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caller_name: Option<String>,
        media_kind: MediaKind,
    },

    /// The call target has no live presence entry, sent to the caller.
    #[serde(rename_all = "camelCase")]
    CallNotOnline { callee_id: String },

    /// The callee accepted, sent to the caller.
    CallAccepted,

    /// The callee declined (or was busy), sent to the caller.
    CallRejected {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// The call is over, sent to the other party (and echoed to the
    /// party that hung up).
    CallEnded,

    /// Membership snapshot handed to a room joiner, excluding itself.
    RoomExistingMembers(Vec<String>),

    /// A new member entered the room, broadcast to everyone else in it.
    #[serde(rename_all = "camelCase")]
    RoomMemberJoined {
        connection_id: String,
        display_name: String,
    },

    /// A member left the room, broadcast to the remaining members.
    #[serde(rename_all = "camelCase")]
    RoomMemberLeft { connection_id: String },

    /// Forwarded SDP offer; `from` names the originating connection.
    RoomNegotiateOffer { from: String, data: Value },

    /// Forwarded SDP answer.
    RoomNegotiateAnswer { from: String, data: Value },

    /// Forwarded ICE candidate.
    RoomNegotiateIce { from: String, data: Value },

    /// In-meeting chat message, relayed to the rest of the room.
    RoomChat {
        from: String,
        message: String,
        timestamp: i64,
    },

    /// Synchronous rejection of a malformed or conflicting request,
    /// delivered only to the originating connection.
    Error { code: ErrorCode, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_list_serializes_as_bare_array() {
        let event = ServerEvent::OnlineList(vec!["alice".into(), "bob".into()]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "online-list");
        assert_eq!(json["data"], serde_json::json!(["alice", "bob"]));
    }

    #[test]
    fn caller_name_is_omitted_when_unknown() {
        let event = ServerEvent::CallIncoming {
            caller_id: "alice".into(),
            caller_name: None,
            media_kind: MediaKind::Audio,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["callerId"], "alice");
        assert_eq!(json["data"]["mediaKind"], "audio");
        assert!(json["data"].get("callerName").is_none());
    }

    #[test]
    fn error_event_round_trips() {
        let event = ServerEvent::Error {
            code: ErrorCode::AlreadyInCall,
            message: "already in a call".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: ServerEvent = serde_json::from_str(&json).unwrap();
        match back {
            ServerEvent::Error { code, .. } => assert_eq!(code, ErrorCode::AlreadyInCall),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
