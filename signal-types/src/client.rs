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

//! Client-to-server events.
//!
//! Negotiation payloads (`data` on the `room-negotiate-*` events) are
//! opaque to the server: SDP descriptions and ICE candidates are relayed
//! verbatim, never interpreted.

use crate::MediaKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound frame from a connected client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Associate this connection with a stable participant identity.
    #[serde(rename_all = "camelCase")]
    RegisterPresence { participant_id: String },

    /// Place a direct call to another participant.
    #[serde(rename_all = "camelCase")]
    CallInitiate {
        callee_id: String,
        media_kind: MediaKind,
    },

    /// Callee accepts the ringing call.
    CallAccept,

    /// Callee declines the ringing call.
    CallReject {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// Either party hangs up.
    CallEnd,

    /// Enter a meeting room, implicitly leaving any previous one.
    #[serde(rename_all = "camelCase")]
    RoomJoin {
        room_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },

    /// Leave the current meeting room, if any.
    RoomLeave,

    /// Relay an SDP offer to one peer in the mesh.
    RoomNegotiateOffer { to: String, data: Value },

    /// Relay an SDP answer to one peer in the mesh.
    RoomNegotiateAnswer { to: String, data: Value },

    /// Relay an ICE candidate to one peer in the mesh.
    RoomNegotiateIce { to: String, data: Value },

    /// In-meeting chat message, broadcast to the rest of the room.
    RoomChat { message: String, timestamp: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_kebab_case_event_names() {
        let event = ClientEvent::RegisterPresence {
            participant_id: "alice".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "register-presence");
        assert_eq!(json["data"]["participantId"], "alice");
    }

    #[test]
    fn unit_events_need_no_data_field() {
        let parsed: ClientEvent = serde_json::from_str(r#"{"event":"call-end"}"#).unwrap();
        assert!(matches!(parsed, ClientEvent::CallEnd));
    }

    #[test]
    fn reject_reason_is_optional() {
        let parsed: ClientEvent =
            serde_json::from_str(r#"{"event":"call-reject","data":{}}"#).unwrap();
        assert!(matches!(parsed, ClientEvent::CallReject { reason: None }));

        let parsed: ClientEvent =
            serde_json::from_str(r#"{"event":"call-reject","data":{"reason":"busy"}}"#).unwrap();
        match parsed {
            ClientEvent::CallReject { reason } => assert_eq!(reason.as_deref(), Some("busy")),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn negotiation_payload_stays_opaque() {
        let raw = r#"{"event":"room-negotiate-ice","data":{"to":"c1","data":{"candidate":"udp 1 2"}}}"#;
        let parsed: ClientEvent = serde_json::from_str(raw).unwrap();
        match parsed {
            ClientEvent::RoomNegotiateIce { to, data } => {
                assert_eq!(to, "c1");
                assert_eq!(data["candidate"], "udp 1 2");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
