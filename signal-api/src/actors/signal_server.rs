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

//! Signaling coordinator actor.
//!
//! `SignalServer` owns every piece of mutable signaling state: the live
//! connection recipients, the presence registry, the call table, and
//! the room table. Session actors never touch these directly; they
//! forward parsed frames here, so every mutation is serialized through
//! one mailbox and no locking is needed.
//!
//! Every delivery is best-effort: a recipient that is gone makes the
//! send a silent no-op, never an error surfaced to the peer that
//! triggered it.

use crate::call::{CallError, CallSession, CallTable};
use crate::constants::DEFAULT_DISPLAY_NAME;
use crate::directory::UserDirectory;
use crate::messages::{ClientFrame, Connect, Disconnect, Outbound};
use crate::presence::PresenceRegistry;
use crate::room::{LeaveOutcome, RoomTable};

use actix::{Actor, Context, Handler, Recipient};
use sandline_types::{ClientEvent, ErrorCode, MediaKind, ServerEvent};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ConnectionId = String;
pub type ParticipantId = String;
pub type RoomId = String;

/// Which negotiation message a pairwise relay carries. The payload
/// itself is opaque.
enum NegotiateKind {
    Offer,
    Answer,
    Ice,
}

pub struct SignalServer {
    sessions: HashMap<ConnectionId, Recipient<Outbound>>,
    /// Identity each connection declared, if any. Needed to route
    /// call actions and to run the disconnect cascade.
    identities: HashMap<ConnectionId, ParticipantId>,
    presence: PresenceRegistry,
    calls: CallTable,
    rooms: RoomTable,
    directory: Arc<dyn UserDirectory>,
}

impl SignalServer {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        SignalServer {
            sessions: HashMap::new(),
            identities: HashMap::new(),
            presence: PresenceRegistry::new(),
            calls: CallTable::new(),
            rooms: RoomTable::new(),
            directory,
        }
    }

    // =========================================================================
    // Delivery primitives (all fire-and-forget)
    // =========================================================================

    fn send_to(&self, connection_id: &str, event: ServerEvent) {
        if let Some(addr) = self.sessions.get(connection_id) {
            addr.do_send(Outbound(event));
        }
    }

    fn broadcast_all(&self, event: ServerEvent) {
        for addr in self.sessions.values() {
            addr.do_send(Outbound(event.clone()));
        }
    }

    fn broadcast_room(&self, room_id: &str, event: ServerEvent, exclude: Option<&str>) {
        for member in self.rooms.members(room_id) {
            if exclude == Some(member.connection_id.as_str()) {
                continue;
            }
            self.send_to(&member.connection_id, event.clone());
        }
    }

    /// Presence snapshot to everyone, after any churn. Full list, not a
    /// diff; the contract is eventual full-list consistency.
    fn broadcast_online_list(&self) {
        self.broadcast_all(ServerEvent::OnlineList(self.presence.snapshot()));
    }

    fn send_error(&self, connection_id: &str, code: ErrorCode, message: &str) {
        self.send_to(
            connection_id,
            ServerEvent::Error {
                code,
                message: message.to_string(),
            },
        );
    }

    /// Deliver an event to a participant's current connection, if it
    /// has one. Absence means nothing to notify.
    fn send_to_participant(&self, participant_id: &str, event: ServerEvent) {
        if let Some(connection_id) = self.presence.lookup(participant_id) {
            self.send_to(connection_id, event);
        }
    }

    // =========================================================================
    // Presence
    // =========================================================================

    fn register_presence(&mut self, connection_id: &str, participant_id: &str) {
        if participant_id.is_empty() {
            self.send_error(
                connection_id,
                ErrorCode::BadRequest,
                "participantId must not be empty",
            );
            return;
        }

        if let Some(previous) = self
            .identities
            .insert(connection_id.to_string(), participant_id.to_string())
        {
            // Same connection re-registering under a new identity drops
            // the old presence entry (guarded, so a superseded entry
            // stays put).
            if previous != participant_id {
                self.presence.unregister(&previous, connection_id);
            }
        }

        info!("presence registered: {participant_id} -> {connection_id}");
        self.presence.register(participant_id, connection_id);
        self.broadcast_online_list();
    }

    // =========================================================================
    // Direct calls
    // =========================================================================

    /// Resolve the participant identity behind a connection, or reject
    /// the call action with a caller error.
    fn require_identity(&self, connection_id: &str) -> Option<ParticipantId> {
        match self.identities.get(connection_id) {
            Some(participant) => Some(participant.clone()),
            None => {
                self.send_error(
                    connection_id,
                    ErrorCode::BadRequest,
                    "register presence before using call signaling",
                );
                None
            }
        }
    }

    fn on_call_initiate(&mut self, connection_id: &str, callee_id: String, media_kind: MediaKind) {
        let Some(caller) = self.require_identity(connection_id) else {
            return;
        };
        if callee_id.is_empty() || callee_id == caller {
            self.send_error(connection_id, ErrorCode::BadRequest, "invalid calleeId");
            return;
        }
        if self.calls.is_engaged(&caller) {
            self.send_error(
                connection_id,
                ErrorCode::AlreadyInCall,
                "finish the current call before starting another",
            );
            return;
        }
        let Some(callee_connection) = self.presence.lookup(&callee_id).map(str::to_string) else {
            debug!("call target {callee_id} is not online");
            self.send_to(connection_id, ServerEvent::CallNotOnline { callee_id });
            return;
        };

        match self.calls.initiate(&caller, &callee_id, media_kind) {
            Ok(()) => {
                info!("{caller} is ringing {callee_id} ({media_kind})");
                let caller_name = self.directory.display_name(&caller);
                self.send_to(
                    &callee_connection,
                    ServerEvent::CallIncoming {
                        caller_id: caller,
                        caller_name,
                        media_kind,
                    },
                );
            }
            Err(CallError::CalleeBusy) => {
                // The occupied party is never disturbed; the new caller
                // gets the rejection.
                debug!("{callee_id} is busy, rejecting {caller}");
                self.send_to(
                    connection_id,
                    ServerEvent::CallRejected {
                        reason: Some("busy".to_string()),
                    },
                );
            }
            Err(err) => {
                warn!("call initiate by {caller} failed: {err}");
                self.send_error(connection_id, ErrorCode::AlreadyInCall, &err.to_string());
            }
        }
    }

    fn on_call_accept(&mut self, connection_id: &str) {
        let Some(callee) = self.require_identity(connection_id) else {
            return;
        };
        match self.calls.accept(&callee) {
            Ok(session) => {
                info!("call connected: {} <-> {}", session.caller, session.callee);
                self.send_to_participant(&session.caller, ServerEvent::CallAccepted);
            }
            Err(err) => debug!("ignoring accept from {callee}: {err}"),
        }
    }

    fn on_call_reject(&mut self, connection_id: &str, reason: Option<String>) {
        let Some(callee) = self.require_identity(connection_id) else {
            return;
        };
        match self.calls.reject(&callee) {
            Ok(session) => {
                info!(
                    "call rejected by {callee} (reason: {})",
                    reason.as_deref().unwrap_or("user_rejected")
                );
                self.send_to_participant(&session.caller, ServerEvent::CallRejected { reason });
            }
            Err(err) => debug!("ignoring reject from {callee}: {err}"),
        }
    }

    fn on_call_end(&mut self, connection_id: &str) {
        let Some(participant) = self.require_identity(connection_id) else {
            return;
        };
        if let Some(session) = self.calls.end(&participant) {
            info!("call ended by {participant}");
            self.notify_call_ended(&session, &participant);
        }
        // The hanging-up side always gets the echo, so its UI resets
        // even when the session was already gone.
        self.send_to(connection_id, ServerEvent::CallEnded);
    }

    fn notify_call_ended(&self, session: &CallSession, ended_by: &str) {
        self.send_to_participant(session.other_party(ended_by), ServerEvent::CallEnded);
    }

    // =========================================================================
    // Rooms
    // =========================================================================

    fn on_room_join(
        &mut self,
        connection_id: &str,
        room_id: String,
        display_name: Option<String>,
    ) {
        if room_id.is_empty() {
            self.send_error(connection_id, ErrorCode::BadRequest, "roomId must not be empty");
            return;
        }
        let display_name = display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        let outcome = self.rooms.join(connection_id, &room_id, &display_name);
        if let Some(left) = &outcome.left {
            self.notify_member_left(left, connection_id);
        }

        info!(
            "{connection_id} joined room {room_id} as {display_name} ({} already present)",
            outcome.existing.len()
        );
        self.send_to(
            connection_id,
            ServerEvent::RoomExistingMembers(outcome.existing),
        );
        self.broadcast_room(
            &room_id,
            ServerEvent::RoomMemberJoined {
                connection_id: connection_id.to_string(),
                display_name,
            },
            Some(connection_id),
        );
    }

    fn on_room_leave(&mut self, connection_id: &str) {
        if let Some(left) = self.rooms.leave(connection_id) {
            info!("{connection_id} left room {}", left.room_id);
            self.notify_member_left(&left, connection_id);
        }
    }

    fn notify_member_left(&self, left: &LeaveOutcome, connection_id: &str) {
        for member in &left.remaining {
            self.send_to(
                member,
                ServerEvent::RoomMemberLeft {
                    connection_id: connection_id.to_string(),
                },
            );
        }
    }

    fn on_room_negotiate(&self, connection_id: &str, kind: NegotiateKind, to: String, data: Value) {
        let from = connection_id.to_string();
        let event = match kind {
            NegotiateKind::Offer => ServerEvent::RoomNegotiateOffer { from, data },
            NegotiateKind::Answer => ServerEvent::RoomNegotiateAnswer { from, data },
            NegotiateKind::Ice => ServerEvent::RoomNegotiateIce { from, data },
        };
        // Silent no-op if the target is gone.
        self.send_to(&to, event);
    }

    fn on_room_chat(&self, connection_id: &str, message: String, timestamp: i64) {
        let Some(room_id) = self.rooms.room_of(connection_id).map(str::to_string) else {
            debug!("chat from {connection_id} outside any room, dropping");
            return;
        };
        let from = self
            .rooms
            .display_name(connection_id)
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        self.broadcast_room(
            &room_id,
            ServerEvent::RoomChat {
                from,
                message,
                timestamp,
            },
            Some(connection_id),
        );
    }
}

impl Actor for SignalServer {
    type Context = Context<Self>;
}

impl Handler<Connect> for SignalServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) -> Self::Result {
        let Connect {
            connection_id,
            participant_id,
            addr,
        } = msg;
        debug!("connection up: {connection_id}");
        self.sessions.insert(connection_id.clone(), addr);
        self.send_to(
            &connection_id,
            ServerEvent::SessionAssigned {
                connection_id: connection_id.clone(),
            },
        );
        if let Some(participant_id) = participant_id {
            self.register_presence(&connection_id, &participant_id);
        }
    }
}

impl Handler<Disconnect> for SignalServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        let Disconnect { connection_id } = msg;
        debug!("connection down: {connection_id}");

        // Cleanup cascade, in order: presence, call, room. Each step is
        // independent and runs even when the previous was a no-op.
        if let Some(participant) = self.identities.remove(&connection_id) {
            let was_current = self.presence.unregister(&participant, &connection_id);
            if was_current {
                self.broadcast_online_list();
                // Only the participant's current connection tears down
                // its call; a stale connection dying must not end a
                // call carried by the reconnected one.
                if let Some(session) = self.calls.end(&participant) {
                    info!("call ended by disconnect of {participant}");
                    self.notify_call_ended(&session, &participant);
                }
            }
        }

        self.on_room_leave(&connection_id);
        self.sessions.remove(&connection_id);
    }
}

impl Handler<ClientFrame> for SignalServer {
    type Result = ();

    fn handle(&mut self, msg: ClientFrame, _ctx: &mut Self::Context) -> Self::Result {
        let ClientFrame {
            connection_id,
            event,
        } = msg;

        match event {
            ClientEvent::RegisterPresence { participant_id } => {
                self.register_presence(&connection_id, &participant_id)
            }
            ClientEvent::CallInitiate {
                callee_id,
                media_kind,
            } => self.on_call_initiate(&connection_id, callee_id, media_kind),
            ClientEvent::CallAccept => self.on_call_accept(&connection_id),
            ClientEvent::CallReject { reason } => self.on_call_reject(&connection_id, reason),
            ClientEvent::CallEnd => self.on_call_end(&connection_id),
            ClientEvent::RoomJoin {
                room_id,
                display_name,
            } => self.on_room_join(&connection_id, room_id, display_name),
            ClientEvent::RoomLeave => self.on_room_leave(&connection_id),
            ClientEvent::RoomNegotiateOffer { to, data } => {
                self.on_room_negotiate(&connection_id, NegotiateKind::Offer, to, data)
            }
            ClientEvent::RoomNegotiateAnswer { to, data } => {
                self.on_room_negotiate(&connection_id, NegotiateKind::Answer, to, data)
            }
            ClientEvent::RoomNegotiateIce { to, data } => {
                self.on_room_negotiate(&connection_id, NegotiateKind::Ice, to, data)
            }
            ClientEvent::RoomChat { message, timestamp } => {
                self.on_room_chat(&connection_id, message, timestamp)
            }
        }
    }
}
