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

//! Direct call session state machine.
//!
//! A session lives through `RINGING -> CONNECTED` and is discarded the
//! moment it goes terminal (ended or rejected); terminal sessions are
//! never retained, so "no session" and "terminal" are the same state.
//! A participant may be a party to at most one live session at a time.
//!
//! This table coordinates the call-intent handshake only. Media
//! negotiation (SDP, ICE) happens out-of-band between the peers.

use sandline_types::MediaKind;
use std::collections::HashMap;

/// Live states of a call session. Terminal states have no variant
/// because a terminal session is removed from the table immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Ringing,
    Connected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallSession {
    pub caller: String,
    pub callee: String,
    pub media_kind: MediaKind,
    pub state: CallState,
}

impl CallSession {
    /// The party on the other side of `participant`.
    pub fn other_party(&self, participant: &str) -> &str {
        if self.caller == participant {
            &self.callee
        } else {
            &self.caller
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// The acting participant already has a live session.
    AlreadyInCall,
    /// The call target already has a live session.
    CalleeBusy,
    /// No session exists for the acting participant, or its state does
    /// not permit the requested transition.
    InvalidTransition,
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::AlreadyInCall => write!(f, "participant is already in a call"),
            CallError::CalleeBusy => write!(f, "call target is busy"),
            CallError::InvalidTransition => write!(f, "no call session permits this transition"),
        }
    }
}

impl std::error::Error for CallError {}

/// All live call sessions, indexed by both parties.
#[derive(Debug, Default)]
pub struct CallTable {
    sessions: HashMap<u64, CallSession>,
    by_party: HashMap<String, u64>,
    next_id: u64,
}

impl CallTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_engaged(&self, participant: &str) -> bool {
        self.by_party.contains_key(participant)
    }

    pub fn session_for(&self, participant: &str) -> Option<&CallSession> {
        self.by_party
            .get(participant)
            .and_then(|id| self.sessions.get(id))
    }

    /// Create a session in `RINGING`.
    ///
    /// The caller must be free (`AlreadyInCall` otherwise) and so must
    /// the callee (`CalleeBusy`); a busy callee keeps its existing
    /// session untouched.
    pub fn initiate(
        &mut self,
        caller: &str,
        callee: &str,
        media_kind: MediaKind,
    ) -> Result<(), CallError> {
        if self.is_engaged(caller) {
            return Err(CallError::AlreadyInCall);
        }
        if self.is_engaged(callee) {
            return Err(CallError::CalleeBusy);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.sessions.insert(
            id,
            CallSession {
                caller: caller.to_string(),
                callee: callee.to_string(),
                media_kind,
                state: CallState::Ringing,
            },
        );
        self.by_party.insert(caller.to_string(), id);
        self.by_party.insert(callee.to_string(), id);
        Ok(())
    }

    /// `RINGING -> CONNECTED`. Valid only for the callee of a ringing
    /// session. Returns a snapshot of the connected session.
    pub fn accept(&mut self, participant: &str) -> Result<CallSession, CallError> {
        let id = *self
            .by_party
            .get(participant)
            .ok_or(CallError::InvalidTransition)?;
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(CallError::InvalidTransition)?;
        if session.callee != participant || session.state != CallState::Ringing {
            return Err(CallError::InvalidTransition);
        }
        session.state = CallState::Connected;
        Ok(session.clone())
    }

    /// `RINGING -> REJECTED`. Valid only for the callee of a ringing
    /// session. The session is discarded; the removed snapshot is
    /// returned so the caller side can be notified.
    pub fn reject(&mut self, participant: &str) -> Result<CallSession, CallError> {
        let id = *self
            .by_party
            .get(participant)
            .ok_or(CallError::InvalidTransition)?;
        let ringing_callee = self
            .sessions
            .get(&id)
            .map(|s| s.callee == participant && s.state == CallState::Ringing)
            .unwrap_or(false);
        if !ringing_callee {
            return Err(CallError::InvalidTransition);
        }
        self.remove(id).ok_or(CallError::InvalidTransition)
    }

    /// End the session `participant` is a party to, in any live state.
    /// Returns the removed snapshot, or `None` when there was nothing
    /// to end (hanging up with no call is not an error).
    pub fn end(&mut self, participant: &str) -> Option<CallSession> {
        let id = *self.by_party.get(participant)?;
        self.remove(id)
    }

    fn remove(&mut self, id: u64) -> Option<CallSession> {
        // Both party index entries go with the session.
        let session = self.sessions.remove(&id)?;
        self.by_party.remove(&session.caller);
        self.by_party.remove(&session.callee);
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiate_creates_ringing_session() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Video).unwrap();
        let session = calls.session_for("alice").unwrap();
        assert_eq!(session.state, CallState::Ringing);
        assert_eq!(session.callee, "bob");
        assert_eq!(session.media_kind, MediaKind::Video);
        assert!(calls.is_engaged("bob"));
    }

    #[test]
    fn caller_cannot_start_a_second_call() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        assert_eq!(
            calls.initiate("alice", "carol", MediaKind::Audio),
            Err(CallError::AlreadyInCall)
        );
    }

    #[test]
    fn busy_callee_keeps_its_existing_session() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        assert_eq!(
            calls.initiate("carol", "bob", MediaKind::Video),
            Err(CallError::CalleeBusy)
        );
        // Unchanged: bob is still ringing with alice.
        let session = calls.session_for("bob").unwrap();
        assert_eq!(session.caller, "alice");
        assert_eq!(session.state, CallState::Ringing);
        assert!(!calls.is_engaged("carol"));
    }

    #[test]
    fn accept_connects_and_is_callee_only() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        // The caller cannot accept its own call.
        assert_eq!(calls.accept("alice"), Err(CallError::InvalidTransition));
        let session = calls.accept("bob").unwrap();
        assert_eq!(session.state, CallState::Connected);
        // Accepting twice is an illegal transition.
        assert_eq!(calls.accept("bob"), Err(CallError::InvalidTransition));
    }

    #[test]
    fn reject_is_only_valid_while_ringing() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        calls.accept("bob").unwrap();
        assert_eq!(calls.reject("bob"), Err(CallError::InvalidTransition));
    }

    #[test]
    fn reject_discards_the_session_and_frees_both_parties() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        let removed = calls.reject("bob").unwrap();
        assert_eq!(removed.caller, "alice");
        assert!(calls.is_empty());
        // Both parties may start fresh calls.
        calls.initiate("bob", "alice", MediaKind::Video).unwrap();
    }

    #[test]
    fn either_party_can_end_in_any_live_state() {
        let mut calls = CallTable::new();
        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        let removed = calls.end("alice").unwrap();
        assert_eq!(removed.other_party("alice"), "bob");
        assert!(calls.is_empty());

        calls.initiate("alice", "bob", MediaKind::Audio).unwrap();
        calls.accept("bob").unwrap();
        let removed = calls.end("bob").unwrap();
        assert_eq!(removed.state, CallState::Connected);
        assert!(calls.is_empty());
    }

    #[test]
    fn ending_with_no_session_is_a_no_op() {
        let mut calls = CallTable::new();
        assert!(calls.end("alice").is_none());
    }
}
