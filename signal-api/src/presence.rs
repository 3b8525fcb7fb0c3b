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

//! Presence registry: authoritative lookup from a stable participant
//! identity to the connection currently reachable for it.
//!
//! At most one connection per participant at any instant. A reconnect
//! overwrites the previous entry, and a late disconnect for the
//! superseded connection must not evict the newer one.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    entries: HashMap<String, String>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `participant_id` as reachable via `connection_id`.
    /// Last registration wins; never fails.
    pub fn register(&mut self, participant_id: &str, connection_id: &str) {
        self.entries
            .insert(participant_id.to_string(), connection_id.to_string());
    }

    pub fn lookup(&self, participant_id: &str) -> Option<&str> {
        self.entries.get(participant_id).map(String::as_str)
    }

    /// Remove the entry for `participant_id`, but only if the stored
    /// connection is the one supplied. A mismatch means the entry was
    /// already superseded by a reconnect and the stale disconnect must
    /// leave it alone. Returns whether an entry was removed.
    pub fn unregister(&mut self, participant_id: &str, connection_id: &str) -> bool {
        match self.entries.get(participant_id) {
            Some(current) if current == connection_id => {
                self.entries.remove(participant_id);
                true
            }
            _ => false,
        }
    }

    /// Every online participant id, for the full-list broadcast.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_lookup() {
        let mut registry = PresenceRegistry::new();
        registry.register("alice", "c1");
        assert_eq!(registry.lookup("alice"), Some("c1"));
        assert_eq!(registry.lookup("bob"), None);
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = PresenceRegistry::new();
        registry.register("alice", "c1");
        registry.register("alice", "c2");
        assert_eq!(registry.lookup("alice"), Some("c2"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn stale_disconnect_does_not_evict_newer_entry() {
        let mut registry = PresenceRegistry::new();
        registry.register("alice", "c1");
        registry.register("alice", "c2");
        assert!(!registry.unregister("alice", "c1"));
        assert_eq!(registry.lookup("alice"), Some("c2"));
    }

    #[test]
    fn matching_unregister_removes_entry() {
        let mut registry = PresenceRegistry::new();
        registry.register("alice", "c1");
        assert!(registry.unregister("alice", "c1"));
        assert_eq!(registry.lookup("alice"), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_unknown_participant_is_a_no_op() {
        let mut registry = PresenceRegistry::new();
        assert!(!registry.unregister("alice", "c1"));
    }

    #[test]
    fn snapshot_lists_every_online_participant() {
        let mut registry = PresenceRegistry::new();
        registry.register("alice", "c1");
        registry.register("bob", "c2");
        let mut snapshot = registry.snapshot();
        snapshot.sort();
        assert_eq!(snapshot, vec!["alice".to_string(), "bob".to_string()]);
    }
}
