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

//! Meeting room membership.
//!
//! Rooms exist implicitly: the first join creates one, the last leave
//! destroys it. A connection belongs to at most one room at a time;
//! joining another room implicitly leaves the previous one.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RoomMember {
    pub connection_id: String,
    pub display_name: String,
}

/// What a join produced: the membership snapshot to hand the joiner,
/// plus the departure notice for a previous room if the join implied one.
#[derive(Debug)]
pub struct JoinOutcome {
    /// Connections already in the room, excluding the joiner.
    pub existing: Vec<String>,
    pub left: Option<LeaveOutcome>,
}

/// Departure notice: the room left and who remains in it.
#[derive(Debug)]
pub struct LeaveOutcome {
    pub room_id: String,
    pub remaining: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RoomTable {
    rooms: HashMap<String, Vec<RoomMember>>,
    // connection -> room it currently sits in
    membership: HashMap<String, String>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection_id` under `room_id`, leaving any previous
    /// room first. The snapshot handed back is taken at join time and
    /// excludes the joiner.
    pub fn join(&mut self, connection_id: &str, room_id: &str, display_name: &str) -> JoinOutcome {
        let left = self.leave(connection_id);

        let members = self.rooms.entry(room_id.to_string()).or_default();
        let existing = members
            .iter()
            .map(|m| m.connection_id.clone())
            .collect();
        members.push(RoomMember {
            connection_id: connection_id.to_string(),
            display_name: display_name.to_string(),
        });
        self.membership
            .insert(connection_id.to_string(), room_id.to_string());

        JoinOutcome { existing, left }
    }

    /// Remove `connection_id` from its room, if any, and clear the
    /// association so a later rejoin starts clean. The room itself is
    /// dropped once empty.
    pub fn leave(&mut self, connection_id: &str) -> Option<LeaveOutcome> {
        let room_id = self.membership.remove(connection_id)?;
        let members = self.rooms.get_mut(&room_id)?;
        members.retain(|m| m.connection_id != connection_id);

        let remaining = members.iter().map(|m| m.connection_id.clone()).collect();
        if members.is_empty() {
            self.rooms.remove(&room_id);
        }
        Some(LeaveOutcome { room_id, remaining })
    }

    pub fn room_of(&self, connection_id: &str) -> Option<&str> {
        self.membership.get(connection_id).map(String::as_str)
    }

    pub fn members(&self, room_id: &str) -> &[RoomMember] {
        self.rooms.get(room_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn display_name(&self, connection_id: &str) -> Option<&str> {
        let room_id = self.membership.get(connection_id)?;
        self.rooms
            .get(room_id)?
            .iter()
            .find(|m| m.connection_id == connection_id)
            .map(|m| m.display_name.as_str())
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_returns_existing_members_excluding_self() {
        let mut rooms = RoomTable::new();
        assert!(rooms.join("b", "r1", "Bob").existing.is_empty());
        assert_eq!(rooms.join("c", "r1", "Carol").existing, vec!["b"]);

        let mut existing = rooms.join("a", "r1", "Alice").existing;
        existing.sort();
        assert_eq!(existing, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn joining_a_new_room_implicitly_leaves_the_old_one() {
        let mut rooms = RoomTable::new();
        rooms.join("a", "r1", "Alice");
        rooms.join("b", "r1", "Bob");

        let outcome = rooms.join("b", "r2", "Bob");
        let left = outcome.left.expect("implicit leave of r1");
        assert_eq!(left.room_id, "r1");
        assert_eq!(left.remaining, vec!["a"]);
        assert_eq!(rooms.room_of("b"), Some("r2"));
        assert_eq!(rooms.members("r1").len(), 1);
    }

    #[test]
    fn last_leave_tears_the_room_down() {
        let mut rooms = RoomTable::new();
        rooms.join("a", "r1", "Alice");
        let left = rooms.leave("a").expect("was a member");
        assert!(left.remaining.is_empty());
        assert_eq!(rooms.room_count(), 0);
        // A rejoin starts from an empty room.
        assert!(rooms.join("b", "r1", "Bob").existing.is_empty());
    }

    #[test]
    fn leave_without_membership_is_a_no_op() {
        let mut rooms = RoomTable::new();
        assert!(rooms.leave("ghost").is_none());
    }

    #[test]
    fn display_names_track_the_current_room() {
        let mut rooms = RoomTable::new();
        rooms.join("a", "r1", "Alice");
        assert_eq!(rooms.display_name("a"), Some("Alice"));
        rooms.leave("a");
        assert_eq!(rooms.display_name("a"), None);
    }
}
