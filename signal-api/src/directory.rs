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

//! User directory seam.
//!
//! The signaling core treats the chat backend's user store as an
//! external collaborator: the only thing it ever asks for is display
//! metadata to decorate an incoming-call notification with.

use std::collections::HashMap;

/// Resolve a stable participant identity to display metadata.
pub trait UserDirectory: Send + Sync {
    fn display_name(&self, participant_id: &str) -> Option<String>;
}

/// Directory that resolves nothing. Used when no user store is wired
/// in; clients then fall back to showing the raw participant id.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUserDirectory;

impl UserDirectory for NullUserDirectory {
    fn display_name(&self, _participant_id: &str) -> Option<String> {
        None
    }
}

/// Fixed in-memory directory. Handy for tests and single-tenant
/// deployments with a known roster.
#[derive(Debug, Default, Clone)]
pub struct StaticUserDirectory {
    names: HashMap<String, String>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, participant_id: impl Into<String>, display_name: impl Into<String>) {
        self.names.insert(participant_id.into(), display_name.into());
    }
}

impl UserDirectory for StaticUserDirectory {
    fn display_name(&self, participant_id: &str) -> Option<String> {
        self.names.get(participant_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_directory_resolves_nothing() {
        assert_eq!(NullUserDirectory.display_name("alice"), None);
    }

    #[test]
    fn static_directory_resolves_known_ids() {
        let mut directory = StaticUserDirectory::new();
        directory.insert("alice", "Alice Waters");
        assert_eq!(
            directory.display_name("alice").as_deref(),
            Some("Alice Waters")
        );
        assert_eq!(directory.display_name("bob"), None);
    }
}
