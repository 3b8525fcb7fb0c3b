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

//! Sandline signaling server.
//!
//! Real-time core of a messaging app: an online-presence directory,
//! the direct audio/video call handshake, and N-party meeting rooms
//! with full-mesh WebRTC negotiation relay — all over one WebSocket
//! event channel per client. Chat CRUD, auth, and persistence are
//! external collaborators and not part of this crate.

pub mod actors;
pub mod call;
pub mod constants;
pub mod directory;
pub mod lobby;
pub mod messages;
pub mod models;
pub mod presence;
pub mod room;
