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

pub mod signal_server;
pub mod ws_session;

// Re-export commonly used types
pub use signal_server::{ConnectionId, ParticipantId, RoomId, SignalServer};
pub use ws_session::WsSession;
