use std::time::Duration;

/// How often the server pings each WebSocket client.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// How long a client may stay silent before being disconnected.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepted shape for client-supplied participant ids.
pub const VALID_ID_PATTERN: &str = r"^[a-zA-Z0-9_@.-]{1,64}$";

/// Display name used when a room joiner supplies none.
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

/// Upper bound for a single WebSocket frame. Signaling payloads are
/// small; anything larger is not ours.
pub const MAX_FRAME_BYTES: usize = 65_536;
