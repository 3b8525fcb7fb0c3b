use crate::actors::signal_server::{ConnectionId, ParticipantId};

use actix::{Message as ActixMessage, Recipient};
use sandline_types::{ClientEvent, ServerEvent};

/// An outbound event destined for one connected client.
#[derive(Debug, Clone, ActixMessage)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerEvent);

/// A transport connection came up. `participant_id` is set when the
/// client declared a stable identity at connect time.
#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Connect {
    pub connection_id: ConnectionId,
    pub participant_id: Option<ParticipantId>,
    pub addr: Recipient<Outbound>,
}

/// A transport connection went away; triggers the full cleanup cascade.
#[derive(ActixMessage)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub connection_id: ConnectionId,
}

/// A parsed inbound frame, tagged with the connection it arrived on.
#[derive(Debug, ActixMessage)]
#[rtype(result = "()")]
pub struct ClientFrame {
    pub connection_id: ConnectionId,
    pub event: ClientEvent,
}
