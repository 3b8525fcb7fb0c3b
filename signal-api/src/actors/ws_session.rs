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

//! WebSocket session actor.
//!
//! A thin transport adapter: it parses inbound frames into
//! [`ClientEvent`]s and forwards them to the coordinator tagged with
//! this connection's id, and writes outbound [`ServerEvent`]s back to
//! the socket as JSON text. All signaling decisions live in
//! `SignalServer`.

use crate::actors::signal_server::{ConnectionId, ParticipantId, SignalServer};
use crate::constants::{CLIENT_TIMEOUT, HEARTBEAT_INTERVAL};
use crate::messages::{ClientFrame, Connect, Disconnect, Outbound};

use actix::{
    clock::Instant, fut, Actor, ActorContext, ActorFutureExt, Addr, AsyncContext,
    ContextFutureSpawner, Handler, Running, StreamHandler, WrapFuture,
};
use actix_web_actors::ws::{self, WebsocketContext};
use sandline_types::{ClientEvent, ErrorCode, ServerEvent};
use tracing::{debug, error, warn};
use uuid::Uuid;

pub struct WsSession {
    pub id: ConnectionId,
    /// Stable identity declared at connect time, if any. Anonymous
    /// connections can still join meeting rooms.
    pub participant_id: Option<ParticipantId>,
    pub addr: Addr<SignalServer>,
    heartbeat: Instant,
}

impl WsSession {
    pub fn new(addr: Addr<SignalServer>, participant_id: Option<ParticipantId>) -> Self {
        WsSession {
            id: Uuid::new_v4().to_string(),
            participant_id,
            addr,
            heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.heartbeat) > CLIENT_TIMEOUT {
                warn!("client heartbeat failed for {}, disconnecting", act.id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    /// Malformed frames are answered with an error event and dropped;
    /// they never take the session (or anyone else's) down.
    fn reject_frame(&self, ctx: &mut WebsocketContext<Self>, message: &str) {
        let event = ServerEvent::Error {
            code: ErrorCode::BadRequest,
            message: message.to_string(),
        };
        if let Ok(text) = serde_json::to_string(&event) {
            ctx.text(text);
        }
    }
}

impl Actor for WsSession {
    type Context = WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);

        let addr = ctx.address();
        self.addr
            .send(Connect {
                connection_id: self.id.clone(),
                participant_id: self.participant_id.clone(),
                addr: addr.recipient(),
            })
            .into_actor(self)
            .then(|res, _act, ctx| {
                if let Err(err) = res {
                    error!("failed to register with coordinator: {err:?}");
                    ctx.stop();
                }
                fut::ready(())
            })
            .wait(ctx);
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        self.addr.do_send(Disconnect {
            connection_id: self.id.clone(),
        });
        Running::Stop
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, Outbound(event): Outbound, ctx: &mut Self::Context) -> Self::Result {
        match serde_json::to_string(&event) {
            Ok(text) => ctx.text(text),
            Err(err) => error!("dropping unserializable outbound event: {err}"),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, item: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match item {
            Ok(msg) => msg,
            Err(err) => {
                error!("websocket protocol error: {err:?}");
                ctx.stop();
                return;
            }
        };

        match msg {
            ws::Message::Text(text) => {
                self.heartbeat = Instant::now();
                match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => self.addr.do_send(ClientFrame {
                        connection_id: self.id.clone(),
                        event,
                    }),
                    Err(err) => {
                        warn!("malformed event from {}: {err}", self.id);
                        self.reject_frame(ctx, "malformed event");
                    }
                }
            }
            ws::Message::Binary(_) => {
                debug!("unexpected binary frame from {}, dropping", self.id);
            }
            ws::Message::Ping(msg) => {
                self.heartbeat = Instant::now();
                ctx.pong(&msg);
            }
            ws::Message::Pong(_) => {
                self.heartbeat = Instant::now();
            }
            ws::Message::Close(reason) => {
                debug!("close received for {}", self.id);
                ctx.close(reason);
                ctx.stop();
            }
            _ => (),
        }
    }

    fn started(&mut self, _ctx: &mut Self::Context) {}

    fn finished(&mut self, ctx: &mut Self::Context) {
        ctx.stop()
    }
}
