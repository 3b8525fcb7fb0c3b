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

//! WebSocket entry point for the signaling server.
//!
//! **`GET /signal?userId=<id>`** upgrades to the event channel. The
//! `userId` query parameter is optional: with it the connection is
//! registered in the presence map for direct calling; without it the
//! connection is anonymous and can only use meeting rooms.

use actix::prelude::Stream;
use actix::Actor;
use actix::StreamHandler;
use actix_http::error::PayloadError;
use actix_http::ws::{Codec, Message, ProtocolError};
use actix_web::web::Bytes;
use actix_web::{get, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws::{handshake, WebsocketContext};
use tracing::debug;

use crate::actors::ws_session::WsSession;
use crate::constants::{MAX_FRAME_BYTES, VALID_ID_PATTERN};
use crate::models::AppState;

/// Query parameters for the signaling endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct SignalQuery {
    /// Stable participant identity; omit for anonymous meeting-only use.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Start a WebSocket connection with a custom codec.
fn start_with_codec<A, S>(
    actor: A,
    req: &HttpRequest,
    stream: S,
    codec: Codec,
) -> Result<HttpResponse, Error>
where
    A: Actor<Context = WebsocketContext<A>> + StreamHandler<Result<Message, ProtocolError>>,
    S: Stream<Item = Result<Bytes, PayloadError>> + 'static,
{
    let mut res = handshake(req)?;
    Ok(res.streaming(WebsocketContext::with_codec(actor, stream, codec)))
}

#[get("/signal")]
pub async fn ws_connect(
    query: web::Query<SignalQuery>,
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    // Some clients serialize a missing identity as the literal string
    // "undefined"; treat it the same as absent.
    let participant_id = query
        .into_inner()
        .user_id
        .filter(|id| !id.is_empty() && id != "undefined");

    if let Some(id) = &participant_id {
        let re = regex::Regex::new(VALID_ID_PATTERN)
            .map_err(actix_web::error::ErrorInternalServerError)?;
        if !re.is_match(id) {
            debug!("rejecting connect with invalid userId: {id}");
            return Ok(HttpResponse::BadRequest().body("Invalid userId format"));
        }
    }

    debug!("socket connected, userId={participant_id:?}");
    let actor = WsSession::new(state.signal.clone(), participant_id);
    let codec = Codec::new().max_size(MAX_FRAME_BYTES);
    start_with_codec(actor, &req, stream, codec)
}
