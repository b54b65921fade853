use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::SessionId;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};
use crate::ws::room_actor::{Act, Connect, Disconnect, ResumeToken, RoomActor, RoomPush};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

const MAX_ROOM_ID_LEN: usize = 64;

#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    /// Token from an earlier `welcome`. A fresh seat is requested when absent.
    pub resume: Option<ResumeToken>,
}

fn validate_room_id(room_id: &str) -> Result<(), AppError> {
    let well_formed = !room_id.is_empty()
        && room_id.len() <= MAX_ROOM_ID_LEN
        && room_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !well_formed {
        return Err(AppError::bad_request(
            "INVALID_ROOM_ID",
            format!("room id must be 1-{MAX_ROOM_ID_LEN} characters of [A-Za-z0-9_-]"),
        ));
    }
    Ok(())
}

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    query: web::Query<JoinQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room_id = path.into_inner();
    validate_room_id(&room_id)?;

    let conn_id = Uuid::new_v4();
    let room = app_state.rooms.get_or_create(&room_id);

    let session = WsSession::new(conn_id, query.resume, room_id, room);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    resume: Option<ResumeToken>,
    room_id: String,
    room: Addr<RoomActor>,

    last_heartbeat: Instant,
    heartbeat_handle: Option<actix::SpawnHandle>,

    /// Set once the room has seated this connection.
    session_id: Option<SessionId>,
}

impl WsSession {
    pub fn new(
        conn_id: Uuid,
        resume: Option<ResumeToken>,
        room_id: String,
        room: Addr<RoomActor>,
    ) -> Self {
        Self {
            conn_id,
            resume,
            room_id,
            room,
            last_heartbeat: Instant::now(),
            heartbeat_handle: None,
            session_id: None,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_error(ctx, code, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    session_id = ?actor.session_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
        self.heartbeat_handle = Some(handle);
    }

    /// Ask the room for a seat. Inbound frames wait until it answers.
    fn join_room(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let connect = Connect {
            conn_id: self.conn_id,
            resume: self.resume,
            recipient: ctx.address().recipient::<RoomPush>(),
        };
        ctx.wait(
            self.room
                .send(connect)
                .into_actor(self)
                .map(|res, actor, ctx| match res {
                    Ok(Ok(joined)) => {
                        actor.session_id = Some(joined.session_id);
                        info!(
                            conn_id = %actor.conn_id,
                            session_id = %joined.session_id,
                            room_id = %actor.room_id,
                            resumed = actor.resume.is_some(),
                            "[WS SESSION] joined room"
                        );
                        Self::send_json(
                            ctx,
                            &ServerMsg::Welcome {
                                session_id: joined.session_id,
                                room_id: actor.room_id.clone(),
                                resume_token: joined.resume_token,
                            },
                        );
                    }
                    Ok(Err(err)) => {
                        let code = join_error_code(&err);
                        actor.send_error_and_close(ctx, code, err.reason());
                    }
                    Err(err) => {
                        warn!(
                            conn_id = %actor.conn_id,
                            room_id = %actor.room_id,
                            error = %err,
                            "[WS SESSION] room unavailable"
                        );
                        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Away)));
                        ctx.stop();
                    }
                }),
        );
    }
}

fn join_error_code(err: &DomainError) -> ErrorCode {
    match err.kind() {
        Some(ValidationKind::RoomFull) => ErrorCode::RoomFull,
        Some(ValidationKind::NotEligible) => ErrorCode::NotEligible,
        _ => ErrorCode::BadRequest,
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            room_id = %self.room_id,
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
        self.join_room(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(session_id) = self.session_id {
            self.room.do_send(Disconnect {
                conn_id: self.conn_id,
                session_id,
            });
        }
        info!(
            conn_id = %self.conn_id,
            session_id = ?self.session_id,
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                // A bad frame is reported but does not cost the player their seat.
                let Ok(cmd) = serde_json::from_str::<ClientMsg>(&text) else {
                    Self::send_error(ctx, ErrorCode::BadRequest, "Malformed message");
                    return;
                };
                let Some(session_id) = self.session_id else {
                    return;
                };
                self.room.do_send(Act {
                    session_id,
                    action: cmd.into(),
                });
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    session_id = ?self.session_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<RoomPush> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: RoomPush, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            RoomPush::Message(payload) => ctx.text(payload),
            RoomPush::Closed => {
                self.session_id = None;
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
            }
        }
    }
}
