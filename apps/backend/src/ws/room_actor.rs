//! One actor per room: the sequential execution context for a `RoomFlow`.
//!
//! Player actions, connects, disconnects and timer firings all arrive as
//! actor messages or context callbacks, so the room is only ever mutated by
//! one of them at a time. After every accepted mutation the actor carries out
//! the returned effects: it (re)schedules timers, broadcasts events, and
//! pushes each connected session its own view of the room.

use std::collections::HashMap;
use std::sync::Weak;

use actix::prelude::*;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{RoomSnapshot, SessionId};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::room_flow::{
    PlayerAction, RoomEffects, RoomEvent, RoomFlow, TimerCommand, TimerKind,
};
use crate::ws::hub::RoomRegistry;
use crate::ws::protocol::ServerMsg;

/// Outbound traffic from a room to one session.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub enum RoomPush {
    /// Serialized `ServerMsg`.
    Message(String),
    /// The room was torn down.
    Closed,
}

/// Secret handed to one client in its `welcome`. Presenting it on a later
/// connection reattaches that client's seat. Never broadcast.
pub type ResumeToken = Uuid;

/// Attach a connection to a seat: a fresh one, or the seat `resume` was
/// issued for. Refused joins leave the room untouched.
#[derive(Message)]
#[rtype(result = "Result<Joined, DomainError>")]
pub struct Connect {
    pub conn_id: Uuid,
    pub resume: Option<ResumeToken>,
    pub recipient: Recipient<RoomPush>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joined {
    pub session_id: SessionId,
    pub resume_token: ResumeToken,
}

/// The connection `conn_id` went away. Ignored if the session has since
/// attached through a newer connection.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: Uuid,
    pub session_id: SessionId,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Act {
    pub session_id: SessionId,
    pub action: PlayerAction,
}

#[derive(Message)]
#[rtype(result = "RoomSnapshot")]
pub struct GetSnapshot {
    pub viewer: SessionId,
}

struct Attached {
    conn_id: Uuid,
    recipient: Recipient<RoomPush>,
}

pub struct RoomActor {
    flow: RoomFlow,
    sessions: HashMap<SessionId, Attached>,
    resume_tokens: HashMap<ResumeToken, SessionId>,
    timer_handles: HashMap<TimerKind, SpawnHandle>,
    registry: Option<Weak<RoomRegistry>>,
}

impl RoomActor {
    pub fn new(flow: RoomFlow) -> Self {
        Self {
            flow,
            sessions: HashMap::new(),
            resume_tokens: HashMap::new(),
            timer_handles: HashMap::new(),
            registry: None,
        }
    }

    /// Remove the room from `registry` when it closes.
    pub fn with_registry(mut self, registry: Weak<RoomRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    fn push(&self, session_id: SessionId, msg: &ServerMsg) {
        let Some(attached) = self.sessions.get(&session_id) else {
            return;
        };
        match serde_json::to_string(msg) {
            Ok(payload) => attached.recipient.do_send(RoomPush::Message(payload)),
            Err(err) => warn!(error = %err, "[ROOM] failed to serialize outbound message"),
        }
    }

    fn broadcast(&self, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => {
                for attached in self.sessions.values() {
                    attached.recipient.do_send(RoomPush::Message(payload.clone()));
                }
            }
            Err(err) => warn!(error = %err, "[ROOM] failed to serialize broadcast"),
        }
    }

    fn broadcast_state(&self) {
        for &session_id in self.sessions.keys() {
            self.push(session_id, &ServerMsg::State(self.flow.snapshot_for(session_id)));
        }
    }

    fn schedule(&mut self, command: TimerCommand, ctx: &mut Context<Self>) {
        let kind = command.kind();
        if let Some(handle) = self.timer_handles.remove(&kind) {
            ctx.cancel_future(handle);
        }
        let handle = match command {
            TimerCommand::Once {
                kind,
                generation,
                delay,
            } => ctx.run_later(delay, move |actor, ctx| {
                actor.timer_handles.remove(&kind);
                actor.fire(kind, generation, ctx);
            }),
            TimerCommand::Every {
                kind,
                generation,
                interval,
            } => ctx.run_interval(interval, move |actor, ctx| {
                actor.fire(kind, generation, ctx);
            }),
            TimerCommand::Cancel { .. } => return,
        };
        self.timer_handles.insert(kind, handle);
    }

    fn fire(&mut self, kind: TimerKind, generation: u64, ctx: &mut Context<Self>) {
        match self.flow.on_timer(kind, generation) {
            Ok(effects) => self.apply_effects(effects, ctx),
            Err(err) => warn!(
                room_id = %self.flow.room_id(),
                ?kind,
                error = %err,
                "[ROOM] timer handling failed"
            ),
        }
    }

    fn apply_effects(&mut self, effects: RoomEffects, ctx: &mut Context<Self>) {
        for command in effects.timers {
            self.schedule(command, ctx);
        }

        let mut closed = false;
        for event in effects.events {
            match event {
                RoomEvent::Result(result) => self.broadcast(&ServerMsg::Result(result)),
                RoomEvent::WinnerDeclared { winner, message } => {
                    self.broadcast(&ServerMsg::WinnerDeclared { winner, message })
                }
                RoomEvent::Closed => closed = true,
            }
        }

        if closed {
            self.close(ctx);
        } else {
            self.broadcast_state();
        }
    }

    fn close(&mut self, ctx: &mut Context<Self>) {
        info!(room_id = %self.flow.room_id(), sessions = self.sessions.len(), "[ROOM] closing");
        for attached in self.sessions.values() {
            attached.recipient.do_send(RoomPush::Closed);
        }
        self.sessions.clear();
        if let Some(registry) = self.registry.as_ref().and_then(Weak::upgrade) {
            registry.remove(self.flow.room_id());
        }
        ctx.stop();
    }

    fn refused(&self, session_id: SessionId, err: &DomainError) {
        debug!(
            room_id = %self.flow.room_id(),
            %session_id,
            code = err.kind().map(|kind| kind.code()).unwrap_or("INVARIANT"),
            error = %err,
            "[ROOM] action refused"
        );
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            room_id = %self.flow.room_id(),
            seats = self.flow.config().seats,
            "[ROOM] started"
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.flow.room_id(), "[ROOM] stopped");
    }
}

impl Handler<Connect> for RoomActor {
    type Result = Result<Joined, DomainError>;

    fn handle(&mut self, msg: Connect, ctx: &mut Self::Context) -> Self::Result {
        let (session_id, resume_token) = match msg.resume {
            Some(token) => match self.resume_tokens.get(&token) {
                Some(&session_id) => (session_id, token),
                None => {
                    return Err(DomainError::validation(
                        ValidationKind::NotEligible,
                        "unknown resume token",
                    ))
                }
            },
            None => (Uuid::new_v4(), Uuid::new_v4()),
        };

        let effects = self.flow.join(session_id)?;
        self.resume_tokens.insert(resume_token, session_id);
        let attached = Attached {
            conn_id: msg.conn_id,
            recipient: msg.recipient,
        };
        if let Some(previous) = self.sessions.insert(session_id, attached) {
            debug!(%session_id, old_conn = %previous.conn_id, "[ROOM] session moved to a new connection");
            previous.recipient.do_send(RoomPush::Closed);
        }
        self.apply_effects(effects, ctx);
        Ok(Joined {
            session_id,
            resume_token,
        })
    }
}

impl Handler<Disconnect> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) {
        match self.sessions.get(&msg.session_id) {
            Some(attached) if attached.conn_id == msg.conn_id => {
                self.sessions.remove(&msg.session_id);
            }
            _ => return,
        }
        match self.flow.leave(msg.session_id) {
            Ok(effects) => self.apply_effects(effects, ctx),
            Err(err) => self.refused(msg.session_id, &err),
        }
    }
}

impl Handler<Act> for RoomActor {
    type Result = ();

    fn handle(&mut self, msg: Act, ctx: &mut Self::Context) {
        if !self.sessions.contains_key(&msg.session_id) {
            debug!(session_id = %msg.session_id, "[ROOM] action from detached session");
            return;
        }
        match self.flow.apply(msg.session_id, msg.action) {
            Ok(effects) => self.apply_effects(effects, ctx),
            Err(err) => self.refused(msg.session_id, &err),
        }
    }
}

impl Handler<GetSnapshot> for RoomActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.flow.snapshot_for(msg.viewer))
    }
}
