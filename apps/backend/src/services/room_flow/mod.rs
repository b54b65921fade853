//! Room orchestration: the match state machine for one rummy room.
//!
//! `RoomFlow` owns the room's [`RoomState`] and is driven by player actions
//! and timer firings, one at a time. Every operation either refuses the
//! action (`Err`, nothing changed) or applies it and returns the
//! [`RoomEffects`] the host must carry out: broadcasts and timer commands.

mod mutation;
mod orchestration;
mod player_actions;
mod round_lifecycle;
pub mod seats;
mod timers;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use mutation::{RoomEffects, RoomEvent, RoundResult};
pub use orchestration::PlayerAction;
pub use player_actions::DrawSource;
pub use timers::{TimerBook, TimerCommand, TimerKind};

use crate::config::RoomConfig;
use crate::domain::player_view::{build_snapshot, RoomSnapshot};
use crate::domain::state::{Presence, RoomState, SessionId};

pub struct RoomFlow {
    room_id: String,
    config: RoomConfig,
    state: RoomState,
    rng: StdRng,
    timers: TimerBook,
}

impl RoomFlow {
    pub fn new(room_id: impl Into<String>, config: RoomConfig) -> Self {
        Self::with_rng(room_id, config, StdRng::from_os_rng())
    }

    /// Build with a caller-chosen RNG, for reproducible deals.
    pub fn with_rng(room_id: impl Into<String>, config: RoomConfig, rng: StdRng) -> Self {
        Self {
            room_id: room_id.into(),
            config,
            state: RoomState::new(),
            rng,
            timers: TimerBook::default(),
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    /// Direct state access for fixtures and admin tooling.
    pub fn state_mut(&mut self) -> &mut RoomState {
        &mut self.state
    }

    pub fn timers(&self) -> &TimerBook {
        &self.timers
    }

    pub fn snapshot_for(&self, viewer: SessionId) -> RoomSnapshot {
        build_snapshot(&self.state, viewer)
    }

    /// Sessions currently attached to a seat.
    pub fn connected_sessions(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.state
            .players
            .iter()
            .filter(|p| p.presence == Presence::Connected)
            .map(|p| p.session_id)
    }
}
