use rand::Rng;
use tracing::{debug, info};

use super::{DrawSource, RoomEffects, RoomEvent, RoomFlow, TimerKind};
use crate::domain::declare::{DeclareSubmission, LoserSubmission};
use crate::domain::state::{Phase, Presence, SessionId};
use crate::domain::CardId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Inbound player action, already decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Start,
    Draw(DrawSource),
    Discard(CardId),
    Declare(DeclareSubmission),
    LoserDeclare(LoserSubmission),
    PlayAgain,
}

impl RoomFlow {
    /// Route one player action to its handler.
    pub fn apply(&mut self, session_id: SessionId, action: PlayerAction) -> Result<RoomEffects, DomainError> {
        match action {
            PlayerAction::Start => self.start(session_id),
            PlayerAction::Draw(source) => self.draw(session_id, source),
            PlayerAction::Discard(card_id) => self.discard(session_id, card_id),
            PlayerAction::Declare(submission) => self.declare(session_id, submission),
            PlayerAction::LoserDeclare(submission) => self.loser_declare(session_id, submission),
            PlayerAction::PlayAgain => self.play_again(session_id),
        }
    }

    pub(super) fn require_phase(&self, phase: Phase) -> Result<(), DomainError> {
        if self.state.phase != phase {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("expected {:?}, room is {:?}", phase, self.state.phase),
            ));
        }
        Ok(())
    }

    pub(super) fn require_seated(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.state.player(session_id).is_none() {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("session {session_id} is not seated"),
            ));
        }
        Ok(())
    }

    /// Session must be seated and hold the live turn.
    pub(super) fn require_turn(&self, session_id: SessionId) -> Result<(), DomainError> {
        self.require_seated(session_id)?;
        self.require_phase(Phase::Playing)?;
        if self.state.current_turn() != Some(session_id) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("session {session_id} acted out of turn"),
            ));
        }
        Ok(())
    }

    /// Explicit start request. Only meaningful once every seat is filled.
    pub fn start(&mut self, session_id: SessionId) -> Result<RoomEffects, DomainError> {
        self.require_seated(session_id)?;
        self.require_phase(Phase::Waiting)?;
        if self.state.players.len() < self.config.seats {
            return Err(DomainError::validation(
                ValidationKind::NotEligible,
                format!(
                    "waiting for players ({}/{})",
                    self.state.players.len(),
                    self.config.seats
                ),
            ));
        }
        info!(room_id = %self.room_id, %session_id, "start requested");
        self.deal_new_round()
    }

    /// Opt into the next round.
    pub fn play_again(&mut self, session_id: SessionId) -> Result<RoomEffects, DomainError> {
        self.require_seated(session_id)?;
        self.require_phase(Phase::Finished)?;
        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("seated player vanished"))?;
        if player.eliminated {
            return Err(DomainError::validation(
                ValidationKind::NotEligible,
                "eliminated players cannot rejoin the match",
            ));
        }
        player.is_ready = true;
        debug!(room_id = %self.room_id, %session_id, "player ready for next round");
        self.try_restart()
    }

    /// Deal again once every remaining player is ready and nobody is mid-reconnect.
    pub(super) fn try_restart(&mut self) -> Result<RoomEffects, DomainError> {
        if self.state.phase != Phase::Finished || self.state.active_count() < 2 {
            return Ok(RoomEffects::none());
        }
        let everyone_ready = self
            .state
            .active_players()
            .all(|p| p.is_ready && p.presence == Presence::Connected);
        if !everyone_ready {
            return Ok(RoomEffects::none());
        }
        info!(room_id = %self.room_id, round_no = self.state.round_no + 1, "all players ready; restarting");
        self.deal_new_round()
    }

    /// A timer the host scheduled has fired.
    pub fn on_timer(&mut self, kind: TimerKind, generation: u64) -> Result<RoomEffects, DomainError> {
        if !self.timers.fire(kind, generation) {
            debug!(room_id = %self.room_id, ?kind, generation, "ignoring stale timer");
            return Ok(RoomEffects::none());
        }
        match kind {
            TimerKind::TurnClock => self.tick_turn_clock(),
            TimerKind::LoserGrace => {
                info!(room_id = %self.room_id, "loser-declare window expired");
                self.finalize_loser_window()
            }
            TimerKind::Reconnect(session_id) => self.expire_departure(session_id),
            TimerKind::Teardown => {
                info!(room_id = %self.room_id, "tearing room down");
                Ok(RoomEvent::Closed.into())
            }
        }
    }

    fn tick_turn_clock(&mut self) -> Result<RoomEffects, DomainError> {
        if self.state.phase != Phase::Playing {
            return Ok(self.timers.cancel(TimerKind::TurnClock).map(Into::into).unwrap_or_default());
        }
        self.state.turn_time_remaining = self.state.turn_time_remaining.saturating_sub(1);
        if self.state.turn_time_remaining > 0 {
            return Ok(RoomEffects::none());
        }
        self.turn_timeout()
    }

    /// Play the current turn automatically: draw if needed, throw a random card.
    fn turn_timeout(&mut self) -> Result<RoomEffects, DomainError> {
        let session_id = self
            .state
            .current_turn()
            .ok_or_else(|| DomainError::invariant("turn clock running without a turn"))?;
        info!(room_id = %self.room_id, %session_id, "turn timed out");

        let has_drawn = self
            .state
            .player(session_id)
            .map(|p| p.has_drawn)
            .unwrap_or(false);
        if !has_drawn {
            let Some(card) = self.take_from_deck() else {
                return Ok(self.end_round_without_result());
            };
            let player = self
                .state
                .player_mut(session_id)
                .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
            player.hand.push(card);
            player.has_drawn = true;
        }

        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
        if player.hand.is_empty() {
            return Err(DomainError::invariant("turn owner holds no cards"));
        }
        let idx = self.rng.random_range(0..player.hand.len());
        let card = player.hand.remove(idx);
        player.has_drawn = false;
        debug!(room_id = %self.room_id, %session_id, card = %card, "auto-discarded");
        self.state.discard_pile.push(card);

        self.state.advance_turn();
        Ok(self.begin_turn())
    }
}
