//! Seating: joining, leaving, and the reconnection grace period.
//!
//! A player who leaves mid-match keeps their seat as `Departing` until the
//! reconnection timer fires. During that window they still hold their place
//! in turn order and their turn clock keeps running, so a silent turn is
//! auto-played on timeout. Reconnecting restores them; expiry makes the
//! elimination final, charges the departure penalty and drops them from
//! turn order.

use tracing::{debug, info, warn};

use super::{RoomEffects, RoomFlow, TimerKind};
use crate::domain::rules::DEPARTURE_PENALTY;
use crate::domain::state::{Phase, PlayerState, Presence, SessionId};
use crate::errors::domain::{DomainError, ValidationKind};

impl RoomFlow {
    /// Seat a new session, or reattach a departing one.
    ///
    /// Filling the last seat deals the first round.
    pub fn join(&mut self, session_id: SessionId) -> Result<RoomEffects, DomainError> {
        if let Some(player) = self.state.player_mut(session_id) {
            return match player.presence {
                Presence::Connected => {
                    debug!(room_id = %self.room_id, %session_id, "session already seated");
                    Ok(RoomEffects::none())
                }
                Presence::Departing => {
                    player.presence = Presence::Connected;
                    info!(room_id = %self.room_id, %session_id, "player reconnected");
                    let mut effects = RoomEffects::none();
                    effects
                        .timers
                        .extend(self.timers.cancel(TimerKind::Reconnect(session_id)));
                    effects.extend(self.try_restart()?);
                    Ok(effects)
                }
                Presence::Departed => Err(DomainError::validation(
                    ValidationKind::NotEligible,
                    "reconnection grace has expired",
                )),
            };
        }

        if self.state.phase != Phase::Waiting || self.state.players.len() >= self.config.seats {
            return Err(DomainError::validation(
                ValidationKind::RoomFull,
                format!("room {} is not accepting players", self.room_id),
            ));
        }
        self.state.players.push(PlayerState::new(session_id));
        info!(
            room_id = %self.room_id,
            %session_id,
            seated = self.state.players.len(),
            seats = self.config.seats,
            "player joined"
        );

        if self.state.players.len() == self.config.seats {
            return self.deal_new_round();
        }
        Ok(RoomEffects::none())
    }

    /// The session's connection went away.
    pub fn leave(&mut self, session_id: SessionId) -> Result<RoomEffects, DomainError> {
        let phase = self.state.phase;
        let Some(player) = self.state.player_mut(session_id) else {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("session {session_id} is not seated"),
            ));
        };

        match phase {
            Phase::Waiting => {
                self.state.players.retain(|p| p.session_id != session_id);
                info!(room_id = %self.room_id, %session_id, "player left before the match started");
                Ok(RoomEffects::none())
            }
            Phase::MatchOver => {
                player.presence = Presence::Departed;
                Ok(RoomEffects::none())
            }
            _ if player.eliminated => {
                player.presence = Presence::Departed;
                debug!(room_id = %self.room_id, %session_id, "eliminated player left");
                Ok(RoomEffects::none())
            }
            _ if player.presence != Presence::Connected => Ok(RoomEffects::none()),
            _ => {
                player.presence = Presence::Departing;
                info!(
                    room_id = %self.room_id,
                    %session_id,
                    grace = ?self.config.reconnect_grace,
                    "player departed; awaiting reconnection"
                );
                Ok(self
                    .timers
                    .once(TimerKind::Reconnect(session_id), self.config.reconnect_grace)
                    .into())
            }
        }
    }

    /// Reconnection grace ran out: the departure becomes a final elimination.
    pub(super) fn expire_departure(&mut self, session_id: SessionId) -> Result<RoomEffects, DomainError> {
        let phase = self.state.phase;
        let Some(player) = self.state.player_mut(session_id) else {
            return Ok(RoomEffects::none());
        };
        if player.presence != Presence::Departing {
            return Ok(RoomEffects::none());
        }
        if phase == Phase::MatchOver || player.eliminated {
            player.presence = Presence::Departed;
            debug!(room_id = %self.room_id, %session_id, "grace expired for a player already out");
            return Ok(RoomEffects::none());
        }
        player.presence = Presence::Departed;
        player.eliminated = true;
        player.is_ready = false;
        player.score += DEPARTURE_PENALTY;
        warn!(
            room_id = %self.room_id,
            %session_id,
            score = player.score,
            "reconnection grace expired; player eliminated"
        );

        let held_turn = self.state.remove_from_turn_order(session_id);
        if self.state.active_count() <= 1 {
            return Ok(self.end_match_by_attrition());
        }

        match self.state.phase {
            Phase::Playing if held_turn => Ok(self.begin_turn()),
            Phase::LoserDeclaring if self.all_losers_submitted() => self.finalize_loser_window(),
            Phase::Finished => self.try_restart(),
            _ => Ok(RoomEffects::none()),
        }
    }
}
