use serde::Deserialize;
use tracing::{debug, info};

use super::{RoomEffects, RoomEvent, RoomFlow, RoundResult, TimerKind};
use crate::domain::dealing::recycle_discard_pile;
use crate::domain::declare::{score_loser_declare, validate_declare, DeclareSubmission, LoserSubmission};
use crate::domain::state::{Phase, SessionId};
use crate::domain::{Card, CardId};
use crate::errors::domain::{DomainError, ValidationKind};

/// Which pile a draw takes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    Deck,
    Discard,
}

impl RoomFlow {
    /// Top card of the deck, recycling the discard pile when the deck is empty.
    ///
    /// `None` when neither pile can supply a card.
    pub(super) fn take_from_deck(&mut self) -> Option<Card> {
        if self.state.deck.is_empty() {
            if !recycle_discard_pile(&mut self.state.deck, &mut self.state.discard_pile, &mut self.rng) {
                return None;
            }
            info!(room_id = %self.room_id, deck = self.state.deck.len(), "deck empty; discard pile reshuffled");
        }
        self.state.deck.pop()
    }

    pub fn draw(&mut self, session_id: SessionId, source: DrawSource) -> Result<RoomEffects, DomainError> {
        self.require_turn(session_id)?;
        if self.state.player(session_id).is_some_and(|p| p.has_drawn) {
            return Err(DomainError::validation(
                ValidationKind::AlreadyDrew,
                "only one draw per turn",
            ));
        }

        let card = match source {
            DrawSource::Deck => match self.take_from_deck() {
                Some(card) => card,
                None => return Ok(self.end_round_without_result()),
            },
            DrawSource::Discard => self.state.discard_pile.pop().ok_or_else(|| {
                DomainError::validation(ValidationKind::EmptyPile, "discard pile is empty")
            })?,
        };
        debug!(room_id = %self.room_id, %session_id, ?source, card = %card, "drew card");

        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
        player.hand.push(card);
        player.has_drawn = true;
        Ok(RoomEffects::none())
    }

    pub fn discard(&mut self, session_id: SessionId, card_id: CardId) -> Result<RoomEffects, DomainError> {
        self.require_turn(session_id)?;
        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
        if !player.has_drawn {
            return Err(DomainError::validation(
                ValidationKind::MustDrawFirst,
                "draw before discarding",
            ));
        }
        let idx = player
            .hand
            .iter()
            .position(|card| card.id == card_id)
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::CardNotInHand, format!("card {card_id} not in hand"))
            })?;
        let card = player.hand.remove(idx);
        player.has_drawn = false;
        debug!(room_id = %self.room_id, %session_id, card = %card, "discarded");
        self.state.discard_pile.push(card);

        self.state.advance_turn();
        Ok(self.begin_turn())
    }

    /// Winning declare by the turn owner.
    ///
    /// A grouping that fails the rules is reported to everyone and the turn
    /// carries on untouched.
    pub fn declare(
        &mut self,
        session_id: SessionId,
        submission: DeclareSubmission,
    ) -> Result<RoomEffects, DomainError> {
        self.require_turn(session_id)?;
        let player = self
            .state
            .player(session_id)
            .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
        if !player.has_drawn {
            return Err(DomainError::validation(
                ValidationKind::MustDrawFirst,
                "draw before declaring",
            ));
        }

        let discard_id = match validate_declare(&player.hand, &submission, self.state.wild_joker.as_ref()) {
            Ok(discard_id) => discard_id,
            Err(err @ DomainError::Validation { .. }) => {
                info!(room_id = %self.room_id, %session_id, reason = err.reason(), "declare rejected");
                return Ok(RoomEvent::Result(RoundResult::rejected(session_id, err.reason())).into());
            }
            Err(err) => return Err(err),
        };

        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("turn owner not seated"))?;
        let idx = player
            .hand
            .iter()
            .position(|card| card.id == discard_id)
            .ok_or_else(|| DomainError::invariant("validated discard missing from hand"))?;
        let card = player.hand.remove(idx);
        player.has_drawn = false;
        player.has_submitted_declare = true;
        self.state.discard_pile.push(card);
        self.state.round_winner = Some(session_id);
        info!(room_id = %self.room_id, %session_id, round_no = self.state.round_no, "valid declare");

        let mut effects = RoomEffects::none();
        effects.timers.extend(self.timers.cancel(TimerKind::TurnClock));
        effects.extend(self.settle_win(session_id)?);
        Ok(effects)
    }

    /// A non-winner's grouping during the loser-declare window.
    pub fn loser_declare(
        &mut self,
        session_id: SessionId,
        submission: LoserSubmission,
    ) -> Result<RoomEffects, DomainError> {
        self.require_seated(session_id)?;
        self.require_phase(Phase::LoserDeclaring)?;
        if !self.loser_ids().contains(&session_id) {
            return Err(DomainError::validation(
                ValidationKind::NotEligible,
                "only losers of this round may submit",
            ));
        }
        let wild = self.state.wild_joker.clone();
        let player = self
            .state
            .player_mut(session_id)
            .ok_or_else(|| DomainError::invariant("seated player vanished"))?;
        if player.has_submitted_declare {
            return Err(DomainError::validation(
                ValidationKind::AlreadySubmitted,
                "one submission per round",
            ));
        }

        let penalty = score_loser_declare(&player.hand, &submission, wild.as_ref())?;
        player.pending_penalty = Some(penalty);
        player.has_submitted_declare = true;
        info!(
            room_id = %self.room_id,
            %session_id,
            penalty,
            auto = submission.is_auto(),
            "loser grouping submitted"
        );

        if self.all_losers_submitted() {
            return self.finalize_loser_window();
        }
        Ok(RoomEffects::none())
    }
}
