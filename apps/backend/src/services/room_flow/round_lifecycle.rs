use std::time::Duration;

use tracing::{info, warn};

use super::{RoomEffects, RoomEvent, RoomFlow, RoundResult, TimerKind};
use crate::domain::dealing::deal_round;
use crate::domain::rules::{crosses_elimination, opening_position, NON_COOPERATION_PENALTY};
use crate::domain::scoring::{penalty_for_hand, RoundScores};
use crate::domain::state::{Phase, SessionId};
use crate::errors::domain::DomainError;

const TURN_CLOCK_TICK: Duration = Duration::from_secs(1);

const LOSER_WINDOW_MESSAGE: &str = "Winner declared. Submit your melds.";
const NO_RESULT_REASON: &str = "No cards left to draw. Round ends without a result.";
const ATTRITION_REASON: &str = "All other players left the match.";

impl RoomFlow {
    /// Reset per-round state, deal a fresh universe and open the first turn.
    pub(super) fn deal_new_round(&mut self) -> Result<RoomEffects, DomainError> {
        self.state.phase = Phase::Dealing;
        self.state.round_no += 1;
        self.state.round_winner = None;
        for player in &mut self.state.players {
            player.reset_for_round();
        }
        self.state.rebuild_turn_order();

        let dealt = deal_round(self.state.turn_order.len(), &mut self.rng)?;
        for (session_id, hand) in self.state.turn_order.clone().into_iter().zip(dealt.hands) {
            if let Some(player) = self.state.player_mut(session_id) {
                player.hand = hand;
            }
        }
        self.state.deck = dealt.deck;
        self.state.discard_pile = dealt.discard_pile;
        self.state.wild_joker = dealt.wild_joker;
        self.state.turn_index = opening_position(self.state.round_no, self.state.turn_order.len());
        self.state.phase = Phase::Playing;

        info!(
            room_id = %self.room_id,
            round_no = self.state.round_no,
            players = self.state.turn_order.len(),
            wild = ?self.state.wild_joker.as_ref().map(|c| c.rank),
            "round dealt"
        );
        Ok(self.begin_turn())
    }

    /// Arm the turn clock for whoever holds the turn now.
    pub(super) fn begin_turn(&mut self) -> RoomEffects {
        self.state.turn_time_remaining = self.config.turn_seconds;
        self.timers.every(TimerKind::TurnClock, TURN_CLOCK_TICK).into()
    }

    /// Non-eliminated players of this round other than the winner.
    pub(super) fn loser_ids(&self) -> Vec<SessionId> {
        self.state
            .turn_order
            .iter()
            .copied()
            .filter(|&id| Some(id) != self.state.round_winner)
            .filter(|&id| self.state.player(id).is_some_and(|p| !p.eliminated))
            .collect()
    }

    pub(super) fn all_losers_submitted(&self) -> bool {
        self.loser_ids().into_iter().all(|id| {
            self.state
                .player(id)
                .is_some_and(|p| p.has_submitted_declare)
        })
    }

    /// A valid declare ended play: score hands now or open the loser window.
    pub(super) fn settle_win(&mut self, winner: SessionId) -> Result<RoomEffects, DomainError> {
        if self.config.show_hands {
            return Ok(self.open_loser_window(winner));
        }
        let wild = self.state.wild_joker.as_ref();
        let mut scores = RoundScores::new();
        scores.insert(winner, 0);
        for id in self.loser_ids() {
            if let Some(player) = self.state.player(id) {
                scores.insert(id, penalty_for_hand(&player.hand, wild));
            }
        }
        self.conclude_round(scores)
    }

    fn open_loser_window(&mut self, winner: SessionId) -> RoomEffects {
        self.state.phase = Phase::LoserDeclaring;
        info!(room_id = %self.room_id, %winner, grace = ?self.config.loser_grace, "loser-declare window open");
        let mut effects = RoomEffects::from(RoomEvent::WinnerDeclared {
            winner,
            message: LOSER_WINDOW_MESSAGE.to_string(),
        });
        effects.push_timer(self.timers.once(TimerKind::LoserGrace, self.config.loser_grace));
        effects
    }

    /// Close the loser window and score it. Runs at most once per window.
    pub(super) fn finalize_loser_window(&mut self) -> Result<RoomEffects, DomainError> {
        if self.state.phase != Phase::LoserDeclaring {
            return Ok(RoomEffects::none());
        }
        let mut effects = RoomEffects::none();
        effects.timers.extend(self.timers.cancel(TimerKind::LoserGrace));

        let mut scores = RoundScores::new();
        if let Some(winner) = self.state.round_winner {
            scores.insert(winner, 0);
        }
        for id in self.loser_ids() {
            let pending = self.state.player(id).and_then(|p| p.pending_penalty);
            if pending.is_none() {
                info!(room_id = %self.room_id, session_id = %id, "no loser grouping submitted; default penalty");
            }
            scores.insert(id, pending.unwrap_or(NON_COOPERATION_PENALTY));
        }
        effects.extend(self.conclude_round(scores)?);
        Ok(effects)
    }

    /// Apply a round's penalties, eliminate, and decide whether the match goes on.
    fn conclude_round(&mut self, scores: RoundScores) -> Result<RoomEffects, DomainError> {
        for (&id, &points) in &scores {
            let player = self
                .state
                .player_mut(id)
                .ok_or_else(|| DomainError::invariant("scored player not seated"))?;
            player.score += points;
            player.pending_penalty = None;
            if !player.eliminated && crosses_elimination(player.score) {
                player.eliminated = true;
                info!(room_id = %self.room_id, session_id = %id, score = player.score, "player eliminated");
            }
        }
        for player in &mut self.state.players {
            player.is_ready = false;
        }
        self.state.phase = Phase::Finished;

        let mut effects = RoomEffects::none();
        let grand_winner = self.sole_survivor();
        if grand_winner.is_some() {
            effects.extend(self.enter_match_over());
        }
        info!(
            room_id = %self.room_id,
            round_no = self.state.round_no,
            match_over = grand_winner.is_some(),
            "round concluded"
        );

        let mut result = RoomEffects::from(RoomEvent::Result(RoundResult {
            winner: self.state.round_winner,
            valid: true,
            reason: None,
            round_scores: Some(scores),
            is_match_over: Some(grand_winner.is_some()),
            grand_winner,
        }));
        result.extend(effects);
        Ok(result)
    }

    /// The deck and discard pile ran dry: nobody wins, nobody is charged.
    pub(super) fn end_round_without_result(&mut self) -> RoomEffects {
        warn!(room_id = %self.room_id, round_no = self.state.round_no, "no cards left; round ends without result");
        let mut effects = RoomEffects::none();
        effects.timers.extend(self.timers.cancel(TimerKind::TurnClock));
        self.state.phase = Phase::Finished;
        self.state.round_winner = None;
        for player in &mut self.state.players {
            player.is_ready = false;
            player.has_drawn = false;
        }
        effects.push_event(RoomEvent::Result(RoundResult {
            winner: None,
            valid: false,
            reason: Some(NO_RESULT_REASON.to_string()),
            round_scores: None,
            is_match_over: Some(false),
            grand_winner: None,
        }));
        effects
    }

    /// Departures left a single player: end the match outside normal scoring.
    pub(super) fn end_match_by_attrition(&mut self) -> RoomEffects {
        let grand_winner = self.sole_survivor();
        info!(room_id = %self.room_id, winner = ?grand_winner, "match over by attrition");
        let mut effects = RoomEffects::from(RoomEvent::Result(RoundResult {
            winner: grand_winner,
            valid: true,
            reason: Some(ATTRITION_REASON.to_string()),
            round_scores: None,
            is_match_over: Some(true),
            grand_winner,
        }));
        effects.extend(self.enter_match_over());
        effects
    }

    fn sole_survivor(&self) -> Option<SessionId> {
        let mut active = self.state.active_players();
        match (active.next(), active.next()) {
            (Some(only), None) => Some(only.session_id),
            _ => None,
        }
    }

    /// Terminal. Teardown is armed exactly once.
    fn enter_match_over(&mut self) -> RoomEffects {
        if self.state.phase == Phase::MatchOver {
            return RoomEffects::none();
        }
        self.state.phase = Phase::MatchOver;
        let mut effects = RoomEffects::none();
        effects.timers.extend(self.timers.cancel(TimerKind::TurnClock));
        effects.timers.extend(self.timers.cancel(TimerKind::LoserGrace));
        effects.timers.extend(self.timers.cancel_reconnects());
        effects.push_timer(self.timers.once(TimerKind::Teardown, self.config.teardown_delay));
        effects
    }
}
