use serde::Serialize;
use uuid::Uuid;

use crate::domain::Card;

/// Opaque per-connection identity supplied by the transport.
pub type SessionId = Uuid;

/// Room lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Seats not yet filled.
    Waiting,
    /// Transient: resetting flags, shuffling and dealing.
    Dealing,
    /// Turns are live.
    Playing,
    /// A win was declared; losers may submit their groupings.
    LoserDeclaring,
    /// Round settled; waiting for players to opt into the next one.
    Finished,
    /// One player left standing. Terminal.
    MatchOver,
}

/// Whether a seated player's connection is live.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Connected,
    /// Left mid-match; may reconnect until the grace timer fires.
    Departing,
    /// Gone for good.
    Departed,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub session_id: SessionId,
    pub hand: Vec<Card>,
    /// Cumulative match penalty.
    pub score: u32,
    /// Permanent once the score crosses the threshold or a departure is final.
    pub eliminated: bool,
    pub presence: Presence,
    pub has_drawn: bool,
    pub is_ready: bool,
    /// Set when the player's own declare (winning or loser) has been taken.
    pub has_submitted_declare: bool,
    /// Loser-declare penalty held until the window closes.
    pub pending_penalty: Option<u32>,
}

impl PlayerState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            hand: Vec::with_capacity(crate::domain::rules::DECLARE_SIZE),
            score: 0,
            eliminated: false,
            presence: Presence::Connected,
            has_drawn: false,
            is_ready: false,
            has_submitted_declare: false,
            pending_penalty: None,
        }
    }

    /// Clear everything that only lives for one round.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.has_drawn = false;
        self.is_ready = false;
        self.has_submitted_declare = false;
        self.pending_penalty = None;
    }

    pub fn is_active(&self) -> bool {
        !self.eliminated
    }
}

/// Entire room container, owned by the orchestrator.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub phase: Phase,
    /// 1-based; 0 before the first deal.
    pub round_no: u32,
    /// Seats in join order.
    pub players: Vec<PlayerState>,
    /// Draw end is the back of the vector.
    pub deck: Vec<Card>,
    /// Top card is the back of the vector.
    pub discard_pile: Vec<Card>,
    pub wild_joker: Option<Card>,
    /// Rebuilt every round from non-eliminated seats.
    pub turn_order: Vec<SessionId>,
    pub turn_index: usize,
    pub turn_time_remaining: u32,
    /// Winner of the round being settled, if a valid declare happened.
    pub round_winner: Option<SessionId>,
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            round_no: 0,
            players: Vec::new(),
            deck: Vec::new(),
            discard_pile: Vec::new(),
            wild_joker: None,
            turn_order: Vec::new(),
            turn_index: 0,
            turn_time_remaining: 0,
            round_winner: None,
        }
    }

    pub fn player(&self, id: SessionId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.session_id == id)
    }

    pub fn player_mut(&mut self, id: SessionId) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.session_id == id)
    }

    /// Player whose turn it is, while turns are live.
    pub fn current_turn(&self) -> Option<SessionId> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.turn_order.get(self.turn_index).copied()
    }

    pub fn active_players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Rebuild turn order over non-eliminated seats, keeping seat order.
    pub fn rebuild_turn_order(&mut self) {
        self.turn_order = self
            .players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.session_id)
            .collect();
        self.turn_index = 0;
    }

    /// Move the turn to the next entry in turn order, wrapping.
    ///
    /// The incoming player starts with a clean draw flag.
    pub fn advance_turn(&mut self) -> Option<SessionId> {
        if self.turn_order.is_empty() {
            return None;
        }
        self.turn_index = (self.turn_index + 1) % self.turn_order.len();
        let next = self.turn_order[self.turn_index];
        if let Some(player) = self.player_mut(next) {
            player.has_drawn = false;
        }
        Some(next)
    }

    /// Drop a player from turn order. Returns true if they held the turn.
    pub fn remove_from_turn_order(&mut self, id: SessionId) -> bool {
        let Some(pos) = self.turn_order.iter().position(|&s| s == id) else {
            return false;
        };
        let held_turn = pos == self.turn_index;
        self.turn_order.remove(pos);
        if pos < self.turn_index {
            self.turn_index -= 1;
        }
        if self.turn_order.is_empty() {
            self.turn_index = 0;
        } else {
            self.turn_index %= self.turn_order.len();
        }
        if held_turn {
            if let Some(next) = self.turn_order.get(self.turn_index).copied() {
                if let Some(player) = self.player_mut(next) {
                    player.has_drawn = false;
                }
            }
        }
        held_turn
    }

    /// Cards currently owned by the deck, the discard pile and every hand.
    pub fn cards_in_play(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }
}
