//! What one session is allowed to see of the room.
//!
//! Every seat sees the public table (phase, turn owner, pile sizes, scores,
//! hand sizes). Only the viewer's own hand is included, together with an
//! auto-grouped suggestion of it for display.

use serde::Serialize;

use super::cards_types::Card;
use super::grouping::auto_group;
use super::state::{Phase, Presence, RoomState, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayer {
    pub session_id: SessionId,
    pub score: u32,
    pub hand_size: usize,
    pub eliminated: bool,
    pub connected: bool,
    pub is_ready: bool,
    pub has_drawn: bool,
    pub has_submitted_declare: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerHand {
    pub hand: Vec<Card>,
    /// Display suggestion only; the trailing group may not be a valid meld.
    pub suggested_groups: Vec<Vec<Card>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub phase: Phase,
    pub round_no: u32,
    pub current_turn: Option<SessionId>,
    pub turn_time_remaining: u32,
    pub wild_joker: Option<Card>,
    pub discard_top: Option<Card>,
    pub deck_size: usize,
    pub players: Vec<PublicPlayer>,
    /// Absent when the viewer is not seated.
    pub you: Option<ViewerHand>,
}

/// Build the snapshot `viewer` is entitled to.
pub fn build_snapshot(state: &RoomState, viewer: SessionId) -> RoomSnapshot {
    let wild = state.wild_joker.as_ref();
    let players = state
        .players
        .iter()
        .map(|p| PublicPlayer {
            session_id: p.session_id,
            score: p.score,
            hand_size: p.hand.len(),
            eliminated: p.eliminated,
            connected: p.presence == Presence::Connected,
            is_ready: p.is_ready,
            has_drawn: p.has_drawn,
            has_submitted_declare: p.has_submitted_declare,
        })
        .collect();

    let you = state.player(viewer).map(|p| ViewerHand {
        hand: p.hand.clone(),
        suggested_groups: auto_group(&p.hand, wild),
    });

    RoomSnapshot {
        phase: state.phase,
        round_no: state.round_no,
        current_turn: state.current_turn(),
        turn_time_remaining: state.turn_time_remaining,
        wild_joker: state.wild_joker.clone(),
        discard_top: state.discard_pile.last().cloned(),
        deck_size: state.deck.len(),
        players,
        you,
    }
}
