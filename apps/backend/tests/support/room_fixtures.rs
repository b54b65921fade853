//! Fixtures for driving a `RoomFlow` by hand: seating, rigged hands and
//! manual timer firings.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rummy_backend::domain::cards_parsing::{parse_card, try_parse_cards};
use rummy_backend::domain::{Card, CardId, DeclareSubmission, SessionId};
use rummy_backend::services::room_flow::{RoomEffects, TimerKind};
use rummy_backend::{RoomConfig, RoomFlow};
use uuid::Uuid;

/// Wild rank every rigged round uses.
pub const WILD: &str = "7C";

/// First id of rigged hands, clear of the dealt universe.
pub const RIGGED_IDS: u16 = 1000;

/// 4S 5S 6S | 9D 10D 7H | KH KD KC | 2S 2H 2D 2C | QH, with 7C wild.
pub const WINNING_HAND: [&str; 14] = [
    "4S", "5S", "6S", "9D", "10D", "7H", "KH", "KD", "KC", "2S", "2H", "2D", "2C", "QH",
];

/// Thirteen face-heavy cards with no meld among them in hand order.
pub const HEAVY_HAND: [&str; 13] = [
    "KH", "QD", "JC", "KS", "QH", "JD", "KC", "QS", "JH", "KD", "QC", "JS", "9H",
];

pub fn config(seats: usize) -> RoomConfig {
    RoomConfig {
        seats,
        turn_seconds: 3,
        ..RoomConfig::default()
    }
}

pub fn room(config: RoomConfig) -> RoomFlow {
    RoomFlow::with_rng("fixture-room", config, StdRng::seed_from_u64(7))
}

/// A room with every seat filled, so the first round is dealt.
pub fn dealt_room(config: RoomConfig) -> (RoomFlow, Vec<SessionId>) {
    let mut flow = room(config);
    let players: Vec<SessionId> = (0..flow.config().seats).map(|_| Uuid::new_v4()).collect();
    for &id in &players {
        flow.join(id).expect("seat available");
    }
    (flow, players)
}

pub fn turn_owner(flow: &RoomFlow) -> SessionId {
    flow.state().current_turn().expect("a live turn")
}

pub fn others(players: &[SessionId], id: SessionId) -> Vec<SessionId> {
    players.iter().copied().filter(|&p| p != id).collect()
}

pub fn hand_len(flow: &RoomFlow, id: SessionId) -> usize {
    flow.state().player(id).map(|p| p.hand.len()).unwrap_or(0)
}

/// Fire the armed timer of `kind` with its current generation.
pub fn fire(flow: &mut RoomFlow, kind: TimerKind) -> RoomEffects {
    let generation = flow
        .timers()
        .armed_generation(kind)
        .unwrap_or_else(|| panic!("{kind:?} is not armed"));
    flow.on_timer(kind, generation).expect("timer handled")
}

/// Tick the turn clock until the current turn runs out.
pub fn expire_turn(flow: &mut RoomFlow) -> RoomEffects {
    let mut effects = RoomEffects::none();
    for _ in 0..flow.state().turn_time_remaining {
        effects.extend(fire(flow, TimerKind::TurnClock));
    }
    effects
}

pub fn wild_card() -> Card {
    parse_card(CardId(2000), WILD).expect("valid wild token")
}

/// Replace `id`'s hand with `tokens`, numbered from `first_id`.
pub fn rig_hand(flow: &mut RoomFlow, id: SessionId, first_id: u16, tokens: &[&str]) -> Vec<Card> {
    let hand = try_parse_cards(first_id, tokens.iter().copied()).expect("valid tokens");
    flow.state_mut().wild_joker = Some(wild_card());
    let player = flow.state_mut().player_mut(id).expect("seated player");
    player.hand = hand.clone();
    hand
}

/// Give the turn owner a winning 14-card hand as if they had just drawn.
pub fn rig_winner(flow: &mut RoomFlow, id: SessionId) -> Vec<Card> {
    let hand = rig_hand(flow, id, RIGGED_IDS, &WINNING_HAND);
    flow.state_mut().player_mut(id).expect("seated player").has_drawn = true;
    hand
}

fn ids(offsets: &[u16]) -> Vec<CardId> {
    offsets.iter().map(|&o| CardId(RIGGED_IDS + o)).collect()
}

/// The valid declare for [`WINNING_HAND`]: QH is thrown.
pub fn winning_submission() -> DeclareSubmission {
    DeclareSubmission {
        melds: vec![
            ids(&[0, 1, 2]),
            ids(&[3, 4, 5]),
            ids(&[6, 7, 8]),
            ids(&[9, 10, 11, 12]),
        ],
        discard: CardId(RIGGED_IDS + 13),
    }
}

/// Same cards, but the spade run is broken up so nothing is pure.
pub fn impure_submission() -> DeclareSubmission {
    DeclareSubmission {
        melds: vec![
            ids(&[0, 1, 5]),
            ids(&[3, 4, 2]),
            ids(&[6, 7, 8]),
            ids(&[9, 10, 11, 12]),
        ],
        discard: CardId(RIGGED_IDS + 13),
    }
}
