//! Meld validation: pure sequences, sequences with jokers, and sets.
//!
//! All predicates are pure and take the round's wild joker (if any) so that
//! "functionally a joker" is evaluated consistently everywhere.

use serde::Serialize;

use super::cards_logic::{is_functional_joker, split_jokers};
use super::cards_types::Card;
use super::rules::{MAX_SET_SIZE, MIN_MELD_SIZE};

/// Which way the ace is counted when checking a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum AceOrder {
    /// A-2-3 ... K; the ace touches the two only.
    Low,
    /// 2 ... K-A; the ace touches the king only.
    High,
}

impl AceOrder {
    const BOTH: [AceOrder; 2] = [AceOrder::Low, AceOrder::High];

    fn value(self, card: &Card) -> Option<u8> {
        match self {
            AceOrder::Low => card.rank.ace_low_value(),
            AceOrder::High => card.rank.ace_high_value(),
        }
    }
}

/// Jokers needed to close every gap between the naturals under `order`.
///
/// `None` when two naturals share a rank: a duplicate can never sit in a run.
fn jokers_needed(naturals: &[&Card], order: AceOrder) -> Option<usize> {
    let mut values = naturals
        .iter()
        .map(|card| order.value(card))
        .collect::<Option<Vec<u8>>>()?;
    values.sort_unstable();

    let mut needed = 0usize;
    for pair in values.windows(2) {
        let gap = pair[1] - pair[0];
        if gap == 0 {
            return None;
        }
        needed += usize::from(gap - 1);
    }
    Some(needed)
}

fn single_suit(cards: &[&Card]) -> bool {
    match cards.split_first() {
        Some((first, rest)) => rest.iter().all(|c| c.suit == first.suit),
        None => false,
    }
}

/// At least three cards of one suit in consecutive order, with no functional joker.
pub fn is_pure_sequence(group: &[Card], wild: Option<&Card>) -> bool {
    if group.len() < MIN_MELD_SIZE {
        return false;
    }
    if group.iter().any(|card| is_functional_joker(card, wild)) {
        return false;
    }
    let cards: Vec<&Card> = group.iter().collect();
    if !single_suit(&cards) {
        return false;
    }
    AceOrder::BOTH
        .iter()
        .any(|&order| jokers_needed(&cards, order) == Some(0))
}

/// A run where jokers may stand in for the missing ranks.
pub fn is_sequence(group: &[Card], wild: Option<&Card>) -> bool {
    if group.len() < MIN_MELD_SIZE {
        return false;
    }
    let (naturals, jokers) = split_jokers(group, wild);
    if !single_suit(&naturals) {
        return false;
    }
    AceOrder::BOTH
        .iter()
        .any(|&order| matches!(jokers_needed(&naturals, order), Some(needed) if needed <= jokers))
}

/// Three or four cards of one rank, every natural card from a different suit.
pub fn is_set(group: &[Card], wild: Option<&Card>) -> bool {
    if !(MIN_MELD_SIZE..=MAX_SET_SIZE).contains(&group.len()) {
        return false;
    }
    let (naturals, _) = split_jokers(group, wild);
    let Some((anchor, rest)) = naturals.split_first() else {
        return false;
    };
    if rest.iter().any(|card| card.rank != anchor.rank) {
        return false;
    }
    // Two decks: same rank and suit can appear twice and must be refused.
    let mut suits: Vec<_> = naturals.iter().map(|card| card.suit).collect();
    suits.sort_unstable();
    suits.dedup();
    suits.len() == naturals.len()
}

/// Strongest meld kind a group satisfies, in validator priority order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    PureSequence,
    Sequence,
    Set,
}

impl MeldKind {
    /// Extraction order used by the auto-grouper.
    pub const PRIORITY: [MeldKind; 3] = [MeldKind::PureSequence, MeldKind::Sequence, MeldKind::Set];

    pub fn accepts(self, group: &[Card], wild: Option<&Card>) -> bool {
        match self {
            MeldKind::PureSequence => is_pure_sequence(group, wild),
            MeldKind::Sequence => is_sequence(group, wild),
            MeldKind::Set => is_set(group, wild),
        }
    }

    pub fn is_sequence(self) -> bool {
        matches!(self, MeldKind::PureSequence | MeldKind::Sequence)
    }
}

/// Classify a group, or `None` when it is not a valid meld at all.
pub fn classify(group: &[Card], wild: Option<&Card>) -> Option<MeldKind> {
    MeldKind::PRIORITY
        .into_iter()
        .find(|kind| kind.accepts(group, wild))
}
