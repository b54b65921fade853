//! Penalty scoring.
//!
//! The winning-declare check and the loser scoring rule look at a grouping the
//! same way (how many pure sequences, how many sequences, which melds are
//! invalid), so both go through [`GroupingAssessment`].

use std::collections::BTreeMap;

use super::cards_logic::card_points;
use super::cards_types::Card;
use super::melds::{classify, MeldKind};
use super::rules::PENALTY_CAP;
use super::state::SessionId;
use crate::errors::domain::ValidationKind;

/// Per-player penalties charged in one round, keyed by session.
pub type RoundScores = BTreeMap<SessionId, u32>;

fn capped(points: u32) -> u32 {
    points.min(PENALTY_CAP)
}

fn deadwood<'a, I>(cards: I, wild: Option<&Card>) -> u32
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().map(|card| card_points(card, wild)).sum()
}

/// Penalty for a whole hand held when someone else wins.
pub fn penalty_for_hand(hand: &[Card], wild: Option<&Card>) -> u32 {
    capped(deadwood(hand, wild))
}

/// Structural summary of a submitted grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingAssessment {
    /// Classification per meld, in submission order.
    pub kinds: Vec<Option<MeldKind>>,
    pub pure_sequences: usize,
    /// Pure and impure sequences together.
    pub sequences: usize,
}

impl GroupingAssessment {
    pub fn of(melds: &[Vec<Card>], wild: Option<&Card>) -> Self {
        let kinds: Vec<Option<MeldKind>> = melds.iter().map(|meld| classify(meld, wild)).collect();
        let pure_sequences = kinds
            .iter()
            .filter(|kind| **kind == Some(MeldKind::PureSequence))
            .count();
        let sequences = kinds
            .iter()
            .filter(|kind| kind.is_some_and(MeldKind::is_sequence))
            .count();
        Self {
            kinds,
            pure_sequences,
            sequences,
        }
    }

    /// First rule a winning grouping breaks, or `None` if it wins.
    ///
    /// Order: one pure sequence, then two sequences, then every meld valid.
    pub fn shortfall(&self) -> Option<ValidationKind> {
        if self.pure_sequences == 0 {
            Some(ValidationKind::NoPureSequence)
        } else if self.sequences < 2 {
            Some(ValidationKind::NeedTwoSequences)
        } else if self.kinds.iter().any(Option::is_none) {
            Some(ValidationKind::InvalidGrouping)
        } else {
            None
        }
    }

    /// Whether meld `idx` is charged under the loss rule.
    fn charges(&self, idx: usize) -> bool {
        let kind = self.kinds.get(idx).copied().flatten();
        if self.pure_sequences == 0 {
            true
        } else if self.sequences < 2 {
            kind != Some(MeldKind::PureSequence)
        } else {
            kind.is_none()
        }
    }
}

/// Penalty for a non-winner's submitted grouping.
///
/// - no pure sequence: every meld and the leftovers are charged
/// - fewer than two sequences: everything except pure sequences is charged
/// - otherwise: only invalid melds and the leftovers are charged
pub fn penalty_for_grouping(melds: &[Vec<Card>], leftovers: &[Card], wild: Option<&Card>) -> u32 {
    let assessment = GroupingAssessment::of(melds, wild);
    let charged_melds: u32 = melds
        .iter()
        .enumerate()
        .filter(|(idx, _)| assessment.charges(*idx))
        .map(|(_, meld)| deadwood(meld, wild))
        .sum();
    capped(charged_melds + deadwood(leftovers, wild))
}
