//! Declare payload checks: the winning declare and the loser's grouping.
//!
//! Submissions name cards by id only. Every id is resolved against the
//! server-held hand, so a client can never introduce a card it does not hold.

use std::collections::BTreeSet;

use super::cards_types::{Card, CardId};
use super::grouping::auto_group;
use super::rules::DECLARE_SIZE;
use super::scoring::{penalty_for_grouping, GroupingAssessment};
use crate::errors::domain::{DomainError, ValidationKind};

/// A claimed winning partition of the full hand plus the card to throw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclareSubmission {
    pub melds: Vec<Vec<CardId>>,
    pub discard: CardId,
}

impl DeclareSubmission {
    fn all_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.melds
            .iter()
            .flatten()
            .copied()
            .chain(std::iter::once(self.discard))
    }
}

/// A non-winner's grouping during the loser-declare window.
///
/// Both lists empty asks the server to group the held hand itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoserSubmission {
    pub melds: Vec<Vec<CardId>>,
    pub leftovers: Vec<CardId>,
}

impl LoserSubmission {
    pub fn is_auto(&self) -> bool {
        self.melds.is_empty() && self.leftovers.is_empty()
    }
}

fn find_card(hand: &[Card], id: CardId) -> Option<&Card> {
    hand.iter().find(|card| card.id == id)
}

/// Resolve ids against the hand, refusing unknown and repeated ids.
fn resolve<'a, I>(hand: &[Card], ids: I, seen: &mut BTreeSet<CardId>) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = &'a CardId>,
{
    ids.into_iter()
        .map(|&id| {
            if !seen.insert(id) {
                return Err(DomainError::validation(
                    ValidationKind::CardMismatch,
                    format!("card {id} submitted twice"),
                ));
            }
            find_card(hand, id).cloned().ok_or_else(|| {
                DomainError::validation(ValidationKind::CardMismatch, format!("card {id} not in hand"))
            })
        })
        .collect()
}

/// Check a winning declare against the player's 14-card hand.
///
/// Checks run in order and the first failure is returned:
/// no melds, card count, ownership, one pure sequence, two sequences,
/// every meld valid. On success returns the id of the card to discard.
pub fn validate_declare(
    hand: &[Card],
    submission: &DeclareSubmission,
    wild: Option<&Card>,
) -> Result<CardId, DomainError> {
    if submission.melds.iter().all(Vec::is_empty) {
        return Err(DomainError::validation(ValidationKind::NoMelds, "declare carried no melds"));
    }

    let distinct: BTreeSet<CardId> = submission.all_ids().collect();
    if distinct.len() != DECLARE_SIZE || hand.len() != DECLARE_SIZE {
        return Err(DomainError::validation(
            ValidationKind::InvalidCardCount,
            format!(
                "declare named {} distinct cards against a hand of {}",
                distinct.len(),
                hand.len()
            ),
        ));
    }

    let mut seen = BTreeSet::new();
    let melds = submission
        .melds
        .iter()
        .map(|meld| resolve(hand, meld, &mut seen))
        .collect::<Result<Vec<_>, _>>()?;
    resolve(hand, std::iter::once(&submission.discard), &mut seen)?;

    if let Some(kind) = GroupingAssessment::of(&melds, wild).shortfall() {
        return Err(DomainError::validation(kind, "declare grouping does not win"));
    }
    Ok(submission.discard)
}

/// Penalty for a loser's submitted grouping.
///
/// Cards of the hand that the submission never mentions are charged as leftovers.
pub fn score_loser_declare(
    hand: &[Card],
    submission: &LoserSubmission,
    wild: Option<&Card>,
) -> Result<u32, DomainError> {
    if submission.is_auto() {
        let groups = auto_group(hand, wild);
        return Ok(penalty_for_grouping(&groups, &[], wild));
    }

    let mut seen = BTreeSet::new();
    let melds = submission
        .melds
        .iter()
        .map(|meld| resolve(hand, meld, &mut seen))
        .collect::<Result<Vec<_>, _>>()?;
    let mut leftovers = resolve(hand, &submission.leftovers, &mut seen)?;
    leftovers.extend(hand.iter().filter(|card| !seen.contains(&card.id)).cloned());

    Ok(penalty_for_grouping(&melds, &leftovers, wild))
}
