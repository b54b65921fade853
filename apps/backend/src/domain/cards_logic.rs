//! Card logic shared by the meld validator and the scorer: wildness and values.

use super::cards_types::Card;

/// A card is functionally a joker if it is printed as one, or if a wild joker
/// is designated and the card shares its rank.
pub fn is_functional_joker(card: &Card, wild: Option<&Card>) -> bool {
    card.printed_joker || wild.is_some_and(|w| !w.printed_joker && w.rank == card.rank)
}

/// Split a group into its natural (non-joker) cards and a joker count.
pub fn split_jokers<'a>(group: &'a [Card], wild: Option<&Card>) -> (Vec<&'a Card>, usize) {
    let mut naturals = Vec::with_capacity(group.len());
    let mut jokers = 0;
    for card in group {
        if is_functional_joker(card, wild) {
            jokers += 1;
        } else {
            naturals.push(card);
        }
    }
    (naturals, jokers)
}

/// Deadwood value of a card under the round's wild designation.
pub fn card_points(card: &Card, wild: Option<&Card>) -> u32 {
    if is_functional_joker(card, wild) {
        0
    } else {
        card.rank.points()
    }
}
