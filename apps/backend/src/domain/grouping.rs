//! Greedy auto-grouping of a hand into melds.
//!
//! Scans the ungrouped cards in their current order for the first contiguous
//! window (smallest size first, leftmost first) that a predicate accepts,
//! pulls it out and rescans. Pure sequences are exhausted first, then
//! sequences, then sets; whatever is left forms one trailing group.
//!
//! The result depends on hand order and is not an optimal partition.

use super::cards_types::Card;
use super::melds::MeldKind;
use super::rules::MIN_MELD_SIZE;

pub fn auto_group(hand: &[Card], wild: Option<&Card>) -> Vec<Vec<Card>> {
    let mut pool = hand.to_vec();
    let mut groups = Vec::new();

    for kind in MeldKind::PRIORITY {
        extract_groups(&mut pool, &mut groups, |window| kind.accepts(window, wild));
    }
    if !pool.is_empty() {
        groups.push(pool);
    }
    groups
}

fn extract_groups<F>(pool: &mut Vec<Card>, groups: &mut Vec<Vec<Card>>, accepts: F)
where
    F: Fn(&[Card]) -> bool,
{
    while let Some((start, size)) = first_window(pool, &accepts) {
        groups.push(pool.drain(start..start + size).collect());
    }
}

fn first_window<F>(pool: &[Card], accepts: &F) -> Option<(usize, usize)>
where
    F: Fn(&[Card]) -> bool,
{
    (MIN_MELD_SIZE..=pool.len()).find_map(|size| {
        (0..=pool.len() - size)
            .find(|&start| accepts(&pool[start..start + size]))
            .map(|start| (start, size))
    })
}
