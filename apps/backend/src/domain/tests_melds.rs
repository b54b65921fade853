use crate::domain::cards_parsing::{parse_card, try_parse_cards};
use crate::domain::{classify, is_pure_sequence, is_sequence, is_set, Card, CardId, MeldKind};

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(0, tokens.iter().copied()).unwrap()
}

fn wild(token: &str) -> Card {
    parse_card(CardId(500), token).unwrap()
}

#[test]
fn pure_sequence_accepts_plain_runs() {
    assert!(is_pure_sequence(&cards(&["4S", "5S", "6S"]), None));
    assert!(is_pure_sequence(&cards(&["6S", "4S", "5S", "7S"]), None));
    assert!(is_pure_sequence(&cards(&["10H", "JH", "QH", "KH"]), None));
}

#[test]
fn ace_can_be_low_or_high_but_not_wrap() {
    assert!(is_pure_sequence(&cards(&["AH", "2H", "3H"]), None));
    assert!(is_pure_sequence(&cards(&["QH", "KH", "AH"]), None));
    assert!(!is_pure_sequence(&cards(&["KH", "AH", "2H"]), None));
}

#[test]
fn pure_sequence_rejects_short_mixed_or_gapped_groups() {
    assert!(!is_pure_sequence(&cards(&["4S", "5S"]), None));
    assert!(!is_pure_sequence(&cards(&["4S", "5H", "6S"]), None));
    assert!(!is_pure_sequence(&cards(&["4S", "6S", "7S"]), None));
    assert!(!is_pure_sequence(&cards(&["4S", "4S", "5S"]), None));
}

#[test]
fn wild_rank_spoils_a_pure_sequence_but_not_a_sequence() {
    let w = wild("7C");
    let group = cards(&["6S", "7S", "8S"]);
    assert!(is_pure_sequence(&group, None));
    assert!(!is_pure_sequence(&group, Some(&w)));
    assert!(is_sequence(&group, Some(&w)));
}

#[test]
fn printed_joker_never_counts_as_pure() {
    assert!(!is_pure_sequence(&cards(&["9D", "10D", "PJ"]), None));
    assert!(is_sequence(&cards(&["9D", "10D", "PJ"]), None));
}

#[test]
fn sequence_jokers_fill_gaps_up_to_their_count() {
    assert!(is_sequence(&cards(&["4H", "PJ", "6H"]), None));
    assert!(!is_sequence(&cards(&["4H", "PJ", "7H"]), None));
    assert!(is_sequence(&cards(&["4H", "PJ", "PJ", "7H"]), None));
    // Jokers may also sit at the ends of a run.
    assert!(is_sequence(&cards(&["QH", "KH", "PJ"]), None));
}

#[test]
fn sequence_rejects_mixed_suits_and_duplicate_ranks() {
    assert!(!is_sequence(&cards(&["9D", "10H", "PJ"]), None));
    assert!(!is_sequence(&cards(&["5H", "5H", "PJ"]), None));
}

#[test]
fn all_joker_groups_are_never_melds() {
    let group = cards(&["PJ", "PJ", "PJ"]);
    assert!(!is_sequence(&group, None));
    assert!(!is_set(&group, None));
    assert_eq!(classify(&group, None), None);

    let w = wild("3D");
    let wilds = cards(&["3H", "3S", "PJ"]);
    assert!(!is_sequence(&wilds, Some(&w)));
    assert!(!is_set(&wilds, Some(&w)));
}

#[test]
fn set_needs_one_rank_and_distinct_suits() {
    assert!(is_set(&cards(&["KH", "KD", "KC"]), None));
    assert!(is_set(&cards(&["KH", "KD", "KC", "KS"]), None));
    assert!(is_set(&cards(&["KH", "KD", "PJ"]), None));
    assert!(!is_set(&cards(&["KH", "KD", "QC"]), None));
    assert!(!is_set(&cards(&["KH", "KD"]), None));
    assert!(!is_set(&cards(&["KH", "KD", "KC", "KS", "PJ"]), None));
}

#[test]
fn set_rejects_cross_deck_duplicates() {
    assert!(!is_set(&cards(&["KH", "KH", "KD"]), None));
    assert!(!is_set(&cards(&["KH", "KD", "KC", "KH"]), None));
}

#[test]
fn classify_prefers_the_strongest_kind() {
    let w = wild("7C");
    assert_eq!(
        classify(&cards(&["4S", "5S", "6S"]), Some(&w)),
        Some(MeldKind::PureSequence)
    );
    assert_eq!(
        classify(&cards(&["9D", "10D", "7H"]), Some(&w)),
        Some(MeldKind::Sequence)
    );
    assert_eq!(classify(&cards(&["KH", "KD", "KC"]), Some(&w)), Some(MeldKind::Set));
    assert_eq!(classify(&cards(&["2H", "9D", "4C"]), Some(&w)), None);
}
