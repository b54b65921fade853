use crate::domain::cards_parsing::{parse_card, try_parse_cards};
use crate::domain::{penalty_for_grouping, penalty_for_hand, Card, CardId, GroupingAssessment};
use crate::errors::domain::ValidationKind;

/// Ids are offset per call so groups built in one test never share ids.
fn cards(first_id: u16, tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(first_id, tokens.iter().copied()).unwrap()
}

#[test]
fn hand_penalty_sums_face_values() {
    let hand = cards(0, &["KH", "QD", "9S", "AH", "2C"]);
    assert_eq!(penalty_for_hand(&hand, None), 41);
}

#[test]
fn hand_penalty_ignores_jokers() {
    let wild = parse_card(CardId(500), "9C").unwrap();
    let hand = cards(0, &["KH", "QD", "9S", "PJ"]);
    assert_eq!(penalty_for_hand(&hand, Some(&wild)), 20);
}

#[test]
fn hand_penalty_is_capped() {
    let hand = cards(
        0,
        &["KH", "KD", "KC", "KS", "QH", "QD", "QC", "QS", "JH", "JD", "JC", "JS", "10H"],
    );
    assert_eq!(penalty_for_hand(&hand, None), 80);
}

#[test]
fn without_pure_sequence_everything_is_charged() {
    let melds = vec![cards(0, &["KH", "KD", "KC"]), cards(10, &["9D", "10D", "PJ"])];
    let leftovers = cards(20, &["2S"]);
    assert_eq!(penalty_for_grouping(&melds, &leftovers, None), 30 + 19 + 2);
}

#[test]
fn with_one_sequence_only_pure_runs_are_spared() {
    let melds = vec![cards(0, &["4S", "5S", "6S"]), cards(10, &["KH", "KD", "KC"])];
    let leftovers = cards(20, &["2S", "3H"]);
    assert_eq!(penalty_for_grouping(&melds, &leftovers, None), 30 + 5);
}

#[test]
fn with_two_sequences_only_invalid_melds_are_charged() {
    let melds = vec![
        cards(0, &["4S", "5S", "6S"]),
        cards(10, &["9D", "10D", "PJ"]),
        cards(20, &["KH", "KD", "KC"]),
        cards(30, &["2H", "9C", "4D"]),
    ];
    let leftovers = cards(40, &["3H"]);
    assert_eq!(penalty_for_grouping(&melds, &leftovers, None), 15 + 3);
}

#[test]
fn grouping_penalty_is_capped() {
    let melds = vec![cards(0, &["KH", "QD", "JC", "10S"]), cards(10, &["KS", "QH", "JD", "10C"])];
    let leftovers = cards(20, &["9H", "9D"]);
    assert_eq!(penalty_for_grouping(&melds, &leftovers, None), 80);
}

#[test]
fn winning_grouping_scores_nothing_as_a_loss() {
    let melds = vec![
        cards(0, &["4S", "5S", "6S"]),
        cards(10, &["9D", "10D", "PJ"]),
        cards(20, &["KH", "KD", "KC"]),
    ];
    assert_eq!(GroupingAssessment::of(&melds, None).shortfall(), None);
    assert_eq!(penalty_for_grouping(&melds, &[], None), 0);
}

#[test]
fn shortfall_reports_rules_in_order() {
    let no_pure = vec![cards(0, &["9D", "10D", "PJ"]), cards(10, &["2H", "9C", "4D"])];
    assert_eq!(
        GroupingAssessment::of(&no_pure, None).shortfall(),
        Some(ValidationKind::NoPureSequence)
    );

    let one_sequence = vec![cards(0, &["4S", "5S", "6S"]), cards(10, &["2H", "9C", "4D"])];
    assert_eq!(
        GroupingAssessment::of(&one_sequence, None).shortfall(),
        Some(ValidationKind::NeedTwoSequences)
    );

    let invalid = vec![
        cards(0, &["4S", "5S", "6S"]),
        cards(10, &["7H", "8H", "9H"]),
        cards(20, &["2H", "9C", "4D"]),
    ];
    let assessment = GroupingAssessment::of(&invalid, None);
    assert_eq!(assessment.pure_sequences, 2);
    assert_eq!(assessment.sequences, 2);
    assert_eq!(assessment.shortfall(), Some(ValidationKind::InvalidGrouping));
}
