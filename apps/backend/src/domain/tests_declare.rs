use crate::domain::cards_parsing::{parse_card, try_parse_cards};
use crate::domain::{
    score_loser_declare, validate_declare, Card, CardId, DeclareSubmission, LoserSubmission,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// 14 cards, ids 0..14:
/// 4S 5S 6S | 9D 10D 7H | KH KD KC | 2S 2H 2D 2C | QH
fn winning_hand() -> Vec<Card> {
    try_parse_cards(
        0,
        [
            "4S", "5S", "6S", "9D", "10D", "7H", "KH", "KD", "KC", "2S", "2H", "2D", "2C", "QH",
        ],
    )
    .unwrap()
}

fn wild(token: &str) -> Card {
    parse_card(CardId(500), token).unwrap()
}

fn ids(raw: &[u16]) -> Vec<CardId> {
    raw.iter().copied().map(CardId).collect()
}

fn submission(melds: &[&[u16]], discard: u16) -> DeclareSubmission {
    DeclareSubmission {
        melds: melds.iter().map(|m| ids(m)).collect(),
        discard: CardId(discard),
    }
}

fn kind_of(err: DomainError) -> ValidationKind {
    err.kind().cloned().unwrap()
}

#[test]
fn pure_plus_impure_sequence_and_sets_wins() {
    let w = wild("7C");
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12]], 13);
    assert_eq!(validate_declare(&winning_hand(), &sub, Some(&w)), Ok(CardId(13)));
}

#[test]
fn one_pure_sequence_and_only_sets_needs_two_sequences() {
    let w = wild("7C");
    let hand = try_parse_cards(
        0,
        [
            "4S", "5S", "6S", "KH", "KD", "KC", "2S", "2H", "2D", "2C", "9D", "9H", "9S", "QH",
        ],
    )
    .unwrap();
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8, 9], &[10, 11, 12]], 13);
    let err = validate_declare(&hand, &sub, Some(&w)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NeedTwoSequences);
}

#[test]
fn empty_declare_has_no_melds() {
    let sub = DeclareSubmission {
        melds: vec![],
        discard: CardId(13),
    };
    let err = validate_declare(&winning_hand(), &sub, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NoMelds);
    assert_eq!(ValidationKind::NoMelds.reason(), "No melds provided");
}

#[test]
fn thirteen_or_fifteen_cards_is_a_count_error() {
    let w = wild("7C");
    let thirteen = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11]], 13);
    let err = validate_declare(&winning_hand(), &thirteen, Some(&w)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidCardCount);

    let fifteen = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12, 99]], 13);
    let err = validate_declare(&winning_hand(), &fifteen, Some(&w)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidCardCount);
}

#[test]
fn hand_must_hold_fourteen_cards() {
    let mut hand = winning_hand();
    hand.pop();
    hand.push(parse_card(CardId(99), "AS").unwrap());
    hand.remove(0);
    let sub = submission(&[&[99, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12]], 0);
    let err = validate_declare(&hand, &sub, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidCardCount);
}

#[test]
fn unknown_card_is_a_mismatch() {
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12]], 77);
    let err = validate_declare(&winning_hand(), &sub, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::CardMismatch);
}

#[test]
fn repeated_card_is_a_mismatch() {
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12, 0]], 13);
    let err = validate_declare(&winning_hand(), &sub, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::CardMismatch);
}

#[test]
fn wild_rank_can_remove_the_pure_sequence() {
    let w = wild("5C");
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8], &[9, 10, 11, 12]], 13);
    let err = validate_declare(&winning_hand(), &sub, Some(&w)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NoPureSequence);
}

#[test]
fn any_invalid_meld_fails_the_declare() {
    let w = wild("7C");
    let sub = submission(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 9], &[8, 10, 11, 12]], 13);
    let err = validate_declare(&winning_hand(), &sub, Some(&w)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidGrouping);
}

fn loser_hand() -> Vec<Card> {
    try_parse_cards(0, ["4S", "5S", "6S", "KH", "KD", "KC", "2H", "9D"]).unwrap()
}

#[test]
fn empty_loser_submission_is_auto_grouped() {
    let penalty = score_loser_declare(&loser_hand(), &LoserSubmission::default(), None).unwrap();
    // One sequence only: the set and the trailing 2H 9D are charged.
    assert_eq!(penalty, 30 + 11);
}

#[test]
fn unmentioned_cards_count_as_leftovers() {
    let sub = LoserSubmission {
        melds: vec![ids(&[0, 1, 2])],
        leftovers: vec![],
    };
    assert_eq!(score_loser_declare(&loser_hand(), &sub, None), Ok(30 + 11));
}

#[test]
fn two_sequences_leave_only_leftovers() {
    let hand = try_parse_cards(0, ["4S", "5S", "6S", "9D", "10D", "PJ", "2H"]).unwrap();
    let sub = LoserSubmission {
        melds: vec![ids(&[0, 1, 2]), ids(&[3, 4, 5])],
        leftovers: ids(&[6]),
    };
    assert_eq!(score_loser_declare(&hand, &sub, None), Ok(2));
}

#[test]
fn loser_submission_cannot_name_foreign_or_repeated_cards() {
    let foreign = LoserSubmission {
        melds: vec![ids(&[0, 1, 42])],
        leftovers: vec![],
    };
    let err = score_loser_declare(&loser_hand(), &foreign, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::CardMismatch);

    let repeated = LoserSubmission {
        melds: vec![ids(&[0, 1, 2])],
        leftovers: ids(&[2]),
    };
    let err = score_loser_declare(&loser_hand(), &repeated, None).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::CardMismatch);
}
