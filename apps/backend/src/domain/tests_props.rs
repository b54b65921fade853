//! Property tests for the meld validator, scorer and declare checks.
//!
//! Properties tested:
//! - Hand penalty stays in [0, 80] and is 0 exactly when every card is a joker
//! - A group holding a functional joker is never a pure sequence
//! - Without jokers, sequence and pure sequence agree
//! - Natural runs are always pure sequences
//! - A declare naming 13 or 15 distinct cards is always refused on count

use proptest::prelude::*;

use crate::domain::test_gens::{hand, natural_run, wild};
use crate::domain::{
    is_functional_joker, is_pure_sequence, is_sequence, penalty_for_hand, test_prelude,
    validate_declare, Card, CardId, DeclareSubmission,
};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_hand_penalty_bounded_and_zero_only_for_jokers(
        cards in hand(0..=14),
        w in wild(),
    ) {
        let penalty = penalty_for_hand(&cards, w.as_ref());
        prop_assert!(penalty <= 80);
        let all_jokers = cards.iter().all(|c| is_functional_joker(c, w.as_ref()));
        prop_assert_eq!(penalty == 0, all_jokers);
    }

    #[test]
    fn prop_functional_joker_spoils_pure_sequence(
        group in hand(3..=6),
        w in wild(),
    ) {
        if group.iter().any(|c| is_functional_joker(c, w.as_ref())) {
            prop_assert!(!is_pure_sequence(&group, w.as_ref()));
        }
    }

    #[test]
    fn prop_sequence_without_jokers_is_pure_check(group in hand(3..=6)) {
        let naturals: Vec<Card> = group.into_iter().filter(|c| !c.printed_joker).collect();
        prop_assert_eq!(is_sequence(&naturals, None), is_pure_sequence(&naturals, None));
    }

    #[test]
    fn prop_natural_runs_are_pure(run in natural_run()) {
        prop_assert!(is_pure_sequence(&run, None));
        prop_assert!(is_sequence(&run, None));
    }

    #[test]
    fn prop_declare_card_count_is_exact(
        cards in hand(14..=14),
        w in wild(),
        dropped in 0usize..14,
    ) {
        let all_ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();

        let mut short: Vec<CardId> = all_ids.clone();
        short.remove(dropped);
        let discard = short.pop().unwrap();
        let thirteen = DeclareSubmission { melds: vec![short], discard };
        let err = validate_declare(&cards, &thirteen, w.as_ref()).unwrap_err();
        prop_assert_eq!(err.kind(), Some(&ValidationKind::InvalidCardCount));

        let fifteen = DeclareSubmission { melds: vec![all_ids], discard: CardId(200) };
        let err = validate_declare(&cards, &fifteen, w.as_ref()).unwrap_err();
        prop_assert_eq!(err.kind(), Some(&ValidationKind::InvalidCardCount));
    }
}
