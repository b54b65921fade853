//! Deck construction and dealing.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::rules::{DECKS, HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS, PRINTED_JOKERS_PER_DECK, UNIVERSE_SIZE};
use crate::domain::{Card, CardId, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// The full card universe for one round: two 52-card decks plus printed jokers.
///
/// Ids are assigned in generation order, so they are unique within the round.
pub fn generate_universe() -> Vec<Card> {
    let mut cards = Vec::with_capacity(UNIVERSE_SIZE);
    let mut next_id = 0u16;
    let mut take_id = || {
        let id = CardId(next_id);
        next_id += 1;
        id
    };
    for _ in 0..DECKS {
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                cards.push(Card::standard(take_id(), suit, rank));
            }
        }
        for _ in 0..PRINTED_JOKERS_PER_DECK {
            cards.push(Card::printed_joker(take_id()));
        }
    }
    cards
}

/// Uniform in-place shuffle.
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Pick the round's wild joker among the standard cards of the universe.
///
/// The chosen card is a designation only: it stays in the deck and its
/// twin from the other deck keeps being dealt normally.
pub fn select_wild_joker<R: Rng + ?Sized>(universe: &[Card], rng: &mut R) -> Option<Card> {
    let standard: Vec<&Card> = universe.iter().filter(|c| !c.printed_joker).collect();
    standard.choose(rng).map(|card| (*card).clone())
}

/// Everything a fresh round starts from.
#[derive(Debug, Clone)]
pub struct DealtRound {
    /// One hand per seat, in the order the seats were passed in.
    pub hands: Vec<Vec<Card>>,
    /// Remaining draw pile; draw from the back.
    pub deck: Vec<Card>,
    /// Exactly one face-up card after dealing.
    pub discard_pile: Vec<Card>,
    pub wild_joker: Option<Card>,
}

/// Shuffle a fresh universe and deal `HAND_SIZE` cards to each player,
/// round-robin from the top of the deck, then flip one card face up.
pub fn deal_round<R: Rng + ?Sized>(player_count: usize, rng: &mut R) -> Result<DealtRound, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be {MIN_PLAYERS}..={MAX_PLAYERS}, got {player_count}"),
        ));
    }

    let mut deck = generate_universe();
    let wild_joker = select_wild_joker(&deck, rng);
    shuffle_deck(&mut deck, rng);

    let mut hands: Vec<Vec<Card>> = (0..player_count)
        .map(|_| Vec::with_capacity(HAND_SIZE + 1))
        .collect();
    for _ in 0..HAND_SIZE {
        for hand in hands.iter_mut() {
            let card = deck
                .pop()
                .ok_or_else(|| DomainError::invariant("deck exhausted while dealing"))?;
            hand.push(card);
        }
    }

    let first_discard = deck
        .pop()
        .ok_or_else(|| DomainError::invariant("deck exhausted before first discard"))?;

    Ok(DealtRound {
        hands,
        deck,
        discard_pile: vec![first_discard],
        wild_joker,
    })
}

/// Move all discards except the top one back into the deck and reshuffle.
///
/// Returns false when there is nothing to recycle.
pub fn recycle_discard_pile<R: Rng + ?Sized>(
    deck: &mut Vec<Card>,
    discard_pile: &mut Vec<Card>,
    rng: &mut R,
) -> bool {
    if discard_pile.len() <= 1 {
        return false;
    }
    let top = discard_pile.pop();
    deck.append(discard_pile);
    shuffle_deck(deck, rng);
    discard_pile.extend(top);
    true
}
