//! Card tokens (e.g., "AH", "10S", "PJ") for logs, fixtures and admin tooling.

use std::fmt;

use super::cards_types::{Card, CardId, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn rank_token(rank: Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Joker => "P",
    }
}

fn suit_token(suit: Suit) -> char {
    match suit {
        Suit::Hearts => 'H',
        Suit::Diamonds => 'D',
        Suit::Clubs => 'C',
        Suit::Spades => 'S',
        Suit::Joker => 'J',
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            rank_token(self.rank),
            suit_token(self.suit),
            self.id
        )
    }
}

fn parse_error(token: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {token}"))
}

/// Parse a single token into a card carrying `id`.
///
/// Ranks are `A`, `2`..`10` (or `T`), `J`, `Q`, `K`; suits are `H`, `D`, `C`, `S`.
/// `PJ` is a printed joker.
pub fn parse_card(id: CardId, token: &str) -> Result<Card, DomainError> {
    if token.eq_ignore_ascii_case("PJ") {
        return Ok(Card::printed_joker(id));
    }
    let split = token
        .char_indices()
        .last()
        .map(|(idx, _)| idx)
        .ok_or_else(|| parse_error(token))?;
    let (rank_part, suit_part) = token.split_at(split);

    let rank = match rank_part {
        "A" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" | "T" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        _ => return Err(parse_error(token)),
    };
    let suit = match suit_part {
        "H" => Suit::Hearts,
        "D" => Suit::Diamonds,
        "C" => Suit::Clubs,
        "S" => Suit::Spades,
        _ => return Err(parse_error(token)),
    };
    Ok(Card::standard(id, suit, rank))
}

/// Parse a run of tokens, assigning consecutive ids starting at `first_id`.
pub fn try_parse_cards<I, S>(first_id: u16, tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .enumerate()
        .map(|(offset, token)| parse_card(CardId(first_id + offset as u16), token.as_ref()))
        .collect()
}
