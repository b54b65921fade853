//! Core card-related types: Card, CardId, Rank, Suit

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    /// Sentinel suit carried by printed jokers.
    Joker,
}

impl Suit {
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    /// Sentinel rank carried by printed jokers.
    #[serde(rename = "pj")]
    Joker,
}

impl Rank {
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Position with the ace low (A=1 .. K=13). `None` for printed jokers.
    pub fn ace_low_value(self) -> Option<u8> {
        Rank::STANDARD
            .iter()
            .position(|&r| r == self)
            .map(|idx| idx as u8 + 1)
    }

    /// Position with the ace high (2=2 .. K=13, A=14). `None` for printed jokers.
    pub fn ace_high_value(self) -> Option<u8> {
        match self {
            Rank::Ace => Some(14),
            other => other.ace_low_value(),
        }
    }

    /// Deadwood value: face cards and aces are worth 10, numerals their face value.
    pub fn points(self) -> u32 {
        match self {
            Rank::Ace | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Joker => 0,
            numeral => numeral.ace_low_value().map(u32::from).unwrap_or(0),
        }
    }
}

/// Per-round card identity. Two physical decks make rank+suit ambiguous,
/// so every rule that talks about "which card" goes through this id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable dealt card. Deliberately not `Copy`: a card moves between
/// the deck, the discard pile and hands, it is never duplicated.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    /// Printed jokers are wild regardless of the round's wild rank.
    #[serde(rename = "isJoker")]
    pub printed_joker: bool,
}

impl Card {
    pub fn standard(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            printed_joker: false,
        }
    }

    pub fn printed_joker(id: CardId) -> Self {
        Self {
            id,
            suit: Suit::Joker,
            rank: Rank::Joker,
            printed_joker: true,
        }
    }
}
