use serde::{Deserialize, Serialize};

use crate::domain::declare::{DeclareSubmission, LoserSubmission};
use crate::domain::{CardId, RoomSnapshot, SessionId};
use crate::services::room_flow::{DrawSource, PlayerAction, RoundResult};
use crate::ws::room_actor::ResumeToken;

/// A card named by a client. Only the id is trusted; suit and rank sent
/// alongside it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CardRef {
    pub id: CardId,
}

fn ids(cards: Vec<CardRef>) -> Vec<CardId> {
    cards.into_iter().map(|card| card.id).collect()
}

fn meld_ids(melds: Vec<Vec<CardRef>>) -> Vec<Vec<CardId>> {
    melds.into_iter().map(ids).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Start,
    Draw {
        source: DrawSource,
    },
    Discard {
        #[serde(rename = "cardId")]
        card_id: CardId,
    },
    Declare {
        melds: Vec<Vec<CardRef>>,
        #[serde(rename = "discardCardId")]
        discard_card_id: CardId,
    },
    LoserDeclare {
        #[serde(default)]
        melds: Vec<Vec<CardRef>>,
        #[serde(default)]
        leftovers: Vec<CardRef>,
    },
    #[serde(rename = "playAgain")]
    PlayAgain,
}

impl From<ClientMsg> for PlayerAction {
    fn from(msg: ClientMsg) -> Self {
        match msg {
            ClientMsg::Start => PlayerAction::Start,
            ClientMsg::Draw { source } => PlayerAction::Draw(source),
            ClientMsg::Discard { card_id } => PlayerAction::Discard(card_id),
            ClientMsg::Declare {
                melds,
                discard_card_id,
            } => PlayerAction::Declare(DeclareSubmission {
                melds: meld_ids(melds),
                discard: discard_card_id,
            }),
            ClientMsg::LoserDeclare { melds, leftovers } => {
                PlayerAction::LoserDeclare(LoserSubmission {
                    melds: meld_ids(melds),
                    leftovers: ids(leftovers),
                })
            }
            ClientMsg::PlayAgain => PlayerAction::PlayAgain,
        }
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    Welcome {
        session_id: SessionId,
        room_id: String,
        /// Only ever sent to the session it belongs to.
        resume_token: ResumeToken,
    },

    State(RoomSnapshot),

    Result(RoundResult),

    WinnerDeclared {
        winner: SessionId,
        message: String,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    RoomFull,
    NotEligible,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::RoomFull => "room_full",
            ErrorCode::NotEligible => "not_eligible",
        }
    }
}
