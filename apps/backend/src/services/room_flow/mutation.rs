use serde::Serialize;

use super::timers::TimerCommand;
use crate::domain::{RoundScores, SessionId};

/// Payload of the `result` broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// Declaring player; `None` for a round that ended without a result.
    pub winner: Option<SessionId>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_scores: Option<RoundScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_match_over: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_winner: Option<SessionId>,
}

impl RoundResult {
    pub fn rejected(declarer: SessionId, reason: &str) -> Self {
        Self {
            winner: Some(declarer),
            valid: false,
            reason: Some(reason.to_string()),
            round_scores: None,
            is_match_over: None,
            grand_winner: None,
        }
    }
}

/// Something every participant must be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    Result(RoundResult),
    /// A win was declared and the loser-declare window is open.
    WinnerDeclared { winner: SessionId, message: String },
    /// The room has finished its life and should be dropped.
    Closed,
}

/// Outcome of one room mutation: broadcasts plus timer commands, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomEffects {
    pub events: Vec<RoomEvent>,
    pub timers: Vec<TimerCommand>,
}

impl RoomEffects {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: RoomEvent) {
        self.events.push(event);
    }

    pub fn push_timer(&mut self, command: TimerCommand) {
        self.timers.push(command);
    }

    pub fn extend(&mut self, other: RoomEffects) {
        self.events.extend(other.events);
        self.timers.extend(other.timers);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.timers.is_empty()
    }

    pub fn results(&self) -> impl Iterator<Item = &RoundResult> {
        self.events.iter().filter_map(|event| match event {
            RoomEvent::Result(result) => Some(result),
            _ => None,
        })
    }

    pub fn closes_room(&self) -> bool {
        self.events.contains(&RoomEvent::Closed)
    }
}

impl From<RoomEvent> for RoomEffects {
    fn from(event: RoomEvent) -> Self {
        Self {
            events: vec![event],
            timers: Vec::new(),
        }
    }
}

impl From<TimerCommand> for RoomEffects {
    fn from(command: TimerCommand) -> Self {
        Self {
            events: Vec::new(),
            timers: vec![command],
        }
    }
}
