//! Timer bookkeeping for one room.
//!
//! The room never owns a clock. It asks its host to schedule timers through
//! [`TimerCommand`]s and is later told which one fired. Each schedule gets a
//! fresh generation; a firing whose generation is not the armed one is stale
//! and must be ignored.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-second tick of the active turn's budget.
    TurnClock,
    /// Loser-declare window closure.
    LoserGrace,
    /// Reconnection grace for one departed session.
    Reconnect(SessionId),
    /// Room teardown after the match is over.
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// Run once after `delay`. Replaces any armed timer of the same kind.
    Once {
        kind: TimerKind,
        generation: u64,
        delay: Duration,
    },
    /// Run every `interval` until cancelled. Replaces any armed timer of the same kind.
    Every {
        kind: TimerKind,
        generation: u64,
        interval: Duration,
    },
    Cancel { kind: TimerKind },
}

impl TimerCommand {
    pub fn kind(&self) -> TimerKind {
        match self {
            TimerCommand::Once { kind, .. }
            | TimerCommand::Every { kind, .. }
            | TimerCommand::Cancel { kind } => *kind,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    generation: u64,
    repeating: bool,
}

#[derive(Debug, Default)]
pub struct TimerBook {
    next_generation: u64,
    armed: HashMap<TimerKind, Armed>,
}

impl TimerBook {
    fn arm(&mut self, kind: TimerKind, repeating: bool) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.armed.insert(
            kind,
            Armed {
                generation,
                repeating,
            },
        );
        generation
    }

    pub fn once(&mut self, kind: TimerKind, delay: Duration) -> TimerCommand {
        let generation = self.arm(kind, false);
        TimerCommand::Once {
            kind,
            generation,
            delay,
        }
    }

    pub fn every(&mut self, kind: TimerKind, interval: Duration) -> TimerCommand {
        let generation = self.arm(kind, true);
        TimerCommand::Every {
            kind,
            generation,
            interval,
        }
    }

    /// Disarm `kind`. `None` when nothing of that kind is armed.
    pub fn cancel(&mut self, kind: TimerKind) -> Option<TimerCommand> {
        self.armed
            .remove(&kind)
            .map(|_| TimerCommand::Cancel { kind })
    }

    /// Disarm every reconnection grace timer.
    pub fn cancel_reconnects(&mut self) -> Vec<TimerCommand> {
        let kinds: Vec<TimerKind> = self
            .armed
            .keys()
            .copied()
            .filter(|kind| matches!(kind, TimerKind::Reconnect(_)))
            .collect();
        kinds.into_iter().filter_map(|kind| self.cancel(kind)).collect()
    }

    /// Accept a firing. Returns false for stale generations.
    ///
    /// One-shot timers are disarmed by their firing.
    pub fn fire(&mut self, kind: TimerKind, generation: u64) -> bool {
        match self.armed.get(&kind).copied() {
            Some(armed) if armed.generation == generation => {
                if !armed.repeating {
                    self.armed.remove(&kind);
                }
                true
            }
            _ => false,
        }
    }

    pub fn armed_generation(&self, kind: TimerKind) -> Option<u64> {
        self.armed.get(&kind).map(|armed| armed.generation)
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains_key(&kind)
    }
}
