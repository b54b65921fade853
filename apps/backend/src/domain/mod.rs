//! Domain layer: pure rummy rules and room state types.

pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_types;
pub mod dealing;
pub mod declare;
pub mod grouping;
pub mod melds;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod state;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_declare;
#[cfg(test)]
mod tests_melds;
#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards_logic::{card_points, is_functional_joker};
pub use cards_types::{Card, CardId, Rank, Suit};
pub use dealing::{deal_round, DealtRound};
pub use declare::{score_loser_declare, validate_declare, DeclareSubmission, LoserSubmission};
pub use grouping::auto_group;
pub use melds::{classify, is_pure_sequence, is_sequence, is_set, MeldKind};
pub use player_view::{build_snapshot, RoomSnapshot};
pub use scoring::{penalty_for_grouping, penalty_for_hand, GroupingAssessment, RoundScores};
pub use state::{Phase, PlayerState, Presence, RoomState, SessionId};
