//! Destination record types and the alias specs that produce them.

pub mod matchup;
pub mod player;
pub mod team;

pub use matchup::{GameRow, TeamWeekMatchup, SCHEDULE_SPEC, TEAM_WEEK_MATCHUPS};
pub use player::{
    KickerWeekStats, PlayerWeekStats, RosterEntry, KICKER_SPEC, PLAYER_SPEC, PLAYER_WEEK_STATS,
    ROSTER_SPEC,
};
pub use team::{TeamWeekStats, TEAM_SPEC, TEAM_WEEK_STATS};

/// Aliases shared by every weekly table.
pub(crate) const SEASON_ALIASES: &[&str] = &["season", "year"];
pub(crate) const WEEK_ALIASES: &[&str] = &["week"];
pub(crate) const PLAYER_ID_ALIASES: &[&str] = &["player_id", "gsis_id", "player_gsis_id"];
