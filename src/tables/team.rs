use serde::{Deserialize, Serialize};

use super::{SEASON_ALIASES, WEEK_ALIASES};
use crate::load::Destination;
use crate::process::{FieldKind::*, FieldSpec, TableSpec};

pub const TEAM_WEEK_STATS: Destination = Destination {
    table: "team_week_stats",
    conflict_key: &["season", "week", "team"],
};

/// Defense/special-teams line for one team in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWeekStats {
    pub season: i64,
    pub week: i64,
    pub team: String,
    pub points_allowed: i64,
    pub sacks: i64,
    pub interceptions: i64,
    pub fumbles_recovered: i64,
    pub safeties: i64,
    pub def_tds: i64,
    pub blocked_kicks: i64,
    pub return_tds: i64,
}

pub const TEAM_SPEC: TableSpec = TableSpec {
    name: "team_stats",
    fields: &[
        FieldSpec::key("season", SEASON_ALIASES, Int),
        FieldSpec::key("week", WEEK_ALIASES, Int),
        FieldSpec::key("team", &["team", "posteam"], Code),
        FieldSpec::optional(
            "points_allowed",
            &["points_allowed", "opp_points", "points_against"],
            Int,
        ),
        FieldSpec::optional("sacks", &["sacks", "def_sacks"], Int),
        FieldSpec::optional(
            "interceptions",
            &["interceptions", "def_int", "def_interceptions"],
            Int,
        ),
        FieldSpec::optional(
            "fumbles_recovered",
            &[
                "fumbles_recovered",
                "fumble_recoveries",
                "def_fumble_rec",
                "fumble_recovery_opp",
            ],
            Int,
        ),
        FieldSpec::optional("safeties", &["safeties", "def_safeties"], Int),
        FieldSpec::optional("def_tds", &["def_tds", "defensive_tds", "td_def"], Int),
        FieldSpec::optional("blocked_kicks", &["blocked_kicks", "blocks", "def_blocks"], Int),
        FieldSpec::optional(
            "return_tds",
            &["return_tds", "td_ret", "special_teams_tds"],
            Int,
        ),
    ],
    filter: None,
};
