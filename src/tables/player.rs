use serde::{Deserialize, Serialize};

use super::{PLAYER_ID_ALIASES, SEASON_ALIASES, WEEK_ALIASES};
use crate::load::Destination;
use crate::process::{CategoryFilter, FieldKind::*, FieldSpec, TableSpec};

pub const PLAYER_WEEK_STATS: Destination = Destination {
    table: "player_week_stats",
    conflict_key: &["season", "week", "player_id"],
};

const PLAYER_NAME_ALIASES: &[&str] = &["player_name", "name", "player_display_name"];
const POSITION_ALIASES: &[&str] = &["position", "pos"];
const LEGACY_POSITIONS: &[(&str, &str)] = &[("PK", "K")];

/// Offensive and kicking line for one player in one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWeekStats {
    pub season: i64,
    pub week: i64,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: Option<String>,
    pub jersey_number: i64,
    pub passing_yards: i64,
    pub passing_tds: i64,
    pub interceptions: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub receptions: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,
    pub fumbles_lost: i64,
    pub xpm: i64,
    pub xpa: i64,
    pub fgm: i64,
    pub fga: i64,
    pub fgm_0_39: i64,
    pub fgm_40_49: i64,
    pub fgm_50_plus: i64,
}

/// Kicker-only line. Upserting it leaves the offensive columns of an
/// existing row alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickerWeekStats {
    pub season: i64,
    pub week: i64,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub team: Option<String>,
    pub jersey_number: i64,
    pub xpm: i64,
    pub xpa: i64,
    pub fgm: i64,
    pub fga: i64,
    pub fgm_0_39: i64,
    pub fgm_40_49: i64,
    pub fgm_50_plus: i64,
}

/// Which team a player was rostered on for a season.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub season: i64,
    pub team: String,
}

pub const PLAYER_SPEC: TableSpec = TableSpec {
    name: "player_stats",
    fields: &[
        FieldSpec::key("season", SEASON_ALIASES, Int),
        FieldSpec::key("week", WEEK_ALIASES, Int),
        FieldSpec::key("player_id", PLAYER_ID_ALIASES, Text),
        FieldSpec::required("player_name", PLAYER_NAME_ALIASES, Text),
        FieldSpec::required("position", POSITION_ALIASES, Code),
        FieldSpec::optional("team", &["recent_team", "team", "posteam"], Code),
        FieldSpec::optional("jersey_number", &["jersey_number"], Int),
        FieldSpec::optional("passing_yards", &["passing_yards", "pass_yards"], Int),
        FieldSpec::optional("passing_tds", &["passing_tds", "pass_tds"], Int),
        FieldSpec::optional(
            "interceptions",
            &["interceptions", "pass_int", "passing_interceptions"],
            Int,
        ),
        FieldSpec::optional("rushing_yards", &["rushing_yards", "rush_yards"], Int),
        FieldSpec::optional("rushing_tds", &["rushing_tds", "rush_tds"], Int),
        FieldSpec::optional("receptions", &["receptions", "rec"], Int),
        FieldSpec::optional("receiving_yards", &["receiving_yards", "rec_yards"], Int),
        FieldSpec::optional("receiving_tds", &["receiving_tds", "rec_tds"], Int),
        FieldSpec::optional("fumbles_lost", &["fumbles_lost"], Int),
        FieldSpec::optional("xpm", &["xpm", "xp_made", "extra_points_made", "pat_made"], Int),
        FieldSpec::optional("xpa", &["xpa", "xp_att", "extra_points_attempted", "pat_att"], Int),
        FieldSpec::optional("fgm", &["fgm", "fg_made", "field_goals_made"], Int),
        FieldSpec::optional("fga", &["fga", "fg_att", "field_goals_attempted"], Int),
        FieldSpec::optional("fgm_0_39", &["fgm_0_39", "fg_made_0_39"], Int),
        FieldSpec::optional("fgm_40_49", &["fgm_40_49", "fg_made_40_49"], Int),
        FieldSpec::optional(
            "fgm_50_plus",
            &["fgm_50_plus", "fg_made_50_plus", "fg_made_50p"],
            Int,
        ),
    ],
    filter: Some(CategoryFilter {
        field: "position",
        allowed: &["QB", "RB", "WR", "TE", "K"],
        rewrites: LEGACY_POSITIONS,
    }),
};

pub const KICKER_SPEC: TableSpec = TableSpec {
    name: "kicker_stats",
    fields: &[
        FieldSpec::key("season", SEASON_ALIASES, Int),
        FieldSpec::key("week", WEEK_ALIASES, Int),
        FieldSpec::key("player_id", PLAYER_ID_ALIASES, Text),
        FieldSpec::required("player_name", PLAYER_NAME_ALIASES, Text),
        FieldSpec::required("position", POSITION_ALIASES, Code),
        FieldSpec::optional("team", &["team", "recent_team", "posteam"], Code),
        FieldSpec::optional("jersey_number", &["jersey_number"], Int),
        FieldSpec::optional("xpm", &["xpm", "xp_made", "extra_points_made", "pat_made"], Int),
        FieldSpec::optional("xpa", &["xpa", "xp_att", "extra_points_attempted", "pat_att"], Int),
        FieldSpec::optional("fgm", &["fgm", "fg_made", "field_goals_made"], Int),
        FieldSpec::optional("fga", &["fga", "fg_att", "field_goals_attempted"], Int),
        FieldSpec::optional("fgm_0_39", &["fgm_0_39", "fg_made_0_39", "fgm_0_39_yards"], Int),
        FieldSpec::optional(
            "fgm_40_49",
            &["fgm_40_49", "fg_made_40_49", "fgm_40_49_yards"],
            Int,
        ),
        FieldSpec::optional(
            "fgm_50_plus",
            &["fgm_50_plus", "fgm_50+", "fg_made_50_plus", "fg_made_50p"],
            Int,
        ),
    ],
    filter: Some(CategoryFilter {
        field: "position",
        allowed: &["K"],
        rewrites: LEGACY_POSITIONS,
    }),
};

pub const ROSTER_SPEC: TableSpec = TableSpec {
    name: "rosters",
    fields: &[
        FieldSpec::required("player_id", PLAYER_ID_ALIASES, Text),
        FieldSpec::required("season", SEASON_ALIASES, Int),
        FieldSpec::required("team", &["team", "recent_team"], Code),
    ],
    filter: None,
};
