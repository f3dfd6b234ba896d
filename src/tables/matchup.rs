use serde::{Deserialize, Serialize};

use super::{SEASON_ALIASES, WEEK_ALIASES};
use crate::load::Destination;
use crate::process::{FieldKind::*, FieldSpec, TableSpec};

pub const TEAM_WEEK_MATCHUPS: Destination = Destination {
    table: "team_week_matchups",
    conflict_key: &["season", "week", "team"],
};

/// One scheduled game as the provider lists it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameRow {
    pub season: i64,
    pub week: i64,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub game_id: Option<String>,
}

/// A completed game seen from one team's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamWeekMatchup {
    pub season: i64,
    pub week: i64,
    pub team: String,
    pub opponent: String,
    pub team_score: i64,
    pub opp_score: i64,
    pub is_home: bool,
    pub game_id: Option<String>,
}

pub const SCHEDULE_SPEC: TableSpec = TableSpec {
    name: "schedules",
    fields: &[
        FieldSpec::key("season", SEASON_ALIASES, Int),
        FieldSpec::key("week", WEEK_ALIASES, Int),
        FieldSpec::key("home_team", &["home_team"], Code),
        FieldSpec::key("away_team", &["away_team"], Code),
        FieldSpec::required("home_score", &["home_score"], NullableInt),
        FieldSpec::required("away_score", &["away_score"], NullableInt),
        FieldSpec::optional("game_id", &["game_id", "gsis_id"], Text),
    ],
    filter: None,
};
