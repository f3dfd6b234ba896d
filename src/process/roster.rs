use std::collections::HashMap;
use tracing::{info, warn};

use super::normalize::{normalize_as, NormalizeError};
use super::raw_table::RawTable;
use crate::tables::{PlayerWeekStats, RosterEntry, ROSTER_SPEC};

/// Historical team per (player_id, season), taken from roster data.
#[derive(Debug, Default)]
pub struct RosterTeams {
    teams: HashMap<(String, i64), String>,
}

impl RosterTeams {
    /// Build from roster entries; a later entry for the same key wins.
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut teams = HashMap::new();
        for e in entries {
            if e.player_id.is_empty() || e.team.is_empty() {
                continue;
            }
            teams.insert((e.player_id, e.season), e.team);
        }
        Self { teams }
    }

    /// Build from a raw roster table. A table without resolvable id/season/team
    /// columns yields `None`, and players keep the stat table's team.
    pub fn from_table(raw: &RawTable) -> Result<Option<Self>, NormalizeError> {
        match normalize_as::<RosterEntry>(raw, &ROSTER_SPEC) {
            Ok(entries) => {
                let roster = Self::from_entries(entries);
                info!(players = roster.len(), "merged roster data for historical teams");
                Ok(Some(roster))
            }
            Err(NormalizeError::MissingColumns { fields, .. }) => {
                warn!(
                    missing = ?fields,
                    "could not load roster team data, falling back to recent team"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team(&self, player_id: &str, season: i64) -> Option<&str> {
        self.teams
            .get(&(player_id.to_string(), season))
            .map(String::as_str)
    }

    /// Prefer the roster team; keep the stat table's team otherwise.
    pub fn apply(&self, players: &mut [PlayerWeekStats]) {
        for p in players {
            if let Some(team) = self.team(&p.player_id, p.season) {
                p.team = Some(team.to_string());
            }
        }
    }
}
