// src/fetch/mod.rs
pub mod local;
pub mod nflverse;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::process::{convert::parse_int, resolve, RawTable};

pub use local::DirSource;
pub use nflverse::NflverseSource;

/// Which slice of the player stats the caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatType {
    Offense,
    Kicking,
}

/// A provider table family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    TeamStats,
    PlayerStats(StatType),
    Rosters,
    Schedules,
}

impl Dataset {
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::TeamStats => "team",
            Dataset::PlayerStats(StatType::Offense) => "player",
            Dataset::PlayerStats(StatType::Kicking) => "kicking",
            Dataset::Rosters => "roster",
            Dataset::Schedules => "schedule",
        }
    }

    /// Schedules ship as one file covering every season.
    pub fn per_season(&self) -> bool {
        !matches!(self, Dataset::Schedules)
    }

    /// File path relative to the release root. Both stat types read the
    /// weekly player file; kickers are picked out by position downstream.
    pub fn file(&self, season: u16) -> String {
        match self {
            Dataset::TeamStats => format!("stats_team/stats_team_week_{}.csv", season),
            Dataset::PlayerStats(_) => format!("stats_player/stats_player_week_{}.csv", season),
            Dataset::Rosters => format!("rosters/roster_{}.csv", season),
            Dataset::Schedules => "games.csv".to_string(),
        }
    }
}

/// Where raw stat tables come from.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Read one provider file. `season` is ignored for single-file datasets.
    async fn read(&self, dataset: Dataset, season: u16) -> Result<RawTable>;

    /// All rows of `dataset` for `seasons`, one file per season concatenated
    /// in season order.
    async fn load(&self, dataset: Dataset, seasons: &[u16]) -> Result<RawTable> {
        let mut table = RawTable::default();
        if dataset.per_season() {
            for &season in seasons {
                let part = self.read(dataset, season).await?;
                debug!(dataset = dataset.label(), season, rows = part.len(), "read");
                table.append(part);
            }
        } else if let Some(&first) = seasons.first() {
            table = self.read(dataset, first).await?;
        }
        keep_seasons(&mut table, seasons);
        info!("Loaded {} rows: {}", dataset.label(), table.len());
        Ok(table)
    }

    async fn team_stats(&self, seasons: &[u16]) -> Result<RawTable> {
        self.load(Dataset::TeamStats, seasons).await
    }

    async fn player_stats(&self, seasons: &[u16], stat_type: StatType) -> Result<RawTable> {
        self.load(Dataset::PlayerStats(stat_type), seasons).await
    }

    async fn schedules(&self, seasons: &[u16]) -> Result<RawTable> {
        self.load(Dataset::Schedules, seasons).await
    }

    async fn rosters(&self, seasons: &[u16]) -> Result<RawTable> {
        self.load(Dataset::Rosters, seasons).await
    }
}

/// Drop rows whose season is outside `seasons`. Tables without a season
/// column are left for the normalizer to reject.
pub fn keep_seasons(table: &mut RawTable, seasons: &[u16]) {
    let available: HashSet<&str> = table.headers.iter().map(String::as_str).collect();
    let Some(col) = resolve(&available, crate::tables::SEASON_ALIASES)
        .and_then(|c| table.column_index(c))
    else {
        return;
    };
    let wanted: HashSet<i64> = seasons.iter().map(|&s| i64::from(s)).collect();
    table.retain_rows(|row| {
        row.get(col)
            .and_then(|cell| parse_int(cell))
            .is_some_and(|s| wanted.contains(&s))
    });
}
