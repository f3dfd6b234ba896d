use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::{Dataset, StatsSource};
use crate::process::RawTable;

/// Reads provider files previously saved under `root`, laid out the same way
/// as the release (e.g. `rosters/roster_2023.csv`, `games.csv`).
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, dataset: Dataset, season: u16) -> PathBuf {
        self.root.join(dataset.file(season))
    }
}

#[async_trait]
impl StatsSource for DirSource {
    async fn read(&self, dataset: Dataset, season: u16) -> Result<RawTable> {
        let path = self.path(dataset, season);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        RawTable::from_csv_reader(bytes.as_slice())
            .with_context(|| format!("parsing {}", path.display()))
    }
}
