use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use url::Url;

use crate::fetch::{DirSource, NflverseSource, StatsSource};
use crate::load::{PostgrestClient, DEFAULT_BATCH_SIZE};

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const BATCH_SIZE_VAR: &str = "NFL_LOADER_BATCH_SIZE";
pub const DATA_DIR_VAR: &str = "NFL_DATA_DIR";

/// Everything a loader needs from its environment.
#[derive(Clone)]
pub struct Config {
    pub database_url: Url,
    pub service_key: String,
    pub batch_size: usize,
    /// Read provider files from here instead of downloading them.
    pub data_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_str())
            .field("service_key", &"<redacted>")
            .field("batch_size", &self.batch_size)
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl Config {
    /// Read the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("missing required environment variable {}", name))
        };

        let raw_url = required(URL_VAR)?;
        let database_url =
            Url::parse(&raw_url).with_context(|| format!("{} is not a valid URL", URL_VAR))?;
        let service_key = required(KEY_VAR)?;

        let batch_size = match lookup(BATCH_SIZE_VAR) {
            Some(v) => {
                let n: usize = v
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a positive integer", BATCH_SIZE_VAR))?;
                anyhow::ensure!(n > 0, "{} must be a positive integer", BATCH_SIZE_VAR);
                n
            }
            None => DEFAULT_BATCH_SIZE,
        };

        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            service_key,
            batch_size,
            data_dir,
        })
    }

    pub fn upsert_client(&self) -> Result<PostgrestClient> {
        PostgrestClient::new(&self.database_url, &self.service_key)
    }

    pub fn stats_source(&self) -> Result<Box<dyn StatsSource>> {
        Ok(match &self.data_dir {
            Some(dir) => Box::new(DirSource::new(dir)),
            None => Box::new(NflverseSource::new()?),
        })
    }
}
