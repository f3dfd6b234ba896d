use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::io::Cursor;
use tracing::info;
use url::Url;

use super::{Dataset, StatsSource};
use crate::process::RawTable;

/// Release assets of the nflverse-data repository.
static RELEASES_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download/";

/// Every game since 1999, one row per game.
static GAMES_URL: &str = "https://github.com/nflverse/nfldata/raw/master/data/games.csv";

/// Downloads nflverse CSV releases.
#[derive(Debug, Clone)]
pub struct NflverseSource {
    client: Client,
    releases: Url,
    games: Url,
}

impl NflverseSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nflloader/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            releases: Url::parse(RELEASES_URL).context("parsing releases URL")?,
            games: Url::parse(GAMES_URL).context("parsing games URL")?,
        })
    }

    pub fn url(&self, dataset: Dataset, season: u16) -> Result<Url> {
        match dataset {
            Dataset::Schedules => Ok(self.games.clone()),
            _ => {
                let file = dataset.file(season);
                self.releases
                    .join(&file)
                    .with_context(|| format!("building URL for {}", file))
            }
        }
    }
}

#[async_trait]
impl StatsSource for NflverseSource {
    async fn read(&self, dataset: Dataset, season: u16) -> Result<RawTable> {
        let url = self.url(dataset, season)?;
        info!(%url, "downloading");

        let body = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()
            .with_context(|| format!("GET {}", url))?
            .bytes()
            .await
            .with_context(|| format!("reading body from {}", url))?;

        RawTable::from_csv_reader(Cursor::new(body)).with_context(|| format!("parsing {}", url))
    }
}
