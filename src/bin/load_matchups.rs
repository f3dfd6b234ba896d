//! Completed games, one row per team, into team_week_matchups.
use anyhow::Result;
use clap::Parser;
use nflloader::{cli::SeasonArgs, config::Config, jobs::Pipeline, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeasonArgs::parse();
    logging::init();

    let config = Config::from_env()?;
    let seasons = args.seasons()?;
    info!(?seasons, "startup");

    let source = config.stats_source()?;
    let client = config.upsert_client()?;
    let pipeline = Pipeline::new(source.as_ref(), &client, config.batch_size);

    let sent = pipeline.load_matchups(&seasons).await?;
    info!(rows = sent, "all done");
    Ok(())
}
