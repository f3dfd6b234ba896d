// src/load/mod.rs
pub mod postgrest;

use anyhow::{ensure, Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

pub use postgrest::PostgrestClient;

/// Records per upsert call unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// A destination table and the columns it resolves conflicts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub table: &'static str,
    pub conflict_key: &'static [&'static str],
}

impl Destination {
    /// Conflict key as the comma-joined column list the REST layer expects.
    pub fn on_conflict(&self) -> String {
        self.conflict_key.join(",")
    }
}

/// Keyed insert-or-update of a group of rows. Implementations must be
/// idempotent per call: re-sending the same rows leaves the same state.
#[async_trait]
pub trait UpsertClient: Send + Sync {
    async fn upsert(&self, destination: &Destination, rows: &[Value]) -> Result<()>;
}

/// Send `records` in consecutive groups of at most `batch_size`, one call per
/// group, in order. The first failing call aborts the load; groups already
/// sent stay committed. Returns the number of records sent.
#[instrument(level = "info", skip_all, fields(table = destination.table, records = records.len()))]
pub async fn upsert_all<T: Serialize>(
    client: &dyn UpsertClient,
    records: &[T],
    destination: &Destination,
    batch_size: usize,
) -> Result<usize> {
    ensure!(batch_size > 0, "batch size must be positive");

    info!("Upserting rows: {}", records.len());
    let mut sent = 0;
    for (idx, chunk) in records.chunks(batch_size).enumerate() {
        let rows = chunk
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()
            .with_context(|| format!("serializing batch {} for {}", idx, destination.table))?;

        client
            .upsert(destination, &rows)
            .await
            .with_context(|| {
                format!(
                    "upserting batch {} ({} rows) into {}",
                    idx,
                    rows.len(),
                    destination.table
                )
            })?;
        sent += rows.len();
        debug!(batch = idx, rows = rows.len(), sent, "batch upserted");
    }
    Ok(sent)
}
