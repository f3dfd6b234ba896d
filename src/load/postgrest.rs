use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{Destination, UpsertClient};

/// Upserts through the database's PostgREST endpoint (`/rest/v1/<table>`).
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    http: Client,
    base: Url,
}

impl PostgrestClient {
    /// One client per run; headers carry the service credential on every call.
    pub fn new(base: &Url, service_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(service_key).context("service key is not a valid header")?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", service_key))
            .context("service key is not a valid header")?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            "prefer",
            HeaderValue::from_static("resolution=merge-duplicates,return=minimal"),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("building HTTP client")?;

        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    /// `<base>/rest/v1/<table>?on_conflict=<key>`
    pub fn endpoint(&self, destination: &Destination) -> Result<Url> {
        let mut url = self
            .base
            .join(&format!("rest/v1/{}", destination.table))
            .with_context(|| format!("building endpoint for {}", destination.table))?;
        url.query_pairs_mut()
            .append_pair("on_conflict", &destination.on_conflict());
        Ok(url)
    }
}

#[async_trait]
impl UpsertClient for PostgrestClient {
    async fn upsert(&self, destination: &Destination, rows: &[Value]) -> Result<()> {
        let url = self.endpoint(destination)?;
        debug!(%url, rows = rows.len(), "POST");

        let resp = self
            .http
            .post(url.clone())
            .json(rows)
            .send()
            .await
            .with_context(|| format!("POST {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("upsert into {} failed: HTTP {}: {}", destination.table, status, body);
        }
        Ok(())
    }
}
