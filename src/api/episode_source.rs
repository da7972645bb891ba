//! Episode source
//!
//! Fetches episode metadata for a location. Absolute http(s) URLs are fetched
//! as-is, relative locations are joined onto the configured base URL, and
//! anything else is read as a local JSON file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Url;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::features::settings::NetworkSettings;
use crate::player::EpisodePayload;

/// Source of episode metadata
pub trait EpisodeSource: Send + Sync {
    fn fetch(&self, location: &str) -> BoxFuture<'static, Result<EpisodePayload>>;
}

/// Where a location points after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeLocation {
    Remote(Url),
    File(PathBuf),
}

/// Resolve `location` against an optional base URL
pub fn resolve(base: Option<&Url>, location: &str) -> Result<EpisodeLocation> {
    let location = location.trim();
    if location.is_empty() {
        bail!("Empty episode location");
    }

    if let Ok(url) = Url::parse(location) {
        match url.scheme() {
            "http" | "https" => return Ok(EpisodeLocation::Remote(url)),
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| anyhow::anyhow!("Invalid file URL: {}", location))?;
                return Ok(EpisodeLocation::File(path));
            }
            _ => {}
        }
    }

    match base {
        Some(base) => {
            let url = base
                .join(location)
                .with_context(|| format!("Failed to join {} onto {}", location, base))?;
            Ok(EpisodeLocation::Remote(url))
        }
        None => Ok(EpisodeLocation::File(PathBuf::from(location))),
    }
}

/// Episode source backed by reqwest and the local filesystem
#[derive(Clone)]
pub struct HttpEpisodeSource {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl std::fmt::Debug for HttpEpisodeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEpisodeSource")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish()
    }
}

impl HttpEpisodeSource {
    pub fn new(settings: &NetworkSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let base_url = match settings.base_url.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => Some(
                Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?,
            ),
            _ => None,
        };

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

impl EpisodeSource for HttpEpisodeSource {
    fn fetch(&self, location: &str) -> BoxFuture<'static, Result<EpisodePayload>> {
        let resolved = resolve(self.base_url.as_ref(), location);
        let client = self.client.clone();

        async move {
            match resolved? {
                EpisodeLocation::Remote(url) => {
                    debug!("Fetching episode metadata from {}", url);
                    let response = client
                        .get(url.clone())
                        .header(ACCEPT, "application/json")
                        .send()
                        .await
                        .with_context(|| format!("Request to {} failed", url))?
                        .error_for_status()?;
                    response
                        .json::<EpisodePayload>()
                        .await
                        .with_context(|| format!("Invalid episode metadata from {}", url))
                }
                EpisodeLocation::File(path) => {
                    debug!("Reading episode metadata from {:?}", path);
                    let content = tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read {:?}", path))?;
                    serde_json::from_str(&content)
                        .with_context(|| format!("Invalid episode metadata in {:?}", path))
                }
            }
        }
        .boxed()
    }
}
