//! Probe coordinator - cache-first product retrieval
//!
//! This module ties the pieces of a probe together:
//! - Resolving the input into a canonical target
//! - Serving cached product records
//! - Enforcing the robot-check cooldown before any fetch
//! - Fetching, inspecting, extracting, and caching the page

use crate::cache::{CacheEntry, CacheFingerprint, CacheStore, ProductRecord};
use crate::config::Config;
use crate::cooldown::{ChallengeOutcome, Cooldown, CooldownDecision};
use crate::extract::{inspect_page, PageKind};
use crate::probe::fetcher::{Fetcher, HttpFetcher};
use crate::target::{resolve_target, CanonicalTarget, Market};
use crate::ProbeError;
use chrono::Utc;
use serde::Serialize;

/// What a probe produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// The product record, freshly extracted or served from the cache
    Product(ProductRecord),

    /// The page is cooling down after a robot check; retry after `seconds`
    MustWait { seconds: u64 },

    /// The cooldown has just been lifted; the caller should retry
    CooldownExpired,
}

impl ProbeOutcome {
    /// Returns the product record if the probe produced one
    pub fn product(&self) -> Option<&ProductRecord> {
        match self {
            Self::Product(record) => Some(record),
            _ => None,
        }
    }
}

impl From<CooldownDecision> for ProbeOutcome {
    fn from(decision: CooldownDecision) -> Self {
        match decision {
            CooldownDecision::MustWait { seconds } => Self::MustWait { seconds },
            CooldownDecision::Expired => Self::CooldownExpired,
        }
    }
}

/// Cache-first product prober
pub struct Prober<F> {
    fetcher: F,
    store: CacheStore,
    cooldown: Cooldown,
}

impl Prober<HttpFetcher> {
    /// Creates a prober using the HTTP fetcher and the configured cache
    ///
    /// # Returns
    ///
    /// * `Ok(Prober)` - Ready to probe
    /// * `Err(ProbeError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, ProbeError> {
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        let store = CacheStore::new(&config.cache.directory);
        let cooldown = Cooldown::from_config(&config.cooldown);
        Ok(Self::new(fetcher, store, cooldown))
    }
}

impl<F: Fetcher> Prober<F> {
    pub fn new(fetcher: F, store: CacheStore, cooldown: Cooldown) -> Self {
        Self {
            fetcher,
            store,
            cooldown,
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    /// Resolves raw input against a market and probes the resulting page
    ///
    /// # Returns
    ///
    /// * `Ok(ProbeOutcome)` - A product, or a cooldown instruction
    /// * `Err(ProbeError::InvalidInput)` - No ASIN in the input
    /// * `Err(ProbeError::Fetch)` - The page could not be downloaded
    pub async fn fetch_product(
        &self,
        input: &str,
        market: Market,
    ) -> Result<ProbeOutcome, ProbeError> {
        let target = resolve_target(input, market)?;
        self.probe(&target).await
    }

    /// Probes an already resolved target
    ///
    /// # Flow
    ///
    /// 1. A cached product record is returned as is, without fetching
    /// 2. A cached robot-check marker answers with the remaining wait, or is
    ///    removed once its window has elapsed and the caller is told to retry
    /// 3. Otherwise the page is fetched once
    /// 4. A robot-check page starts the cooldown instead of being extracted,
    ///    unless another writer has cached the product in the meantime
    /// 5. Anything else is extracted, cached (first write wins), and returned
    pub async fn probe(&self, target: &CanonicalTarget) -> Result<ProbeOutcome, ProbeError> {
        let fingerprint = CacheFingerprint::of(&target.url);
        tracing::debug!("Probing {} ({}) as {}", target.asin, target.url, fingerprint);

        match self.store.get(&fingerprint) {
            Some(CacheEntry::Product(record)) => {
                tracing::debug!("Cache hit for {}", target.url);
                return Ok(ProbeOutcome::Product(record));
            }
            Some(CacheEntry::DetectionMarker { .. }) => {
                if let Some(decision) = self.cooldown.check(&self.store, &fingerprint, Utc::now()) {
                    tracing::info!("{} is cooling down: {}", target.url, decision);
                    return Ok(decision.into());
                }
            }
            None => tracing::debug!("Cache miss for {}", target.url),
        }

        tracing::info!("Fetching {}", target.url);
        let body = self.fetcher.fetch(&target.url).await?;

        let now = Utc::now();
        match inspect_page(&body, &target.url, now) {
            PageKind::RobotCheck => {
                match self.cooldown.record_challenge(&self.store, &fingerprint, now) {
                    ChallengeOutcome::Cooldown(decision) => Ok(decision.into()),
                    ChallengeOutcome::Cached(record) => Ok(ProbeOutcome::Product(record)),
                }
            }
            PageKind::Product(record) => {
                self.cache_record(&fingerprint, &record);
                Ok(ProbeOutcome::Product(record))
            }
        }
    }

    /// Stores a freshly extracted record; failures only cost a future re-fetch
    fn cache_record(&self, fingerprint: &CacheFingerprint, record: &ProductRecord) {
        match self
            .store
            .put(fingerprint, &CacheEntry::Product(record.clone()))
        {
            Ok(true) => tracing::info!("Cached product record for {}", record.url),
            Ok(false) => tracing::debug!(
                "Another probe already cached {}, keeping the existing entry",
                record.url
            ),
            Err(e) => tracing::warn!("Failed to cache product record for {}: {}", record.url, e),
        }
    }
}
