// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Enrichment Phase
//!
//! Drives an [`EnrichmentProvider`] over the vocabulary, one word at a time,
//! with a fixed delay between requests to respect third-party rate limits.
//! Lookups are never retried: a failed lookup degrades to
//! [`EnrichmentRecord::sentinel`] and the batch carries on.

use crate::cache::EnrichmentCache;
use crate::error::Result;
use crate::model::{EnrichmentMap, EnrichmentRecord};
use crate::vocabulary::Vocabulary;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from a single enrichment lookup
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("lookup request failed: {0}")]
    Request(String),

    #[error("lookup timed out")]
    Timeout,
}

/// Source of per-word lexical data (dictionary service, lexical database)
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    /// Look up a single word
    async fn enrich(&self, word: &str) -> std::result::Result<EnrichmentRecord, EnrichmentError>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Options for the sequential fetch loop
#[derive(Debug, Clone)]
pub struct EnrichmentOptions {
    /// Pause between consecutive lookups
    pub request_delay: Duration,
    /// Render an indicatif progress bar
    pub show_progress: bool,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(500),
            show_progress: false,
        }
    }
}

/// Where the enrichment map of a run came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentSource {
    Cache,
    Fetched,
}

/// Fetch a record for every vocabulary word, sequentially
pub async fn enrich_vocabulary(
    vocabulary: &Vocabulary,
    provider: &dyn EnrichmentProvider,
    options: &EnrichmentOptions,
) -> EnrichmentMap {
    let progress = progress_bar(vocabulary.len() as u64, options.show_progress);
    progress.set_message("Phase 1: Analyzing words");

    let mut records = EnrichmentMap::new();
    let mut failures = 0usize;

    for (i, word) in vocabulary.iter().enumerate() {
        if i > 0 && !options.request_delay.is_zero() {
            tokio::time::sleep(options.request_delay).await;
        }

        let record = match provider.enrich(word).await {
            Ok(record) => {
                debug!(
                    word,
                    related = record.related_words.len(),
                    antonyms = record.antonyms.len(),
                    "Enriched word"
                );
                record
            }
            Err(e) => {
                failures += 1;
                warn!(word, provider = provider.name(), error = %e, "Lookup failed, using sentinel record");
                EnrichmentRecord::sentinel()
            }
        };

        records.insert(word.to_string(), record);
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!(
        provider = provider.name(),
        words = records.len(),
        failures,
        "Enrichment phase complete"
    );
    records
}

/// Return the cached map when a snapshot exists, otherwise fetch every word
/// and save the complete map once.
pub async fn load_or_enrich(
    cache: &EnrichmentCache,
    vocabulary: &Vocabulary,
    provider: &dyn EnrichmentProvider,
    options: &EnrichmentOptions,
) -> Result<(EnrichmentMap, EnrichmentSource)> {
    if let Some(records) = cache.load()? {
        return Ok((records, EnrichmentSource::Cache));
    }

    info!(
        path = %cache.path().display(),
        words = vocabulary.len(),
        "No cache file found, fetching enrichment data"
    );
    let records = enrich_vocabulary(vocabulary, provider, options).await;
    cache.save(&records)?;
    Ok((records, EnrichmentSource::Fetched))
}

pub(crate) fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(len).with_style(style)
}
