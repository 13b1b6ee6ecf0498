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

use anyhow::{Context, Result};
use lexigraph_core::{LeidenConfig, DEFAULT_CACHE_FILE, DEFAULT_OUTPUT_FILE};
use lexigraph_lexicon::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Lexigraph Configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LexigraphConfig {
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabularyConfig {
    /// Newline-delimited word list
    #[serde(default = "default_vocabulary_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Enrichment snapshot (JSON)
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Query the dictionary service for definitions and examples
    #[serde(default = "default_dictionary_enabled")]
    pub dictionary_enabled: bool,

    /// Dictionary endpoint, queried as `{base_url}/{word}`
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Pause between lookups in milliseconds (third-party rate limit)
    #[serde(default = "default_request_delay")]
    pub request_delay_ms: u64,

    /// WordNet-style relation table (TSV); no relations when unset
    #[serde(default)]
    pub relations_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusteringConfig {
    /// Resolution parameter (higher = more clusters)
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default = "default_min_improvement")]
    pub min_improvement: f64,

    /// Seed for the node visit order (default 42)
    #[serde(default = "default_seed")]
    pub seed: Option<u64>,

    /// Ignore `seed` and draw the visit order from entropy
    #[serde(default)]
    pub random_seed: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// GraphML destination, overwritten each run
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

// Default values
fn default_vocabulary_path() -> PathBuf {
    PathBuf::from("words.txt")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_FILE)
}

fn default_dictionary_enabled() -> bool {
    true
}

fn default_dictionary_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    5
}

fn default_request_delay() -> u64 {
    500
}

fn default_resolution() -> f64 {
    1.0
}

fn default_max_iterations() -> usize {
    100
}

fn default_min_improvement() -> f64 {
    1e-6
}

fn default_seed() -> Option<u64> {
    Some(42)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            path: default_vocabulary_path(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            dictionary_enabled: default_dictionary_enabled(),
            dictionary_url: default_dictionary_url(),
            request_timeout_secs: default_request_timeout(),
            request_delay_ms: default_request_delay(),
            relations_path: None,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_iterations: default_max_iterations(),
            min_improvement: default_min_improvement(),
            seed: default_seed(),
            random_seed: false,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

impl EnrichmentConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl ClusteringConfig {
    pub fn leiden(&self) -> LeidenConfig {
        LeidenConfig {
            resolution: self.resolution,
            max_iterations: self.max_iterations,
            min_improvement: self.min_improvement,
            seed: if self.random_seed { None } else { self.seed },
        }
    }
}

impl LexigraphConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - LEXIGRAPH_VOCABULARY: word list path (default: words.txt)
    /// - LEXIGRAPH_CACHE: enrichment cache path (default: api_cache.json)
    /// - LEXIGRAPH_OUTPUT: GraphML output path
    /// - LEXIGRAPH_RELATIONS: relation table path
    /// - LEXIGRAPH_DICTIONARY_URL: dictionary endpoint
    /// - LEXIGRAPH_DICTIONARY_ENABLED: query the dictionary (default: true)
    /// - LEXIGRAPH_REQUEST_TIMEOUT: per-request timeout in seconds (default: 5)
    /// - LEXIGRAPH_REQUEST_DELAY_MS: delay between lookups (default: 500)
    /// - LEXIGRAPH_SEED: clustering seed
    ///
    /// Unparsable values are logged and leave the current setting in place.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        if let Some(path) = var("LEXIGRAPH_VOCABULARY") {
            self.vocabulary.path = PathBuf::from(path);
        }

        if let Some(path) = var("LEXIGRAPH_CACHE") {
            self.cache.path = PathBuf::from(path);
        }

        if let Some(path) = var("LEXIGRAPH_OUTPUT") {
            self.export.output_path = PathBuf::from(path);
        }

        if let Some(path) = var("LEXIGRAPH_RELATIONS") {
            self.enrichment.relations_path = Some(PathBuf::from(path));
        }

        if let Some(url) = var("LEXIGRAPH_DICTIONARY_URL") {
            self.enrichment.dictionary_url = url;
        }

        if let Some(enabled) = var("LEXIGRAPH_DICTIONARY_ENABLED") {
            match enabled.parse() {
                Ok(val) => self.enrichment.dictionary_enabled = val,
                Err(_) => rejected("LEXIGRAPH_DICTIONARY_ENABLED", &enabled),
            }
        }

        if let Some(timeout) = var("LEXIGRAPH_REQUEST_TIMEOUT") {
            match timeout.parse() {
                Ok(val) => self.enrichment.request_timeout_secs = val,
                Err(_) => rejected("LEXIGRAPH_REQUEST_TIMEOUT", &timeout),
            }
        }

        if let Some(delay) = var("LEXIGRAPH_REQUEST_DELAY_MS") {
            match delay.parse() {
                Ok(val) => self.enrichment.request_delay_ms = val,
                Err(_) => rejected("LEXIGRAPH_REQUEST_DELAY_MS", &delay),
            }
        }

        if let Some(seed) = var("LEXIGRAPH_SEED") {
            match seed.parse() {
                Ok(val) => self.clustering.seed = Some(val),
                Err(_) => rejected("LEXIGRAPH_SEED", &seed),
            }
        }
    }
}

fn rejected(key: &str, value: &str) {
    warn!(key, value, "Ignoring unparsable environment override");
}
