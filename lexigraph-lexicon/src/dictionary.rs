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

//! Dictionary HTTP client
//!
//! Queries a dictionaryapi.dev-compatible endpoint (`GET {base_url}/{word}`)
//! and renders one definition and one example per part of speech as
//! `"(pos) text"`.

use lexigraph_core::EnrichmentError;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Definitions and examples for one word, already formatted for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiEntry {
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: Option<String>,
    example: Option<String>,
}

pub struct DictionaryClient {
    base_url: String,
    client: reqwest::Client,
}

impl DictionaryClient {
    /// Client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, EnrichmentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::Request(e.to_string()))?;
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Look up a word. A non-success status means the service has no entry
    /// and yields an empty [`DictionaryEntry`].
    pub async fn lookup(&self, word: &str) -> Result<DictionaryEntry, EnrichmentError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, word))
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            debug!(word, status = %response.status(), "No dictionary entry");
            return Ok(DictionaryEntry::default());
        }

        let body = response.text().await.map_err(request_error)?;
        parse_entries(&body)
    }
}

fn request_error(e: reqwest::Error) -> EnrichmentError {
    if e.is_timeout() {
        EnrichmentError::Timeout
    } else {
        EnrichmentError::Request(e.to_string())
    }
}

/// Render the first entry of a dictionary response
pub fn parse_entries(body: &str) -> Result<DictionaryEntry, EnrichmentError> {
    let entries: Vec<ApiEntry> = serde_json::from_str(body)
        .map_err(|e| EnrichmentError::Request(format!("invalid dictionary response: {}", e)))?;

    let Some(entry) = entries.into_iter().next() else {
        return Ok(DictionaryEntry::default());
    };

    let mut result = DictionaryEntry::default();
    for meaning in entry.meanings {
        let pos = meaning.part_of_speech.as_deref().unwrap_or("n/a");

        let definition = meaning
            .definitions
            .iter()
            .filter_map(|d| d.definition.as_deref())
            .find(|d| !d.is_empty());
        if let Some(text) = definition {
            result.definitions.push(format!("({}) {}", pos, text));
        }

        let example = meaning
            .definitions
            .iter()
            .filter_map(|d| d.example.as_deref())
            .find(|e| !e.is_empty());
        if let Some(text) = example {
            result.examples.push(format!("({}) {}", pos, text));
        }
    }

    Ok(result)
}
