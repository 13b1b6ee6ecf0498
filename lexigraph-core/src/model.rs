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

//! Enrichment and Relation Types
//!
//! Defines the per-word enrichment record and the relation kinds that
//! become edges in the lexical graph.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Placeholder used when no definition could be retrieved
pub const NO_DEFINITION: &str = "No definition found.";

/// Placeholder used when no usage example could be retrieved
pub const NO_EXAMPLES: &str = "No examples found.";

/// Separator for flattened, display-only lists
pub const DISPLAY_SEPARATOR: &str = "; ";

/// Word -> enrichment record, ordered by word
pub type EnrichmentMap = BTreeMap<String, EnrichmentRecord>;

/// Lexical data gathered for a single word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    /// Part-of-speech tagged definitions, joined for display
    pub definition: String,
    /// Part-of-speech tagged usage examples, joined for display
    pub examples: String,
    /// Synonyms, hypernyms and hyponyms (may fall outside the vocabulary)
    pub related_words: BTreeSet<String>,
    /// Antonyms (may fall outside the vocabulary)
    pub antonyms: BTreeSet<String>,
}

impl EnrichmentRecord {
    /// Record with sentinel text and no relations
    pub fn sentinel() -> Self {
        Self {
            definition: NO_DEFINITION.to_string(),
            examples: NO_EXAMPLES.to_string(),
            related_words: BTreeSet::new(),
            antonyms: BTreeSet::new(),
        }
    }

    /// Build a record from raw lookup parts, substituting sentinels for
    /// empty definition or example lists.
    pub fn from_parts(
        definitions: &[String],
        examples: &[String],
        related_words: BTreeSet<String>,
        antonyms: BTreeSet<String>,
    ) -> Self {
        Self {
            definition: join_or(definitions, NO_DEFINITION),
            examples: join_or(examples, NO_EXAMPLES),
            related_words,
            antonyms,
        }
    }

    pub fn with_related<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_antonyms<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.antonyms.extend(words.into_iter().map(Into::into));
        self
    }

    /// Flattened display form of the full related-word set
    pub fn related_words_display(&self) -> String {
        self.related_words
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(DISPLAY_SEPARATOR)
    }
}

impl Default for EnrichmentRecord {
    fn default() -> Self {
        Self::sentinel()
    }
}

fn join_or(parts: &[String], fallback: &str) -> String {
    if parts.is_empty() {
        fallback.to_string()
    } else {
        parts.join(DISPLAY_SEPARATOR)
    }
}

/// Relation kinds between two vocabulary words
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Derived from related-word overlap; the only kind used for clustering
    Similar,
    /// Display-only opposite relation
    Antonym,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Similar => "similar",
            Relation::Antonym => "antonym",
        }
    }

    /// Fixed display color for the visualization tool
    pub fn color(&self) -> &'static str {
        match self {
            Relation::Similar => "#1f77b4",
            Relation::Antonym => "#d62728",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
