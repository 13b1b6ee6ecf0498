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

//! Composite enrichment provider: dictionary text plus lexical relations.
//!
//! A failed dictionary lookup only costs the definition and examples; the
//! relations from the table are still returned.

use crate::dictionary::{DictionaryClient, DictionaryEntry};
use crate::relations::RelationTable;
use async_trait::async_trait;
use lexigraph_core::{EnrichmentError, EnrichmentProvider, EnrichmentRecord};
use tracing::warn;

#[derive(Default)]
pub struct LexiconProvider {
    dictionary: Option<DictionaryClient>,
    relations: Option<RelationTable>,
}

impl LexiconProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, dictionary: DictionaryClient) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn with_relations(mut self, relations: RelationTable) -> Self {
        self.relations = Some(relations);
        self
    }

    async fn dictionary_entry(&self, word: &str) -> DictionaryEntry {
        let Some(dictionary) = &self.dictionary else {
            return DictionaryEntry::default();
        };
        match dictionary.lookup(word).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(word, error = %e, "Dictionary lookup failed");
                DictionaryEntry::default()
            }
        }
    }
}

#[async_trait]
impl EnrichmentProvider for LexiconProvider {
    async fn enrich(&self, word: &str) -> Result<EnrichmentRecord, EnrichmentError> {
        let entry = self.dictionary_entry(word).await;
        let (related_words, antonyms) = self
            .relations
            .as_ref()
            .map(|table| table.relations(word))
            .unwrap_or_default();

        Ok(EnrichmentRecord::from_parts(
            &entry.definitions,
            &entry.examples,
            related_words,
            antonyms,
        ))
    }

    fn name(&self) -> &str {
        match (&self.dictionary, &self.relations) {
            (Some(_), Some(_)) => "dictionary+relations",
            (Some(_), None) => "dictionary",
            (None, Some(_)) => "relations",
            (None, None) => "sentinel",
        }
    }
}
