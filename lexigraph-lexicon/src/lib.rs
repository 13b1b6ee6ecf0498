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

//! Enrichment providers for Lexigraph
//!
//! - [`DictionaryClient`]: definitions and usage examples over HTTP
//! - [`RelationTable`]: synonyms, hypernyms, hyponyms and antonyms from a
//!   WordNet-style TSV export
//! - [`LexiconProvider`]: both combined behind `EnrichmentProvider`

pub mod dictionary;
pub mod provider;
pub mod relations;

pub use dictionary::{DictionaryClient, DictionaryEntry, DEFAULT_BASE_URL};
pub use provider::LexiconProvider;
pub use relations::{normalize_lemma, LexicalRelation, RelationTable, RelationTableError};
