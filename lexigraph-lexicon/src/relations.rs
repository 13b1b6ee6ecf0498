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

//! WordNet-style relation table
//!
//! Tab-separated rows of `lemma<TAB>relation<TAB>lemma`, e.g. an export of
//! WordNet synsets:
//!
//! ```text
//! # lemma     relation   lemma
//! happy       synonym    felicitous
//! happy       antonym    unhappy
//! feeling     hyponym    happiness
//! ice_cream   hypernym   frozen_dessert
//! ```
//!
//! `lemma` is accepted as an alias for `synonym` (the WordNet lemma-sharing
//! relation). Relations are symmetric. Synonyms, hypernyms and hyponyms all
//! count as related words; antonyms are kept apart.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RelationTableError {
    #[error("failed to read relation table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalRelation {
    Synonym,
    Hypernym,
    Hyponym,
    Antonym,
}

impl FromStr for LexicalRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synonym" | "lemma" => Ok(LexicalRelation::Synonym),
            "hypernym" => Ok(LexicalRelation::Hypernym),
            "hyponym" => Ok(LexicalRelation::Hyponym),
            "antonym" => Ok(LexicalRelation::Antonym),
            other => Err(format!("unknown relation '{}'", other)),
        }
    }
}

/// Related words and antonyms by lemma
#[derive(Debug, Clone, Default)]
pub struct RelationTable {
    related: HashMap<String, BTreeSet<String>>,
    antonyms: HashMap<String, BTreeSet<String>>,
}

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RelationTableError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RelationTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&content)?;
        info!(
            path = %path.display(),
            lemmas = table.lemma_count(),
            "Loaded relation table"
        );
        Ok(table)
    }

    pub fn parse(content: &str) -> Result<Self, RelationTableError> {
        let mut table = Self::new();

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
            let [left, relation, right] = fields.as_slice() else {
                return Err(RelationTableError::Malformed {
                    line: i + 1,
                    reason: format!("expected 3 tab-separated fields, found {}", fields.len()),
                });
            };

            let relation = relation
                .parse::<LexicalRelation>()
                .map_err(|reason| RelationTableError::Malformed {
                    line: i + 1,
                    reason,
                })?;
            let (left, right) = (normalize_lemma(left), normalize_lemma(right));
            if left.is_empty() || right.is_empty() {
                return Err(RelationTableError::Malformed {
                    line: i + 1,
                    reason: "empty lemma".to_string(),
                });
            }

            table.insert(&left, relation, &right);
        }

        Ok(table)
    }

    /// Record a relation in both directions
    pub fn insert(&mut self, a: &str, relation: LexicalRelation, b: &str) {
        let target = match relation {
            LexicalRelation::Antonym => &mut self.antonyms,
            _ => &mut self.related,
        };
        target.entry(a.to_string()).or_default().insert(b.to_string());
        target.entry(b.to_string()).or_default().insert(a.to_string());
    }

    /// `(related_words, antonyms)` for a word, without the word itself
    pub fn relations(&self, word: &str) -> (BTreeSet<String>, BTreeSet<String>) {
        let key = normalize_lemma(word);
        let lookup = |map: &HashMap<String, BTreeSet<String>>| {
            let mut words = map.get(&key).cloned().unwrap_or_default();
            words.remove(&key);
            words
        };
        (lookup(&self.related), lookup(&self.antonyms))
    }

    pub fn lemma_count(&self) -> usize {
        self.related
            .keys()
            .chain(self.antonyms.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Lowercase with multi-word separators turned into spaces
pub fn normalize_lemma(lemma: &str) -> String {
    lemma.trim().to_lowercase().replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TABLE: &str = "# sample\n\
        happy\tsynonym\tfelicitous\n\
        happy\tantonym\tunhappy\n\
        happy\tsynonym\tHappy\n\
        feeling\thyponym\thappiness\n\
        \n\
        Ice_Cream\thypernym\tfrozen_dessert\n";

    #[test]
    fn test_parse_and_lookup() {
        let table = RelationTable::parse(TABLE).unwrap();

        let (related, antonyms) = table.relations("happy");
        assert_eq!(related.into_iter().collect::<Vec<_>>(), vec!["felicitous"]);
        assert_eq!(antonyms.into_iter().collect::<Vec<_>>(), vec!["unhappy"]);

        let (related, _) = table.relations("happiness");
        assert!(related.contains("feeling"));
    }

    #[test]
    fn test_relations_are_symmetric() {
        let table = RelationTable::parse(TABLE).unwrap();
        let (_, antonyms) = table.relations("unhappy");
        assert!(antonyms.contains("happy"));
        let (related, _) = table.relations("felicitous");
        assert!(related.contains("happy"));
    }

    #[test]
    fn test_multi_word_lemmas_normalized() {
        let table = RelationTable::parse(TABLE).unwrap();
        let (related, _) = table.relations("ice cream");
        assert!(related.contains("frozen dessert"));
        assert_eq!(normalize_lemma(" Frozen_Dessert "), "frozen dessert");
    }

    #[test]
    fn test_unknown_word_has_no_relations() {
        let table = RelationTable::parse(TABLE).unwrap();
        let (related, antonyms) = table.relations("laconic");
        assert!(related.is_empty() && antonyms.is_empty());
    }

    #[test]
    fn test_lemma_is_synonym() {
        let table = RelationTable::parse("glad\tlemma\tcontent\n").unwrap();
        let (related, antonyms) = table.relations("content");
        assert!(related.contains("glad"));
        assert!(antonyms.is_empty());
    }

    #[test]
    fn test_malformed_rows() {
        match RelationTable::parse("happy\tsynonym\n") {
            Err(RelationTableError::Malformed { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected Malformed, got {:?}", other),
        }
        match RelationTable::parse("# ok\nhappy\tmeronym\tface\n") {
            Err(RelationTableError::Malformed { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("meronym"));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", TABLE).unwrap();
        let table = RelationTable::load(file.path()).unwrap();
        assert_eq!(table.lemma_count(), 7);

        let missing = RelationTable::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(RelationTableError::Io { .. })));
    }
}
