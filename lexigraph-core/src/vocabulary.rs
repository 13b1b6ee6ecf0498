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

//! Vocabulary: the ordered universe of graph nodes.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

/// Used when the vocabulary file cannot be read
pub const SAMPLE_WORDS: [&str; 6] = [
    "advocate",
    "laconic",
    "mitigate",
    "enervate",
    "bolster",
    "pedestrian",
];

/// Sorted, deduplicated, lowercase word set. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: BTreeSet<String>,
}

impl Vocabulary {
    /// Normalize and collect words: trimmed, lowercased, blanks dropped
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a newline-delimited word list
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// Built-in sample list
    pub fn sample() -> Self {
        Self::from_words(SAMPLE_WORDS)
    }

    /// Load a word list from disk, falling back to [`SAMPLE_WORDS`] when the
    /// file is missing or unreadable.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let vocabulary = Self::parse(&content);
                info!(path = %path.display(), words = vocabulary.len(), "Loaded vocabulary");
                vocabulary
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Vocabulary file unavailable, using built-in sample list"
                );
                Self::sample()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Words in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Members of `candidates` that are vocabulary words
    pub fn intersect<'a>(&self, candidates: &'a BTreeSet<String>) -> Vec<&'a str> {
        candidates
            .iter()
            .filter(|c| self.words.contains(c.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_normalizes_and_dedups() {
        let vocab = Vocabulary::parse("  Bolster\nadvocate\n\nBOLSTER \nlaconic\n");
        let words: Vec<&str> = vocab.iter().collect();
        assert_eq!(words, vec!["advocate", "bolster", "laconic"]);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = Vocabulary::load(dir.path().join("words.txt"));
        assert_eq!(vocab, Vocabulary::sample());
        assert_eq!(vocab.len(), SAMPLE_WORDS.len());
        assert!(vocab.contains("pedestrian"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sad\nhappy\njoyful").unwrap();
        let vocab = Vocabulary::load(file.path());
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["happy", "joyful", "sad"]);
    }

    #[test]
    fn test_intersect() {
        let vocab = Vocabulary::from_words(["happy", "sad"]);
        let candidates: BTreeSet<String> =
            ["glad", "happy", "sad"].iter().map(|s| s.to_string()).collect();
        assert_eq!(vocab.intersect(&candidates), vec!["happy", "sad"]);
    }
}
