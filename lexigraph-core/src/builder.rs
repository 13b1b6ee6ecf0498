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

//! Graph Builder
//!
//! Turns a vocabulary plus one enrichment record per word into a
//! [`LexicalGraph`]:
//!
//! 1. One node per word with definition, examples and display relations
//! 2. `similar` edges for `related_words ∩ vocabulary`
//! 3. `antonym` edges for `antonyms ∩ vocabulary`
//! 4. `degree` on every node once all edges exist
//!
//! Each edge is keyed by its smaller endpoint, so a pair listed by both
//! records (or only by one of them) is materialized exactly once.

use crate::enrich::progress_bar;
use crate::error::{LexigraphError, Result};
use crate::graph::{LexicalGraph, WordNode};
use crate::model::{EnrichmentMap, Relation};
use crate::vocabulary::Vocabulary;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    show_progress: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn build(&self, vocabulary: &Vocabulary, records: &EnrichmentMap) -> Result<LexicalGraph> {
        check_coverage(vocabulary, records)?;

        let mut graph = LexicalGraph::new();
        for word in vocabulary.iter() {
            graph.add_node(WordNode::from_record(word, &records[word]));
        }

        let progress = progress_bar(vocabulary.len() as u64, self.show_progress);
        progress.set_message("Phase 2: Building graph");

        for word in vocabulary.iter() {
            let record = &records[word];

            for similar in vocabulary.intersect(&record.related_words) {
                if similar != word && graph.add_edge(word, similar, Relation::Similar)? {
                    debug!(word, similar, "Added similar edge");
                }
            }

            for antonym in vocabulary.intersect(&record.antonyms) {
                if antonym != word && graph.add_edge(word, antonym, Relation::Antonym)? {
                    debug!(word, antonym, "Added antonym edge");
                }
            }

            progress.inc(1);
        }
        progress.finish_and_clear();

        graph.compute_degrees();

        let ignored = records
            .keys()
            .filter(|w| !vocabulary.contains(w.as_str()))
            .count();
        if ignored > 0 {
            debug!(ignored, "Ignored enrichment records outside the vocabulary");
        }

        let stats = graph.stats();
        info!(
            nodes = stats.node_count,
            similar_edges = stats.similar_edges,
            antonym_edges = stats.antonym_edges,
            isolated = stats.isolated_nodes,
            "Built lexical graph"
        );
        Ok(graph)
    }
}

/// Every vocabulary word must have a record
fn check_coverage(vocabulary: &Vocabulary, records: &EnrichmentMap) -> Result<()> {
    let missing: Vec<String> = vocabulary
        .iter()
        .filter(|w| !records.contains_key(*w))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LexigraphError::CoverageMismatch { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnrichmentRecord;

    fn records(entries: Vec<(&str, EnrichmentRecord)>) -> EnrichmentMap {
        entries
            .into_iter()
            .map(|(w, r)| (w.to_string(), r))
            .collect()
    }

    #[test]
    fn test_mutual_listing_yields_one_edge() {
        let vocab = Vocabulary::from_words(["happy", "joyful"]);
        let map = records(vec![
            ("happy", EnrichmentRecord::sentinel().with_related(["joyful"])),
            ("joyful", EnrichmentRecord::sentinel().with_related(["happy"])),
        ]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("happy", "joyful", Relation::Similar));
    }

    #[test]
    fn test_one_sided_listing_still_links() {
        // Only the lexicographically larger word lists the smaller one
        let vocab = Vocabulary::from_words(["bolster", "support"]);
        let map = records(vec![
            ("bolster", EnrichmentRecord::sentinel()),
            ("support", EnrichmentRecord::sentinel().with_related(["bolster"])),
        ]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        let edge = graph.edges().next().expect("edge should exist");
        assert_eq!(edge.source, "bolster");
        assert_eq!(edge.target, "support");
        assert_eq!(edge.relation, Relation::Similar);
    }

    #[test]
    fn test_out_of_vocabulary_relations_are_display_only() {
        let vocab = Vocabulary::from_words(["laconic"]);
        let map = records(vec![(
            "laconic",
            EnrichmentRecord::sentinel()
                .with_related(["terse", "concise"])
                .with_antonyms(["verbose"]),
        )]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        assert_eq!(graph.edge_count(), 0);
        let node = graph.node("laconic").unwrap();
        assert_eq!(node.related_words, "concise; terse");
        assert_eq!(node.degree, 0);
        assert_eq!(node.cluster, None);
    }

    #[test]
    fn test_self_reference_ignored() {
        let vocab = Vocabulary::from_words(["mitigate"]);
        let map = records(vec![(
            "mitigate",
            EnrichmentRecord::sentinel()
                .with_related(["mitigate"])
                .with_antonyms(["mitigate"]),
        )]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_similar_and_antonym_on_same_pair() {
        let vocab = Vocabulary::from_words(["cleave", "split"]);
        let map = records(vec![
            (
                "cleave",
                EnrichmentRecord::sentinel()
                    .with_related(["split"])
                    .with_antonyms(["split"]),
            ),
            ("split", EnrichmentRecord::sentinel()),
        ]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node("cleave").unwrap().degree, 2);
        assert_eq!(graph.node("split").unwrap().degree, 2);
    }

    #[test]
    fn test_coverage_mismatch() {
        let vocab = Vocabulary::from_words(["advocate", "bolster"]);
        let map = records(vec![("advocate", EnrichmentRecord::sentinel())]);

        match GraphBuilder::new().build(&vocab, &map) {
            Err(LexigraphError::CoverageMismatch { missing }) => {
                assert_eq!(missing, vec!["bolster".to_string()])
            }
            other => panic!("expected CoverageMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_records_ignored() {
        let vocab = Vocabulary::from_words(["advocate"]);
        let map = records(vec![
            ("advocate", EnrichmentRecord::sentinel().with_related(["urge"])),
            ("urge", EnrichmentRecord::sentinel().with_related(["advocate"])),
        ]);

        let graph = GraphBuilder::new().build(&vocab, &map).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node("urge").is_none());
        assert_eq!(graph.edge_count(), 0);
    }
}
