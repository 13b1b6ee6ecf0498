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

//! Lexical Relation Graph
//!
//! Undirected, attributed graph over vocabulary words. Supports:
//! - Word nodes carrying definition, examples and display relations
//! - Canonical edges keyed by (smaller word, larger word, relation)
//! - Parallel `similar` and `antonym` edges on the same pair
//! - Degree and cluster attributes written back by later passes

use crate::error::{LexigraphError, Result};
use crate::model::{EnrichmentRecord, Relation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A vocabulary word and its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordNode {
    pub word: String,
    pub definition: String,
    pub examples: String,
    /// Flattened display form, not restricted to the vocabulary
    pub related_words: String,
    /// Incident edges of either relation kind
    pub degree: usize,
    /// Set by the partitioner; `None` when no similarity edge exists anywhere
    pub cluster: Option<u32>,
}

impl WordNode {
    pub fn from_record(word: impl Into<String>, record: &EnrichmentRecord) -> Self {
        Self {
            word: word.into(),
            definition: record.definition.clone(),
            examples: record.examples.clone(),
            related_words: record.related_words_display(),
            degree: 0,
            cluster: None,
        }
    }
}

/// Undirected edge; `source` always sorts before `target`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordEdge {
    pub source: String,
    pub target: String,
    pub relation: Relation,
}

impl WordEdge {
    pub fn color(&self) -> &'static str {
        self.relation.color()
    }
}

/// Per-graph summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub similar_edges: usize,
    pub antonym_edges: usize,
    pub isolated_nodes: usize,
    pub cluster_count: usize,
    pub avg_degree: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalGraph {
    nodes: BTreeMap<String, WordNode>,
    edges: BTreeSet<WordEdge>,
}

impl LexicalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node
    pub fn add_node(&mut self, node: WordNode) {
        self.nodes.insert(node.word.clone(), node);
    }

    /// Add an undirected edge between two existing, distinct nodes.
    ///
    /// The pair is canonicalized so the smaller word is the source; returns
    /// `false` when the same relation already links the pair.
    pub fn add_edge(&mut self, a: &str, b: &str, relation: Relation) -> Result<bool> {
        if a == b || !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return Err(LexigraphError::InvalidEdge {
                source_word: a.to_string(),
                target_word: b.to_string(),
            });
        }

        let (source, target) = if a < b { (a, b) } else { (b, a) };
        Ok(self.edges.insert(WordEdge {
            source: source.to_string(),
            target: target.to_string(),
            relation,
        }))
    }

    pub fn has_edge(&self, a: &str, b: &str, relation: Relation) -> bool {
        let (source, target) = if a < b { (a, b) } else { (b, a) };
        self.edges.contains(&WordEdge {
            source: source.to_string(),
            target: target.to_string(),
            relation,
        })
    }

    pub fn node(&self, word: &str) -> Option<&WordNode> {
        self.nodes.get(word)
    }

    /// Nodes in word order
    pub fn nodes(&self) -> impl Iterator<Item = &WordNode> {
        self.nodes.values()
    }

    /// Edges in canonical order
    pub fn edges(&self) -> impl Iterator<Item = &WordEdge> {
        self.edges.iter()
    }

    pub fn edges_of(&self, relation: Relation) -> impl Iterator<Item = &WordEdge> {
        self.edges.iter().filter(move |e| e.relation == relation)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Recompute the `degree` attribute of every node
    pub fn compute_degrees(&mut self) {
        let mut degrees: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.source.as_str()).or_default() += 1;
            *degrees.entry(edge.target.as_str()).or_default() += 1;
        }
        for (word, node) in self.nodes.iter_mut() {
            node.degree = degrees.get(word.as_str()).copied().unwrap_or(0);
        }
    }

    /// Set the cluster attribute of a node
    pub fn set_cluster(&mut self, word: &str, cluster: u32) {
        if let Some(node) = self.nodes.get_mut(word) {
            node.cluster = Some(cluster);
        }
    }

    /// Members of a cluster in word order
    pub fn cluster_members(&self, cluster: u32) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|n| n.cluster == Some(cluster))
            .map(|n| n.word.as_str())
            .collect()
    }

    /// Whether any node carries a cluster id
    pub fn is_clustered(&self) -> bool {
        self.nodes.values().any(|n| n.cluster.is_some())
    }

    pub fn stats(&self) -> GraphStats {
        let node_count = self.nodes.len();
        let similar_edges = self.edges_of(Relation::Similar).count();
        let antonym_edges = self.edges_of(Relation::Antonym).count();
        let isolated_nodes = self.nodes.values().filter(|n| n.degree == 0).count();
        let cluster_count = self
            .nodes
            .values()
            .filter_map(|n| n.cluster)
            .collect::<BTreeSet<_>>()
            .len();
        let avg_degree = if node_count > 0 {
            2.0 * self.edges.len() as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            node_count,
            similar_edges,
            antonym_edges,
            isolated_nodes,
            cluster_count,
            avg_degree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(words: &[&str]) -> LexicalGraph {
        let mut graph = LexicalGraph::new();
        for word in words {
            graph.add_node(WordNode::from_record(*word, &EnrichmentRecord::sentinel()));
        }
        graph
    }

    #[test]
    fn test_add_edge_canonicalizes() {
        let mut graph = graph_with(&["happy", "joyful"]);

        assert!(graph.add_edge("joyful", "happy", Relation::Similar).unwrap());
        assert!(!graph.add_edge("happy", "joyful", Relation::Similar).unwrap());

        let edges: Vec<&WordEdge> = graph.edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "happy");
        assert_eq!(edges[0].target, "joyful");
    }

    #[test]
    fn test_parallel_relations_coexist() {
        let mut graph = graph_with(&["cleave", "split"]);
        graph.add_edge("cleave", "split", Relation::Similar).unwrap();
        graph.add_edge("split", "cleave", Relation::Antonym).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("split", "cleave", Relation::Similar));
        assert!(graph.has_edge("cleave", "split", Relation::Antonym));
    }

    #[test]
    fn test_add_edge_rejects_unknown_and_self() {
        let mut graph = graph_with(&["happy"]);
        assert!(matches!(
            graph.add_edge("happy", "happy", Relation::Similar),
            Err(LexigraphError::InvalidEdge { .. })
        ));
        assert!(matches!(
            graph.add_edge("happy", "glad", Relation::Similar),
            Err(LexigraphError::InvalidEdge { .. })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_degree_on_four_node_graph() {
        // a - b (similar), a - c (similar), a - c (antonym), c - d (antonym)
        let mut graph = graph_with(&["a", "b", "c", "d"]);
        graph.add_edge("a", "b", Relation::Similar).unwrap();
        graph.add_edge("c", "a", Relation::Similar).unwrap();
        graph.add_edge("a", "c", Relation::Antonym).unwrap();
        graph.add_edge("d", "c", Relation::Antonym).unwrap();
        graph.compute_degrees();

        let degree = |w: &str| graph.node(w).unwrap().degree;
        assert_eq!(degree("a"), 3);
        assert_eq!(degree("b"), 1);
        assert_eq!(degree("c"), 3);
        assert_eq!(degree("d"), 1);

        let stats = graph.stats();
        assert_eq!(stats.similar_edges, 2);
        assert_eq!(stats.antonym_edges, 2);
        assert_eq!(stats.isolated_nodes, 0);
        assert!((stats.avg_degree - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cluster_members() {
        let mut graph = graph_with(&["happy", "joyful", "sad"]);
        graph.add_edge("happy", "joyful", Relation::Similar).unwrap();
        graph.add_edge("happy", "sad", Relation::Antonym).unwrap();

        assert!(!graph.is_clustered());

        graph.set_cluster("happy", 0);
        graph.set_cluster("joyful", 0);
        assert_eq!(graph.cluster_members(0), vec!["happy", "joyful"]);
        assert!(graph.is_clustered());
    }
}
