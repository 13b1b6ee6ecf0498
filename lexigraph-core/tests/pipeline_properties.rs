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

//! End-to-end properties of the lexical graph pipeline

use async_trait::async_trait;
use lexigraph_core::{
    EnrichmentCache, EnrichmentError, EnrichmentMap, EnrichmentOptions, EnrichmentProvider,
    EnrichmentRecord, GraphBuilder, GraphMlExporter, LexicalGraph, LexigraphError, Partitioner,
    Pipeline, Relation, Vocabulary, WordEdge,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct MapProvider {
    records: HashMap<String, EnrichmentRecord>,
    calls: AtomicUsize,
}

impl MapProvider {
    fn new(records: &EnrichmentMap) -> Self {
        Self {
            records: records.clone().into_iter().collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EnrichmentProvider for MapProvider {
    async fn enrich(&self, word: &str) -> Result<EnrichmentRecord, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .get(word)
            .cloned()
            .ok_or_else(|| EnrichmentError::Request(format!("unknown word {}", word)))
    }

    fn name(&self) -> &str {
        "map"
    }
}

fn options() -> EnrichmentOptions {
    EnrichmentOptions {
        request_delay: Duration::ZERO,
        show_progress: false,
    }
}

fn emotion_records() -> EnrichmentMap {
    let mut records = EnrichmentMap::new();
    records.insert(
        "happy".to_string(),
        EnrichmentRecord::sentinel()
            .with_related(["joyful"])
            .with_antonyms(["sad"]),
    );
    records.insert(
        "joyful".to_string(),
        EnrichmentRecord::sentinel().with_related(["happy"]),
    );
    records.insert(
        "sad".to_string(),
        EnrichmentRecord::sentinel().with_antonyms(["happy"]),
    );
    records
}

fn edge_set(graph: &LexicalGraph) -> Vec<WordEdge> {
    graph.edges().cloned().collect()
}

/// Clusters as sets of words, independent of the numbering
fn groupings(graph: &LexicalGraph) -> BTreeSet<BTreeSet<String>> {
    let mut groups: HashMap<u32, BTreeSet<String>> = HashMap::new();
    for node in graph.nodes() {
        if let Some(cluster) = node.cluster {
            groups.entry(cluster).or_default().insert(node.word.clone());
        }
    }
    groups.into_values().collect()
}

#[test]
fn end_to_end_emotion_scenario() {
    let vocab = Vocabulary::from_words(["happy", "joyful", "sad"]);
    let mut graph = GraphBuilder::new()
        .build(&vocab, &emotion_records())
        .unwrap();
    Partitioner::default().assign_clusters(&mut graph).unwrap();

    let edges: Vec<(String, String, Relation)> = graph
        .edges()
        .map(|e| (e.source.clone(), e.target.clone(), e.relation))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("happy".to_string(), "joyful".to_string(), Relation::Similar),
            ("happy".to_string(), "sad".to_string(), Relation::Antonym),
        ]
    );

    for node in graph.nodes() {
        assert!(node.degree >= 1, "{} should have an edge", node.word);
    }
    assert_eq!(graph.node("happy").unwrap().degree, 2);

    let pleasant: BTreeSet<String> = ["happy", "joyful"].iter().map(|s| s.to_string()).collect();
    let gloomy: BTreeSet<String> = ["sad"].iter().map(|s| s.to_string()).collect();
    assert_eq!(groupings(&graph), BTreeSet::from([pleasant, gloomy]));
}

#[test]
fn similar_edge_is_materialized_once_in_either_direction() {
    let vocab = Vocabulary::from_words(["bolster", "support"]);
    let listings = [
        (vec!["support"], vec!["bolster"]),
        (vec!["support"], vec![]),
        (vec![], vec!["bolster"]),
    ];

    for (from_bolster, from_support) in listings {
        let mut records = EnrichmentMap::new();
        records.insert(
            "bolster".to_string(),
            EnrichmentRecord::sentinel().with_related(from_bolster),
        );
        records.insert(
            "support".to_string(),
            EnrichmentRecord::sentinel().with_related(from_support),
        );

        let graph = GraphBuilder::new().build(&vocab, &records).unwrap();
        let edges = edge_set(&graph);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "bolster");
        assert_eq!(edges[0].target, "support");
        assert_eq!(edges[0].relation, Relation::Similar);
    }
}

#[test]
fn degree_matches_hand_built_graph() {
    // a-b similar, b-c similar, c-d antonym, a-d antonym, a-c similar
    let vocab = Vocabulary::from_words(["a", "b", "c", "d"]);
    let mut records = EnrichmentMap::new();
    records.insert(
        "a".to_string(),
        EnrichmentRecord::sentinel()
            .with_related(["b", "c"])
            .with_antonyms(["d"]),
    );
    records.insert("b".to_string(), EnrichmentRecord::sentinel().with_related(["c"]));
    records.insert("c".to_string(), EnrichmentRecord::sentinel().with_antonyms(["d"]));
    records.insert("d".to_string(), EnrichmentRecord::sentinel());

    let graph = GraphBuilder::new().build(&vocab, &records).unwrap();
    let degree = |w: &str| graph.node(w).unwrap().degree;
    assert_eq!(degree("a"), 3);
    assert_eq!(degree("b"), 2);
    assert_eq!(degree("c"), 3);
    assert_eq!(degree("d"), 2);
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn no_vocabulary_overlap_means_no_clusters() {
    let vocab = Vocabulary::from_words(["laconic", "mitigate"]);
    let mut records = EnrichmentMap::new();
    records.insert(
        "laconic".to_string(),
        EnrichmentRecord::sentinel().with_related(["terse"]),
    );
    records.insert(
        "mitigate".to_string(),
        EnrichmentRecord::sentinel().with_related(["alleviate"]),
    );

    let mut graph = GraphBuilder::new().build(&vocab, &records).unwrap();
    Partitioner::default().assign_clusters(&mut graph).unwrap();
    assert!(graph.nodes().all(|n| n.cluster.is_none()));
}

#[tokio::test]
async fn coverage_mismatch_fails_before_export() {
    let dir = tempfile::tempdir().unwrap();
    let cache = EnrichmentCache::new(dir.path().join("api_cache.json"));
    let mut partial = EnrichmentMap::new();
    partial.insert("advocate".to_string(), EnrichmentRecord::sentinel());
    cache.save(&partial).unwrap();

    let output = dir.path().join("graph.graphml");
    let pipeline = Pipeline::new(cache)
        .with_options(options())
        .with_exporter(GraphMlExporter::new(&output));
    let provider = MapProvider::new(&EnrichmentMap::new());
    let vocab = Vocabulary::from_words(["advocate", "bolster"]);

    let result = pipeline.run(&vocab, &provider).await;
    match result {
        Err(LexigraphError::CoverageMismatch { missing }) => {
            assert_eq!(missing, vec!["bolster".to_string()])
        }
        other => panic!("expected CoverageMismatch, got {:?}", other.map(|(_, r)| r)),
    }
    assert!(!output.exists());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn rerun_with_populated_cache_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("graph.graphml");
    let pipeline = Pipeline::new(EnrichmentCache::new(dir.path().join("api_cache.json")))
        .with_options(options())
        .with_exporter(GraphMlExporter::new(&output));
    let provider = MapProvider::new(&emotion_records());
    let vocab = Vocabulary::from_words(["happy", "joyful", "sad"]);

    let (first, first_report) = pipeline.run(&vocab, &provider).await.unwrap();
    let first_export = std::fs::read_to_string(&output).unwrap();
    let (second, second_report) = pipeline.run(&vocab, &provider).await.unwrap();
    let second_export = std::fs::read_to_string(&output).unwrap();

    assert!(!first_report.cache_hit);
    assert!(second_report.cache_hit);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);

    assert_eq!(edge_set(&first), edge_set(&second));
    let attrs = |g: &LexicalGraph| {
        g.nodes()
            .map(|n| (n.word.clone(), n.definition.clone(), n.related_words.clone(), n.degree))
            .collect::<Vec<_>>()
    };
    assert_eq!(attrs(&first), attrs(&second));
    assert_eq!(groupings(&first), groupings(&second));
    assert_eq!(first_export, second_export);
}
