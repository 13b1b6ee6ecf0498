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

//! Assigns semantic clusters to graph nodes using only `similar` edges.
//!
//! Antonym edges are display-only and never reach the detector. When the
//! graph holds no similarity edge at all, no node gets a cluster.

use crate::error::{PartitionError, Result};
use crate::graph::LexicalGraph;
use crate::leiden::{modularity, CommunityDetector, LeidenClustering};
use crate::model::Relation;
use std::collections::HashMap;
use tracing::{debug, info};

/// Outcome of a partitioning pass
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterSummary {
    /// No similarity edges, clustering skipped
    Skipped,
    Clustered { clusters: usize, modularity: f64 },
}

impl ClusterSummary {
    pub fn cluster_count(&self) -> usize {
        match self {
            ClusterSummary::Skipped => 0,
            ClusterSummary::Clustered { clusters, .. } => *clusters,
        }
    }

    pub fn modularity(&self) -> Option<f64> {
        match self {
            ClusterSummary::Skipped => None,
            ClusterSummary::Clustered { modularity, .. } => Some(*modularity),
        }
    }
}

pub struct Partitioner {
    detector: Box<dyn CommunityDetector>,
    resolution: f64,
}

impl Partitioner {
    pub fn new(detector: Box<dyn CommunityDetector>) -> Self {
        Self {
            detector,
            resolution: 1.0,
        }
    }

    pub fn leiden(detector: LeidenClustering) -> Self {
        let resolution = detector.config().resolution;
        Self {
            detector: Box::new(detector),
            resolution,
        }
    }

    /// Write a dense `cluster` id onto every node, including isolated ones
    pub fn assign_clusters(&self, graph: &mut LexicalGraph) -> Result<ClusterSummary> {
        let words: Vec<String> = graph.nodes().map(|n| n.word.clone()).collect();
        let index: HashMap<&str, usize> = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.as_str(), i))
            .collect();

        let edges: Vec<(usize, usize)> = graph
            .edges_of(Relation::Similar)
            .map(|e| (index[e.source.as_str()], index[e.target.as_str()]))
            .collect();

        if edges.is_empty() {
            info!("No similarity edges, skipping clustering");
            return Ok(ClusterSummary::Skipped);
        }

        debug!(
            detector = self.detector.name(),
            vertices = words.len(),
            edges = edges.len(),
            "Running community detection"
        );
        let groups = self.detector.partition(words.len(), &edges)?;
        let groups = dense_order(validate_cover(groups, words.len())?);

        for (cluster, group) in groups.iter().enumerate() {
            for &vertex in group {
                graph.set_cluster(&words[vertex], cluster as u32);
            }
        }

        let modularity = modularity(words.len(), &edges, &groups, self.resolution)?;
        info!(
            detector = self.detector.name(),
            clusters = groups.len(),
            modularity,
            "Assigned clusters"
        );

        Ok(ClusterSummary::Clustered {
            clusters: groups.len(),
            modularity,
        })
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::leiden(LeidenClustering::new())
    }
}

/// Every vertex in exactly one non-empty group
fn validate_cover(
    groups: Vec<Vec<usize>>,
    vertex_count: usize,
) -> std::result::Result<Vec<Vec<usize>>, PartitionError> {
    let invalid = |detail: String| PartitionError::InvalidCover {
        vertex_count,
        detail,
    };

    let mut seen = vec![false; vertex_count];
    for group in &groups {
        if group.is_empty() {
            return Err(invalid("empty group".to_string()));
        }
        for &vertex in group {
            match seen.get_mut(vertex) {
                None => return Err(invalid(format!("vertex {} out of range", vertex))),
                Some(slot) if *slot => {
                    return Err(invalid(format!("vertex {} in two groups", vertex)))
                }
                Some(slot) => *slot = true,
            }
        }
    }
    if let Some(vertex) = seen.iter().position(|s| !s) {
        return Err(invalid(format!("vertex {} not assigned", vertex)));
    }
    Ok(groups)
}

/// Largest group first, ties broken by smallest member
fn dense_order(mut groups: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    for group in groups.iter_mut() {
        group.sort_unstable();
    }
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
    groups
}
