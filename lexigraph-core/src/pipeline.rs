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

//! End-to-end pipeline
//!
//! ```text
//! Vocabulary → EnrichmentCache hit? ──yes──→ records
//!                    │ no
//!                    ↓
//!            EnrichmentProvider → EnrichmentCache::save → records
//!                                                            ↓
//!                         GraphBuilder → Partitioner → GraphMlExporter
//! ```
//!
//! All state lives in the values threaded through one [`Pipeline::run`] call.
//! Any error returns before the exporter touches the output file.

use crate::builder::GraphBuilder;
use crate::cache::EnrichmentCache;
use crate::enrich::{load_or_enrich, EnrichmentOptions, EnrichmentProvider, EnrichmentSource};
use crate::error::Result;
use crate::export::GraphMlExporter;
use crate::graph::{GraphStats, LexicalGraph};
use crate::model::EnrichmentMap;
use crate::partition::{ClusterSummary, Partitioner};
use crate::vocabulary::Vocabulary;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub words: usize,
    pub cache_hit: bool,
    pub stats: GraphStats,
    pub modularity: Option<f64>,
    pub output: Option<PathBuf>,
}

pub struct Pipeline {
    cache: EnrichmentCache,
    options: EnrichmentOptions,
    builder: GraphBuilder,
    partitioner: Partitioner,
    exporter: Option<GraphMlExporter>,
}

impl Pipeline {
    pub fn new(cache: EnrichmentCache) -> Self {
        Self {
            cache,
            options: EnrichmentOptions::default(),
            builder: GraphBuilder::new(),
            partitioner: Partitioner::default(),
            exporter: None,
        }
    }

    pub fn with_options(mut self, options: EnrichmentOptions) -> Self {
        self.builder = GraphBuilder::new().with_progress(options.show_progress);
        self.options = options;
        self
    }

    pub fn with_partitioner(mut self, partitioner: Partitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    pub fn with_exporter(mut self, exporter: GraphMlExporter) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn cache(&self) -> &EnrichmentCache {
        &self.cache
    }

    /// Build and cluster a graph from already available records
    pub fn analyze(
        &self,
        vocabulary: &Vocabulary,
        records: &EnrichmentMap,
    ) -> Result<(LexicalGraph, ClusterSummary)> {
        let mut graph = self.builder.build(vocabulary, records)?;
        let summary = self.partitioner.assign_clusters(&mut graph)?;
        Ok((graph, summary))
    }

    /// Enrich (or load from cache), build, cluster and export
    pub async fn run(
        &self,
        vocabulary: &Vocabulary,
        provider: &dyn EnrichmentProvider,
    ) -> Result<(LexicalGraph, PipelineReport)> {
        let (records, source) =
            load_or_enrich(&self.cache, vocabulary, provider, &self.options).await?;

        let (graph, summary) = self.analyze(vocabulary, &records)?;

        if let Some(exporter) = &self.exporter {
            exporter.export(&graph)?;
        }

        let report = PipelineReport {
            words: vocabulary.len(),
            cache_hit: source == EnrichmentSource::Cache,
            stats: graph.stats(),
            modularity: summary.modularity(),
            output: self.exporter.as_ref().map(|e| e.path().to_path_buf()),
        };

        info!(
            words = report.words,
            cache_hit = report.cache_hit,
            clusters = report.stats.cluster_count,
            "Pipeline complete"
        );
        Ok((graph, report))
    }
}
