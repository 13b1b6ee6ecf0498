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

//! Lexigraph Core
//!
//! Builds a lexical relation graph over a fixed vocabulary:
//! - Enrichment records per word, cached as a whole-map JSON snapshot
//! - Canonical `similar` / `antonym` edges between vocabulary words
//! - Leiden community detection over the similarity edges
//! - GraphML export for visualization tools
//!
//! ## Architecture
//!
//! ```text
//! Vocabulary → Enrichment (cache or provider) → GraphBuilder → Partitioner → GraphML
//!                      ↓                                            ↓
//!              (api_cache.json)                             (Leiden clusters)
//! ```

pub mod builder;
pub mod cache;
pub mod enrich;
pub mod error;
pub mod export;
pub mod graph;
pub mod leiden;
pub mod model;
pub mod partition;
pub mod pipeline;
pub mod vocabulary;

pub use builder::GraphBuilder;
pub use cache::{EnrichmentCache, DEFAULT_CACHE_FILE};
pub use enrich::{
    enrich_vocabulary, load_or_enrich, EnrichmentError, EnrichmentOptions, EnrichmentProvider,
    EnrichmentSource,
};
pub use error::{LexigraphError, PartitionError, Result};
pub use export::{GraphMlExporter, DEFAULT_OUTPUT_FILE};
pub use graph::{GraphStats, LexicalGraph, WordEdge, WordNode};
pub use leiden::{CommunityDetector, LeidenClustering, LeidenConfig};
pub use model::{EnrichmentMap, EnrichmentRecord, Relation, NO_DEFINITION, NO_EXAMPLES};
pub use partition::{ClusterSummary, Partitioner};
pub use pipeline::{Pipeline, PipelineReport};
pub use vocabulary::{Vocabulary, SAMPLE_WORDS};
