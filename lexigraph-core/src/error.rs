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

//! Error types for the lexical graph pipeline
//!
//! Recoverable conditions (missing vocabulary file, failed lookups) never
//! surface here; they are logged and replaced with fallbacks at the call site.
//! Every variant of [`LexigraphError`] halts a pipeline run before export.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the core crate
pub type Result<T> = std::result::Result<T, LexigraphError>;

#[derive(Debug, Error)]
pub enum LexigraphError {
    /// A cache snapshot exists but cannot be parsed
    #[error("enrichment cache at {path} is corrupt: {source}")]
    CacheCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("enrichment cache I/O failed at {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Vocabulary words with no enrichment record
    #[error("no enrichment record for {} vocabulary word(s): {}", missing.len(), missing.join(", "))]
    CoverageMismatch { missing: Vec<String> },

    #[error("edge endpoints must be two distinct graph nodes: {source_word} -> {target_word}")]
    InvalidEdge {
        source_word: String,
        target_word: String,
    },

    #[error("community detection failed: {0}")]
    Partition(#[from] PartitionError),

    #[error("graph export to {path} failed: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a community detector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    #[error("edge ({0}, {1}) references a vertex outside 0..{2}")]
    VertexOutOfRange(usize, usize, usize),

    #[error("self-loop on vertex {0}")]
    SelfLoop(usize),

    /// Detector output does not cover every vertex exactly once
    #[error("partition is not a cover of {vertex_count} vertices: {detail}")]
    InvalidCover { vertex_count: usize, detail: String },
}
