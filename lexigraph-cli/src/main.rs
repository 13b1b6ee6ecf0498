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

//! Lexigraph CLI
//!
//! Builds the study network for a vocabulary list and writes it as GraphML.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::LexigraphConfig;
use lexigraph_core::{
    EnrichmentCache, EnrichmentOptions, EnrichmentProvider, GraphMlExporter, GraphStats,
    LeidenClustering, LexicalGraph, Partitioner, Pipeline, Vocabulary, NO_DEFINITION,
};
use lexigraph_lexicon::{DictionaryClient, LexiconProvider, RelationTable};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lexigraph")]
#[command(about = "Lexigraph - vocabulary relation network builder", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "LEXIGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich, build, cluster and export the network
    Run {
        /// Word list (one word per line)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Enrichment cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// GraphML output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Relation table (lemma<TAB>relation<TAB>lemma)
        #[arg(long)]
        thesaurus: Option<PathBuf>,

        /// Delete the cache before running
        #[arg(long)]
        refresh: bool,

        /// Hide progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Build and cluster from the cache without exporting
    Inspect {
        /// Word list (one word per line)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Enrichment cache file
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(long)]
        json: bool,
    },

    /// Show whether a cache snapshot exists
    CacheInfo {
        /// Enrichment cache file
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct InspectReport {
    stats: GraphStats,
    modularity: Option<f64>,
    clusters: Vec<Vec<String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => LexigraphConfig::from_file(path)?,
        None => LexigraphConfig::default(),
    };
    config.apply_env();

    match cli.command {
        Commands::Run {
            vocabulary,
            cache,
            output,
            thesaurus,
            refresh,
            no_progress,
        } => {
            if let Some(path) = vocabulary {
                config.vocabulary.path = path;
            }
            if let Some(path) = cache {
                config.cache.path = path;
            }
            if let Some(path) = output {
                config.export.output_path = path;
            }
            if thesaurus.is_some() {
                config.enrichment.relations_path = thesaurus;
            }
            run(&config, refresh, !no_progress).await?;
        }

        Commands::Inspect {
            vocabulary,
            cache,
            json,
        } => {
            if let Some(path) = vocabulary {
                config.vocabulary.path = path;
            }
            if let Some(path) = cache {
                config.cache.path = path;
            }
            inspect(&config, json)?;
        }

        Commands::CacheInfo { cache } => {
            if let Some(path) = cache {
                config.cache.path = path;
            }
            cache_info(&config)?;
        }
    }

    Ok(())
}

async fn run(config: &LexigraphConfig, refresh: bool, show_progress: bool) -> Result<()> {
    let cache = EnrichmentCache::new(&config.cache.path);
    if refresh && cache.clear()? {
        info!(path = %cache.path().display(), "Removed enrichment cache");
    }

    let vocabulary = Vocabulary::load(&config.vocabulary.path);
    let provider = build_provider(config)?;
    info!(provider = provider.name(), "Enrichment provider ready");

    let pipeline = Pipeline::new(cache)
        .with_options(EnrichmentOptions {
            request_delay: config.enrichment.request_delay(),
            show_progress,
        })
        .with_partitioner(partitioner(config))
        .with_exporter(GraphMlExporter::new(&config.export.output_path));

    let (graph, report) = pipeline
        .run(&vocabulary, &provider)
        .await
        .context("Pipeline failed")?;

    println!(
        "✓ Exported {} nodes and {} edges to {}",
        report.stats.node_count,
        graph.edge_count(),
        config.export.output_path.display()
    );
    println!(
        "  Similar: {}, Antonym: {}, Isolated: {}, Avg degree: {:.2}",
        report.stats.similar_edges,
        report.stats.antonym_edges,
        report.stats.isolated_nodes,
        report.stats.avg_degree
    );
    match report.modularity {
        Some(q) => println!(
            "  Clusters: {} (modularity {:.4})",
            report.stats.cluster_count, q
        ),
        None => println!("  Clusters: none (no related-word overlap)"),
    }
    if report.cache_hit {
        println!("  Enrichment loaded from {}", config.cache.path.display());
    }

    Ok(())
}

fn inspect(config: &LexigraphConfig, json: bool) -> Result<()> {
    let cache = EnrichmentCache::new(&config.cache.path);
    let Some(records) = cache.load()? else {
        bail!(
            "No enrichment cache at {}; run `lexigraph run` first",
            cache.path().display()
        );
    };

    let vocabulary = Vocabulary::load(&config.vocabulary.path);
    let pipeline = Pipeline::new(cache).with_partitioner(partitioner(config));
    let (graph, summary) = pipeline.analyze(&vocabulary, &records)?;

    let report = InspectReport {
        stats: graph.stats(),
        modularity: summary.modularity(),
        clusters: clusters(&graph, summary.cluster_count()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Nodes: {}, Similar: {}, Antonym: {}, Isolated: {}",
        report.stats.node_count,
        report.stats.similar_edges,
        report.stats.antonym_edges,
        report.stats.isolated_nodes
    );
    if report.clusters.is_empty() {
        println!("No clusters (no related-word overlap)");
    }
    for (id, members) in report.clusters.iter().enumerate() {
        println!("  [{}] {}", id, members.join(", "));
    }

    Ok(())
}

fn cache_info(config: &LexigraphConfig) -> Result<()> {
    let cache = EnrichmentCache::new(&config.cache.path);
    match cache.load()? {
        Some(records) => {
            let defined = records
                .values()
                .filter(|r| r.definition != NO_DEFINITION)
                .count();
            println!("✓ Cache at {}", cache.path().display());
            println!("  Words: {}, with definitions: {}", records.len(), defined);
        }
        None => println!("No cache at {}", cache.path().display()),
    }
    Ok(())
}

fn build_provider(config: &LexigraphConfig) -> Result<LexiconProvider> {
    let mut provider = LexiconProvider::new();

    if config.enrichment.dictionary_enabled {
        let dictionary = DictionaryClient::new(config.enrichment.request_timeout())
            .context("Failed to create dictionary client")?
            .with_base_url(config.enrichment.dictionary_url.as_str());
        provider = provider.with_dictionary(dictionary);
    }

    match &config.enrichment.relations_path {
        Some(path) => {
            let table = RelationTable::load(path)
                .with_context(|| format!("Failed to load relation table {}", path.display()))?;
            provider = provider.with_relations(table);
        }
        None => warn!("No relation table configured; words will have no related words"),
    }

    Ok(provider)
}

fn partitioner(config: &LexigraphConfig) -> Partitioner {
    Partitioner::leiden(LeidenClustering::with_config(config.clustering.leiden()))
}

fn clusters(graph: &LexicalGraph, count: usize) -> Vec<Vec<String>> {
    (0..count as u32)
        .map(|id| {
            graph
                .cluster_members(id)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}
