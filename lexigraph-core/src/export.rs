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

//! GraphML export (for Cytoscape, Gephi, etc.)
//!
//! Node attributes: `definition`, `examples`, `related_words`, `degree` and,
//! when clustering ran, `cluster`. Edge attributes: `relation`, `color`.
//!
//! The file is written next to its destination and renamed into place, so
//! the output is either the complete new graph or untouched.

use crate::error::{LexigraphError, Result};
use crate::graph::LexicalGraph;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "gre_final_study_network.graphml";

#[derive(Debug, Clone)]
pub struct GraphMlExporter {
    path: PathBuf,
}

impl GraphMlExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the graph, overwriting any previous export
    pub fn export(&self, graph: &LexicalGraph) -> Result<()> {
        let io_err = |source| LexigraphError::Export {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).map_err(io_err)?;
            }
        }

        let temp_path = self.path.with_extension("graphml.tmp");
        let file = File::create(&temp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        write_graphml(&mut writer, graph).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        drop(writer);
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        info!(
            path = %self.path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Wrote GraphML"
        );
        Ok(())
    }
}

/// Serialize a graph as GraphML
pub fn write_graphml<W: Write>(writer: &mut W, graph: &LexicalGraph) -> std::io::Result<()> {
    let clustered = graph.is_clustered();

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#
    )?;
    writeln!(
        writer,
        r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#
    )?;
    writeln!(
        writer,
        r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns"#
    )?;
    writeln!(
        writer,
        r#"         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#
    )?;

    // Node attributes
    for name in ["definition", "examples", "related_words"] {
        writeln!(
            writer,
            r#"  <key id="{0}" for="node" attr.name="{0}" attr.type="string"/>"#,
            name
        )?;
    }
    writeln!(
        writer,
        r#"  <key id="degree" for="node" attr.name="degree" attr.type="int"/>"#
    )?;
    if clustered {
        writeln!(
            writer,
            r#"  <key id="cluster" for="node" attr.name="cluster" attr.type="int"/>"#
        )?;
    }

    // Edge attributes
    writeln!(
        writer,
        r#"  <key id="relation" for="edge" attr.name="relation" attr.type="string"/>"#
    )?;
    writeln!(
        writer,
        r#"  <key id="color" for="edge" attr.name="color" attr.type="string"/>"#
    )?;

    writeln!(writer, r#"  <graph id="lexigraph" edgedefault="undirected">"#)?;

    for node in graph.nodes() {
        writeln!(writer, r#"    <node id="{}">"#, escape_xml(&node.word))?;
        write_data(writer, "definition", &node.definition)?;
        write_data(writer, "examples", &node.examples)?;
        write_data(writer, "related_words", &node.related_words)?;
        write_data(writer, "degree", &node.degree.to_string())?;
        if let Some(cluster) = node.cluster {
            write_data(writer, "cluster", &cluster.to_string())?;
        }
        writeln!(writer, "    </node>")?;
    }

    for (i, edge) in graph.edges().enumerate() {
        writeln!(
            writer,
            r#"    <edge id="e{}" source="{}" target="{}">"#,
            i,
            escape_xml(&edge.source),
            escape_xml(&edge.target)
        )?;
        write_data(writer, "relation", edge.relation.as_str())?;
        write_data(writer, "color", edge.color())?;
        writeln!(writer, "    </edge>")?;
    }

    writeln!(writer, "  </graph>")?;
    writeln!(writer, "</graphml>")?;
    Ok(())
}

fn write_data<W: Write>(writer: &mut W, key: &str, value: &str) -> std::io::Result<()> {
    writeln!(
        writer,
        r#"      <data key="{}">{}</data>"#,
        key,
        escape_xml(value)
    )
}

fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
