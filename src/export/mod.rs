//! Static export of the live diagram
//!
//! The exporter works from the graph snapshot only: node boxes are rebuilt
//! from positions and measured sizes, and everything is redrawn into a
//! standalone SVG document, independent of how the canvas drew it.

pub mod anchor;
pub mod config;
pub mod svg;

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::canvas::{CanvasNode, DiagramGraph};
use crate::layout::BoundingBox;
use crate::stylesheet::Stylesheet;

pub use config::ExportConfig;
pub use svg::SvgBuilder;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: the diagram has no nodes")]
    NothingToExport,

    #[error("node '{node_id}' has non-finite geometry")]
    InvalidGeometry { node_id: String },

    #[error("failed to write exported document: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully rendered export, ready to download or write
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub file_name: String,
    pub contents: String,
    /// Padded content bounds, equal to the SVG viewBox
    pub bounds: BoundingBox,
}

impl ExportedDocument {
    /// Base64 data URI suitable for a download link
    pub fn to_data_uri(&self) -> String {
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(&self.contents))
    }

    /// Write the document with a single write call
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, &self.contents)?;
        Ok(())
    }
}

/// Box of every exportable node, in graph order
fn exportable_nodes<'a>(
    graph: &'a DiagramGraph,
    config: &ExportConfig,
) -> Result<Vec<(&'a CanvasNode, BoundingBox)>, ExportError> {
    let fallback = config.fallback_size();
    graph
        .nodes
        .iter()
        .filter(|n| !config.is_excluded(&n.id))
        .map(|node| {
            let size = node.footprint(fallback);
            let finite = node.position.is_finite()
                && size.width.is_finite()
                && size.height.is_finite();
            if !finite {
                return Err(ExportError::InvalidGeometry {
                    node_id: node.id.clone(),
                });
            }
            Ok((node, BoundingBox::from_origin(node.position, size)))
        })
        .collect()
}

/// Render the graph as a standalone SVG document
///
/// Separator nodes are skipped. The document bounds are the union of every
/// remaining node box, padded by `config.padding` on all sides.
pub fn export_svg(
    graph: &DiagramGraph,
    config: &ExportConfig,
    stylesheet: &Stylesheet,
) -> Result<ExportedDocument, ExportError> {
    let nodes = exportable_nodes(graph, config)?;
    let bounds = nodes
        .iter()
        .map(|(_, b)| *b)
        .reduce(|acc, b| acc.union(&b))
        .ok_or(ExportError::NothingToExport)?
        .padded(config.padding);

    let contents = svg::render(graph, &nodes, bounds, config, stylesheet);
    log::debug!(nodes = nodes.len(), edges = graph.edges.len(); "exported diagram");

    Ok(ExportedDocument {
        file_name: config.file_name.clone(),
        contents,
        bounds,
    })
}

/// Export, logging and swallowing any failure
pub fn export_or_log(
    graph: &DiagramGraph,
    config: &ExportConfig,
    stylesheet: &Stylesheet,
) -> Option<ExportedDocument> {
    match export_svg(graph, config, stylesheet) {
        Ok(document) => Some(document),
        Err(e) => {
            log::error!(error:% = e; "diagram export failed");
            None
        }
    }
}
