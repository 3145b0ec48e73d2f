//! Node/edge graph handed to the interactive renderer

use std::collections::HashSet;

use crate::layout::{NodeKind, Point, PositionedNode, Size};
use crate::model::{ComponentSubtype, LayerCode, Relationship, Status};
use crate::stylesheet::Stylesheet;

/// A node on the canvas with its resolved colors
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub layer_code: LayerCode,
    pub status: Option<Status>,
    pub subtype: Option<ComponentSubtype>,
    /// Top-left corner
    pub position: Point,
    /// Size dictated by the layout, if any
    pub size: Option<Size>,
    /// Size reported by the renderer after the node was drawn
    pub measured: Option<Size>,
    pub fill: String,
    pub stroke: String,
}

impl CanvasNode {
    fn from_positioned(node: PositionedNode, stylesheet: &Stylesheet) -> Self {
        let (fill, stroke) = match node.kind {
            NodeKind::Component => (
                stylesheet.layer_fill(&node.layer_code),
                stylesheet.status_stroke(node.status.unwrap_or_default()),
            ),
            NodeKind::LayerHeader => (
                stylesheet.color("header-fill"),
                stylesheet.color("header-stroke"),
            ),
            NodeKind::Separator => (
                stylesheet.color("separator"),
                stylesheet.color("separator"),
            ),
        };

        Self {
            id: node.id,
            label: node.label,
            kind: node.kind,
            layer_code: node.layer_code,
            status: node.status,
            subtype: node.subtype,
            position: node.position,
            size: node.size,
            measured: None,
            fill,
            stroke,
        }
    }

    pub fn is_component(&self) -> bool {
        self.kind == NodeKind::Component
    }

    /// Size to draw the node at: measured, then layout, then `fallback`
    pub fn footprint(&self, fallback: Size) -> Size {
        self.measured.or(self.size).unwrap_or(fallback)
    }
}

/// A directed edge between two nodes on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    /// Both endpoints sit in the same layer
    pub dashed: bool,
}

/// The live diagram: positioned nodes plus the edges between them
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

impl DiagramGraph {
    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut CanvasNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Record the size the renderer measured for a node
    pub fn set_measured_size(&mut self, id: &str, size: Size) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.measured = Some(size);
                true
            }
            None => false,
        }
    }

    /// Move a node; returns false if no such node exists
    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Color of a node in the overview minimap
    pub fn minimap_color(&self, node: &CanvasNode, stylesheet: &Stylesheet) -> String {
        if node.is_component() {
            stylesheet.layer_fill(&node.layer_code)
        } else {
            stylesheet.color("neutral")
        }
    }

    pub fn component_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_component()).count()
    }
}

/// Build the canvas graph from positioned nodes and relationships
///
/// Relationships whose source or target is not among the nodes are left out.
pub fn build_graph(
    nodes: Vec<PositionedNode>,
    relationships: &[Relationship],
    stylesheet: &Stylesheet,
) -> DiagramGraph {
    let present: HashSet<&str> = nodes
        .iter()
        .filter(|n| n.is_component())
        .map(|n| n.id.as_str())
        .collect();

    let mut edges = Vec::new();
    let mut dropped = 0usize;
    for rel in relationships {
        if !present.contains(rel.source_component_id.as_str())
            || !present.contains(rel.target_component_id.as_str())
        {
            dropped += 1;
            continue;
        }
        let layer_of = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| &n.layer_code);
        edges.push(CanvasEdge {
            id: rel.id.clone(),
            source: rel.source_component_id.clone(),
            target: rel.target_component_id.clone(),
            label: rel.relationship_type.clone(),
            dashed: layer_of(rel.source_component_id.as_str())
                == layer_of(rel.target_component_id.as_str()),
        });
    }
    if dropped > 0 {
        log::debug!(dropped; "skipped relationships with an endpoint outside the diagram");
    }

    let nodes = nodes
        .into_iter()
        .map(|n| CanvasNode::from_positioned(n, stylesheet))
        .collect();
    DiagramGraph { nodes, edges }
}
