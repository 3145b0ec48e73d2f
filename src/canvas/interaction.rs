//! Drag and click handling on the live diagram

use std::fmt;

use crate::layout::Point;
use crate::positions::{DebouncedPositionWriter, PositionStore};

use super::DiagramGraph;

/// Route the host application should open after a node click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget(pub String);

impl NavigationTarget {
    pub fn component(component_id: &str) -> Self {
        Self(format!("/components/{}", component_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns the live graph and persists node moves through a debounced writer
pub struct DiagramController<S: PositionStore + ?Sized> {
    graph: DiagramGraph,
    writer: DebouncedPositionWriter<S>,
}

impl<S: PositionStore + ?Sized> DiagramController<S> {
    pub fn new(graph: DiagramGraph, writer: DebouncedPositionWriter<S>) -> Self {
        Self { graph, writer }
    }

    /// A drag in progress; only the in-memory position changes
    pub fn on_node_drag(&mut self, id: &str, position: Point) {
        self.graph.move_node(id, position);
    }

    /// Drag finished: move the node and schedule a save
    ///
    /// Headers and separators are not persisted. Returns whether a save
    /// was scheduled.
    pub fn on_node_drag_stop(&mut self, id: &str, position: Point) -> bool {
        let is_component = self.graph.node(id).is_some_and(|n| n.is_component());
        if !is_component {
            log::trace!(node = id; "ignoring drag stop of non-component node");
            return false;
        }
        self.graph.move_node(id, position);
        self.writer.save_position(id, position.x, position.y);
        true
    }

    /// Detail route of a clicked component
    pub fn on_node_click(&self, id: &str) -> Option<NavigationTarget> {
        self.graph
            .node(id)
            .filter(|n| n.is_component())
            .map(|n| NavigationTarget::component(&n.id))
    }

    /// Current snapshot of the diagram, including unsaved moves
    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }

    pub fn writer(&self) -> &DebouncedPositionWriter<S> {
        &self.writer
    }

    /// Wait for every scheduled save to finish
    pub async fn settle(&self) {
        self.writer.settle().await;
    }
}
