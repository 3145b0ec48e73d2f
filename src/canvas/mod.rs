//! Interactive canvas adapter
//!
//! Turns a layout into the node/edge graph an interactive renderer draws, and
//! routes drag and click events back into position persistence and
//! navigation.

pub mod graph;
pub mod interaction;

pub use graph::{build_graph, CanvasEdge, CanvasNode, DiagramGraph};
pub use interaction::{DiagramController, NavigationTarget};
