//! Core types for the layout engines

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Component, ComponentSubtype, LayerCode, Status};

/// Id prefix of decorative band-divider nodes
pub const SEPARATOR_PREFIX: &str = "separator-";

/// Id prefix of metamodel layer header nodes
pub const HEADER_PREFIX: &str = "layer-";

/// A 2D point in the diagram coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A bounding box representing the spatial extent of a node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box fully contains another
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `padding` on every side
    pub fn padded(&self, padding: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - padding,
            self.y - padding,
            self.width + 2.0 * padding,
            self.height + 2.0 * padding,
        )
    }
}

/// Role of a node in the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A catalog component; the only kind that can be dragged or persisted
    Component,
    /// Title bar of a metamodel layer band
    LayerHeader,
    /// Decorative divider between flow bands
    Separator,
}

/// A node with its computed position
///
/// `position` is the top-left corner. `size` is set for nodes whose size the
/// layout dictates (headers, separators); component nodes take whatever size
/// the renderer gives them.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub layer_code: LayerCode,
    pub status: Option<Status>,
    pub subtype: Option<ComponentSubtype>,
    pub position: Point,
    pub size: Option<Size>,
}

impl PositionedNode {
    pub fn component(component: &Component, position: Point) -> Self {
        Self {
            id: component.id.clone(),
            label: component.name.clone(),
            kind: NodeKind::Component,
            layer_code: component.layer_code(),
            status: Some(component.status),
            subtype: Some(component.subtype()),
            position,
            size: None,
        }
    }

    pub fn is_component(&self) -> bool {
        self.kind == NodeKind::Component
    }
}

/// The two diagram styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramKind {
    /// Layer bands with components centered on the vertical axis
    #[default]
    Flow,
    /// Ordered layer bands with a fixed-column component grid
    Metamodel,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Flow => "flow",
            DiagramKind::Metamodel => "metamodel",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown diagram kind '{0}' (expected flow or metamodel)")]
pub struct ParseDiagramKindError(String);

impl FromStr for DiagramKind {
    type Err = ParseDiagramKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flow" => Ok(DiagramKind::Flow),
            "metamodel" => Ok(DiagramKind::Metamodel),
            _ => Err(ParseDiagramKindError(s.to_string())),
        }
    }
}

/// Positioned nodes produced by one layout pass
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub nodes: Vec<PositionedNode>,
}

impl LayoutResult {
    pub fn new(nodes: Vec<PositionedNode>) -> Self {
        Self { nodes }
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_padding() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, -5.0, 10.0, 10.0);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(0.0, -5.0, 30.0, 15.0));
        assert_eq!(u.padded(5.0), BoundingBox::new(-5.0, -10.0, 40.0, 25.0));
    }

    #[test]
    fn test_contains_box() {
        let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_box(&BoundingBox::new(10.0, 10.0, 90.0, 90.0)));
        assert!(!outer.contains_box(&BoundingBox::new(10.0, 10.0, 91.0, 10.0)));
    }

    #[test]
    fn test_diagram_kind_from_str() {
        assert_eq!("Metamodel".parse::<DiagramKind>().unwrap(), DiagramKind::Metamodel);
        assert!("radial".parse::<DiagramKind>().is_err());
    }
}
