//! Catalog data model: layers, components, relationships and stored positions

pub mod component;
pub mod layer;
pub mod position;
pub mod reference_list;
pub mod relationship;

pub use component::{Component, ComponentSubtype, Status, StatusFilter};
pub use layer::{Layer, LayerCode, LayerRef, ViewType};
pub use position::{NodePosition, PositionKey};
pub use reference_list::{format_id_list, parse_id_list, resolve_reference_list, ReferenceOption};
pub use relationship::Relationship;
