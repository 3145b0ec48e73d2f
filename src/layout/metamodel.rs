//! Grid layout for the metamodel diagram
//!
//! Layers stack top to bottom by `order_num`. Each band opens with a header
//! node, followed by the layer's components in a fixed-column grid. Band
//! height grows with the number of grid rows and never drops below
//! `min_band_height`.

use std::collections::HashSet;

use crate::model::{Component, Layer, LayerCode};

use super::config::LayoutConfig;
use super::types::*;

/// Id suffix of the band collecting components without a known layer
pub const UNASSIGNED_BAND: &str = "unassigned";

/// Grid cell of the `index`-th component: (column, row)
pub fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index % columns, index / columns)
}

/// Number of grid rows needed for `count` components
pub fn rows_needed(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

/// Height of a band holding `count` components
pub fn band_height(count: usize, config: &LayoutConfig) -> f64 {
    let rows = rows_needed(count, config.columns()) as f64;
    (config.header_height + rows * config.row_height + config.band_gap).max(config.min_band_height)
}

/// Compute the metamodel layout
///
/// `layers` may come in any order; components are placed in their layer's
/// band in input order. Layers without components still get a header.
pub fn layout_metamodel(
    layers: &[Layer],
    components: &[Component],
    config: &LayoutConfig,
) -> Vec<PositionedNode> {
    let mut ordered: Vec<&Layer> = layers.iter().collect();
    ordered.sort_by_key(|l| l.order_num);

    let mut nodes = vec![];
    let mut band_y = 0.0;

    for layer in &ordered {
        let members: Vec<&Component> = components
            .iter()
            .filter(|c| c.layer_id == layer.id)
            .collect();

        band_y = place_band(
            &mut nodes,
            BandHeader {
                id: format!("{}{}", HEADER_PREFIX, layer.id),
                label: layer.name.clone(),
                code: layer.code.clone(),
            },
            &members,
            band_y,
            config,
        );
    }

    let known: HashSet<&str> = layers.iter().map(|l| l.id.as_str()).collect();
    let orphans: Vec<&Component> = components
        .iter()
        .filter(|c| !known.contains(c.layer_id.as_str()))
        .collect();
    if !orphans.is_empty() {
        place_band(
            &mut nodes,
            BandHeader {
                id: format!("{}{}", HEADER_PREFIX, UNASSIGNED_BAND),
                label: "Unassigned".to_string(),
                code: LayerCode::unassigned(),
            },
            &orphans,
            band_y,
            config,
        );
    }

    log::debug!(layers = ordered.len(), nodes = nodes.len(); "metamodel layout computed");
    nodes
}

struct BandHeader {
    id: String,
    label: String,
    code: LayerCode,
}

/// Place one band starting at `band_y`; returns where the next band starts
fn place_band(
    nodes: &mut Vec<PositionedNode>,
    header: BandHeader,
    members: &[&Component],
    band_y: f64,
    config: &LayoutConfig,
) -> f64 {
    let columns = config.columns();
    let (node_width, _) = config.node_size;
    let header_width = (columns - 1) as f64 * config.column_spacing + node_width;

    nodes.push(PositionedNode {
        id: header.id,
        label: header.label,
        kind: NodeKind::LayerHeader,
        layer_code: header.code,
        status: None,
        subtype: None,
        position: Point::new(0.0, band_y),
        size: Some(Size::new(header_width, config.header_node_height)),
    });

    for (index, component) in members.iter().enumerate() {
        let (col, row) = grid_cell(index, columns);
        let position = Point::new(
            col as f64 * config.column_spacing,
            band_y + config.header_height + row as f64 * config.row_height,
        );
        nodes.push(PositionedNode::component(component, position));
    }

    band_y + band_height(members.len(), config)
}
