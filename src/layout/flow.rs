//! Band layout for the flow diagram
//!
//! Each known layer owns a fixed horizontal band. Components of a band sit on
//! one row centered on x = 0, in input order. Every occupied band also gets a
//! decorative separator node drawn just above it.

use std::collections::BTreeMap;

use crate::model::{Component, LayerCode};

use super::config::LayoutConfig;
use super::types::*;

/// Band that catches every layer outside the known map
pub const DEFAULT_BAND: usize = 6;

/// Vertical band index of a layer in the flow diagram
pub fn band_index(code: &LayerCode) -> usize {
    match code {
        LayerCode::Biz => 0,
        LayerCode::App => 1,
        LayerCode::Tech => 2,
        LayerCode::Data => 3,
        LayerCode::Sec => 4,
        LayerCode::Ux | LayerCode::Other(_) => DEFAULT_BAND,
    }
}

/// Horizontal position of the `index`-th of `count` nodes, centered on zero
pub fn centered_x(index: usize, count: usize, spacing: f64) -> f64 {
    index as f64 * spacing - (count.saturating_sub(1)) as f64 * spacing / 2.0
}

/// Compute the flow layout for an already filtered component list
pub fn layout_flow(components: &[Component], config: &LayoutConfig) -> Vec<PositionedNode> {
    let mut bands: BTreeMap<usize, Vec<&Component>> = BTreeMap::new();
    for component in components {
        bands
            .entry(band_index(&component.layer_code()))
            .or_default()
            .push(component);
    }

    let widest = bands.values().map(Vec::len).max().unwrap_or(0);
    let (node_width, _) = config.node_size;
    let spacing = config.flow_node_spacing;
    let separator_width = widest.saturating_sub(1) as f64 * spacing + node_width;
    let separator_x = centered_x(0, widest, spacing);

    let mut separators = vec![];
    let mut nodes = vec![];

    for (band, members) in &bands {
        let y = *band as f64 * config.flow_band_height;

        separators.push(PositionedNode {
            id: format!("{}{}", SEPARATOR_PREFIX, band),
            label: band_label(members),
            kind: NodeKind::Separator,
            layer_code: members[0].layer_code(),
            status: None,
            subtype: None,
            position: Point::new(separator_x, y - config.separator_offset),
            size: Some(Size::new(separator_width, 2.0)),
        });

        let count = members.len();
        for (index, component) in members.iter().enumerate() {
            let x = centered_x(index, count, spacing);
            nodes.push(PositionedNode::component(component, Point::new(x, y)));
        }
    }

    log::debug!(bands = bands.len(), nodes = nodes.len(); "flow layout computed");

    // Separators go first so the canvas draws them underneath
    separators.extend(nodes);
    separators
}

fn band_label(members: &[&Component]) -> String {
    members
        .iter()
        .find_map(|c| c.layer.as_ref().map(|l| l.name.clone()))
        .unwrap_or_else(|| "Other".to_string())
}
