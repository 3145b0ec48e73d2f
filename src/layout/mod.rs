//! Layout engines for computing node positions
//!
//! Both engines are deterministic and one-shot: nodes are placed in layer
//! bands without any force simulation, and the whole layout is recomputed
//! whenever the filtered component set changes. Stored user positions are
//! merged in afterwards by [`apply_overrides`].

pub mod config;
pub mod flow;
pub mod metamodel;
pub mod types;

pub use config::LayoutConfig;
pub use flow::layout_flow;
pub use metamodel::layout_metamodel;
pub use types::*;

use crate::model::{Component, Layer};
use crate::positions::PositionOverrides;

/// Compute the layout of an already filtered component set
pub fn compute(
    kind: DiagramKind,
    layers: &[Layer],
    components: &[Component],
    config: &LayoutConfig,
) -> LayoutResult {
    let nodes = match kind {
        DiagramKind::Flow => layout_flow(components, config),
        DiagramKind::Metamodel => layout_metamodel(layers, components, config),
    };
    LayoutResult::new(nodes)
}

/// Replace computed positions with stored overrides
///
/// Only component nodes are eligible. Each node is looked up on its own, so
/// a partially overridden layer keeps its computed positions for the rest.
/// Returns the number of nodes moved.
pub fn apply_overrides(result: &mut LayoutResult, overrides: &PositionOverrides) -> usize {
    let mut applied = 0;
    for node in result.nodes.iter_mut().filter(|n| n.is_component()) {
        if let Some(position) = overrides.get_node_position(&node.id) {
            node.position = position;
            applied += 1;
        }
    }
    if applied > 0 {
        log::debug!(applied; "applied stored node positions");
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayerCode, LayerRef, NodePosition, Status};

    fn component(id: &str, code: LayerCode) -> Component {
        Component {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            layer_id: "l".to_string(),
            status: Status::Active,
            layer: Some(LayerRef {
                name: code.to_string(),
                code,
            }),
        }
    }

    fn stored(id: &str, x: f64, y: f64) -> NodePosition {
        NodePosition {
            component_id: id.to_string(),
            view_type: "integrated".to_string(),
            user_id: "u".to_string(),
            x_position: x,
            y_position: y,
        }
    }

    #[test]
    fn test_overrides_replace_computed_positions() {
        let components = vec![component("a", LayerCode::Biz), component("b", LayerCode::Biz)];
        let mut result = compute(DiagramKind::Flow, &[], &components, &LayoutConfig::default());
        let computed_b = result.node("b").unwrap().position;

        let overrides = PositionOverrides::from_positions(vec![stored("a", 999.0, -42.0)]);
        assert_eq!(apply_overrides(&mut result, &overrides), 1);

        assert_eq!(result.node("a").unwrap().position, Point::new(999.0, -42.0));
        assert_eq!(result.node("b").unwrap().position, computed_b);
    }

    #[test]
    fn test_overrides_never_move_separators() {
        let components = vec![component("a", LayerCode::App)];
        let mut result = compute(DiagramKind::Flow, &[], &components, &LayoutConfig::default());
        let overrides = PositionOverrides::from_positions(vec![stored("separator-1", 5.0, 5.0)]);

        assert_eq!(apply_overrides(&mut result, &overrides), 0);
        assert_ne!(result.node("separator-1").unwrap().position, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_flow_layout_snapshot() {
        let components = vec![
            component("billing", LayerCode::Biz),
            component("crm", LayerCode::App),
            component("erp", LayerCode::App),
            component("vault", LayerCode::Sec),
        ];
        let result = compute(DiagramKind::Flow, &[], &components, &LayoutConfig::default());
        let summary = result
            .nodes
            .iter()
            .map(|n| format!("{} {:?} ({}, {})", n.id, n.kind, n.position.x, n.position.y))
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(summary, @r"
        separator-0 Separator (-125, -40)
        separator-1 Separator (-125, 160)
        separator-4 Separator (-125, 760)
        billing Component (0, 0)
        crm Component (-125, 200)
        erp Component (125, 200)
        vault Component (0, 800)
        ");
    }
}
