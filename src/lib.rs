//! Archiview - layered architecture diagrams from a component catalog
//!
//! This library loads layers, components and relationships from a data
//! provider, filters them, lays them out in layer bands, merges in positions
//! users dragged nodes to, and exports the result as a standalone SVG.
//!
//! # Example
//!
//! ```rust
//! use archiview::export::export_svg;
//! use archiview::positions::InMemoryPositionStore;
//! use archiview::provider::{Dataset, InMemoryProvider};
//! use archiview::{load_diagram, DiagramConfig, DiagramRequest, Stylesheet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), archiview::Error> {
//!     let dataset = Dataset::from_str(r#"
//!         [[layers]]
//!         id = "l-app"
//!         code = "APP"
//!         name = "Application"
//!
//!         [[components]]
//!         id = "crm"
//!         name = "CRM Portal"
//!         layer_id = "l-app"
//!     "#)?;
//!
//!     let provider = InMemoryProvider::new(dataset);
//!     let store = InMemoryPositionStore::new();
//!     let config = DiagramConfig::default();
//!     let stylesheet = Stylesheet::default();
//!
//!     let graph = load_diagram(&provider, &store, &DiagramRequest::default(), &config, &stylesheet).await?;
//!     let document = export_svg(&graph, &config.export, &stylesheet)?;
//!     assert!(document.contents.contains("CRM Portal"));
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod layout;
pub mod model;
pub mod notify;
pub mod positions;
pub mod provider;
pub mod stylesheet;

use std::sync::Arc;

use thiserror::Error;

pub use canvas::{build_graph, DiagramController, DiagramGraph, NavigationTarget};
pub use config::{ConfigError, DiagramConfig};
pub use error::DatasetError;
pub use export::{export_or_log, export_svg, ExportConfig, ExportError, ExportedDocument};
pub use filter::GraphFilter;
pub use layout::{DiagramKind, LayoutConfig, LayoutResult};
pub use notify::{Notification, NotificationSender};
pub use positions::{DebouncedPositionWriter, PositionOverrides, PositionStore, PositionStoreError};
pub use provider::{DataProvider, ProviderError};
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur anywhere in the diagram pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog data could not be fetched
    #[error("failed to load catalog: {0}")]
    Provider(#[from] ProviderError),

    #[error("failed to load positions: {0}")]
    Positions(#[from] PositionStoreError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid stylesheet: {0}")]
    Stylesheet(#[from] StylesheetError),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

/// What to draw, and for whom
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRequest {
    pub kind: DiagramKind,
    pub filter: GraphFilter,
    pub user_id: String,
}

impl Default for DiagramRequest {
    fn default() -> Self {
        Self {
            kind: DiagramKind::Flow,
            filter: GraphFilter::default(),
            user_id: "local".to_string(),
        }
    }
}

impl DiagramRequest {
    pub fn new(kind: DiagramKind, filter: GraphFilter, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            filter,
            user_id: user_id.into(),
        }
    }

    /// View type under which positions of this diagram are stored
    ///
    /// Flow diagrams keep one set of positions per view filter; the metamodel
    /// diagram has a single set of its own.
    pub fn view_key(&self) -> &'static str {
        match self.kind {
            DiagramKind::Flow => self.filter.view.as_str(),
            DiagramKind::Metamodel => "metamodel",
        }
    }
}

/// Load, filter, lay out and style a diagram
///
/// A provider failure is returned as [`Error::Provider`]; nothing is retried.
pub async fn load_diagram<P, S>(
    provider: &P,
    store: &S,
    request: &DiagramRequest,
    config: &DiagramConfig,
    stylesheet: &Stylesheet,
) -> Result<DiagramGraph, Error>
where
    P: DataProvider + ?Sized,
    S: PositionStore + ?Sized,
{
    let catalog = provider::load_catalog(provider).await?;
    let components = request.filter.apply(&catalog.components);

    let mut result = layout::compute(request.kind, &catalog.layers, &components, &config.layout);
    log::debug!(
        kind = request.kind.as_str(),
        nodes = result.nodes.len();
        "layout computed"
    );

    let overrides = PositionOverrides::load(store, request.view_key(), &request.user_id).await?;
    layout::apply_overrides(&mut result, &overrides);

    Ok(build_graph(result.nodes, &catalog.relationships, stylesheet))
}

/// Wire a loaded graph to debounced position saves for `request`
///
/// Save failures are reported on `notifier` when one is given.
pub fn open_controller<S>(
    graph: DiagramGraph,
    store: Arc<S>,
    request: &DiagramRequest,
    config: &DiagramConfig,
    notifier: Option<NotificationSender>,
) -> DiagramController<S>
where
    S: PositionStore + ?Sized,
{
    let mut writer = DebouncedPositionWriter::new(store, request.view_key(), request.user_id.clone())
        .with_delay(config.save_delay());
    if let Some(notifier) = notifier {
        writer = writer.with_notifier(notifier);
    }
    DiagramController::new(graph, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Point;
    use crate::model::{NodePosition, ViewType};
    use crate::positions::InMemoryPositionStore;
    use crate::provider::{Dataset, InMemoryProvider};

    const CATALOG: &str = r#"
[[layers]]
id = "l-biz"
code = "BIZ"
name = "Business"
order_num = 0

[[layers]]
id = "l-app"
code = "APP"
name = "Application"
order_num = 1

[[components]]
id = "billing"
name = "Billing Process"
layer_id = "l-biz"

[[components]]
id = "crm"
name = "CRM Portal"
layer_id = "l-app"

[[relationships]]
id = "r1"
source_component_id = "billing"
target_component_id = "crm"
relationship_type = "uses"
"#;

    fn provider() -> InMemoryProvider {
        InMemoryProvider::new(Dataset::from_str(CATALOG).unwrap())
    }

    #[test]
    fn test_view_key() {
        let flow = DiagramRequest::new(
            DiagramKind::Flow,
            GraphFilter::new().with_view(ViewType::Business),
            "ana",
        );
        assert_eq!(flow.view_key(), "business");

        let metamodel = DiagramRequest {
            kind: DiagramKind::Metamodel,
            ..flow
        };
        assert_eq!(metamodel.view_key(), "metamodel");
    }

    #[tokio::test]
    async fn test_load_diagram_with_override() {
        let store = InMemoryPositionStore::new();
        store
            .upsert(NodePosition {
                component_id: "crm".to_string(),
                view_type: "integrated".to_string(),
                user_id: "local".to_string(),
                x_position: 500.0,
                y_position: 90.0,
            })
            .await
            .unwrap();

        let graph = load_diagram(
            &provider(),
            &store,
            &DiagramRequest::default(),
            &DiagramConfig::default(),
            &Stylesheet::default(),
        )
        .await
        .unwrap();

        assert_eq!(graph.node("crm").unwrap().position, Point::new(500.0, 90.0));
        assert_eq!(graph.node("billing").unwrap().position, Point::new(0.0, 0.0));
        assert_eq!(graph.edges.len(), 1);
    }

    #[tokio::test]
    async fn test_view_filter_drops_cross_layer_edges() {
        let request = DiagramRequest::new(
            DiagramKind::Flow,
            GraphFilter::new().with_view(ViewType::Application),
            "local",
        );
        let graph = load_diagram(
            &provider(),
            &InMemoryPositionStore::new(),
            &request,
            &DiagramConfig::default(),
            &Stylesheet::default(),
        )
        .await
        .unwrap();

        assert_eq!(graph.component_count(), 1);
        assert!(graph.edges.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let provider = provider();
        provider.set_unavailable(Some("connection refused"));
        let err = load_diagram(
            &provider,
            &InMemoryPositionStore::new(),
            &DiagramRequest::default(),
            &DiagramConfig::default(),
            &Stylesheet::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::Unavailable(_))));
    }
}
