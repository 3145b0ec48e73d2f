//! Dragging nodes, debounced saves, and reloading stored positions

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use archiview::layout::Point;
use archiview::notify::{self, NotificationLevel};
use archiview::positions::{CachedPositionStore, InMemoryPositionStore, JsonFilePositionStore};
use archiview::provider::InMemoryProvider;
use archiview::{
    load_diagram, open_controller, DiagramConfig, DiagramGraph, DiagramRequest, PositionStore,
    Stylesheet,
};

fn fixture() -> InMemoryProvider {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.toml");
    InMemoryProvider::from_file(&path).expect("fixture should load")
}

async fn load<S: PositionStore + ?Sized>(store: &S) -> DiagramGraph {
    load_diagram(
        &fixture(),
        store,
        &DiagramRequest::default(),
        &DiagramConfig::default(),
        &Stylesheet::default(),
    )
    .await
    .expect("diagram should load")
}

#[tokio::test(start_paused = true)]
async fn test_drag_burst_saves_last_position_once() {
    let store = Arc::new(InMemoryPositionStore::new());
    let request = DiagramRequest::default();
    let config = DiagramConfig::default();

    let graph = load(store.as_ref()).await;
    let mut controller = open_controller(graph, Arc::clone(&store), &request, &config, None);

    for step in 1..=4 {
        let point = Point::new(step as f64 * 25.0, 310.0);
        controller.on_node_drag("crm", point);
        controller.on_node_drag_stop("crm", point);
        tokio::time::advance(Duration::from_millis(300)).await;
    }

    // Reload before the delay has passed since the last drop
    let early = load(store.as_ref()).await;
    assert_eq!(early.node("crm").unwrap().position, Point::new(-125.0, 200.0));
    assert_eq!(controller.graph().node("crm").unwrap().position, Point::new(100.0, 310.0));

    controller.settle().await;
    assert_eq!(store.write_count(), 1);

    let reloaded = load(store.as_ref()).await;
    assert_eq!(reloaded.node("crm").unwrap().position, Point::new(100.0, 310.0));
    assert_eq!(reloaded.node("erp").unwrap().position, Point::new(125.0, 200.0));
}

#[tokio::test]
async fn test_positions_survive_in_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");
    let config = DiagramConfig::default().with_save_delay(Duration::from_millis(10));
    let request = DiagramRequest::default();

    {
        let store = Arc::new(CachedPositionStore::new(JsonFilePositionStore::new(&path)));
        let graph = load(store.as_ref()).await;
        let mut controller = open_controller(graph, Arc::clone(&store), &request, &config, None);
        controller.on_node_drag_stop("ledger", Point::new(-300.0, 640.0));
        controller.on_node_drag_stop("vault", Point::new(300.0, 820.0));
        controller.settle().await;
    }

    // A fresh store reads what the previous session wrote
    let reopened = JsonFilePositionStore::new(&path);
    let graph = load(&reopened).await;
    assert_eq!(graph.node("ledger").unwrap().position, Point::new(-300.0, 640.0));
    assert_eq!(graph.node("vault").unwrap().position, Point::new(300.0, 820.0));
}

#[tokio::test]
async fn test_cached_store_sees_its_own_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");
    let store = Arc::new(CachedPositionStore::new(JsonFilePositionStore::new(&path)));
    let config = DiagramConfig::default().with_save_delay(Duration::from_millis(10));

    let graph = load(store.as_ref()).await;
    assert!(store.is_cached("integrated", "local"));

    let mut controller =
        open_controller(graph, Arc::clone(&store), &DiagramRequest::default(), &config, None);
    controller.on_node_drag_stop("k8s", Point::new(10.0, 20.0));
    controller.settle().await;
    assert!(!store.is_cached("integrated", "local"));

    let reloaded = load(store.as_ref()).await;
    assert_eq!(reloaded.node("k8s").unwrap().position, Point::new(10.0, 20.0));
}

#[tokio::test]
async fn test_save_failure_keeps_layout_and_notifies() {
    // A directory cannot be written as a file
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFilePositionStore::new(dir.path()));
    let config = DiagramConfig::default().with_save_delay(Duration::from_millis(10));
    let (tx, mut rx) = notify::channel();

    let graph = load(&InMemoryPositionStore::new()).await;
    let mut controller =
        open_controller(graph, Arc::clone(&store), &DiagramRequest::default(), &config, Some(tx));
    controller.on_node_drag_stop("crm", Point::new(1.0, 2.0));
    controller.settle().await;

    let notification = rx.try_recv().expect("failure should be reported");
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(controller.graph().node("crm").unwrap().position, Point::new(1.0, 2.0));
}
