//! Archiview CLI
//!
//! Usage:
//!   archiview [OPTIONS] <DATASET>
//!
//! Renders a catalog dataset (TOML) as a layered architecture diagram in SVG.
//! Stored node positions are read from and written to `--positions`.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info, warn, LevelFilter};

use archiview::layout::Point;
use archiview::model::{StatusFilter, ViewType};
use archiview::notify::{self, NotificationLevel};
use archiview::positions::{CachedPositionStore, InMemoryPositionStore, JsonFilePositionStore};
use archiview::provider::{Dataset, InMemoryProvider};
use archiview::{
    export_or_log, load_diagram, open_controller, DiagramConfig, DiagramKind, DiagramRequest, Error,
    ExportError, GraphFilter, PositionStore, Stylesheet,
};

#[derive(Parser, Debug)]
#[command(name = "archiview")]
#[command(about = "Layered architecture diagrams from a component catalog")]
struct Cli {
    /// Catalog dataset (TOML)
    dataset: PathBuf,

    /// Diagram style: flow or metamodel
    #[arg(long, default_value = "flow")]
    diagram: DiagramKind,

    /// Layer view: integrated, business, application, technology, data, security, ux
    #[arg(long, default_value = "integrated")]
    view: ViewType,

    /// Only show components whose name or description contains this text
    #[arg(long)]
    search: Option<String>,

    /// Only show components with this status: all, active, planned, deprecated
    #[arg(long, default_value = "all")]
    status: StatusFilter,

    /// JSON file holding stored node positions
    #[arg(long)]
    positions: Option<PathBuf>,

    /// User whose stored positions are used
    #[arg(long, default_value = "local")]
    user: String,

    /// Diagram configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for layer and status colors (TOML)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Move a component before export, as if dragged: ID=X,Y
    #[arg(long = "move", value_name = "ID=X,Y", value_parser = parse_move)]
    moves: Vec<(String, Point)>,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a base64 data URI instead of the raw SVG
    #[arg(long)]
    data_uri: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_move(s: &str) -> Result<(String, Point), String> {
    let (id, coords) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=X,Y, got '{}'", s))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y coordinates, got '{}'", coords))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("invalid x '{}': {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("invalid y '{}': {}", y, e))?;
    if id.trim().is_empty() {
        return Err("component id must not be empty".to_string());
    }
    Ok((id.trim().to_string(), Point::new(x, y)))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(args:? = cli; "Parsed arguments");

    let source = match fs::read_to_string(&cli.dataset) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.dataset.display(), e);
            process::exit(1);
        }
    };

    let dataset = match Dataset::from_str(&source) {
        Ok(dataset) => dataset,
        Err(e) => {
            let filename = cli.dataset.display().to_string();
            eprint!("{}", e.format(&source, &filename));
            process::exit(1);
        }
    };

    if let Err(e) = run(&cli, dataset).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: &Cli, dataset: Dataset) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => DiagramConfig::from_file(path)?,
        None => DiagramConfig::default(),
    };
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)?,
        None => Stylesheet::default(),
    };

    let provider = InMemoryProvider::new(dataset);
    let store: Arc<dyn PositionStore> = match &cli.positions {
        Some(path) => Arc::new(CachedPositionStore::new(JsonFilePositionStore::new(path))),
        None => Arc::new(InMemoryPositionStore::new()),
    };

    let mut filter = GraphFilter::new().with_view(cli.view).with_status(cli.status);
    if let Some(query) = &cli.search {
        filter = filter.with_query(query.clone());
    }
    let request = DiagramRequest::new(cli.diagram, filter, cli.user.clone());

    let mut graph = load_diagram(&provider, store.as_ref(), &request, &config, &stylesheet).await?;
    info!(
        view = request.view_key(),
        components = graph.component_count(),
        edges = graph.edges.len();
        "diagram loaded"
    );

    if !cli.moves.is_empty() {
        let (tx, mut rx) = notify::channel();
        let mut controller = open_controller(graph, Arc::clone(&store), &request, &config, Some(tx));

        for (id, point) in &cli.moves {
            if !controller.on_node_drag_stop(id, *point) {
                warn!(component = id.as_str(); "no such component in the diagram, move ignored");
            }
        }
        controller.settle().await;

        while let Ok(notification) = rx.try_recv() {
            if notification.level == NotificationLevel::Error {
                eprintln!("{}: {}", notification.title, notification.message);
            }
        }
        graph = controller.graph().clone();
    }

    let Some(document) = export_or_log(&graph, &config.export, &stylesheet) else {
        process::exit(1);
    };

    match &cli.output {
        Some(path) => {
            if cli.data_uri {
                fs::write(path, document.to_data_uri()).map_err(ExportError::from)?;
            } else {
                document.write_to(path)?;
            }
            info!(path:? = path; "wrote {}", document.file_name);
        }
        None if cli.data_uri => println!("{}", document.to_data_uri()),
        None => println!("{}", document.contents),
    }
    Ok(())
}
