//! Graph data: CSV loading, colour parsing and node/link assembly.

mod builder;
mod color;
mod loader;
mod types;

pub use builder::{ClusterRegistry, GraphBuilder, LinkRegistry};
pub use color::{HexError, parse_hex};
pub use loader::{ArtworkRecord, COLOR_COLUMNS, fetch_text, load_records};
pub use types::{Color, GraphData, GraphLink, GraphNode, NodeId, NodeKind};

use crate::config::GraphConfig;
use crate::error::GraphError;

/// Fetches the configured CSV and assembles the graph.
pub async fn load_graph(config: GraphConfig) -> Result<GraphData, GraphError> {
	let text = fetch_text(&config.data_url).await?;
	GraphData::from_records(load_records(&text)?, &config)
}
