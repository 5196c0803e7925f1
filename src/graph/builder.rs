use std::collections::{HashMap, HashSet};

use log::info;

use super::loader::ArtworkRecord;
use super::types::{GraphData, GraphLink, GraphNode, NodeId};
use crate::config::{GraphConfig, LINK_STRENGTH_NORMALIZER};
use crate::error::GraphError;

/// Artist names numbered in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterRegistry {
	names: Vec<String>,
	index: HashMap<String, usize>,
}

impl ClusterRegistry {
	/// Returns the index of `name`, assigning the next one if it is new.
	pub fn register(&mut self, name: &str) -> usize {
		if let Some(&i) = self.index.get(name) {
			return i;
		}
		let i = self.names.len();
		self.names.push(name.to_string());
		self.index.insert(name.to_string(), i);
		i
	}

	/// Index of an already registered name.
	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}

	/// Names in registration order.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// Number of distinct clusters.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}

/// Remembers which unordered label pairs are already linked.
#[derive(Clone, Debug, Default)]
pub struct LinkRegistry {
	seen: HashMap<String, HashSet<String>>,
}

impl LinkRegistry {
	/// Makes `label` known without linking it to anything.
	pub fn seed(&mut self, label: &str) {
		self.seen.entry(label.to_string()).or_default();
	}

	/// True when `a` and `b` are linked in either direction.
	pub fn contains(&self, a: &str, b: &str) -> bool {
		self.seen.get(a).is_some_and(|s| s.contains(b))
			|| self.seen.get(b).is_some_and(|s| s.contains(a))
	}

	/// Records the pair; false if it was already present.
	pub fn insert(&mut self, a: &str, b: &str) -> bool {
		if self.contains(a, b) {
			return false;
		}
		self.seen.entry(a.to_string()).or_default().insert(b.to_string());
		self.seen.entry(b.to_string()).or_default().insert(a.to_string());
		true
	}
}

/// Accumulates artwork rows and turns them into a [`GraphData`].
pub struct GraphBuilder<'a> {
	config: &'a GraphConfig,
	nodes: Vec<GraphNode>,
	labels: HashMap<String, NodeId>,
	clusters: ClusterRegistry,
	links: LinkRegistry,
}

impl<'a> GraphBuilder<'a> {
	/// Empty builder using the radii and weights from `config`.
	pub fn new(config: &'a GraphConfig) -> Self {
		Self {
			config,
			nodes: Vec::new(),
			labels: HashMap::new(),
			clusters: ClusterRegistry::default(),
			links: LinkRegistry::default(),
		}
	}

	fn insert_node(&mut self, node: GraphNode) -> Result<NodeId, GraphError> {
		if self.labels.contains_key(&node.label) {
			return Err(GraphError::DuplicateLabel(node.label));
		}
		let id = NodeId(self.nodes.len());
		self.labels.insert(node.label.clone(), id);
		self.nodes.push(node);
		Ok(id)
	}

	/// Adds one artwork node and registers its artist.
	pub fn push(&mut self, record: ArtworkRecord) -> Result<NodeId, GraphError> {
		self.clusters.register(&record.cluster);
		self.links.seed(&record.label);
		self.links.seed(&record.cluster);
		self.insert_node(GraphNode::artwork(
			record.cluster,
			record.label,
			record.colors,
			record.subcategory,
			self.config.artwork_radius,
			self.config.artwork_repulsion,
		))
	}

	/// Synthesises cluster centers, then links every node to the labels it
	/// names. Each unordered pair is linked once.
	pub fn build(mut self) -> Result<GraphData, GraphError> {
		for name in self.clusters.names().to_vec() {
			self.insert_node(GraphNode::cluster(
				name,
				self.config.cluster_radius,
				self.config.cluster_repulsion,
			))?;
		}

		let mut links = Vec::new();
		for (i, node) in self.nodes.iter().enumerate() {
			for label in &node.links {
				let &target = self
					.labels
					.get(label)
					.ok_or_else(|| GraphError::UnknownNode(label.clone()))?;
				if !self.links.insert(&node.label, label) {
					continue;
				}
				let distance = node.repulsion() * self.nodes[target.index()].repulsion();
				links.push(GraphLink {
					source: NodeId(i),
					target,
					distance,
					strength: distance / LINK_STRENGTH_NORMALIZER,
				});
			}
		}

		info!(
			"built graph: {} nodes, {} links, {} clusters",
			self.nodes.len(),
			links.len(),
			self.clusters.len()
		);
		Ok(GraphData {
			nodes: self.nodes,
			links,
			clusters: self.clusters,
		})
	}
}

impl GraphData {
	/// Builds a graph from loaded records in one go.
	pub fn from_records(
		records: impl IntoIterator<Item = ArtworkRecord>,
		config: &GraphConfig,
	) -> Result<Self, GraphError> {
		let mut builder = GraphBuilder::new(config);
		for record in records {
			builder.push(record)?;
		}
		builder.build()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::color::parse_hex;

	fn record(artist: &str, file: &str, colors: &[&str]) -> ArtworkRecord {
		ArtworkRecord {
			cluster: artist.into(),
			label: file.into(),
			colors: colors
				.iter()
				.filter_map(|c| parse_hex(c).unwrap())
				.collect(),
			subcategory: None,
		}
	}

	fn linked(g: &GraphData, a: &str, b: &str) -> usize {
		let (a, b) = (g.find(a).unwrap(), g.find(b).unwrap());
		g.links
			.iter()
			.filter(|l| (l.source, l.target) == (a, b) || (l.source, l.target) == (b, a))
			.count()
	}

	#[test]
	fn two_artworks_one_artist() {
		let config = GraphConfig::default();
		let g = GraphData::from_records(
			[record("A", "f1", &["#FF0000"]), record("A", "f2", &["#00FF00"])],
			&config,
		)
		.unwrap();

		assert_eq!(g.nodes.len(), 3);
		assert_eq!(g.nodes.iter().filter(|n| n.is_cluster()).count(), 1);
		let a = g.node(g.find("A").unwrap());
		assert!(a.is_cluster());
		assert!(a.colors.is_empty());
		assert!(a.links.is_empty());
		assert_eq!(a.radius(), 20.0);

		assert_eq!(g.links.len(), 2);
		assert_eq!(linked(&g, "f1", "A"), 1);
		assert_eq!(linked(&g, "f2", "A"), 1);
		assert_eq!(linked(&g, "f1", "f2"), 0);
	}

	#[test]
	fn one_cluster_per_distinct_artist() {
		let config = GraphConfig::default();
		let rows = [
			record("Monet", "a", &[]),
			record("Degas", "b", &[]),
			record("Monet", "c", &[]),
			record("Cassatt", "d", &[]),
			record("Degas", "e", &[]),
		];
		let g = GraphData::from_records(rows, &config).unwrap();

		assert_eq!(g.clusters.names(), ["Monet", "Degas", "Cassatt"]);
		assert_eq!(g.nodes.iter().filter(|n| n.is_cluster()).count(), 3);
		assert_eq!(g.cluster_index(g.find("e").unwrap()), Some(1));
		assert_eq!(g.links.len(), 5);
	}

	#[test]
	fn link_weights_follow_repulsion() {
		let config = GraphConfig {
			artwork_repulsion: 9.0,
			cluster_repulsion: 9.0,
			..GraphConfig::default()
		};
		let g = GraphData::from_records([record("A", "f1", &[])], &config).unwrap();
		assert_eq!(g.links[0].distance, 81.0);
		assert_eq!(g.links[0].strength, 1.0);

		let g = GraphData::from_records([record("A", "f1", &[])], &GraphConfig::default()).unwrap();
		assert_eq!(g.links[0].distance, 9.0);
		assert!((g.links[0].strength - 9.0 / 81.0).abs() < 1e-12);
	}

	#[test]
	fn link_registry_ignores_direction() {
		let mut links = LinkRegistry::default();
		links.seed("a");
		links.seed("b");
		assert!(!links.contains("a", "b"));
		assert!(links.insert("b", "a"));
		assert!(links.contains("a", "b"));
		assert!(!links.insert("a", "b"));
	}

	#[test]
	fn reverse_declaration_is_deduplicated() {
		let config = GraphConfig::default();
		let mut builder = GraphBuilder::new(&config);
		builder.push(record("A", "f1", &[])).unwrap();
		builder.push(record("A", "f2", &[])).unwrap();
		builder.nodes[0].links.push("f2".into());
		builder.nodes[1].links.push("f1".into());
		let g = builder.build().unwrap();
		assert_eq!(linked(&g, "f1", "f2"), 1);
		assert_eq!(g.links.len(), 3);
	}

	#[test]
	fn duplicate_filename_is_rejected() {
		let config = GraphConfig::default();
		let err = GraphData::from_records([record("A", "f1", &[]), record("B", "f1", &[])], &config)
			.unwrap_err();
		assert_eq!(err, GraphError::DuplicateLabel("f1".into()));
	}

	#[test]
	fn artist_named_like_a_file_is_rejected() {
		let config = GraphConfig::default();
		let err = GraphData::from_records([record("A", "B", &[]), record("B", "x", &[])], &config)
			.unwrap_err();
		assert_eq!(err, GraphError::DuplicateLabel("B".into()));
	}

	#[test]
	fn dangling_link_is_an_error() {
		let config = GraphConfig::default();
		let mut builder = GraphBuilder::new(&config);
		builder.push(record("A", "f1", &[])).unwrap();
		builder.nodes[0].links.push("nowhere".into());
		assert_eq!(
			builder.build().unwrap_err(),
			GraphError::UnknownNode("nowhere".into())
		);
	}
}
