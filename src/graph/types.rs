use super::builder::ClusterRegistry;

/// Index of a node in [`GraphData::nodes`], shared by the simulation bodies
/// and the scene circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
	/// Position in the node arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// One palette entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// The six hex digits as written in the source, without `#`.
	pub hex: String,
}

impl Color {
	/// CSS colour string.
	pub fn css(&self) -> String {
		format!("#{}", self.hex)
	}
}

/// What a node stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// A single artwork row.
	Artwork {
		/// Free-form tag from the `Subcategory` column.
		subcategory: Option<String>,
	},
	/// The synthesised center of one artist's cluster.
	Cluster,
}

/// A node of the graph. Radius and repulsion are fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Artwork or cluster.
	pub kind: NodeKind,
	/// Artist name.
	pub cluster: String,
	/// Unique label: the filename for artworks, the artist for clusters.
	pub label: String,
	/// Palette in column order.
	pub colors: Vec<Color>,
	/// Labels this node links to.
	pub links: Vec<String>,
	radius: f64,
	repulsion: f64,
}

impl GraphNode {
	pub(crate) fn artwork(
		cluster: String,
		label: String,
		colors: Vec<Color>,
		subcategory: Option<String>,
		radius: f64,
		repulsion: f64,
	) -> Self {
		Self {
			kind: NodeKind::Artwork { subcategory },
			links: vec![cluster.clone()],
			cluster,
			label,
			colors,
			radius,
			repulsion,
		}
	}

	pub(crate) fn cluster(name: String, radius: f64, repulsion: f64) -> Self {
		Self {
			kind: NodeKind::Cluster,
			cluster: name.clone(),
			label: name,
			colors: Vec::new(),
			links: Vec::new(),
			radius,
			repulsion,
		}
	}

	/// Display and collision radius.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Weight multiplied into the distance and strength of incident links.
	pub fn repulsion(&self) -> f64 {
		self.repulsion
	}

	/// True for synthesised cluster centers.
	pub fn is_cluster(&self) -> bool {
		self.kind == NodeKind::Cluster
	}
}

/// Undirected edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	/// Node that declared the link.
	pub source: NodeId,
	/// Node named in the declaring node's link list.
	pub target: NodeId,
	/// Rest length.
	pub distance: f64,
	/// Spring strength before the engine's upper bound is applied. This is
	/// `distance / LINK_STRENGTH_NORMALIZER` and drives the spring directly,
	/// so default weights of 3 give a softer spring (1/9) than weights of 9.
	pub strength: f64,
}

/// A fully assembled graph, ready for layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Artwork nodes followed by cluster nodes.
	pub nodes: Vec<GraphNode>,
	/// Deduplicated links.
	pub links: Vec<GraphLink>,
	/// Artist names in order of first appearance.
	pub clusters: ClusterRegistry,
}

impl GraphData {
	/// Node by id.
	pub fn node(&self, id: NodeId) -> &GraphNode {
		&self.nodes[id.index()]
	}

	/// Looks a node up by label.
	pub fn find(&self, label: &str) -> Option<NodeId> {
		self.nodes.iter().position(|n| n.label == label).map(NodeId)
	}

	/// Registration index of a node's cluster.
	pub fn cluster_index(&self, id: NodeId) -> Option<usize> {
		self.clusters.index_of(&self.node(id).cluster)
	}

	/// Ids of all nodes, in arena order.
	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		(0..self.nodes.len()).map(NodeId)
	}
}
