//! Tunables for loading, layout and interaction.

/// Divides the product of two repulsion weights into a link strength.
/// Two weights of 9 give a strength of exactly 1.
pub const LINK_STRENGTH_NORMALIZER: f64 = 81.0;

/// Knobs of the layout engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceParameters {
	/// Upper bound applied to every link strength.
	pub max_link_strength: f64,
	/// Pairwise repulsion; zero disables the force.
	pub charge_strength: f64,
	/// How hard overlapping circles are pushed apart, in `[0, 1]`.
	pub collision_strength: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha below which the engine pauses.
	pub alpha_min: f64,
	/// Rate at which alpha approaches its target.
	pub alpha_decay: f64,
}

impl Default for ForceParameters {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			max_link_strength: 2.0,
			charge_strength: 0.0,
			collision_strength: 0.8,
			velocity_decay: 0.4,
			alpha_min,
			// Cools from 1 to alpha_min in ~300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
		}
	}
}

/// Settings for one graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
	/// Where the artwork CSV is fetched from.
	pub data_url: String,
	/// Radius of an artwork circle.
	pub artwork_radius: f64,
	/// Radius of an artist (cluster) circle.
	pub cluster_radius: f64,
	/// Repulsion weight of artwork nodes.
	pub artwork_repulsion: f64,
	/// Repulsion weight of cluster nodes.
	pub cluster_repulsion: f64,
	/// Alpha target held while a node is dragged.
	pub drag_alpha_target: f64,
	/// Layout engine knobs.
	pub forces: ForceParameters,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 700.0,
			height: 800.0,
			data_url: "./raw-data.csv".into(),
			artwork_radius: 10.0,
			cluster_radius: 20.0,
			artwork_repulsion: 3.0,
			cluster_repulsion: 3.0,
			drag_alpha_target: 0.3,
			forces: ForceParameters::default(),
		}
	}
}
