use crate::graph::{GraphData, NodeId};
use crate::simulation::{Body, TickObserver};

/// d3's `schemeSet1`, used for nodes without a palette.
pub const FALLBACK_COLORS: &[&str] = &[
	"#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
	"#999999",
];

/// First palette colour of the node, or a fallback picked by its cluster.
pub fn fill_color(graph: &GraphData, id: NodeId) -> String {
	if let Some(first) = graph.node(id).colors.first() {
		return first.css();
	}
	let i = graph.cluster_index(id).unwrap_or(0);
	FALLBACK_COLORS[i % FALLBACK_COLORS.len()].to_string()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
	pub cx: f64,
	pub cy: f64,
	pub r: f64,
	pub fill: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
	pub source: NodeId,
	pub target: NodeId,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub highlight: bool,
}

/// Drawable shapes, indexed like the graph: `circles[node]`, `lines[link]`.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	pub circles: Vec<Circle>,
	pub lines: Vec<Line>,
	incident: Vec<Vec<usize>>,
}

impl Scene {
	pub fn new(graph: &GraphData, bodies: &[Body]) -> Self {
		let circles = graph
			.node_ids()
			.map(|id| Circle {
				cx: bodies[id.index()].x,
				cy: bodies[id.index()].y,
				r: graph.node(id).radius(),
				fill: fill_color(graph, id),
			})
			.collect();

		let mut incident = vec![Vec::new(); graph.nodes.len()];
		let lines = graph
			.links
			.iter()
			.enumerate()
			.map(|(i, link)| {
				incident[link.source.index()].push(i);
				incident[link.target.index()].push(i);
				let (s, t) = (&bodies[link.source.index()], &bodies[link.target.index()]);
				Line {
					source: link.source,
					target: link.target,
					x1: s.x,
					y1: s.y,
					x2: t.x,
					y2: t.y,
					highlight: false,
				}
			})
			.collect();

		Self {
			circles,
			lines,
			incident,
		}
	}

	/// Lines touching `id`.
	#[cfg(test)]
	pub fn incident(&self, id: NodeId) -> &[usize] {
		&self.incident[id.index()]
	}

	/// Moves one circle and re-attaches its lines without waiting for a tick.
	pub fn move_circle(&mut self, id: NodeId, x: f64, y: f64) {
		let circle = &mut self.circles[id.index()];
		circle.cx = x;
		circle.cy = y;
		for &i in &self.incident[id.index()] {
			let line = &mut self.lines[i];
			let (s, t) = (&self.circles[line.source.index()], &self.circles[line.target.index()]);
			line.x1 = s.cx;
			line.y1 = s.cy;
			line.x2 = t.cx;
			line.y2 = t.cy;
		}
	}

	pub fn set_highlight(&mut self, id: NodeId, on: bool) {
		for &i in &self.incident[id.index()] {
			self.lines[i].highlight = on;
		}
	}
}

impl TickObserver for Scene {
	fn on_tick(&mut self, bodies: &[Body]) {
		for (circle, body) in self.circles.iter_mut().zip(bodies) {
			circle.cx = body.x;
			circle.cy = body.y;
		}
		for line in &mut self.lines {
			let (s, t) = (&bodies[line.source.index()], &bodies[line.target.index()]);
			line.x1 = s.x;
			line.y1 = s.y;
			line.x2 = t.x;
			line.y2 = t.y;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::GraphConfig;
	use crate::graph::{ArtworkRecord, parse_hex};

	fn graph() -> GraphData {
		let rows = [("A", "f1", Some("#FF0000")), ("B", "f2", None), ("A", "f3", None)].map(
			|(artist, file, color)| ArtworkRecord {
				cluster: artist.into(),
				label: file.into(),
				colors: color.and_then(|c| parse_hex(c).unwrap()).into_iter().collect(),
				subcategory: None,
			},
		);
		GraphData::from_records(rows, &GraphConfig::default()).unwrap()
	}

	fn bodies(n: usize) -> Vec<Body> {
		(0..n)
			.map(|i| Body {
				x: i as f64,
				y: 2.0 * i as f64,
				..Body::default()
			})
			.collect()
	}

	#[test]
	fn fill_prefers_first_swatch_then_cluster_palette() {
		let g = graph();
		assert_eq!(fill_color(&g, g.find("f1").unwrap()), "#FF0000");
		assert_eq!(fill_color(&g, g.find("f2").unwrap()), FALLBACK_COLORS[1]);
		assert_eq!(fill_color(&g, g.find("f3").unwrap()), FALLBACK_COLORS[0]);
		assert_eq!(fill_color(&g, g.find("A").unwrap()), FALLBACK_COLORS[0]);
		assert_eq!(fill_color(&g, g.find("B").unwrap()), FALLBACK_COLORS[1]);
	}

	#[test]
	fn one_shape_per_node_and_link() {
		let g = graph();
		let scene = Scene::new(&g, &bodies(g.nodes.len()));
		assert_eq!(scene.circles.len(), 5);
		assert_eq!(scene.lines.len(), 3);
		assert_eq!(scene.incident(g.find("A").unwrap()).len(), 2);
		assert_eq!(scene.circles[g.find("B").unwrap().index()].r, 20.0);
	}

	#[test]
	fn tick_repositions_everything() {
		let g = graph();
		let mut scene = Scene::new(&g, &bodies(g.nodes.len()));
		let moved: Vec<_> = bodies(g.nodes.len())
			.into_iter()
			.map(|b| Body {
				x: b.x + 100.0,
				..b
			})
			.collect();
		scene.on_tick(&moved);

		for (c, b) in scene.circles.iter().zip(&moved) {
			assert_eq!((c.cx, c.cy), (b.x, b.y));
		}
		for line in &scene.lines {
			assert_eq!(line.x1, moved[line.source.index()].x);
			assert_eq!(line.y2, moved[line.target.index()].y);
		}
	}

	#[test]
	fn moving_a_circle_drags_its_lines() {
		let g = graph();
		let mut scene = Scene::new(&g, &bodies(g.nodes.len()));
		let a = g.find("A").unwrap();
		scene.move_circle(a, -7.0, 9.0);

		for &i in scene.incident(a) {
			let line = &scene.lines[i];
			assert_eq!(line.target, a);
			assert_eq!((line.x2, line.y2), (-7.0, 9.0));
		}
		let other = scene.incident(g.find("f2").unwrap())[0];
		assert_ne!((scene.lines[other].x2, scene.lines[other].y2), (-7.0, 9.0));
	}

	#[test]
	fn highlight_only_touches_incident_lines() {
		let g = graph();
		let mut scene = Scene::new(&g, &bodies(g.nodes.len()));
		let f1 = g.find("f1").unwrap();
		scene.set_highlight(f1, true);
		assert_eq!(scene.lines.iter().filter(|l| l.highlight).count(), 1);
		scene.set_highlight(f1, false);
		assert!(scene.lines.iter().all(|l| !l.highlight));
	}
}
