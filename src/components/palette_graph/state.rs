use log::debug;

use super::scene::Scene;
use super::tooltip::Tooltip;
use crate::config::GraphConfig;
use crate::graph::{GraphData, NodeId};
use crate::simulation::Simulation;

/// Wheel zoom factor per notch.
pub const ZOOM_STEP: f64 = 1.1;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
}

/// Pointer position in canvas pixels and in client (viewport) pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
	pub client_x: f64,
	pub client_y: f64,
}

pub struct PaletteGraphState {
	pub graph: GraphData,
	pub simulation: Simulation,
	pub scene: Scene,
	pub tooltip: Tooltip,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	drag_alpha_target: f64,
}

impl PaletteGraphState {
	pub fn new(graph: GraphData, config: &GraphConfig, width: f64, height: f64) -> Self {
		let simulation = Simulation::new(&graph, config.forces.clone(), (width / 2.0, height / 2.0));
		let scene = Scene::new(&graph, simulation.bodies());
		Self {
			graph,
			simulation,
			scene,
			tooltip: Tooltip::default(),
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			drag_alpha_target: config.drag_alpha_target,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost circle under the pointer.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.scene
			.circles
			.iter()
			.rposition(|c| {
				let (dx, dy) = (c.cx - gx, c.cy - gy);
				dx * dx + dy * dy < c.r * c.r
			})
			.map(NodeId)
	}

	/// Advances the layout one tick; the scene follows. False while paused.
	pub fn tick(&mut self) -> bool {
		self.simulation.step(&mut self.scene)
	}

	pub fn pointer_down(&mut self, p: Pointer) {
		if let Some(idx) = self.node_at_position(p.x, p.y) {
			self.drag_start(idx, p.x, p.y);
		} else {
			self.pan.active = true;
			self.pan.start_x = p.x;
			self.pan.start_y = p.y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	pub fn pointer_move(&mut self, p: Pointer) {
		if self.drag.active {
			self.drag_move(p.x, p.y);
			return;
		}

		let hovered = self.node_at_position(p.x, p.y);
		self.set_hover(hovered);
		if let Some(idx) = hovered {
			self.tooltip.follow(&self.graph.node(idx).label, p.client_x, p.client_y);
			self.scene.set_highlight(idx, true);
		}

		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (p.x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (p.y - self.pan.start_y);
		}
	}

	pub fn pointer_up(&mut self) {
		self.drag_end();
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.set_hover(None);
	}

	/// Scales around the pointer. Unbounded in both directions. A wheel event
	/// without vertical motion leaves the scale alone.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y > 0.0 { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
		self.transform.x = sx - (sx - self.transform.x) * factor;
		self.transform.y = sy - (sy - self.transform.y) * factor;
		self.transform.k *= factor;
	}

	fn drag_start(&mut self, idx: NodeId, sx: f64, sy: f64) {
		if self.simulation.alpha_target() < self.drag_alpha_target {
			self.simulation.set_alpha_target(self.drag_alpha_target);
			self.simulation.restart();
		}
		let (x, y) = {
			let body = self.simulation.body(idx);
			(body.x, body.y)
		};
		self.simulation.pin(idx, x, y);
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: x,
			node_start_y: y,
		};
		debug!("drag start: {}", self.graph.node(idx).label);
	}

	fn drag_move(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (nx, ny) = (
			self.drag.node_start_x + (sx - self.drag.start_x) / self.transform.k,
			self.drag.node_start_y + (sy - self.drag.start_y) / self.transform.k,
		);
		self.simulation.pin(idx, nx, ny);
		self.scene.move_circle(idx, nx, ny);
		self.tooltip.hide();
	}

	fn drag_end(&mut self) {
		if !self.drag.active {
			return;
		}
		self.simulation.set_alpha_target(0.0);
		if let Some(idx) = self.drag.node_idx {
			self.simulation.unpin(idx);
			debug!("drag end: {}", self.graph.node(idx).label);
		}
		self.drag = DragState::default();
	}

	fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		if let Some(prev) = self.hover.node.take() {
			self.tooltip.clear();
			self.scene.set_highlight(prev, false);
		}
		if let Some(idx) = node {
			self.tooltip.show_palette(&self.graph.node(idx).colors);
		}
		self.hover.node = node;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{ArtworkRecord, parse_hex};

	fn state(colors: &[&str]) -> PaletteGraphState {
		let rows = [
			ArtworkRecord {
				cluster: "A".into(),
				label: "f1".into(),
				colors: colors.iter().filter_map(|c| parse_hex(c).unwrap()).collect(),
				subcategory: None,
			},
			ArtworkRecord {
				cluster: "A".into(),
				label: "f2".into(),
				colors: Vec::new(),
				subcategory: None,
			},
		];
		let config = GraphConfig::default();
		let graph = GraphData::from_records(rows, &config).unwrap();
		let mut s = PaletteGraphState::new(graph, &config, 700.0, 800.0);
		// Spread the nodes out so hit-testing is unambiguous.
		for (i, id) in s.graph.node_ids().collect::<Vec<_>>().into_iter().enumerate() {
			let x = 100.0 + 100.0 * i as f64;
			s.simulation.pin(id, x, 100.0);
			s.simulation.unpin(id);
			s.scene.move_circle(id, x, 100.0);
		}
		s
	}

	fn at(x: f64, y: f64) -> Pointer {
		Pointer {
			x,
			y,
			client_x: x + 5.0,
			client_y: y + 5.0,
		}
	}

	#[test]
	fn hit_test_uses_node_radius() {
		let s = state(&[]);
		let f1 = s.graph.find("f1").unwrap();
		let a = s.graph.find("A").unwrap();
		assert_eq!(s.node_at_position(100.0, 100.0), Some(f1));
		assert_eq!(s.node_at_position(115.0, 100.0), None);
		// The cluster circle is twice as large.
		assert_eq!(s.node_at_position(315.0, 100.0), Some(a));
		assert_eq!(s.node_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn drag_pins_then_releases() {
		let mut s = state(&[]);
		let f1 = s.graph.find("f1").unwrap();

		s.pointer_down(at(100.0, 100.0));
		assert!(s.drag.active);
		assert_eq!(s.simulation.alpha_target(), 0.3);
		assert!(s.simulation.is_running());
		assert!(s.simulation.body(f1).is_pinned());

		s.pointer_move(at(130.0, 140.0));
		let b = s.simulation.body(f1);
		assert_eq!((b.fx, b.fy), (Some(130.0), Some(140.0)));
		let c = &s.scene.circles[f1.index()];
		assert_eq!((c.cx, c.cy), (130.0, 140.0));
		let line = &s.scene.lines[s.scene.incident(f1)[0]];
		assert_eq!((line.x1, line.y1), (130.0, 140.0));
		assert!(!s.tooltip.visible);

		s.pointer_up();
		assert!(!s.drag.active);
		assert!(!s.simulation.body(f1).is_pinned());
		assert_eq!(s.simulation.alpha_target(), 0.0);
	}

	#[test]
	fn drag_wakes_a_settled_layout() {
		let mut s = state(&[]);
		while s.tick() {}
		assert!(!s.simulation.is_running());

		let (x, y) = (s.scene.circles[0].cx, s.scene.circles[0].cy);
		let hit = s.node_at_position(x, y).unwrap();
		s.pointer_down(at(x, y));
		assert!(s.simulation.is_running());
		assert!(s.simulation.body(hit).is_pinned());
		assert!(s.tick());
	}

	#[test]
	fn drag_follows_pointer_through_zoom() {
		let mut s = state(&[]);
		let f1 = s.graph.find("f1").unwrap();
		s.transform = ViewTransform {
			x: 50.0,
			y: 0.0,
			k: 2.0,
		};
		// f1 at graph (100, 100) sits at screen (250, 200).
		s.pointer_down(at(250.0, 200.0));
		s.pointer_move(at(270.0, 200.0));
		assert_eq!(s.simulation.body(f1).fx, Some(110.0));
	}

	#[test]
	fn hover_shows_palette_and_highlights_lines() {
		let mut s = state(&["#FF0000", "#00FF00", "#0000FF"]);
		let f1 = s.graph.find("f1").unwrap();

		s.pointer_move(at(100.0, 100.0));
		assert_eq!(s.hover.node, Some(f1));
		assert_eq!(s.tooltip.swatches.len(), 3);
		assert!(s.tooltip.visible);
		assert_eq!(s.tooltip.label, "f1");
		assert_eq!((s.tooltip.left, s.tooltip.top), (115.0, 115.0));
		assert!(s.scene.incident(f1).iter().all(|&i| s.scene.lines[i].highlight));

		s.pointer_move(at(102.0, 101.0));
		assert_eq!(s.tooltip.swatches.len(), 3);

		s.pointer_move(at(-500.0, -500.0));
		assert_eq!(s.hover.node, None);
		assert!(s.tooltip.swatches.is_empty());
		assert!(!s.tooltip.visible);
		assert!(s.scene.lines.iter().all(|l| !l.highlight));
	}

	#[test]
	fn leaving_canvas_ends_drag_and_hover() {
		let mut s = state(&["#FF0000"]);
		let f1 = s.graph.find("f1").unwrap();
		s.pointer_move(at(100.0, 100.0));
		s.pointer_down(at(100.0, 100.0));
		s.pointer_leave();
		assert!(!s.drag.active);
		assert!(!s.simulation.body(f1).is_pinned());
		assert!(s.tooltip.swatches.is_empty());
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state(&[]);
		s.pointer_down(at(600.0, 600.0));
		assert!(s.pan.active);
		s.pointer_move(at(650.0, 580.0));
		assert_eq!((s.transform.x, s.transform.y), (50.0, -20.0));
		s.pointer_up();
		s.pointer_move(at(700.0, 700.0));
		assert_eq!((s.transform.x, s.transform.y), (50.0, -20.0));
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut s = state(&[]);
		let before = s.screen_to_graph(320.0, 240.0);
		for _ in 0..60 {
			s.zoom(320.0, 240.0, -1.0);
		}
		// No upper bound.
		assert!(s.transform.k > 10.0);
		let after = s.screen_to_graph(320.0, 240.0);
		assert!((before.0 - after.0).abs() < 1e-6);
		assert!((before.1 - after.1).abs() < 1e-6);

		s.zoom(320.0, 240.0, 1.0);
		assert!(s.transform.k < ZOOM_STEP.powi(60));
	}

	#[test]
	fn horizontal_scroll_does_not_zoom() {
		let mut s = state(&[]);
		s.zoom(10.0, 10.0, 0.0);
		assert_eq!(s.transform.k, 1.0);
		assert_eq!((s.transform.x, s.transform.y), (0.0, 0.0));
	}

	#[test]
	fn resize_recenters_layout() {
		let mut s = state(&[]);
		s.resize(1000.0, 400.0);
		assert_eq!((s.width, s.height), (1000.0, 400.0));
		s.simulation.tick();
		let n = s.simulation.bodies().len() as f64;
		let mean_x: f64 = s.simulation.bodies().iter().map(|b| b.x).sum::<f64>() / n;
		// Velocities are applied after centering, so allow some drift.
		assert!((mean_x - 500.0).abs() < 50.0, "{mean_x}");
	}
}
