//! Force-directed layout engine.
//!
//! Bodies move under four forces: link springs with a rest length, pairwise
//! charge, centering and circle collision. The energy `alpha` decays toward
//! `alpha_target`; once it falls below `alpha_min` the engine pauses until
//! [`Simulation::restart`] is called.

use std::f64::consts::PI;

use log::debug;

use crate::config::ForceParameters;
use crate::graph::{GraphData, NodeId};

const INITIAL_RADIUS: f64 = 10.0;

/// Position state of one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
	/// Current x.
	pub x: f64,
	/// Current y.
	pub y: f64,
	/// Velocity along x.
	pub vx: f64,
	/// Velocity along y.
	pub vy: f64,
	/// Pinned x, set while dragged.
	pub fx: Option<f64>,
	/// Pinned y, set while dragged.
	pub fy: Option<f64>,
	/// Collision radius.
	pub radius: f64,
}

impl Body {
	/// True while the node is held in place.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

#[derive(Clone, Debug)]
struct Spring {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	// Share of the correction applied to the target.
	bias: f64,
}

/// Receives positions after every tick.
pub trait TickObserver {
	/// Called once per tick with the updated bodies, indexed by [`NodeId`].
	fn on_tick(&mut self, bodies: &[Body]);
}

/// Tiny deterministic offsets for coincident points.
#[derive(Clone, Debug)]
struct Jiggle(u32);

impl Jiggle {
	fn next(&mut self) -> f64 {
		self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		(self.0 as f64 / u32::MAX as f64 - 0.5) * 1e-6
	}
}

/// The layout engine.
pub struct Simulation {
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	params: ForceParameters,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	running: bool,
	jiggle: Jiggle,
}

impl Simulation {
	/// Places every node of `graph` on a spiral around `center` and wires a
	/// spring per link.
	pub fn new(graph: &GraphData, params: ForceParameters, center: (f64, f64)) -> Self {
		let angle_step = PI * (3.0 - 5f64.sqrt());
		let bodies = graph
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let (r, a) = (INITIAL_RADIUS * (0.5 + i as f64).sqrt(), i as f64 * angle_step);
				Body {
					x: center.0 + r * a.cos(),
					y: center.1 + r * a.sin(),
					radius: node.radius(),
					..Body::default()
				}
			})
			.collect();

		let mut degree = vec![0usize; graph.nodes.len()];
		for link in &graph.links {
			degree[link.source.index()] += 1;
			degree[link.target.index()] += 1;
		}
		let springs = graph
			.links
			.iter()
			.map(|link| {
				let (s, t) = (link.source.index(), link.target.index());
				Spring {
					source: s,
					target: t,
					distance: link.distance,
					strength: link.strength.clamp(0.0, params.max_link_strength),
					bias: degree[s] as f64 / (degree[s] + degree[t]) as f64,
				}
			})
			.collect();

		Self::with_bodies(bodies, springs, params, center)
	}

	fn with_bodies(
		bodies: Vec<Body>,
		springs: Vec<Spring>,
		params: ForceParameters,
		center: (f64, f64),
	) -> Self {
		Self {
			bodies,
			springs,
			params,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			jiggle: Jiggle(1),
		}
	}

	/// All bodies, indexed by [`NodeId`].
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// One body.
	pub fn body(&self, id: NodeId) -> &Body {
		&self.bodies[id.index()]
	}

	/// Current energy.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Energy the engine is cooling (or warming) toward.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Sets the energy the engine settles at.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Resumes ticking after a pause.
	pub fn restart(&mut self) {
		if !self.running {
			debug!("layout restarted at alpha {:.4}", self.alpha);
		}
		self.running = true;
	}

	/// False once the engine has cooled and paused.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Moves the point the layout is centered on.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	/// Holds a node at `(x, y)` and places it there immediately.
	pub fn pin(&mut self, id: NodeId, x: f64, y: f64) {
		let body = &mut self.bodies[id.index()];
		body.fx = Some(x);
		body.fy = Some(y);
		body.x = x;
		body.y = y;
	}

	/// Releases a pinned node back to the forces.
	pub fn unpin(&mut self, id: NodeId) {
		let body = &mut self.bodies[id.index()];
		body.fx = None;
		body.fy = None;
	}

	/// Runs one tick if the engine is running and reports the new positions.
	/// Returns whether a tick happened.
	pub fn step(&mut self, observer: &mut impl TickObserver) -> bool {
		if !self.running {
			return false;
		}
		self.tick();
		observer.on_tick(&self.bodies);
		if self.alpha < self.params.alpha_min {
			self.running = false;
			debug!("layout settled");
		}
		true
	}

	/// Advances the layout by one iteration regardless of pause state.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		let alpha = self.alpha;
		self.force_link(alpha);
		self.force_charge(alpha);
		self.force_center();
		self.force_collide();
		self.integrate();
	}

	fn force_link(&mut self, alpha: f64) {
		for spring in &self.springs {
			let (s, t) = (&self.bodies[spring.source], &self.bodies[spring.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.jiggle.next();
			}
			if y == 0.0 {
				y = self.jiggle.next();
			}
			let l = (x * x + y * y).sqrt();
			let l = (l - spring.distance) / l * alpha * spring.strength;
			let (x, y) = (x * l, y * l);

			let b = spring.bias;
			let t = &mut self.bodies[spring.target];
			t.vx -= x * b;
			t.vy -= y * b;
			let s = &mut self.bodies[spring.source];
			s.vx += x * (1.0 - b);
			s.vy += y * (1.0 - b);
		}
	}

	// Negative strength repels.
	fn force_charge(&mut self, alpha: f64) {
		let strength = self.params.charge_strength;
		if strength == 0.0 {
			return;
		}
		let n = self.bodies.len();
		for i in 0..n {
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let mut x = self.bodies[j].x - self.bodies[i].x;
				let mut y = self.bodies[j].y - self.bodies[i].y;
				if x == 0.0 {
					x = self.jiggle.next();
				}
				if y == 0.0 {
					y = self.jiggle.next();
				}
				let l = (x * x + y * y).max(1.0);
				dvx += x * strength * alpha / l;
				dvy += y * strength * alpha / l;
			}
			self.bodies[i].vx += dvx;
			self.bodies[i].vy += dvy;
		}
	}

	fn force_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.bodies
			.iter()
			.fold((0.0, 0.0), |(sx, sy), b| (sx + b.x, sy + b.y));
		let (dx, dy) = (sx / n - self.center.0, sy / n - self.center.1);
		for body in &mut self.bodies {
			body.x -= dx;
			body.y -= dy;
		}
	}

	fn force_collide(&mut self) {
		let strength = self.params.collision_strength;
		let n = self.bodies.len();
		for i in 0..n {
			let ri = self.bodies[i].radius;
			let ri2 = ri * ri;
			let xi = self.bodies[i].x + self.bodies[i].vx;
			let yi = self.bodies[i].y + self.bodies[i].vy;
			for j in i + 1..n {
				let other = &self.bodies[j];
				let rj = other.radius;
				let r = ri + rj;
				let mut x = xi - other.x - other.vx;
				let mut y = yi - other.y - other.vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.jiggle.next();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle.next();
					l += y * y;
				}
				let d = l.sqrt();
				let k = (r - d) / d * strength;
				let (x, y) = (x * k, y * k);
				let w = rj * rj / (ri2 + rj * rj);

				let body = &mut self.bodies[i];
				body.vx += x * w;
				body.vy += y * w;
				let other = &mut self.bodies[j];
				other.vx -= x * (1.0 - w);
				other.vy -= y * (1.0 - w);
			}
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.params.velocity_decay;
		for body in &mut self.bodies {
			match body.fx {
				Some(fx) => {
					body.x = fx;
					body.vx = 0.0;
				}
				None => {
					body.vx *= keep;
					body.x += body.vx;
				}
			}
			match body.fy {
				Some(fy) => {
					body.y = fy;
					body.vy = 0.0;
				}
				None => {
					body.vy *= keep;
					body.y += body.vy;
				}
			}
		}
	}
}
