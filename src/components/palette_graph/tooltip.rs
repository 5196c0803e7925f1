use leptos::prelude::*;

use crate::graph::Color;

pub const SWATCH_SIZE: f64 = 25.0;
pub const SWATCH_TOP: f64 = 10.0;
/// Gap between the pointer and the tooltip's top-left corner.
pub const POINTER_OFFSET: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub fill: String,
}

/// Contents and placement of the hover tooltip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
	pub visible: bool,
	pub label: String,
	pub left: f64,
	pub top: f64,
	pub swatches: Vec<Swatch>,
}

impl Tooltip {
	/// One swatch per colour, laid out left to right.
	pub fn show_palette(&mut self, colors: &[Color]) {
		self.swatches = colors
			.iter()
			.enumerate()
			.map(|(i, c)| Swatch {
				x: i as f64 * SWATCH_SIZE,
				y: SWATCH_TOP,
				size: SWATCH_SIZE,
				fill: c.css(),
			})
			.collect();
	}

	pub fn follow(&mut self, label: &str, client_x: f64, client_y: f64) {
		if self.label != label {
			self.label = label.to_string();
		}
		self.left = client_x + POINTER_OFFSET;
		self.top = client_y + POINTER_OFFSET;
		self.visible = true;
	}

	pub fn hide(&mut self) {
		self.visible = false;
	}

	/// Hides the tooltip and drops the swatches.
	pub fn clear(&mut self) {
		self.visible = false;
		self.swatches.clear();
	}
}

/// Fixed-position overlay with the hovered label and its palette.
#[component]
pub fn PaletteTooltip(#[prop(into)] tooltip: Signal<Tooltip>) -> impl IntoView {
	let style = move || {
		tooltip.with(|t| {
			format!(
				"position: fixed; pointer-events: none; display: {}; left: {}px; top: {}px;",
				if t.visible { "block" } else { "none" },
				t.left,
				t.top
			)
		})
	};
	let palette_width = move || {
		tooltip.with(|t| (t.swatches.len() as f64 * SWATCH_SIZE).max(1.0).to_string())
	};

	view! {
		<div id="tooltip" class="graph-tooltip" style=style>
			<div id="name">{move || tooltip.with(|t| t.label.clone())}</div>
			<svg id="pal" width=palette_width height=(SWATCH_TOP + SWATCH_SIZE).to_string()>
				{move || {
					tooltip
						.with(|t| {
							t.swatches
								.iter()
								.map(|s| {
									view! {
										<rect
											x=s.x.to_string()
											y=s.y.to_string()
											width=s.size.to_string()
											height=s.size.to_string()
											fill=s.fill.clone()
										/>
									}
								})
								.collect_view()
						})
				}}
			</svg>
		</div>
	}
}
