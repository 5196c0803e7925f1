use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{Circle, Line};
use super::state::PaletteGraphState;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "rgba(153, 153, 153, 0.6)";
const LINK_HIGHLIGHT_COLOR: &str = "rgba(30, 30, 30, 0.9)";
const NODE_STROKE: &str = "rgba(255, 255, 255, 0.8)";

pub fn render(state: &PaletteGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_lines(&state.scene.lines, state.transform.k, ctx);
	draw_circles(&state.scene.circles, state.transform.k, ctx);
	ctx.restore();
}

fn draw_lines(lines: &[Line], k: f64, ctx: &CanvasRenderingContext2d) {
	// Highlighted lines go last so they sit on top.
	for highlight in [false, true] {
		let (color, width) = if highlight {
			(LINK_HIGHLIGHT_COLOR, 2.5)
		} else {
			(LINK_COLOR, 1.5)
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width / k);
		ctx.begin_path();
		for line in lines.iter().filter(|l| l.highlight == highlight) {
			ctx.move_to(line.x1, line.y1);
			ctx.line_to(line.x2, line.y2);
		}
		ctx.stroke();
	}
}

fn draw_circles(circles: &[Circle], k: f64, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(NODE_STROKE);
	ctx.set_line_width(1.0 / k);
	for circle in circles {
		ctx.begin_path();
		let _ = ctx.arc(circle.cx, circle.cy, circle.r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&circle.fill);
		ctx.fill();
		ctx.stroke();
	}
}
