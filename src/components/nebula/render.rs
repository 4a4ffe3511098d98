use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::LinkKind;
use super::state::{NebulaState, NodeInfo};

const CENTER_COLOR: &str = "#ffd166";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Satellites shift from pale blue towards violet as relevance grows.
fn node_color(info: &NodeInfo) -> String {
	if info.is_center {
		return CENTER_COLOR.into();
	}
	let hue = 200.0 + 70.0 * info.relevance;
	let light = 55.0 + 15.0 * info.relevance;
	format!("hsl({:.0}, 75%, {:.0}%)", hue, light)
}

fn node_alpha(info: &NodeInfo) -> f64 {
	0.35 + 0.65 * info.relevance
}

pub fn render(state: &NebulaState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#0b0c1d");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_links(state: &NebulaState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let positions = state.positions();
	let (dash, gap) = (6.0 / k, 5.0 / k);
	let dash_offset = -(state.flow_time * 20.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	for link in &state.links {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&link.source), positions.get(&link.target))
		else {
			continue;
		};
		let is_highlighted =
			state.is_highlighted(link.source) && state.is_highlighted(link.target);
		let alpha = if is_highlighted {
			link.opacity + (1.0 - link.opacity) * 0.6 * t
		} else {
			link.opacity * (1.0 - 0.7 * t)
		};

		match link.kind {
			LinkKind::Radial => {
				ctx.set_stroke_style_str(&format!("rgba(150, 170, 255, {})", alpha));
				ctx.set_line_width(1.2 / k);
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
			LinkKind::Structural => {
				ctx.set_stroke_style_str(&format!("rgba(200, 160, 255, {})", alpha));
				ctx.set_line_width(0.8 / k);
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(dash),
					&JsValue::from_f64(gap),
				));
				ctx.set_line_dash_offset(dash_offset);
			}
		}
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &NebulaState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 11.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let highlighted = has_highlight && state.is_highlighted(idx);
		let hovered = state.is_hovered(idx);

		let dim = if has_highlight && !highlighted {
			1.0 - 0.6 * t
		} else {
			1.0
		};
		let radius = if hovered {
			info.radius * (1.0 + 0.35 * t)
		} else {
			info.radius
		};

		if info.is_center || (hovered && t > 0.01) {
			let glow_radius = radius * if info.is_center { 3.0 } else { 1.8 + 1.2 * t };
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, "rgba(255, 240, 200, 0.45)");
				let _ = gradient.add_color_stop(1.0, "rgba(255, 240, 200, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(node_alpha(info) * dim);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node_color(info));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if info.labeled || hovered {
			let alpha = if hovered { 1.0 } else { 0.8 * dim };
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
			ctx.set_font(&font);
			let _ = ctx.fill_text(&info.title, x + radius + 3.0, y + 3.0);
		}
	});
}
