use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};
use super::types::LinkStyle;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Stroke colour (as `r, g, b`), width factor and dash flag per edge style.
fn link_look(style: LinkStyle) -> (&'static str, f64, bool) {
	match style {
		LinkStyle::Normal => ("46, 134, 193", 1.0, false),
		LinkStyle::Changed => ("255, 165, 0", 1.5, true),
		LinkStyle::Solution => ("255, 0, 0", 2.0, false),
	}
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#ffffff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (2.0 / k, 8.0 / k, 4.0 / k, 10.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let info = state.link(n1.index(), n2.index());
		let style = info.map(|l| l.style).unwrap_or_default();
		let (rgb, factor, dashed) = link_look(style);
		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// Hovering dims edges outside the hovered neighbourhood
		let alpha = if is_highlighted || style != LinkStyle::Normal {
			0.9
		} else {
			0.9 - 0.6 * t
		};
		let width = line_width * factor;

		ctx.set_stroke_style_str(&format!("rgba({}, {})", rgb, alpha));
		ctx.set_line_width(width);
		if dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		ctx.set_fill_style_str(&format!("rgba({}, {})", rgb, alpha));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = info.and_then(|l| l.label.as_deref()) {
			// Weight sits just above the midpoint, offset along the normal
			let (mx, my) = ((x1 + x2) / 2.0 - uy * 8.0 / k, (y1 + y2) / 2.0 + ux * 8.0 / k);
			ctx.set_fill_style_str("#1b1b1b");
			ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, mx, my);
		}
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let (x, y) = (node.x() as f64, node.y() as f64);
		let lit = !has_highlight || state.is_highlighted(idx);
		let alpha = if lit { 1.0 } else { 1.0 - 0.6 * t };
		let radius = if state.is_hovered(idx) {
			NODE_RADIUS * (1.0 + 0.2 * t)
		} else {
			NODE_RADIUS
		};

		if state.is_hovered(idx) && t > 0.01 {
			let glow = NODE_RADIUS * (1.6 + 0.8 * t);
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(46, 134, 193, {})", 0.35 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(46, 134, 193, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("#DDEBF7");
		ctx.fill();
		ctx.set_stroke_style_str(&node.data.user_data.color);
		ctx.set_line_width(2.0 / k);
		ctx.stroke();

		let text = node
			.data
			.user_data
			.label
			.as_deref()
			.unwrap_or(&node.data.user_data.id);
		ctx.set_fill_style_str("#1b1b1b");
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(text, x, y);
		ctx.set_text_align("start");
		ctx.set_text_baseline("alphabetic");
		ctx.set_global_alpha(1.0);
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn solution_edges_are_thickest() {
		let (_, normal, dashed) = link_look(LinkStyle::Normal);
		let (_, changed, changed_dashed) = link_look(LinkStyle::Changed);
		let (rgb, solution, _) = link_look(LinkStyle::Solution);
		assert!(!dashed && changed_dashed);
		assert!(normal < changed && changed < solution);
		assert_eq!(rgb, "255, 0, 0");
		assert_eq!(ease_out_cubic(1.0), 1.0);
	}
}
