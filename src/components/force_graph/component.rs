use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;
use crate::config::AppConfig;

type Shared<T> = Rc<RefCell<Option<T>>>;

/// Pixel distance after which a press on a node counts as a drag, not a click.
const CLICK_SLOP: f64 = 4.0;

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Canvas showing the weighted graph. Re-styles in place when only the
/// highlights change and re-lays out when nodes or edges change.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	/// Called with the node id when a node is clicked without dragging.
	#[prop(optional, into)]
	on_select: Option<Callback<String>>,
) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let graph_data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		{
			let mut slot = state_init.borrow_mut();
			match slot.as_mut() {
				Some(s) if s.same_structure(&graph_data) => {
					s.restyle(&graph_data);
					return;
				}
				Some(s) => {
					debug!("Graph structure changed, laying out {} nodes", graph_data.nodes.len());
					let (w, h) = (s.width, s.height);
					let transform = s.transform.clone();
					let mut next = ForceGraphState::new(&graph_data, w, h, &config.simulation);
					next.transform = transform;
					*slot = Some(next);
					return;
				}
				None => {}
			}
		}

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		});
		let h = height.unwrap_or(600.0);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph_data, w, h, &config.simulation));

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(win)) = (animate_init.borrow().as_ref(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (sx, sy) = (x - s.drag.start_x, y - s.drag.start_y);
					if sx.hypot(sy) > CLICK_SLOP {
						s.drag.moved = true;
					}
					let (dx, dy) = (sx / s.transform.k, sy / s.transform.k);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut clicked = None;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active && !s.drag.moved {
				clicked = s.drag.node_idx.and_then(|idx| s.node_id(idx));
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		// Run outside the borrow: the callback may trigger a restyle
		if let (Some(id), Some(cb)) = (clicked, on_select) {
			cb.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
