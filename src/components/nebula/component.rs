use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::NebulaState;
use crate::config::NebulaConfig;
use crate::records::{ContentRecord, RecordRef};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Shared slots of the render loop. The frame closure holds a handle to its
/// own slot, so the loop only goes away once these are emptied.
struct FrameLoop {
	state: Rc<RefCell<Option<NebulaState>>>,
	animate: FrameCallback,
	resize_cb: FrameCallback,
	frame: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	/// Empties every slot. Returns the pending frame id and the resize
	/// listener, which still have to be unregistered from the window.
	fn release(&self) -> (Option<i32>, Option<Closure<dyn FnMut()>>) {
		let pending = self.frame.take();
		let resize = self.resize_cb.borrow_mut().take();
		self.animate.borrow_mut().take();
		self.state.borrow_mut().take();
		(pending, resize)
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn local_coords(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed view of a relevance-ordered result list.
///
/// The first record is pinned at the center; clicking any node calls
/// `on_select` with that node's record.
#[component]
pub fn NebulaCanvas(
	#[prop(into)] data: Signal<Vec<ContentRecord>>,
	on_select: impl Fn(RecordRef) + 'static,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(default = NebulaConfig::default())] config: NebulaConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NebulaState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (state_init, animate_init, resize_cb_init, frame_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), frame.clone());

	let teardown = StoredValue::new_local(FrameLoop {
		state: state.clone(),
		animate: animate.clone(),
		resize_cb: resize_cb.clone(),
		frame: frame.clone(),
	});
	on_cleanup(move || {
		teardown.try_with_value(|handles| {
			let (pending, resize) = handles.release();
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(id) = pending {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = resize {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		});
	});

	Effect::new(move |_| {
		let records = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		if state_init.borrow().is_none() {
			let Some(window) = web_sys::window() else {
				return;
			};
			let (w, h) = if fullscreen {
				window_size(&window).unwrap_or((800.0, 600.0))
			} else {
				(
					width.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_width() as f64)
							.unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						canvas
							.parent_element()
							.map(|p| p.client_height() as f64)
							.unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let Some(ctx) = canvas
				.get_context("2d")
				.ok()
				.flatten()
				.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
			else {
				warn!("nebula: no 2d context, graph disabled");
				return;
			};
			*state_init.borrow_mut() = Some(NebulaState::new(w, h, config.clone()));

			if fullscreen {
				let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
				*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
					let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
						return;
					};
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let Some(ref mut s) = *state_resize.borrow_mut() {
						s.resize(nw, nh);
					}
				}));
				if let Some(ref cb) = *resize_cb_init.borrow() {
					let _ = window
						.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}

			let (state_anim, animate_inner, canvas_anim, frame_anim) = (
				state_init.clone(),
				animate_init.clone(),
				canvas.clone(),
				frame_init.clone(),
			);
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				// The host page tore the canvas down: let the loop lapse.
				frame_anim.set(None);
				if !canvas_anim.is_connected() {
					if let Some(ref mut s) = *state_anim.borrow_mut() {
						s.animation_running = false;
					}
					return;
				}
				if let Some(ref mut s) = *state_anim.borrow_mut() {
					if s.animation_running {
						s.tick(0.016);
					}
					render::render(s, &ctx);
				}
				if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window())
				{
					frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}

		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.replace(&records);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		// Release the borrow before handing control to the host.
		let clicked = state_mu
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.pointer_up());
		if let Some(record) = clicked {
			on_select(record);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = local_coords(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="nebula-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
