//! Leptos component wrapping the service canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for card dragging, Shift+drag edge drawing, panning, zooming and
//! selection. A
//! `requestAnimationFrame` loop redraws whenever the state is marked dirty.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::{CanvasState, PointerRelease};
use super::theme::CanvasTheme;
use crate::model::Position;
use crate::workspace::GraphWorkspace;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Canvas size: the parent element's box, or a fallback before layout.
fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders the workspace graph as draggable cards on a canvas.
///
/// The canvas fills its parent and follows window resizes. Bump `fit_requests`
/// to frame every card; the view is also fitted once on mount.
/// Interactive canvas showing the workspace as cards joined by edges.
#[component]
pub fn GraphCanvas(
	/// Graph to draw. Resynced whenever it changes.
	#[prop(into)]
	workspace: Signal<GraphWorkspace>,
	/// Id of the highlighted card.
	#[prop(into)]
	selected: Signal<Option<String>>,
	/// Bumping this counter fits the view to the cards.
	#[prop(into)]
	fit_requests: Signal<u32>,
	/// A card was clicked (`Some`) or the empty canvas was clicked (`None`).
	on_select: Callback<Option<String>>,
	/// A card was dropped at a new position.
	on_move: Callback<(String, Position)>,
	/// An edge was drawn with Shift+drag: `(source, target)`.
	on_connect: Callback<(String, String)>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("service-canvas: 2d canvas context unavailable");
				return;
			}
		};

		let mut initial = CanvasState::new(w, h);
		workspace.with_untracked(|ws| {
			initial.sync(ws.nodes(), ws.edges(), selected.get_untracked())
		});
		*state_init.borrow_mut() = Some(initial);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let theme = CanvasTheme::default();
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.pending_fit {
					s.fit_view();
				}
				if s.dirty {
					render::render(s, &ctx, &theme);
					s.dirty = false;
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_sync = state.clone();
	Effect::new(move |_| {
		let selected = selected.get();
		workspace.with(|ws| {
			if let Some(ref mut s) = *state_sync.borrow_mut() {
				s.sync(ws.nodes(), ws.edges(), selected);
			}
		});
	});

	let state_fit = state.clone();
	Effect::new(move |previous: Option<u32>| {
		let requests = fit_requests.get();
		if previous.is_some_and(|p| p != requests) {
			if let Some(ref mut s) = *state_fit.borrow_mut() {
				s.pending_fit = true;
			}
		}
		requests
	});

	let dispatch = move |release: PointerRelease| match release {
		PointerRelease::Select(id) => on_select.run(id),
		PointerRelease::Moved(id, position) => on_move.run((id, position)),
		PointerRelease::Connect(source, target) => on_connect.run((source, target)),
		PointerRelease::Nothing => {}
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if ev.shift_key() {
				s.link_down(x, y);
			} else {
				s.pointer_down(x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	// Release the borrow before running callbacks: they update signals, which
	// re-enter the sync effect.
	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let release = state_mu.borrow_mut().as_mut().map(CanvasState::pointer_up);
		if let Some(release) = release {
			dispatch(release);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let release = state_ml.borrow_mut().as_mut().map(CanvasState::pointer_leave);
		if let Some(release) = release {
			dispatch(release);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="service-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
