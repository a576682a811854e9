//! View transform, hit testing and pointer tracking for the service canvas.
//!
//! The canvas keeps its own copy of the workspace nodes so a drag can move a
//! card every frame without touching reactive state. The final position is
//! handed back to the workspace when the pointer is released.

use crate::model::{GraphEdge, GraphNode, Position};

/// Card size in world units. Node positions are the card's top-left corner.
pub const CARD_WIDTH: f64 = 260.0;
pub const CARD_HEIGHT: f64 = 150.0;

/// Zoom bounds for wheel zoom and fit.
pub const MIN_ZOOM: f64 = 0.35;
pub const MAX_ZOOM: f64 = 1.5;
const FIT_PADDING: f64 = 0.2;
/// Pointer travel, in pixels, below which a press counts as a click.
const CLICK_SLOP: f64 = 4.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal offset of the world origin, in screen pixels.
	pub x: f64,
	/// Vertical offset of the world origin, in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `MIN_ZOOM..=MAX_ZOOM`).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// Tracks an in-progress card drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Card under the press, if any.
	pub node_id: Option<String>,
	/// Press position, in screen pixels.
	pub start_x: f64,
	pub start_y: f64,
	/// Card position when the press started.
	pub node_start: Position,
	/// Travel exceeded the click slop.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The press landed on empty canvas.
	pub active: bool,
	/// Press position, in screen pixels.
	pub start_x: f64,
	pub start_y: f64,
	/// Transform offset when the press started.
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Travel exceeded the click slop.
	pub moved: bool,
}

/// Tracks an edge being drawn out of a card (Shift+drag).
#[derive(Clone, Debug, Default)]
pub struct LinkState {
	/// Card the edge starts from; `None` when no edge is being drawn.
	pub source: Option<String>,
	/// Last pointer position, in screen pixels.
	pub cursor_x: f64,
	pub cursor_y: f64,
}

/// What a finished pointer gesture means for the rest of the app.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerRelease {
	/// A click on a card, or on empty canvas (`None`).
	Select(Option<String>),
	/// A card was dragged to a new position.
	Moved(String, Position),
	/// An edge was drawn from the first card to the second.
	Connect(String, String),
	/// Pan, cancelled link or a press released off the canvas.
	Nothing,
}

/// Everything the render loop and the mouse handlers share.
pub struct CanvasState {
	/// Local copy of the workspace nodes; drags move these directly.
	pub nodes: Vec<GraphNode>,
	/// Edges from the workspace.
	pub edges: Vec<GraphEdge>,
	/// Selected node id, mirrored from the UI store.
	pub selected: Option<String>,
	/// Card under the pointer.
	pub hovered: Option<String>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Card drag in progress.
	pub drag: DragState,
	/// Canvas pan in progress.
	pub pan: PanState,
	/// Edge being drawn with Shift+drag.
	pub link: LinkState,
	/// Canvas size in CSS pixels.
	pub width: f64,
	pub height: f64,
	/// Fit the view on the next frame, once the latest nodes are synced.
	pub pending_fit: bool,
	/// Something changed since the last frame was drawn.
	pub dirty: bool,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			selected: None,
			hovered: None,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			link: LinkState::default(),
			width,
			height,
			pending_fit: true,
			dirty: true,
		}
	}

	/// Replace the drawn graph. A card being dragged keeps its live position.
	pub fn sync(&mut self, nodes: &[GraphNode], edges: &[GraphEdge], selected: Option<String>) {
		let dragged = self
			.drag
			.node_id
			.as_ref()
			.and_then(|id| self.nodes.iter().find(|n| &n.id == id))
			.map(|n| (n.id.clone(), n.position));

		self.nodes = nodes.to_vec();
		self.edges = edges.to_vec();
		self.selected = selected;

		if let Some((id, position)) = dragged {
			match self.nodes.iter_mut().find(|n| n.id == id) {
				Some(node) => node.position = position,
				None => self.drag = DragState::default(),
			}
		}
		if self
			.link
			.source
			.as_ref()
			.is_some_and(|id| !self.nodes.iter().any(|n| &n.id == id))
		{
			self.link = LinkState::default();
		}
		if self
			.hovered
			.as_ref()
			.is_some_and(|id| !self.nodes.iter().any(|n| &n.id == id))
		{
			self.hovered = None;
		}
		self.dirty = true;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.dirty = true;
	}

	/// Convert a screen point to world coordinates.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Index of the topmost card under a screen point.
	pub fn card_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.nodes
			.iter()
			.rposition(|node| card_contains(node.position, wx, wy))
	}

	/// Frame every card with some padding, within the zoom limits.
	///
	/// An empty graph leaves the view where it is.
	pub fn fit_view(&mut self) {
		self.pending_fit = false;
		let Some((min_x, min_y, max_x, max_y)) = bounds(&self.nodes) else {
			return;
		};
		let (w, h) = (max_x - min_x, max_y - min_y);
		let k = (self.width / (w * (1.0 + FIT_PADDING)))
			.min(self.height / (h * (1.0 + FIT_PADDING)))
			.clamp(MIN_ZOOM, MAX_ZOOM);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
		self.dirty = true;
	}

	/// Wheel zoom around a screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.dirty = true;
	}

	/// Start a card drag, or a pan when the press is on empty canvas.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		match self.card_at(sx, sy) {
			Some(idx) => {
				let node = &self.nodes[idx];
				self.drag = DragState {
					node_id: Some(node.id.clone()),
					start_x: sx,
					start_y: sy,
					node_start: node.position,
					moved: false,
				};
			}
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
					moved: false,
				};
			}
		}
	}

	/// Start drawing an edge from the card under the pointer.
	///
	/// Off-card presses behave like [`CanvasState::pointer_down`].
	pub fn link_down(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.card_at(sx, sy) else {
			self.pointer_down(sx, sy);
			return;
		};
		self.link = LinkState {
			source: Some(self.nodes[idx].id.clone()),
			cursor_x: sx,
			cursor_y: sy,
		};
		self.dirty = true;
	}

	/// Advance the active gesture, or track hover when idle.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if self.link.source.is_some() {
			self.link.cursor_x = sx;
			self.link.cursor_y = sy;
			self.hovered = self.card_at(sx, sy).map(|idx| self.nodes[idx].id.clone());
			self.dirty = true;
		} else if let Some(id) = self.drag.node_id.clone() {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			self.drag.moved |= dx.hypot(dy) > CLICK_SLOP;
			if self.drag.moved {
				let k = self.transform.k;
				let target = Position::new(
					self.drag.node_start.x + dx / k,
					self.drag.node_start.y + dy / k,
				);
				if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
					node.position = target;
					self.dirty = true;
				}
			}
		} else if self.pan.active {
			let (dx, dy) = (sx - self.pan.start_x, sy - self.pan.start_y);
			self.pan.moved |= dx.hypot(dy) > CLICK_SLOP;
			self.transform.x = self.pan.transform_start_x + dx;
			self.transform.y = self.pan.transform_start_y + dy;
			self.dirty = true;
		} else {
			let hovered = self.card_at(sx, sy).map(|idx| self.nodes[idx].id.clone());
			if hovered != self.hovered {
				self.hovered = hovered;
				self.dirty = true;
			}
		}
	}

	/// Finish the current gesture and report what it amounted to.
	pub fn pointer_up(&mut self) -> PointerRelease {
		let drag = std::mem::take(&mut self.drag);
		let pan = std::mem::take(&mut self.pan);
		let link = std::mem::take(&mut self.link);

		if let Some(source) = link.source {
			self.dirty = true;
			return match self.card_at(link.cursor_x, link.cursor_y) {
				Some(idx) if self.nodes[idx].id != source => {
					PointerRelease::Connect(source, self.nodes[idx].id.clone())
				}
				_ => PointerRelease::Nothing,
			};
		}
		if let Some(id) = drag.node_id {
			if !drag.moved {
				return PointerRelease::Select(Some(id));
			}
			return match self.nodes.iter().find(|n| n.id == id) {
				Some(node) => PointerRelease::Moved(id, node.position),
				None => PointerRelease::Nothing,
			};
		}
		if pan.active && !pan.moved {
			return PointerRelease::Select(None);
		}
		PointerRelease::Nothing
	}

	/// The pointer left the canvas: abandon gestures without selecting or
	/// connecting.
	pub fn pointer_leave(&mut self) -> PointerRelease {
		let release = match self.pointer_up() {
			moved @ PointerRelease::Moved(..) => moved,
			_ => PointerRelease::Nothing,
		};
		if self.hovered.take().is_some() {
			self.dirty = true;
		}
		release
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// Whether world point `(wx, wy)` is inside a card at `position`.
pub fn card_contains(position: Position, wx: f64, wy: f64) -> bool {
	wx >= position.x
		&& wx <= position.x + CARD_WIDTH
		&& wy >= position.y
		&& wy <= position.y + CARD_HEIGHT
}

/// World-space bounding box `(min_x, min_y, max_x, max_y)` of all cards.
fn bounds(nodes: &[GraphNode]) -> Option<(f64, f64, f64, f64)> {
	nodes.iter().map(|n| n.position).fold(None, |acc, p| {
		let (x0, y0, x1, y1) = acc.unwrap_or((p.x, p.y, p.x + CARD_WIDTH, p.y + CARD_HEIGHT));
		Some((
			x0.min(p.x),
			y0.min(p.y),
			x1.max(p.x + CARD_WIDTH),
			y1.max(p.y + CARD_HEIGHT),
		))
	})
}

/// Orthogonal route from the bottom center of `source` to the top center of
/// `target`, turning halfway down.
pub fn edge_route(source: Position, target: Position) -> [(f64, f64); 4] {
	let start = (source.x + CARD_WIDTH / 2.0, source.y + CARD_HEIGHT);
	let end = (target.x + CARD_WIDTH / 2.0, target.y);
	let mid_y = (start.1 + end.1) / 2.0;
	[start, (start.0, mid_y), (end.0, mid_y), end]
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::{NodeKind, NodeMetrics, NodeStatus, Scale};

	fn card(id: &str, x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			position: Position::new(x, y),
			kind: NodeKind::Service,
			name: id.into(),
			description: String::new(),
			status: NodeStatus::Healthy,
			cost_per_hour: 0.0,
			metrics: NodeMetrics::default(),
			scale: Scale::default(),
			provider: "aws".into(),
			accent: None,
		}
	}

	fn state_with(nodes: &[GraphNode]) -> CanvasState {
		let mut state = CanvasState::new(1000.0, 800.0);
		state.sync(nodes, &[], None);
		state
	}

	#[test]
	fn hit_testing_prefers_the_topmost_card() {
		let state = state_with(&[card("below", 0.0, 0.0), card("above", 100.0, 50.0)]);
		assert_eq!(state.card_at(150.0, 100.0), Some(1));
		assert_eq!(state.card_at(10.0, 10.0), Some(0));
		assert_eq!(state.card_at(900.0, 700.0), None);
	}

	#[test]
	fn hit_testing_follows_the_view_transform() {
		let mut state = state_with(&[card("a", 0.0, 0.0)]);
		state.transform = ViewTransform { x: 100.0, y: 100.0, k: 0.5 };
		assert_eq!(state.card_at(90.0, 90.0), None);
		assert_eq!(state.card_at(230.0, 175.0), Some(0));
	}

	#[test]
	fn fit_view_centers_and_clamps_zoom() {
		let mut state = state_with(&[card("solo", 520.0, 185.0)]);
		state.fit_view();
		assert_eq!(state.transform, ViewTransform { x: -475.0, y: 10.0, k: 1.5 });
		assert!(!state.pending_fit);
	}

	#[test]
	fn fit_view_zooms_out_for_wide_graphs() {
		let nodes: Vec<_> = (0..10).map(|i| card(&i.to_string(), i as f64 * 320.0, 0.0)).collect();
		let mut state = state_with(&nodes);
		state.fit_view();
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn fit_view_on_empty_graph_keeps_the_view() {
		let mut state = state_with(&[]);
		state.transform = ViewTransform { x: 12.0, y: 34.0, k: 0.8 };
		state.fit_view();
		assert_eq!(state.transform, ViewTransform { x: 12.0, y: 34.0, k: 0.8 });
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let mut state = state_with(&[]);
		for _ in 0..50 {
			state.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..50 {
			state.zoom_at(0.0, 0.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn dragging_a_card_reports_its_new_position() {
		let mut state = state_with(&[card("a", 0.0, 0.0)]);
		state.transform.k = 0.5;
		state.pointer_down(10.0, 10.0);
		state.pointer_move(60.0, 30.0);
		assert_eq!(
			state.pointer_up(),
			PointerRelease::Moved("a".into(), Position::new(100.0, 40.0))
		);
	}

	#[test]
	fn a_press_without_travel_selects() {
		let mut state = state_with(&[card("a", 0.0, 0.0)]);
		state.pointer_down(10.0, 10.0);
		state.pointer_move(11.0, 11.0);
		assert_eq!(state.pointer_up(), PointerRelease::Select(Some("a".into())));
		assert_eq!(state.node("a").unwrap().position, Position::new(0.0, 0.0));

		state.pointer_down(600.0, 600.0);
		assert_eq!(state.pointer_up(), PointerRelease::Select(None));
	}

	#[test]
	fn panning_moves_the_view_without_selecting() {
		let mut state = state_with(&[]);
		state.pointer_down(100.0, 100.0);
		state.pointer_move(150.0, 80.0);
		assert_eq!(state.transform.x, 50.0);
		assert_eq!(state.transform.y, -20.0);
		assert_eq!(state.pointer_up(), PointerRelease::Nothing);
	}

	#[test]
	fn sync_keeps_the_dragged_card_under_the_pointer() {
		let mut state = state_with(&[card("a", 0.0, 0.0), card("b", 400.0, 0.0)]);
		state.pointer_down(10.0, 10.0);
		state.pointer_move(110.0, 10.0);
		state.sync(&[card("a", 0.0, 0.0), card("b", 400.0, 300.0)], &[], Some("b".into()));
		assert_eq!(state.node("a").unwrap().position, Position::new(100.0, 0.0));
		assert_eq!(state.node("b").unwrap().position, Position::new(400.0, 300.0));
	}

	#[test]
	fn sync_drops_a_drag_whose_card_vanished() {
		let mut state = state_with(&[card("a", 0.0, 0.0)]);
		state.pointer_down(10.0, 10.0);
		state.pointer_move(110.0, 10.0);
		state.sync(&[], &[], None);
		assert_eq!(state.pointer_up(), PointerRelease::Nothing);
	}

	#[test]
	fn leaving_mid_drag_still_commits_the_move() {
		let mut state = state_with(&[card("a", 0.0, 0.0)]);
		state.pointer_move(10.0, 10.0);
		assert_eq!(state.hovered.as_deref(), Some("a"));
		state.pointer_down(10.0, 10.0);
		state.pointer_move(40.0, 10.0);
		assert_eq!(
			state.pointer_leave(),
			PointerRelease::Moved("a".into(), Position::new(30.0, 0.0))
		);
		assert_eq!(state.hovered, None);
	}

	#[test]
	fn shift_dragging_between_cards_connects_them() {
		let mut state = state_with(&[card("api", 0.0, 0.0), card("db", 400.0, 0.0)]);
		state.link_down(10.0, 10.0);
		state.pointer_move(450.0, 60.0);
		assert_eq!(state.hovered.as_deref(), Some("db"));
		// The source card stays put while the edge is drawn.
		assert_eq!(state.node("api").unwrap().position, Position::new(0.0, 0.0));
		assert_eq!(
			state.pointer_up(),
			PointerRelease::Connect("api".into(), "db".into())
		);
		assert!(state.link.source.is_none());
	}

	#[test]
	fn links_dropped_off_target_do_nothing() {
		let mut state = state_with(&[card("api", 0.0, 0.0), card("db", 400.0, 0.0)]);
		state.link_down(10.0, 10.0);
		state.pointer_move(900.0, 700.0);
		assert_eq!(state.pointer_up(), PointerRelease::Nothing);

		state.link_down(10.0, 10.0);
		state.pointer_move(20.0, 20.0);
		assert_eq!(state.pointer_up(), PointerRelease::Nothing);

		state.link_down(10.0, 10.0);
		state.pointer_move(450.0, 60.0);
		assert_eq!(state.pointer_leave(), PointerRelease::Nothing);
	}

	#[test]
	fn shift_press_on_empty_canvas_pans() {
		let mut state = state_with(&[card("api", 0.0, 0.0)]);
		state.link_down(600.0, 600.0);
		assert!(state.link.source.is_none());
		state.pointer_move(620.0, 600.0);
		assert_eq!(state.transform.x, 20.0);
	}

	#[test]
	fn edges_route_from_bottom_to_top_center() {
		let route = edge_route(Position::new(0.0, 0.0), Position::new(320.0, 270.0));
		assert_eq!(
			route,
			[(130.0, 150.0), (130.0, 210.0), (450.0, 210.0), (450.0, 270.0)]
		);
	}
}
