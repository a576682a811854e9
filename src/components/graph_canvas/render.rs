//! Canvas rendering for the service graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background fill (screen space)
//! 2. Dot grid, then edges, then active edges (world space)
//! 3. Cards in workspace order, the selected card last
//! 4. The edge being drawn with Shift+drag, if any

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::ScaledValues;
use super::state::{CARD_HEIGHT, CARD_WIDTH, CanvasState, edge_route};
use super::theme::{CanvasTheme, Color};
use crate::model::{GraphEdge, GraphNode};

const CARD_RADIUS: f64 = 16.0;
const PADDING: f64 = 14.0;

/// Renders the complete canvas.
pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &CanvasTheme) {
	let scale = ScaledValues::new(state.transform.k);

	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_dots(state, ctx, &scale, theme);
	draw_edges(state, ctx, &scale, theme);
	draw_cards(state, ctx, &scale, theme);
	draw_link(state, ctx, &scale, theme);

	ctx.restore();
}

fn draw_dots(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	let (x0, y0) = state.screen_to_world(0.0, 0.0);
	let (x1, y1) = state.screen_to_world(state.width, state.height);
	let gap = scale.dot_gap;
	let half = scale.dot_size / 2.0;

	ctx.set_fill_style_str(&theme.dots.to_css());
	let mut x = (x0 / gap).floor() * gap;
	while x <= x1 {
		let mut y = (y0 / gap).floor() * gap;
		while y <= y1 {
			ctx.fill_rect(x - half, y - half, scale.dot_size, scale.dot_size);
			y += gap;
		}
		x += gap;
	}
}

fn touches_selection(state: &CanvasState, edge: &GraphEdge) -> bool {
	state.selected.as_deref().is_some_and(|id| edge.touches(id))
}

fn draw_edges(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	// Active edges go on top of the rest.
	let (active, idle): (Vec<&GraphEdge>, Vec<&GraphEdge>) =
		state.edges.iter().partition(|e| touches_selection(state, e));

	for (edges, color, width) in [
		(idle, theme.edge, scale.edge_width),
		(active, theme.edge_active, scale.edge_width * 1.5),
	] {
		for edge in edges {
			let source = state.node(&edge.source);
			let target = state.node(&edge.target);
			let (Some(source), Some(target)) = (source, target) else {
				continue;
			};
			draw_edge(ctx, scale, source, target, color, width);
		}
	}
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	source: &GraphNode,
	target: &GraphNode,
	color: Color,
	width: f64,
) {
	let route = edge_route(source.position, target.position);
	let [start, bend_a, bend_b, end] = route;
	let css = color.to_css();

	// Stop the line short of the arrow head.
	let dir = if end.1 >= bend_b.1 { 1.0 } else { -1.0 };
	let line_end = (end.0, end.1 - dir * scale.arrow_size);

	ctx.set_stroke_style_str(&css);
	ctx.set_line_width(width);
	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	ctx.line_to(bend_a.0, bend_a.1);
	ctx.line_to(bend_b.0, bend_b.1);
	ctx.line_to(line_end.0, line_end.1);
	ctx.stroke();

	let back = end.1 - dir * scale.arrow_size;
	let half = scale.arrow_size * 0.5;
	ctx.set_fill_style_str(&css);
	ctx.begin_path();
	ctx.move_to(end.0, end.1);
	ctx.line_to(end.0 - half, back);
	ctx.line_to(end.0 + half, back);
	ctx.close_path();
	ctx.fill();
}

fn draw_cards(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	let selected = state.selected.as_deref();
	for node in state.nodes.iter().filter(|n| Some(n.id.as_str()) != selected) {
		let hovered = state.hovered.as_deref() == Some(node.id.as_str());
		draw_card(ctx, scale, theme, node, false, hovered);
	}
	if let Some(node) = selected.and_then(|id| state.node(id)) {
		draw_card(ctx, scale, theme, node, true, false);
	}
}

/// Straight line from the link's source card to the pointer.
fn draw_link(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
) {
	let Some(source) = state.link.source.as_deref().and_then(|id| state.node(id)) else {
		return;
	};
	let start = (
		source.position.x + CARD_WIDTH / 2.0,
		source.position.y + CARD_HEIGHT,
	);
	let end = state.screen_to_world(state.link.cursor_x, state.link.cursor_y);
	let css = theme.edge_active.to_css();

	ctx.set_stroke_style_str(&css);
	ctx.set_line_width(scale.edge_width * 1.5);
	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	ctx.line_to(end.0, end.1);
	ctx.stroke();

	ctx.set_fill_style_str(&css);
	ctx.begin_path();
	let _ = ctx.arc(end.0, end.1, scale.arrow_size * 0.5, 0.0, 2.0 * PI);
	ctx.fill();
}

/// Trace a rounded rectangle path.
fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_card(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &CanvasTheme,
	node: &GraphNode,
	selected: bool,
	hovered: bool,
) {
	let (x, y) = (node.position.x, node.position.y);
	let style = theme.kind(node.kind);

	if selected {
		let (w, h) = (CARD_WIDTH + 8.0, CARD_HEIGHT + 8.0);
		rounded_rect(ctx, x - 4.0, y - 4.0, w, h, CARD_RADIUS + 4.0);
		ctx.set_fill_style_str(&style.accent.with_alpha(0.25).to_css());
		ctx.fill();
	}

	rounded_rect(ctx, x, y, CARD_WIDTH, CARD_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str(&theme.card_base.to_css());
	ctx.fill();
	ctx.set_fill_style_str(&style.fill.to_css());
	ctx.fill();

	let border = match (selected, hovered) {
		(true, _) => style.selected_border,
		(false, true) => style.border.lighten(0.3),
		(false, false) => style.border,
	};
	ctx.set_stroke_style_str(&border.to_css());
	ctx.set_line_width(if selected { 2.0 } else { 1.5 });
	ctx.stroke();

	draw_header(ctx, theme, node, x, y);

	if scale.detail_alpha > 0.0 {
		ctx.set_global_alpha(scale.detail_alpha);
		draw_metrics(ctx, theme, node, x, y + 62.0);
		draw_scale_bar(ctx, theme, node, x, y + 96.0);
		draw_footer(ctx, theme, node, x, y + CARD_HEIGHT - 16.0);
		ctx.set_global_alpha(1.0);
	}
}

fn draw_header(
	ctx: &CanvasRenderingContext2d,
	theme: &CanvasTheme,
	node: &GraphNode,
	x: f64,
	y: f64,
) {
	let accent = theme.kind(node.kind).accent;

	// Icon well
	rounded_rect(ctx, x + PADDING, y + 12.0, 30.0, 30.0, 8.0);
	ctx.set_fill_style_str(&accent.with_alpha(0.18).to_css());
	ctx.fill();
	ctx.set_fill_style_str(&accent.to_css());
	ctx.set_font(&theme.font(700, 14.0));
	let initial: String = node.name.chars().take(1).collect();
	let _ = ctx.fill_text(&initial.to_uppercase(), x + PADDING + 10.0, y + 32.0);

	ctx.set_fill_style_str(&theme.text.to_css());
	ctx.set_font(&theme.font(600, 14.0));
	let _ = ctx.fill_text_with_max_width(&node.name, x + PADDING + 40.0, y + 25.0, 120.0);

	ctx.set_fill_style_str(&accent.to_css());
	ctx.set_font(&theme.font(700, 9.0));
	let _ = ctx.fill_text(
		&format!("● {}", node.kind.label().to_uppercase()),
		x + PADDING + 40.0,
		y + 39.0,
	);

	// Cost pill
	let cost = format!("${:.2}/HR", node.cost_per_hour);
	let pill_w = 70.0;
	let pill_x = x + CARD_WIDTH - PADDING - pill_w;
	rounded_rect(ctx, pill_x, y + 15.0, pill_w, 22.0, 11.0);
	ctx.set_fill_style_str(&accent.with_alpha(0.15).to_css());
	ctx.fill();
	ctx.set_fill_style_str(&accent.to_css());
	ctx.set_font(&theme.font(600, 10.0));
	let _ = ctx.fill_text_with_max_width(&cost, pill_x + 9.0, y + 30.0, pill_w - 14.0);

	ctx.set_stroke_style_str(&theme.kind(node.kind).border.to_css());
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(x, y + 52.0);
	ctx.line_to(x + CARD_WIDTH, y + 52.0);
	ctx.stroke();
}

fn draw_metrics(
	ctx: &CanvasRenderingContext2d,
	theme: &CanvasTheme,
	node: &GraphNode,
	x: f64,
	y: f64,
) {
	let m = &node.metrics;
	let cells = [
		("CPU", format!("{:.2}", m.cpu)),
		("MEM", format!("{:.2} GB", m.memory)),
		("DISK", format!("{:.0} GB", m.disk)),
		("REGION", m.region.clone()),
	];
	let cell_w = (CARD_WIDTH - 2.0 * PADDING) / cells.len() as f64;

	for (i, (label, value)) in cells.iter().enumerate() {
		let cx = x + PADDING + i as f64 * cell_w;
		ctx.set_fill_style_str(&theme.text_muted.to_css());
		ctx.set_font(&theme.font(600, 8.0));
		let _ = ctx.fill_text(label, cx, y + 8.0);
		ctx.set_fill_style_str(&theme.text.to_css());
		ctx.set_font(&theme.font(500, 11.0));
		let _ = ctx.fill_text_with_max_width(value, cx, y + 24.0, cell_w - 4.0);
	}
}

fn draw_scale_bar(
	ctx: &CanvasRenderingContext2d,
	theme: &CanvasTheme,
	node: &GraphNode,
	x: f64,
	y: f64,
) {
	let track_w = CARD_WIDTH - 2.0 * PADDING - 40.0;
	let fraction = node.scale.get() as f64 / 100.0;
	let fill = node
		.accent
		.as_deref()
		.and_then(Color::parse)
		.unwrap_or(theme.kind(node.kind).accent);

	rounded_rect(ctx, x + PADDING, y, track_w, 6.0, 3.0);
	ctx.set_fill_style_str(&theme.track.to_css());
	ctx.fill();

	if fraction > 0.0 {
		rounded_rect(ctx, x + PADDING, y, (track_w * fraction).max(6.0), 6.0, 3.0);
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(x + PADDING + track_w * fraction, y + 3.0, 6.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.text.to_css());
	ctx.fill();

	ctx.set_fill_style_str(&theme.text_muted.to_css());
	ctx.set_font(&theme.font(600, 10.0));
	let _ = ctx.fill_text(
		&format!("{}%", node.scale.get()),
		x + CARD_WIDTH - PADDING - 30.0,
		y + 7.0,
	);
}

fn draw_footer(
	ctx: &CanvasRenderingContext2d,
	theme: &CanvasTheme,
	node: &GraphNode,
	x: f64,
	y: f64,
) {
	let status = theme.status(node.status);
	rounded_rect(ctx, x + PADDING, y - 13.0, 84.0, 20.0, 10.0);
	ctx.set_fill_style_str(&status.with_alpha(0.2).to_css());
	ctx.fill();

	ctx.begin_path();
	let _ = ctx.arc(x + PADDING + 11.0, y - 3.0, 3.5, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&status.to_css());
	ctx.fill();
	ctx.set_font(&theme.font(700, 10.0));
	let _ = ctx.fill_text(node.status.label(), x + PADDING + 20.0, y + 1.0);

	ctx.set_fill_style_str(&theme.text_muted.to_css());
	ctx.set_font(&theme.font(700, 10.0));
	let _ = ctx.fill_text(
		&node.provider.to_uppercase(),
		x + CARD_WIDTH - PADDING - 60.0,
		y + 1.0,
	);
}
