//! Deterministic auto-layout for freshly fetched graphs.
//!
//! Small graphs (one to five nodes) use hand-tuned templates: single, side by
//! side, T-shape, and two pyramids. Six or more nodes fall back to a
//! three-column grid. Positions depend only on the node count and each node's
//! index, so the same input always lands in the same place.

use serde::Deserialize;

use crate::model::{GraphNode, Position};

/// Anchor points and spacing for the layout templates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Horizontal center of every template.
	pub center_x: f64,
	/// Y of the top band.
	pub top_y: f64,
	/// Y of the bottom band.
	pub bottom_y: f64,
	/// Horizontal distance between neighbouring columns.
	pub spacing: f64,
	/// Vertical distance between grid rows.
	pub row_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			center_x: 520.0,
			top_y: 50.0,
			bottom_y: 320.0,
			spacing: 320.0,
			row_height: 270.0,
		}
	}
}

impl LayoutConfig {
	/// Vertical midpoint between the two bands, used by one- and two-node layouts.
	pub fn middle_y(&self) -> f64 {
		(self.top_y + self.bottom_y) / 2.0
	}

	/// Position of node `index` in a graph of `count` nodes.
	pub fn slot(&self, count: usize, index: usize) -> Position {
		let (cx, half) = (self.center_x, self.spacing / 2.0);
		// Left, center, right columns of the bottom band.
		let bottom_row = [cx - self.spacing, cx, cx + self.spacing];

		match (count, index) {
			(1, _) => Position::new(cx, self.middle_y()),
			(2, i) => Position::new(if i == 0 { cx - half } else { cx + half }, self.middle_y()),
			(3, 0) | (4, 0) => Position::new(cx, self.top_y),
			(3, i) => {
				let offset = self.spacing * 0.75;
				Position::new(if i == 1 { cx - offset } else { cx + offset }, self.bottom_y)
			}
			(4, i) => Position::new(bottom_row[i - 1], self.bottom_y),
			(5, i) if i < 2 => {
				Position::new(if i == 0 { cx - half } else { cx + half }, self.top_y)
			}
			(5, i) => Position::new(bottom_row[i - 2], self.bottom_y),
			(_, i) => {
				let (col, row) = ((i % 3) as f64, (i / 3) as f64);
				Position::new(cx + (col - 1.0) * self.spacing, self.top_y + row * self.row_height)
			}
		}
	}
}

/// Lay out `nodes` with the default anchors.
///
/// Returns new records in input order; only `position` differs from the input.
pub fn auto_arrange_nodes(nodes: &[GraphNode]) -> Vec<GraphNode> {
	arrange_with(&LayoutConfig::default(), nodes)
}

/// Lay out `nodes` with custom anchors.
pub fn arrange_with(config: &LayoutConfig, nodes: &[GraphNode]) -> Vec<GraphNode> {
	let count = nodes.len();
	nodes
		.iter()
		.enumerate()
		.map(|(index, node)| GraphNode {
			position: config.slot(count, index),
			..node.clone()
		})
		.collect()
}
