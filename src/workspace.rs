//! Editable node and edge collections for the graph on screen.
//!
//! The workspace is loaded from a fetched `GraphData` and then edited locally
//! by user actions; nothing is written back to the mock backend. Node ids stay
//! unique and no edge ever points at a node that is gone.

use log::debug;
use thiserror::Error;

use crate::layout::LayoutConfig;
use crate::model::{GraphData, GraphEdge, GraphNode, NodeStatus, Position, Scale};

/// Rejected workspace edits.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphEditError {
	/// Added node reuses an id.
	#[error("a node with id {0:?} already exists")]
	DuplicateNode(String),
	/// Edit names a node that is not in the workspace.
	#[error("no node with id {0:?}")]
	UnknownNode(String),
	/// Edge from a node to itself.
	#[error("node {0:?} cannot be connected to itself")]
	SelfLoop(String),
	/// The two nodes are already connected in that direction.
	#[error("edge {from:?} -> {to:?} already exists")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},
}

/// Partial update from the inspector. `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodePatch {
	/// New display name.
	pub name: Option<String>,
	/// New description.
	pub description: Option<String>,
	/// Clamped to `0..=100` when applied.
	pub scale: Option<i64>,
	/// New health status.
	pub status: Option<NodeStatus>,
}

/// The graph currently on screen, with local edits applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphWorkspace {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
}

impl From<GraphData> for GraphWorkspace {
	fn from(data: GraphData) -> Self {
		Self {
			nodes: data.nodes,
			edges: data.edges,
		}
	}
}

impl GraphWorkspace {
	/// Swap in a freshly fetched graph, dropping all local edits.
	pub fn replace(&mut self, data: GraphData) {
		*self = Self::from(data);
	}

	/// Drop every node and edge.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Whether there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Whether a node with `id` exists.
	pub fn contains(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Sum of every node's hourly cost.
	pub fn total_cost_per_hour(&self) -> f64 {
		self.nodes.iter().map(|n| n.cost_per_hour).sum()
	}

	/// Append a node. Ids must be unique.
	pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphEditError> {
		if self.contains(&node.id) {
			return Err(GraphEditError::DuplicateNode(node.id));
		}
		debug!("workspace: added node {:?}", node.id);
		self.nodes.push(node);
		Ok(())
	}

	/// Remove a node together with every edge that touches it.
	pub fn remove_node(&mut self, id: &str) -> Option<GraphNode> {
		let index = self.nodes.iter().position(|n| n.id == id)?;
		let node = self.nodes.remove(index);
		let before = self.edges.len();
		self.edges.retain(|edge| !edge.touches(id));
		debug!(
			"workspace: removed node {id:?} and {} edge(s)",
			before - self.edges.len()
		);
		Some(node)
	}

	/// Apply an inspector edit. Returns `false` if the node does not exist.
	pub fn update_node(&mut self, id: &str, patch: NodePatch) -> bool {
		let Some(node) = self.node_mut(id) else {
			return false;
		};
		if let Some(name) = patch.name {
			node.name = name;
		}
		if let Some(description) = patch.description {
			node.description = description;
		}
		if let Some(scale) = patch.scale {
			node.scale = Scale::new(scale);
		}
		if let Some(status) = patch.status {
			node.status = status;
		}
		true
	}

	/// Move a node, e.g. at the end of a drag.
	pub fn move_node(&mut self, id: &str, position: Position) -> bool {
		match self.node_mut(id) {
			Some(node) => {
				node.position = position;
				true
			}
			None => false,
		}
	}

	/// Add a `source -> target` edge between two existing nodes.
	pub fn connect(&mut self, source: &str, target: &str) -> Result<GraphEdge, GraphEditError> {
		for id in [source, target] {
			if !self.contains(id) {
				return Err(GraphEditError::UnknownNode(id.to_string()));
			}
		}
		if source == target {
			return Err(GraphEditError::SelfLoop(source.to_string()));
		}
		if self
			.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
		{
			return Err(GraphEditError::DuplicateEdge {
				from: source.to_string(),
				to: target.to_string(),
			});
		}

		let edge = GraphEdge::between(source, target);
		self.edges.push(edge.clone());
		Ok(edge)
	}

	/// Where a newly added node should go: the single-node slot when empty,
	/// otherwise one grid row below the lowest node, on the center column.
	pub fn next_free_position(&self, layout: &LayoutConfig) -> Position {
		self.nodes
			.iter()
			.map(|n| n.position.y)
			.reduce(f64::max)
			.map(|lowest| Position::new(layout.center_x, lowest + layout.row_height))
			.unwrap_or_else(|| layout.slot(1, 0))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::model::{NodeKind, NodeMetrics};

	fn node(id: &str, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			position: Position::new(0.0, y),
			kind: NodeKind::Service,
			name: id.to_uppercase(),
			description: String::new(),
			status: NodeStatus::Healthy,
			cost_per_hour: 0.5,
			metrics: NodeMetrics::default(),
			scale: Scale::new(10),
			provider: "aws".into(),
			accent: None,
		}
	}

	fn sample() -> GraphWorkspace {
		GraphWorkspace::from(GraphData {
			nodes: vec![node("gw", 50.0), node("auth", 320.0), node("db", 320.0)],
			edges: vec![
				GraphEdge::between("gw", "auth"),
				GraphEdge::between("gw", "db"),
				GraphEdge::between("auth", "db"),
			],
		})
	}

	#[test]
	fn removing_a_node_prunes_its_edges() {
		let mut ws = sample();
		let removed = ws.remove_node("db").unwrap();
		assert_eq!(removed.id, "db");
		assert!(!ws.contains("db"));
		assert!(ws.edges().iter().all(|e| !e.touches("db")));
		assert_eq!(ws.edges(), &[GraphEdge::between("gw", "auth")]);
	}

	#[test]
	fn removing_an_unknown_node_changes_nothing() {
		let mut ws = sample();
		assert_eq!(ws.remove_node("nope"), None);
		assert_eq!(ws, sample());
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let mut ws = sample();
		assert_eq!(
			ws.add_node(node("gw", 0.0)),
			Err(GraphEditError::DuplicateNode("gw".into()))
		);
		assert!(ws.add_node(node("cache", 0.0)).is_ok());
		assert_eq!(ws.nodes().len(), 4);
	}

	#[test]
	fn updates_clamp_scale() {
		let mut ws = sample();
		assert!(ws.update_node(
			"auth",
			NodePatch {
				name: Some("Auth v2".into()),
				scale: Some(140),
				..NodePatch::default()
			}
		));
		let auth = ws.node("auth").unwrap();
		assert_eq!(auth.name, "Auth v2");
		assert_eq!(auth.scale.get(), 100);

		ws.update_node("auth", NodePatch { scale: Some(-7), ..NodePatch::default() });
		assert_eq!(ws.node("auth").unwrap().scale.get(), 0);
		assert!(!ws.update_node("ghost", NodePatch::default()));
	}

	#[test]
	fn connect_validates_endpoints() {
		let mut ws = sample();
		assert_eq!(
			ws.connect("gw", "ghost"),
			Err(GraphEditError::UnknownNode("ghost".into()))
		);
		assert_eq!(ws.connect("gw", "gw"), Err(GraphEditError::SelfLoop("gw".into())));
		assert!(matches!(
			ws.connect("gw", "auth"),
			Err(GraphEditError::DuplicateEdge { .. })
		));

		let edge = ws.connect("db", "gw").unwrap();
		assert_eq!(edge.id, "edge-db-gw");
		assert_eq!(ws.edges().len(), 4);
	}

	#[test]
	fn move_node_sets_position() {
		let mut ws = sample();
		assert!(ws.move_node("gw", Position::new(11.0, 22.0)));
		assert_eq!(ws.node("gw").unwrap().position, Position::new(11.0, 22.0));
		assert!(!ws.move_node("ghost", Position::default()));
	}

	#[test]
	fn next_free_position_goes_below_lowest_node() {
		let layout = LayoutConfig::default();
		assert_eq!(
			GraphWorkspace::default().next_free_position(&layout),
			Position::new(520.0, 185.0)
		);
		assert_eq!(sample().next_free_position(&layout), Position::new(520.0, 590.0));
	}

	#[test]
	fn replace_drops_local_edits() {
		let mut ws = sample();
		ws.remove_node("gw");
		ws.replace(GraphData {
			nodes: vec![node("solo", 0.0)],
			edges: vec![],
		});
		assert_eq!(ws.nodes().len(), 1);
		assert!(ws.edges().is_empty());
		assert_eq!(ws.total_cost_per_hour(), 0.5);
	}
}
