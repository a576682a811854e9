//! Data model shared by the mock data service, the workspace and the views.
//!
//! Field names serialize in camelCase and enums in lowercase so the model reads
//! the same JSON shape the host page and the catalog templates use.

use serde::{Deserialize, Serialize};

/// A selectable project owning one service graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	/// Unique identifier across the catalog.
	pub id: String,
	/// Display name.
	pub name: String,
	/// CSS color used to tint the application entry.
	pub accent_color: String,
	/// Symbolic icon tag, purely presentational.
	pub icon: String,
}

impl Application {
	/// Case-insensitive substring match on the name.
	pub fn matches(&self, query: &str) -> bool {
		let query = query.trim();
		query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
	}
}

/// Applications whose name contains `query`, in catalog order.
pub fn filter_applications<'a>(apps: &'a [Application], query: &str) -> Vec<&'a Application> {
	apps.iter().filter(|app| app.matches(query)).collect()
}

/// 2D canvas coordinate in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Grows to the right.
	pub x: f64,
	/// Grows downwards.
	pub y: f64,
}

impl Position {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Whether a node is a compute service or a data store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	/// Compute: APIs, workers and brokers.
	#[default]
	Service,
	/// Storage: SQL, caches and object stores.
	Database,
}

impl NodeKind {
	/// Human-readable name.
	pub fn label(self) -> &'static str {
		match self {
			NodeKind::Service => "Service",
			NodeKind::Database => "Database",
		}
	}
}

/// Health reported for a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
	/// Serving normally.
	#[default]
	Healthy,
	/// Serving with errors or high latency.
	Degraded,
	/// Not serving.
	Down,
}

impl NodeStatus {
	/// All statuses, in severity order.
	pub const ALL: [NodeStatus; 3] = [NodeStatus::Healthy, NodeStatus::Degraded, NodeStatus::Down];

	/// Text shown on status pills.
	pub fn label(self) -> &'static str {
		match self {
			NodeStatus::Healthy => "Healthy",
			NodeStatus::Degraded => "Degraded",
			NodeStatus::Down => "Down",
		}
	}
}

/// Runtime figures shown in the inspector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
	/// vCPU usage.
	pub cpu: f64,
	/// Memory in GB.
	pub memory: f64,
	/// Disk in GB.
	pub disk: f64,
	/// Deployment region, e.g. `"us-east-1"`.
	pub region: String,
}

/// Replica scale percentage, always within `0..=100`.
///
/// Every construction path clamps, including deserialization, so a `Scale`
/// held anywhere in the model is in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Scale(u8);

impl Scale {
	/// Upper bound, inclusive.
	pub const MAX: u8 = 100;

	/// Clamp an arbitrary integer into the valid range.
	pub fn new(value: i64) -> Self {
		Self(value.clamp(0, Self::MAX as i64) as u8)
	}

	/// The percentage.
	pub fn get(self) -> u8 {
		self.0
	}
}

impl From<i64> for Scale {
	fn from(value: i64) -> Self {
		Self::new(value)
	}
}

impl From<Scale> for u8 {
	fn from(scale: Scale) -> Self {
		scale.0
	}
}

/// A service or database card inside an application's graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
	/// Unique within the owning graph.
	pub id: String,
	/// Top-left corner of the card. Missing positions are filled in by layout.
	#[serde(default)]
	pub position: Position,
	/// Service or database.
	pub kind: NodeKind,
	/// Display name, editable in the inspector.
	pub name: String,
	/// Free-form notes, editable in the inspector.
	#[serde(default)]
	pub description: String,
	/// Current health.
	pub status: NodeStatus,
	/// Running cost in USD.
	pub cost_per_hour: f64,
	/// Resource usage.
	pub metrics: NodeMetrics,
	/// Replica scale.
	pub scale: Scale,
	/// Cloud provider tag, e.g. `"aws"`.
	pub provider: String,
	/// Optional CSS accent for the card's scale bar.
	#[serde(default)]
	pub accent: Option<String>,
}

/// A directed relation between two nodes of the same graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Unique within the owning graph.
	pub id: String,
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

impl GraphEdge {
	/// Build an edge with the conventional `edge-{source}-{target}` id.
	pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: format!("edge-{source}-{target}"),
			source,
			target,
		}
	}

	/// Whether either end is `node_id`.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// Complete graph payload: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Cards, in template order.
	pub nodes: Vec<GraphNode>,
	/// Relations between `nodes`.
	pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scale_clamps_on_construction() {
		assert_eq!(Scale::new(-5).get(), 0);
		assert_eq!(Scale::new(42).get(), 42);
		assert_eq!(Scale::new(250).get(), 100);
	}

	#[test]
	fn scale_clamps_when_deserialized() {
		let scale: Scale = serde_json::from_str("180").unwrap();
		assert_eq!(scale.get(), 100);
		let scale: Scale = serde_json::from_str("-3").unwrap();
		assert_eq!(scale.get(), 0);
	}

	#[test]
	fn node_json_uses_camel_case_and_lowercase_enums() {
		let json = r#"{
			"id": "redis",
			"kind": "database",
			"name": "Redis",
			"status": "degraded",
			"costPerHour": 0.02,
			"metrics": { "cpu": 0.3, "memory": 2.0, "disk": 10, "region": "us-east-1" },
			"scale": 18,
			"provider": "aws"
		}"#;
		let node: GraphNode = serde_json::from_str(json).unwrap();
		assert_eq!(node.kind, NodeKind::Database);
		assert_eq!(node.status, NodeStatus::Degraded);
		assert_eq!(node.position, Position::default());
		assert_eq!(node.scale.get(), 18);

		let back = serde_json::to_value(&node).unwrap();
		assert_eq!(back["costPerHour"], 0.02);
		assert_eq!(back["kind"], "database");
	}

	#[test]
	fn application_search_ignores_case() {
		let app = |id: &str, name: &str| Application {
			id: id.into(),
			name: name.into(),
			accent_color: "#fff".into(),
			icon: "cloud".into(),
		};
		let apps = [app("a", "Data Pipeline"), app("b", "Edge Platform"), app("c", "Payments")];

		let hits: Vec<&str> = filter_applications(&apps, "  PLAT ")
			.iter()
			.map(|a| a.id.as_str())
			.collect();
		assert_eq!(hits, ["b"]);
		assert_eq!(filter_applications(&apps, "").len(), 3);
		assert!(filter_applications(&apps, "zzz").is_empty());
	}

	#[test]
	fn edge_between_builds_conventional_id() {
		let edge = GraphEdge::between("api", "db");
		assert_eq!(edge.id, "edge-api-db");
		assert!(edge.touches("api"));
		assert!(edge.touches("db"));
		assert!(!edge.touches("cache"));
	}
}
