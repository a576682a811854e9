//! Synthetic nodes for the "add node" action.
//!
//! Everything random is drawn from the caller's `Rng`, so a seeded generator
//! reproduces the same node.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::api::{slugify, unique_id};
use crate::model::{GraphNode, NodeKind, NodeMetrics, NodeStatus, Position, Scale};

struct Blueprint {
	name: &'static str,
	kind: NodeKind,
	description: &'static str,
	accent: &'static str,
}

const BLUEPRINTS: &[Blueprint] = &[
	Blueprint {
		name: "Worker",
		kind: NodeKind::Service,
		description: "Background job runner",
		accent: "#8b5cf6",
	},
	Blueprint {
		name: "Gateway",
		kind: NodeKind::Service,
		description: "Edge request router",
		accent: "#38bdf8",
	},
	Blueprint {
		name: "Scheduler",
		kind: NodeKind::Service,
		description: "Cron and batch scheduling",
		accent: "#f59e0b",
	},
	Blueprint {
		name: "Notifier",
		kind: NodeKind::Service,
		description: "Email and push delivery",
		accent: "#f43f5e",
	},
	Blueprint {
		name: "Postgres",
		kind: NodeKind::Database,
		description: "Relational storage",
		accent: "#22c55e",
	},
	Blueprint {
		name: "Redis",
		kind: NodeKind::Database,
		description: "In-memory cache",
		accent: "#ef4444",
	},
	Blueprint {
		name: "MongoDB",
		kind: NodeKind::Database,
		description: "Document store",
		accent: "#10b981",
	},
];

const PROVIDERS: &[&str] = &["aws", "gcp", "azure", "cloudflare", "vercel"];
const REGIONS: &[&str] = &["us-east-1", "us-west-2", "eu-west-1", "ap-south-1", "global"];

/// Draw a new node whose id is not in `existing_ids`.
///
/// The position is left at the origin; callers place it with
/// `GraphWorkspace::next_free_position`.
pub fn random_node(rng: &mut impl Rng, existing_ids: &[&str]) -> GraphNode {
	let blueprint = &BLUEPRINTS[rng.gen_range(0..BLUEPRINTS.len())];
	let base = slugify(blueprint.name, "node");
	let id = unique_id(&base, |candidate| existing_ids.contains(&candidate));
	let name = match id.strip_prefix(base.as_str()).and_then(|rest| rest.strip_prefix('-')) {
		Some(suffix) => format!("{} {suffix}", blueprint.name),
		None => blueprint.name.to_string(),
	};

	let status = *NodeStatus::ALL[..2].choose(rng).unwrap_or(&NodeStatus::Healthy);
	let provider = PROVIDERS.choose(rng).copied().unwrap_or("aws");
	let region = REGIONS.choose(rng).copied().unwrap_or("global");

	GraphNode {
		id,
		name,
		position: Position::default(),
		kind: blueprint.kind,
		description: blueprint.description.to_string(),
		status,
		cost_per_hour: round_cents(rng.gen_range(0.01..0.10)),
		metrics: NodeMetrics {
			cpu: round_cents(rng.gen_range(0.1..2.0)),
			memory: round_cents(rng.gen_range(0.5..6.0)),
			disk: rng.gen_range(5..200) as f64,
			region: region.to_string(),
		},
		scale: Scale::new(rng.gen_range(10..=70)),
		provider: provider.to_string(),
		accent: Some(blueprint.accent.to_string()),
	}
}

fn round_cents(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}
