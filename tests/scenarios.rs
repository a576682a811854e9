//! User flows stitched together from the store, the backend and the workspace.

// Test targets link every lib dependency.
#![allow(unused_crate_dependencies)]

use futures::executor::block_on;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use service_canvas::api::{InstantSleep, MockApi};
use service_canvas::config::AppConfig;
use service_canvas::generator::random_node;
use service_canvas::layout::LayoutConfig;
use service_canvas::model::{NodeStatus, Position};
use service_canvas::requests::{FetchState, RequestGate};
use service_canvas::store::{InspectorTab, UiStore};
use service_canvas::workspace::{GraphWorkspace, NodePatch};

fn api() -> MockApi {
	MockApi::new(&AppConfig::default(), InstantSleep::default(), StdRng::seed_from_u64(5))
}

fn load(api: &MockApi, app_id: &str) -> GraphWorkspace {
	let data = block_on(api.fetch_graph(app_id, false)).unwrap();
	GraphWorkspace::from(data)
}

#[test]
fn failure_toggle_round_trip() {
	let api = api();
	let mut store = UiStore::default();

	store.set_failure_simulation(true);
	assert!(block_on(api.fetch_applications(store.should_fail())).is_err());

	store.set_failure_simulation(false);
	let apps = block_on(api.fetch_applications(store.should_fail())).unwrap();
	assert_eq!(apps.len(), 5);
}

#[test]
fn panel_toggle_flips_each_time() {
	let mut store = UiStore::default();
	assert!(!store.mobile_panel_open());
	store.set_mobile_panel_open(None);
	assert!(store.mobile_panel_open());
	store.set_mobile_panel_open(None);
	assert!(!store.mobile_panel_open());
	store.set_mobile_panel_open(Some(true));
	store.set_mobile_panel_open(Some(true));
	assert!(store.mobile_panel_open());
}

#[test]
fn store_fields_are_independent() {
	let mut store = UiStore::default();
	store.set_selected_node(Some("ghost".to_string()));
	store.set_active_inspector_tab(InspectorTab::Runtime);
	assert_eq!(store.selected_application(), None);
	assert_eq!(store.selected_node(), Some("ghost"));
	assert_eq!(store.active_inspector_tab(), InspectorTab::Runtime);
}

#[test]
fn deleting_a_node_prunes_its_edges() {
	let api = api();
	for app_id in ["supertokens-golang", "microservices-stack", "data-pipeline"] {
		let mut workspace = load(&api, app_id);
		let Some(target) = workspace
			.edges()
			.first()
			.map(|edge| edge.target.clone())
		else {
			continue;
		};

		let removed = workspace.remove_node(&target).unwrap();
		assert_eq!(removed.id, target);
		assert!(workspace.node(&target).is_none());
		assert!(workspace.edges().iter().all(|edge| !edge.touches(&target)));
	}
}

#[test]
fn dragged_positions_survive_later_edits() {
	let api = api();
	let mut workspace = load(&api, "edge-platform");
	let id = workspace.nodes()[0].id.clone();

	assert!(workspace.move_node(&id, Position::new(12.0, 34.0)));
	assert!(workspace.update_node(
		&id,
		NodePatch {
			status: Some(NodeStatus::Down),
			scale: Some(400),
			..NodePatch::default()
		}
	));

	let node = workspace.node(&id).unwrap();
	assert_eq!(node.position, Position::new(12.0, 34.0));
	assert_eq!(node.status, NodeStatus::Down);
	assert_eq!(node.scale.get(), 100);
}

#[test]
fn added_nodes_land_below_the_graph() {
	let api = api();
	let layout = LayoutConfig::default();
	let mut workspace = load(&api, "cloud-infrastructure");
	let lowest = workspace
		.nodes()
		.iter()
		.map(|n| n.position.y)
		.fold(f64::MIN, f64::max);
	let cost_before = workspace.total_cost_per_hour();

	let mut rng = StdRng::seed_from_u64(17);
	let mut node = {
		let taken: Vec<&str> = workspace.nodes().iter().map(|n| n.id.as_str()).collect();
		random_node(&mut rng, &taken)
	};
	node.position = workspace.next_free_position(&layout);
	let cost = node.cost_per_hour;
	let id = node.id.clone();
	workspace.add_node(node).unwrap();

	let added = workspace.node(&id).unwrap();
	assert_eq!(added.position, Position::new(layout.center_x, lowest + layout.row_height));
	assert!((workspace.total_cost_per_hour() - (cost_before + cost)).abs() < 1e-9);
}

#[test]
fn switching_applications_keeps_only_the_latest_graph() {
	let api = api();
	let mut gate = RequestGate::default();
	let mut graph = FetchState::Idle;
	let mut workspace = GraphWorkspace::default();

	// Two requests in flight; the first one answers last.
	let slow = gate.issue(("data-pipeline".to_string(), false));
	let fast = gate.issue(("edge-platform".to_string(), false));

	for ticket in [fast, slow] {
		let (app_id, fail) = ticket.key.clone();
		let data = block_on(api.fetch_graph(&app_id, fail)).unwrap();
		if gate.is_current(&ticket) {
			workspace.replace(data);
			graph = FetchState::Ready(app_id);
		}
	}

	assert_eq!(graph, FetchState::Ready("edge-platform".to_string()));
	assert_eq!(workspace, load(&api, "edge-platform"));
}

#[test]
fn retry_after_failure_recovers() {
	let api = api();
	let mut store = UiStore::default();
	store.set_failure_simulation(true);

	let mut state: FetchState<Vec<_>> = FetchState::Loading;
	if let Err(err) = block_on(api.fetch_applications(store.should_fail())) {
		state = FetchState::Failed(err.to_string());
	}
	assert!(state.error().is_some());

	store.set_failure_simulation(false);
	let apps = block_on(api.fetch_applications(store.should_fail())).unwrap();
	state = FetchState::Ready(apps);
	assert_eq!(state.ready().map(Vec::len), Some(5));
}
