//! service-canvas: interactive graph of an application's services and databases.
//!
//! This crate provides a WASM single-page app that renders each application's
//! services as draggable cards on a canvas, backed by an in-memory mock API
//! with simulated latency and failure injection.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlScriptElement, KeyboardEvent, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod api;
pub mod components;
pub mod config;
pub mod generator;
pub mod layout;
pub mod model;
pub mod requests;
pub mod shortcuts;
pub mod store;
pub mod workspace;

use api::MockApi;
use components::{
	AppList, CreateAppDialog, GraphCanvas, IconRail, NodeInspector, ShortcutOverlay, TopBar,
};
use config::AppConfig;
use model::{Application, Position};
use requests::{FetchState, RequestGate, Ticket};
use shortcuts::Shortcut;
use store::UiStore;
use workspace::GraphWorkspace;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("service-canvas: logging initialized");
}

/// Load configuration from a script element with id="app-config".
/// Expected format: JSON with any subset of `{ latency, defaultApplication, layout }`.
fn load_config() -> Option<AppConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("app-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match AppConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"service-canvas: loaded config (latency {}..{}ms, default {:?})",
				config.latency.min_ms, config.latency.max_ms, config.default_application
			);
			Some(config)
		}
		Err(e) => {
			warn!("service-canvas: failed to parse app config: {}", e);
			None
		}
	}
}

/// Record a new request on `gate` and return its ticket.
fn issue<K>(gate: StoredValue<RequestGate<K>>, key: K) -> Option<Ticket<K>>
where
	K: Clone + PartialEq + Send + Sync + 'static,
{
	gate.try_update_value(|g| g.issue(key))
}

fn is_current<K>(gate: StoredValue<RequestGate<K>>, ticket: &Ticket<K>) -> bool
where
	K: Clone + PartialEq + Send + Sync + 'static,
{
	gate.try_with_value(|g| g.is_current(ticket)).unwrap_or(false)
}

/// Whether a key press is aimed at a form field rather than the canvas.
fn typing_into_field(ev: &KeyboardEvent) -> bool {
	ev.target()
		.and_then(|target| target.dyn_into::<Element>().ok())
		.is_some_and(|el| {
			matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
		})
}

/// Main application component.
/// Owns the UI store, the workspace and the mock API, and wires them to the views.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let store = RwSignal::new(UiStore::default());
	provide_context(store);

	let api = StoredValue::new_local(MockApi::browser(&config));
	let layout = StoredValue::new(config.layout.clone());
	let default_app = config.default_application.clone();

	let workspace = RwSignal::new(GraphWorkspace::default());
	let apps = RwSignal::new(FetchState::<Vec<Application>>::Idle);
	// Ready holds the id of the application whose graph is in the workspace.
	let graph = RwSignal::new(FetchState::<String>::Idle);
	let apps_gate = StoredValue::new(RequestGate::<bool>::default());
	let graph_gate = StoredValue::new(RequestGate::<(String, bool)>::default());
	let apps_reload = RwSignal::new(0_u32);
	let graph_reload = RwSignal::new(0_u32);
	let fit_requests = RwSignal::new(0_u32);
	let create_open = RwSignal::new(false);
	let help_open = RwSignal::new(false);

	let should_fail = Memo::new(move |_| store.with(|s| s.should_fail()));
	let selected_app = Memo::new(move |_| {
		store.with(|s| s.selected_application().map(str::to_string))
	});
	let selected_node = Memo::new(move |_| {
		store.with(|s| s.selected_node().map(str::to_string))
	});
	let total_cost = Memo::new(move |_| workspace.with(|ws| ws.total_cost_per_hour()));

	// Application catalog: on start, on retry, and whenever the failure toggle flips.
	Effect::new(move |_| {
		let fail = should_fail.get();
		apps_reload.track();
		let Some(ticket) = issue(apps_gate, fail) else {
			return;
		};
		apps.set(FetchState::Loading);
		let client = api.get_value();
		spawn_local(async move {
			let result = client.fetch_applications(fail).await;
			if !is_current(apps_gate, &ticket) {
				debug!("service-canvas: dropping stale application list");
				return;
			}
			match result {
				Ok(list) => {
					info!("service-canvas: {} applications", list.len());
					apps.set(FetchState::Ready(list));
				}
				Err(err) => {
					warn!("service-canvas: {err}");
					apps.set(FetchState::Failed(err.to_string()));
				}
			}
		});
	});

	// Pick an application once the catalog arrives: the configured default,
	// else the first.
	Effect::new(move |_| {
		if selected_app.with(Option::is_some) {
			return;
		}
		let pick = apps.with(|state| {
			let list = state.ready()?;
			list.iter()
				.find(|a| a.id == default_app)
				.or_else(|| list.first())
				.map(|a| a.id.clone())
		});
		if let Some(id) = pick {
			store.update(|s| s.set_selected_application(Some(id)));
		}
	});

	// Graph of the selected application; the latest request wins.
	Effect::new(move |_| {
		let fail = should_fail.get();
		graph_reload.track();
		let Some(app_id) = selected_app.get() else {
			workspace.update(GraphWorkspace::clear);
			graph.set(FetchState::Idle);
			return;
		};
		let Some(ticket) = issue(graph_gate, (app_id.clone(), fail)) else {
			return;
		};
		graph.set(FetchState::Loading);
		let client = api.get_value();
		spawn_local(async move {
			let result = client.fetch_graph(&app_id, fail).await;
			if !is_current(graph_gate, &ticket) {
				debug!("service-canvas: dropping stale graph for {app_id:?}");
				return;
			}
			match result {
				Ok(data) => {
					info!(
						"service-canvas: graph {app_id:?} with {} nodes, {} edges",
						data.nodes.len(),
						data.edges.len()
					);
					workspace.update(|ws| ws.replace(data));
					store.update(|s| s.set_selected_node(None));
					graph.set(FetchState::Ready(app_id));
					fit_requests.update(|n| *n += 1);
				}
				Err(err) => {
					warn!("service-canvas: {err}");
					workspace.update(GraphWorkspace::clear);
					store.update(|s| s.set_selected_node(None));
					graph.set(FetchState::Failed(err.to_string()));
				}
			}
		});
	});

	let create_app = Callback::new(move |(name, icon): (String, String)| {
		match api.with_value(|api| api.create_application(&name, &icon)) {
			Ok(app) => {
				let id = app.id.clone();
				apps.update(|state| {
					if let FetchState::Ready(list) = state {
						list.push(app);
					}
				});
				store.update(|s| {
					s.set_selected_application(Some(id));
					s.set_selected_node(None);
				});
			}
			Err(err) => warn!("service-canvas: {err}"),
		}
	});

	let delete_app = Callback::new(move |id: String| {
		if !api.with_value(|api| api.delete_application(&id)) {
			return;
		}
		apps.update(|state| {
			if let FetchState::Ready(list) = state {
				list.retain(|a| a.id != id);
			}
		});
		if selected_app.get_untracked().as_deref() == Some(id.as_str()) {
			let next = apps.with_untracked(|state| {
				state.ready().and_then(|list| list.first()).map(|a| a.id.clone())
			});
			store.update(|s| {
				s.set_selected_application(next);
				s.set_selected_node(None);
			});
		}
	});

	let add_node = Callback::new(move |()| {
		let mut node = workspace.with_untracked(|ws| {
			let taken: Vec<&str> = ws.nodes().iter().map(|n| n.id.as_str()).collect();
			generator::random_node(&mut rand::thread_rng(), &taken)
		});
		node.position = layout.with_value(|layout| {
			workspace.with_untracked(|ws| ws.next_free_position(layout))
		});
		let id = node.id.clone();

		let mut added = Ok(());
		workspace.update(|ws| added = ws.add_node(node));
		match added {
			Ok(()) => store.update(|s| {
				s.set_selected_node(Some(id));
				s.set_mobile_panel_open(Some(true));
			}),
			Err(err) => warn!("service-canvas: {err}"),
		}
	});

	let delete_node = Callback::new(move |id: String| {
		let mut removed = None;
		workspace.update(|ws| removed = ws.remove_node(&id));
		if removed.is_some() {
			store.update(|s| {
				s.set_selected_node(None);
				s.set_mobile_panel_open(Some(false));
			});
		}
	});

	let select_node = Callback::new(move |id: Option<String>| {
		store.update(|s| {
			if id.is_some() {
				s.set_mobile_panel_open(Some(true));
			}
			s.set_selected_node(id);
		});
	});

	let move_node = Callback::new(move |(id, position): (String, Position)| {
		workspace.update(|ws| {
			ws.move_node(&id, position);
		});
	});

	let connect_nodes = Callback::new(move |(source, target): (String, String)| {
		match workspace.try_update(|ws| ws.connect(&source, &target)) {
			Some(Ok(edge)) => info!("service-canvas: connected {:?}", edge.id),
			Some(Err(err)) => warn!("service-canvas: {err}"),
			None => {}
		}
	});

	let fit = Callback::new(move |()| fit_requests.update(|n| *n += 1));
	let toggle_help = Callback::new(move |()| help_open.update(|open| *open = !*open));

	let keys = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
		if create_open.get_untracked() || typing_into_field(&ev) {
			return;
		}
		let modified = ev.ctrl_key() || ev.meta_key();
		let Some(shortcut) = Shortcut::from_key(&ev.key(), modified) else {
			return;
		};
		match shortcut {
			Shortcut::DeleteSelected => {
				if let Some(id) = selected_node.get_untracked() {
					ev.prevent_default();
					delete_node.run(id);
				}
			}
			Shortcut::Dismiss => {
				if help_open.get_untracked() {
					help_open.set(false);
				} else if store.with_untracked(|s| s.mobile_panel_open()) {
					store.update(|s| s.set_mobile_panel_open(Some(false)));
				} else {
					store.update(|s| s.set_selected_node(None));
				}
			}
			Shortcut::FitView => fit.run(()),
			Shortcut::TogglePanel => store.update(|s| s.set_mobile_panel_open(None)),
			Shortcut::ToggleHelp => {
				ev.prevent_default();
				toggle_help.run(());
			}
		}
	});
	on_cleanup(move || keys.remove());

	let panel_open = move || store.with(|s| s.mobile_panel_open());

	let canvas_overlay = move || {
		graph.with(|state| {
			if state.is_loading() {
				return view! {
					<div class="canvas-loading">
						<div class="spinner"></div>
					</div>
				}
				.into_any();
			}
			if let Some(message) = state.error() {
				let message = message.to_string();
				return view! {
					<div class="graph-error">
						<strong>"Graph failed to load"</strong>
						<p>{message}</p>
						<p class="hint">"Retry or disable the mock error toggle."</p>
						<button
							class="button ghost"
							on:click=move |_| graph_reload.update(|n| *n += 1)
						>
							"Retry fetch"
						</button>
					</div>
				}
				.into_any();
			}
			if state.ready().is_some() && workspace.with(GraphWorkspace::is_empty) {
				return view! {
					<div class="canvas-empty">"No services yet. Use + to add one."</div>
				}
				.into_any();
			}
			().into_any()
		})
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Service Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="app-shell">
			<TopBar apps=apps total_cost=total_cost on_fit=fit on_help=toggle_help />
			<div class="workspace">
				<aside class="sidebar">
					<AppList
						apps=apps
						on_retry=Callback::new(move |()| apps_reload.update(|n| *n += 1))
						on_create=Callback::new(move |()| create_open.set(true))
						on_delete=delete_app
					/>
				</aside>
				<IconRail workspace=workspace on_add=add_node />
				<main class="canvas-area">
					<GraphCanvas
						workspace=workspace
						selected=selected_node
						fit_requests=fit_requests
						on_select=select_node
						on_move=move_node
						on_connect=connect_nodes
					/>
					{canvas_overlay}
				</main>
				<aside class="side-panel" class:open=panel_open>
					<NodeInspector workspace=workspace on_delete=delete_node />
				</aside>
			</div>
			<CreateAppDialog
				open=create_open
				on_close=Callback::new(move |()| create_open.set(false))
				on_create=create_app
			/>
			<ShortcutOverlay open=help_open />
		</div>
	}
}
