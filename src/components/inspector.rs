//! Side panel for inspecting and editing the selected node.

use leptos::prelude::*;

use super::graph_canvas::CanvasTheme;
use crate::model::{GraphNode, NodeStatus, Scale};
use crate::store::{InspectorTab, UiStore};
use crate::workspace::{GraphWorkspace, NodePatch};

fn status_color(status: NodeStatus) -> String {
	CanvasTheme::default().status(status).to_css()
}

/// Config and runtime tabs for the selected node.
#[component]
pub fn NodeInspector(
	/// Graph holding the selected node; edits are written back to it.
	workspace: RwSignal<GraphWorkspace>,
	/// "Delete node" was pressed for this node id.
	on_delete: Callback<String>,
) -> impl IntoView {
	let store = expect_context::<RwSignal<UiStore>>();
	let selected_id = Memo::new(move |_| store.with(|s| s.selected_node().map(str::to_string)));
	let node = Memo::new(move |_| {
		let id = selected_id.get()?;
		workspace.with(|ws| ws.node(&id).cloned())
	});

	// Rebuilt only when the selection changes, so inputs keep focus while editing.
	move || {
		let present = selected_id.with(|id| {
			id.as_ref()
				.is_some_and(|id| workspace.with_untracked(|ws| ws.contains(id)))
		});
		if !present {
			return view! { <p class="inspector-empty">"Select a node to inspect it."</p> }
				.into_any();
		}
		view! {
			<InspectorBody
				node=node
				workspace=workspace
				selected_id=selected_id
				on_delete=on_delete
			/>
		}
		.into_any()
	}
}

#[component]
fn InspectorBody(
	node: Memo<Option<GraphNode>>,
	workspace: RwSignal<GraphWorkspace>,
	selected_id: Memo<Option<String>>,
	on_delete: Callback<String>,
) -> impl IntoView {
	let store = expect_context::<RwSignal<UiStore>>();
	let field = move |read: fn(&GraphNode) -> String| {
		move || node.with(|n| n.as_ref().map(read).unwrap_or_default())
	};

	let patch = move |patch: NodePatch| {
		if let Some(id) = selected_id.get_untracked() {
			workspace.update(|ws| {
				ws.update_node(&id, patch);
			});
		}
	};
	let scale = move || node.with(|n| n.as_ref().map_or(0, |n| n.scale.get()));
	let status = move || node.with(|n| n.as_ref().map(|n| n.status).unwrap_or_default());

	let tabs = InspectorTab::ALL
		.into_iter()
		.map(|tab| {
			view! {
				<button
					class="tab"
					class:active=move || store.with(|s| s.active_inspector_tab() == tab)
					on:click=move |_| store.update(|s| s.set_active_inspector_tab(tab))
				>
					{tab.label()}
				</button>
			}
		})
		.collect_view();

	let config_tab = move || {
		view! {
			<div class="tab-body">
				<label>"Name"</label>
				<input
					class="text-input"
					prop:value=field(|n| n.name.clone())
					on:input=move |ev| {
						patch(NodePatch {
							name: Some(event_target_value(&ev)),
							..NodePatch::default()
						})
					}
				/>
				<label>"Description"</label>
				<textarea
					class="text-input"
					rows="3"
					prop:value=field(|n| n.description.clone())
					on:input=move |ev| {
						patch(NodePatch {
							description: Some(event_target_value(&ev)),
							..NodePatch::default()
						})
					}
				></textarea>
				<label>"Scale"</label>
				<div class="scale-row">
					<input
						type="range"
						min="0"
						max=Scale::MAX.to_string()
						prop:value=move || scale().to_string()
						on:input=move |ev| {
							let value = event_target_value(&ev).parse().unwrap_or_default();
							patch(NodePatch { scale: Some(value), ..NodePatch::default() })
						}
					/>
					<input
						class="text-input number"
						type="number"
						prop:value=move || scale().to_string()
						on:change=move |ev| {
							if let Ok(value) = event_target_value(&ev).trim().parse::<i64>() {
								patch(NodePatch { scale: Some(value), ..NodePatch::default() })
							}
						}
					/>
				</div>
				<label>"Status"</label>
				<select
					class="text-input"
					prop:value=move || status().label()
					on:change=move |ev| {
						let label = event_target_value(&ev);
						let picked = NodeStatus::ALL.into_iter().find(|s| s.label() == label);
						if let Some(status) = picked {
							patch(NodePatch { status: Some(status), ..NodePatch::default() })
						}
					}
				>
					{NodeStatus::ALL
						.into_iter()
						.map(|s| view! { <option value=s.label()>{s.label()}</option> })
						.collect_view()}
				</select>
			</div>
		}
	};

	let runtime_tab = move || {
		let metric = move |label: &'static str, read: fn(&GraphNode) -> String| {
			view! {
				<div class="metric">
					<span class="metric-label">{label}</span>
					<span class="metric-value">{field(read)}</span>
				</div>
			}
		};
		view! {
			<div class="tab-body metrics-grid">
				{metric("CPU", |n| format!("{:.2} vCPU", n.metrics.cpu))}
				{metric("Memory", |n| format!("{:.2} GB", n.metrics.memory))}
				{metric("Disk", |n| format!("{:.0} GB", n.metrics.disk))}
				{metric("Region", |n| n.metrics.region.clone())}
				{metric("Cost", |n| format!("${:.2}/hr", n.cost_per_hour))}
				{metric("Provider", |n| n.provider.to_uppercase())}
			</div>
		}
	};

	view! {
		<div class="inspector">
			<header class="inspector-header">
				<div>
					<h3>{field(|n| n.name.clone())}</h3>
					<span class="kind">{field(|n| n.kind.label().to_uppercase())}</span>
				</div>
				<span
					class="status-pill"
					style=move || format!("color: {}", status_color(status()))
				>
					{move || status().label()}
				</span>
			</header>
			<nav class="tabs">{tabs}</nav>
			{move || match store.with(|s| s.active_inspector_tab()) {
				InspectorTab::Config => config_tab().into_any(),
				InspectorTab::Runtime => runtime_tab().into_any(),
			}}
			<button
				class="button danger"
				on:click=move |_| {
					if let Some(id) = selected_id.get_untracked() {
						on_delete.run(id);
					}
				}
			>
				"Delete node"
			</button>
		</div>
	}
}
