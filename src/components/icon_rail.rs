//! Vertical rail with one button per node and an "add node" button.

use leptos::prelude::*;

use super::graph_canvas::CanvasTheme;
use crate::store::UiStore;
use crate::workspace::GraphWorkspace;

/// One button per node; clicking selects it.
#[component]
pub fn IconRail(
	/// Nodes to list, in workspace order.
	#[prop(into)]
	workspace: Signal<GraphWorkspace>,
	/// The "add node" button was pressed.
	on_add: Callback<()>,
) -> impl IntoView {
	let store = expect_context::<RwSignal<UiStore>>();
	let theme = CanvasTheme::default();

	let buttons = move || {
		let selected = store.with(|s| s.selected_node().map(str::to_string));
		workspace.with(|ws| {
			ws.nodes()
				.iter()
				.map(|node| {
					let id = node.id.clone();
					let initial = node.name.chars().take(1).collect::<String>().to_uppercase();
					let accent = theme.kind(node.kind).accent.to_css();
					let is_selected = selected.as_deref() == Some(node.id.as_str());
					view! {
						<button
							class="rail-node"
							class:selected=is_selected
							title=node.name.clone()
							style=format!("color: {accent}")
							on:click=move |_| {
								store.update(|s| {
									s.set_selected_node(Some(id.clone()));
									s.set_mobile_panel_open(Some(true));
								})
							}
						>
							{initial}
						</button>
					}
				})
				.collect_view()
		})
	};

	view! {
		<nav class="icon-rail">
			{buttons}
			<button class="rail-add" title="Add node" on:click=move |_| on_add.run(())>
				"+"
			</button>
		</nav>
	}
}
