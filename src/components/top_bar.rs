//! Header with the current application and global toggles.

use leptos::prelude::*;

use crate::model::Application;
use crate::requests::FetchState;
use crate::store::UiStore;

/// Title, running cost, failure toggle and view controls.
#[component]
pub fn TopBar(
	/// Catalog, for the selected application's name.
	#[prop(into)]
	apps: Signal<FetchState<Vec<Application>>>,
	/// Hourly cost of the graph on screen.
	#[prop(into)]
	total_cost: Signal<f64>,
	/// "Fit view" was pressed.
	on_fit: Callback<()>,
	/// "?" was pressed.
	on_help: Callback<()>,
) -> impl IntoView {
	let store = expect_context::<RwSignal<UiStore>>();
	let should_fail = Memo::new(move |_| store.with(|s| s.should_fail()));

	let title = move || {
		let id = store.with(|s| s.selected_application().map(str::to_string));
		apps.with(|state| {
			state
				.ready()
				.and_then(|list| list.iter().find(|a| Some(&a.id) == id.as_ref()))
				.map(|a| a.name.clone())
		})
		.or(id)
		.unwrap_or_else(|| "No application".to_string())
	};

	view! {
		<header class="top-bar">
			<h1 class="app-title">{title}</h1>
			<span class="cost">{move || format!("${:.2}/hr", total_cost.get())}</span>
			<div class="actions">
				<button
					class="button icon failure-toggle"
					class:active=move || should_fail.get()
					title=move || {
						if should_fail.get() { "Mock failures on" } else { "Mock failures off" }
					}
					on:click=move |_| store.update(|s| s.set_failure_simulation(!s.should_fail()))
				>
					"ϟ"
				</button>
				<button class="button icon" title="Fit view (F)" on:click=move |_| on_fit.run(())>
					"⤢"
				</button>
				<button
					class="button icon"
					title="Toggle side panel (P)"
					on:click=move |_| store.update(|s| s.set_mobile_panel_open(None))
				>
					"▥"
				</button>
				<button
					class="button icon"
					title="Keyboard shortcuts (?)"
					on:click=move |_| on_help.run(())
				>
					"?"
				</button>
			</div>
		</header>
	}
}
