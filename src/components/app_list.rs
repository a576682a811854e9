//! Searchable application list with create, delete and retry controls.

use leptos::prelude::*;

use super::create_app::icon_glyph;
use crate::model::{Application, filter_applications};
use crate::requests::FetchState;
use crate::store::UiStore;

/// Sidebar listing the catalog. Selection goes through the `UiStore` context.
#[component]
pub fn AppList(
	/// Latest application fetch.
	#[prop(into)]
	apps: Signal<FetchState<Vec<Application>>>,
	/// Retry after a failed fetch.
	on_retry: Callback<()>,
	/// Open the create dialog.
	on_create: Callback<()>,
	/// Delete the application with this id.
	on_delete: Callback<String>,
) -> impl IntoView {
	let store = expect_context::<RwSignal<UiStore>>();
	let (query, set_query) = signal(String::new());
	let selected = Memo::new(move |_| store.with(|s| s.selected_application().map(str::to_string)));

	let select = move |id: String| {
		store.update(|s| {
			s.set_selected_application(Some(id));
			s.set_selected_node(None);
		});
	};

	let row = move |app: &Application| {
		let (select_id, delete_id, row_id) = (app.id.clone(), app.id.clone(), app.id.clone());
		let is_selected = move || selected.with(|s| s.as_deref() == Some(row_id.as_str()));
		view! {
			<li class="app-row" class:selected=is_selected>
				<button class="app-entry" on:click=move |_| select(select_id.clone())>
					<span class="app-icon" style=format!("color: {}", app.accent_color)>
						{icon_glyph(&app.icon)}
					</span>
					<span class="app-name">{app.name.clone()}</span>
				</button>
				<button
					class="app-delete"
					title="Delete application"
					on:click=move |_| on_delete.run(delete_id.clone())
				>
					"✕"
				</button>
			</li>
		}
	};

	let body = move || {
		apps.with(|state| {
			if let Some(list) = state.ready() {
				let matches = query.with(|q| {
					filter_applications(list, q).into_iter().map(row).collect_view()
				});
				return view! { <ul class="app-list">{matches}</ul> }.into_any();
			}
			if let Some(message) = state.error() {
				let message = message.to_string();
				return view! {
					<div class="error-card">
						<strong>"Mock API failed"</strong>
						<p>{message}</p>
						<p class="hint">
							"Toggle the lightning icon in the top bar to simulate recovery."
						</p>
						<button class="button ghost" on:click=move |_| on_retry.run(())>
							"Retry"
						</button>
					</div>
				}
				.into_any();
			}
			view! {
				<div class="skeleton-list">
					<div class="skeleton short"></div>
					<div class="skeleton"></div>
					<div class="skeleton"></div>
				</div>
			}
			.into_any()
		})
	};

	view! {
		<section class="app-panel">
			<h2>"Application"</h2>
			<div class="search-row">
				<input
					class="text-input search"
					type="search"
					placeholder="Search..."
					prop:value=move || query.get()
					on:input=move |ev| set_query.set(event_target_value(&ev))
				/>
				<button
					class="button icon"
					title="Create application"
					on:click=move |_| on_create.run(())
				>
					"+"
				</button>
			</div>
			{body}
		</section>
	}
}
