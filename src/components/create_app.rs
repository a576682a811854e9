//! Dialog for adding an application to the catalog.

use leptos::prelude::*;
use web_sys::KeyboardEvent;

/// Icon tags offered for new applications, with their tooltips.
pub const ICON_OPTIONS: [(&str, &str); 6] = [
	("cloud", "Cloud"),
	("box", "Box"),
	("git-branch", "Git Branch"),
	("layers", "Layers"),
	("server", "Server"),
	("package", "Package"),
];

/// Glyph drawn for an application icon tag.
pub fn icon_glyph(tag: &str) -> &'static str {
	match tag {
		"cloud" => "☁",
		"box" | "boxes" | "package" => "▣",
		"git-branch" | "pipeline" => "⑂",
		"layers" => "≣",
		"server" => "▤",
		"go" => "ɢ",
		"edge" => "ϟ",
		_ => "◆",
	}
}

/// Modal asking for a name and an icon.
#[component]
pub fn CreateAppDialog(
	/// Whether the dialog is shown.
	#[prop(into)]
	open: Signal<bool>,
	/// Cancel, Escape or a backdrop click.
	on_close: Callback<()>,
	/// `(name, icon)`; the name is already trimmed and non-empty.
	on_create: Callback<(String, String)>,
) -> impl IntoView {
	let (name, set_name) = signal(String::new());
	let (icon, set_icon) = signal(ICON_OPTIONS[0].0.to_string());

	let reset = move || {
		set_name.set(String::new());
		set_icon.set(ICON_OPTIONS[0].0.to_string());
	};
	let submit = move || {
		let trimmed = name.get_untracked().trim().to_string();
		if trimmed.is_empty() {
			return;
		}
		on_create.run((trimmed, icon.get_untracked()));
		reset();
		on_close.run(());
	};
	let cancel = move || {
		reset();
		on_close.run(());
	};

	view! {
		<Show when=move || open.get()>
			<div class="backdrop" on:click=move |_| cancel()></div>
			<div class="dialog" role="dialog">
				<h2>"Create New Application"</h2>
				<label for="app-name">"Application Name"</label>
				<input
					id="app-name"
					class="text-input"
					placeholder="Enter application name"
					autofocus=true
					prop:value=move || name.get()
					on:input=move |ev| set_name.set(event_target_value(&ev))
					on:keydown=move |ev: KeyboardEvent| match ev.key().as_str() {
						"Enter" => submit(),
						"Escape" => cancel(),
						_ => {}
					}
				/>
				<label>"Select Icon"</label>
				<div class="icon-grid">
					{ICON_OPTIONS
						.iter()
						.map(|&(value, label)| {
							view! {
								<button
									class="icon-option"
									class:active=move || icon.get() == value
									title=label
									on:click=move |_| set_icon.set(value.to_string())
								>
									{icon_glyph(value)}
								</button>
							}
						})
						.collect_view()}
				</div>
				<div class="dialog-footer">
					<button class="button ghost" on:click=move |_| cancel()>"Cancel"</button>
					<button
						class="button primary"
						disabled=move || name.get().trim().is_empty()
						on:click=move |_| submit()
					>
						"Create"
					</button>
				</div>
			</div>
		</Show>
	}
}
