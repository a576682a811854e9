//! Help overlay listing the keyboard shortcuts.

use leptos::prelude::*;

use crate::shortcuts::Shortcut;

/// Modal listing the keyboard shortcuts.
#[component]
pub fn ShortcutOverlay(
	/// Shown while `true`; closing writes `false` back.
	open: RwSignal<bool>,
) -> impl IntoView {
	view! {
		<Show when=move || open.get()>
			<div class="backdrop" on:click=move |_| open.set(false)></div>
			<div class="dialog shortcuts" role="dialog">
				<h2>"Keyboard Shortcuts"</h2>
				<ul>
					{Shortcut::ALL
						.into_iter()
						.map(|shortcut| {
							view! {
								<li class="shortcut-row">
									<span>{shortcut.description()}</span>
									<kbd>{shortcut.key_label()}</kbd>
								</li>
							}
						})
						.collect_view()}
				</ul>
				<p class="hint">"Shift + drag from one card to another to connect them."</p>
				<p class="hint">
					"Press " <kbd>"?"</kbd> " or " <kbd>"Ctrl+/"</kbd> " to toggle this menu"
				</p>
			</div>
		</Show>
	}
}
