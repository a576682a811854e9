//! Keyboard commands.

/// A command bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
	/// Remove the selected node.
	DeleteSelected,
	/// Close the side panel, or drop the selection.
	Dismiss,
	/// Fit every card into the canvas.
	FitView,
	/// Show or hide the side panel.
	TogglePanel,
	/// Show or hide the shortcut list.
	ToggleHelp,
}

impl Shortcut {
	/// Rows shown in the help overlay.
	pub const ALL: [Shortcut; 5] = [
		Shortcut::FitView,
		Shortcut::TogglePanel,
		Shortcut::Dismiss,
		Shortcut::DeleteSelected,
		Shortcut::ToggleHelp,
	];

	/// Map a `KeyboardEvent.key` value to a command.
	///
	/// `ctrl_or_meta` is whether Ctrl or Cmd was held.
	pub fn from_key(key: &str, ctrl_or_meta: bool) -> Option<Self> {
		match key {
			"Delete" | "Backspace" => Some(Shortcut::DeleteSelected),
			"Escape" => Some(Shortcut::Dismiss),
			"?" => Some(Shortcut::ToggleHelp),
			"/" if ctrl_or_meta => Some(Shortcut::ToggleHelp),
			_ if ctrl_or_meta => None,
			"f" | "F" => Some(Shortcut::FitView),
			"p" | "P" => Some(Shortcut::TogglePanel),
			_ => None,
		}
	}

	/// Key cap label.
	pub fn key_label(self) -> &'static str {
		match self {
			Shortcut::DeleteSelected => "Del",
			Shortcut::Dismiss => "Esc",
			Shortcut::FitView => "F",
			Shortcut::TogglePanel => "P",
			Shortcut::ToggleHelp => "?",
		}
	}

	/// What the command does, for the help overlay.
	pub fn description(self) -> &'static str {
		match self {
			Shortcut::DeleteSelected => "Delete selected node",
			Shortcut::Dismiss => "Close panel / Deselect",
			Shortcut::FitView => "Fit view to canvas",
			Shortcut::TogglePanel => "Toggle side panel",
			Shortcut::ToggleHelp => "Show/hide shortcuts",
		}
	}
}
