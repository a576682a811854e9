//! Selection and panel state shared by the views.
//!
//! One `UiStore` lives for the whole session. The composition root owns it
//! (wrapped in a reactive signal) and hands it to components through context;
//! nothing here validates one field against another.

/// Tabs of the node inspector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InspectorTab {
	/// Name, description, scale and status.
	#[default]
	Config,
	/// Read-only metrics.
	Runtime,
}

impl InspectorTab {
	/// Tabs in display order.
	pub const ALL: [InspectorTab; 2] = [InspectorTab::Config, InspectorTab::Runtime];

	/// Tab caption.
	pub fn label(self) -> &'static str {
		match self {
			InspectorTab::Config => "Config",
			InspectorTab::Runtime => "Runtime",
		}
	}
}

/// UI selection state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiStore {
	selected_app_id: Option<String>,
	selected_node_id: Option<String>,
	mobile_panel_open: bool,
	active_inspector_tab: InspectorTab,
	should_fail: bool,
}

impl UiStore {
	/// Id of the application whose graph is shown.
	pub fn selected_application(&self) -> Option<&str> {
		self.selected_app_id.as_deref()
	}

	/// Select an application, or none.
	pub fn set_selected_application(&mut self, id: Option<String>) {
		self.selected_app_id = id;
	}

	/// Id of the node open in the inspector.
	pub fn selected_node(&self) -> Option<&str> {
		self.selected_node_id.as_deref()
	}

	/// Select a node, or none. The id is not checked against the workspace.
	pub fn set_selected_node(&mut self, id: Option<String>) {
		self.selected_node_id = id;
	}

	/// Whether the side panel is shown on narrow screens.
	pub fn mobile_panel_open(&self) -> bool {
		self.mobile_panel_open
	}

	/// `None` toggles the panel, `Some(open)` sets it.
	pub fn set_mobile_panel_open(&mut self, value: Option<bool>) {
		self.mobile_panel_open = value.unwrap_or(!self.mobile_panel_open);
	}

	/// Inspector tab in front.
	pub fn active_inspector_tab(&self) -> InspectorTab {
		self.active_inspector_tab
	}

	/// Bring `tab` to the front.
	pub fn set_active_inspector_tab(&mut self, tab: InspectorTab) {
		self.active_inspector_tab = tab;
	}

	/// Whether fetches should be told to fail.
	pub fn should_fail(&self) -> bool {
		self.should_fail
	}

	/// Switch simulated fetch failures on or off.
	pub fn set_failure_simulation(&mut self, value: bool) {
		self.should_fail = value;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_empty() {
		let store = UiStore::default();
		assert_eq!(store.selected_application(), None);
		assert_eq!(store.selected_node(), None);
		assert!(!store.mobile_panel_open());
		assert_eq!(store.active_inspector_tab(), InspectorTab::Config);
		assert!(!store.should_fail());
	}

	#[test]
	fn panel_toggles_without_argument() {
		let mut store = UiStore::default();
		store.set_mobile_panel_open(None);
		assert!(store.mobile_panel_open());
		store.set_mobile_panel_open(None);
		assert!(!store.mobile_panel_open());
	}

	#[test]
	fn panel_explicit_value_is_idempotent() {
		let mut store = UiStore::default();
		store.set_mobile_panel_open(Some(true));
		store.set_mobile_panel_open(Some(true));
		assert!(store.mobile_panel_open());
		store.set_mobile_panel_open(Some(false));
		assert!(!store.mobile_panel_open());
	}

	#[test]
	fn node_can_be_selected_without_an_application() {
		let mut store = UiStore::default();
		store.set_selected_node(Some("redis".into()));
		assert_eq!(store.selected_node(), Some("redis"));
		assert_eq!(store.selected_application(), None);
	}

	#[test]
	fn setters_overwrite_and_clear() {
		let mut store = UiStore::default();
		store.set_selected_application(Some("edge-platform".into()));
		store.set_active_inspector_tab(InspectorTab::Runtime);
		store.set_failure_simulation(true);
		assert_eq!(store.selected_application(), Some("edge-platform"));
		assert_eq!(store.active_inspector_tab(), InspectorTab::Runtime);
		assert!(store.should_fail());

		store.set_selected_application(None);
		store.set_failure_simulation(false);
		assert_eq!(store.selected_application(), None);
		assert!(!store.should_fail());
	}
}
