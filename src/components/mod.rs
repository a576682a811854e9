//! Leptos views composed by [`crate::App`].

pub mod app_list;
pub mod create_app;
pub mod graph_canvas;
pub mod icon_rail;
pub mod inspector;
pub mod shortcut_overlay;
pub mod top_bar;

pub use app_list::AppList;
pub use create_app::CreateAppDialog;
pub use graph_canvas::GraphCanvas;
pub use icon_rail::IconRail;
pub use inspector::NodeInspector;
pub use shortcut_overlay::ShortcutOverlay;
pub use top_bar::TopBar;
