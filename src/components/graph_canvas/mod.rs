//! Canvas view of an application's service graph.
//!
//! Renders the workspace nodes as cards on an HTML canvas with:
//! - Orthogonal edges with arrow heads, highlighted around the selection
//! - Pan, zoom and card dragging interactions
//! - Shift+drag from one card to another to draw an edge
//! - Fit-to-view on demand
//! - Zoom-dependent detail fading
//!
//! # Example
//!
//! ```ignore
//! view! {
//!     <GraphCanvas
//!         workspace=workspace
//!         selected=selected
//!         fit_requests=fit_requests
//!         on_select=Callback::new(move |id| select(id))
//!         on_move=Callback::new(move |(id, pos)| move_node(id, pos))
//!         on_connect=Callback::new(move |(source, target)| connect(source, target))
//!     />
//! }
//! ```

mod component;
mod render;
mod scale;
mod state;
mod theme;

pub use component::GraphCanvas;
pub use theme::{CanvasTheme, Color};
