//! Runtime configuration for the mock backend and layout.
//!
//! Every field has a default, so the host page only needs to provide the keys
//! it wants to override (or nothing at all).

use serde::Deserialize;

use crate::layout::LayoutConfig;

/// Application used when a graph is requested for an unknown id.
pub const DEFAULT_APPLICATION: &str = "supertokens-golang";

/// Simulated request latency bounds in milliseconds, `[min_ms, max_ms)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatencyConfig {
	/// Shortest delay, inclusive.
	pub min_ms: u64,
	/// Longest delay, exclusive. Values not above `min_ms` pin the delay to `min_ms`.
	pub max_ms: u64,
}

impl Default for LatencyConfig {
	fn default() -> Self {
		Self {
			min_ms: 400,
			max_ms: 1000,
		}
	}
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	/// Delay applied to every mock fetch.
	pub latency: LatencyConfig,
	/// Graph served for ids missing from the catalog.
	pub default_application: String,
	/// Placement of fetched and added nodes.
	pub layout: LayoutConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			latency: LatencyConfig::default(),
			default_application: DEFAULT_APPLICATION.to_string(),
			layout: LayoutConfig::default(),
		}
	}
}

impl AppConfig {
	/// Parse a (possibly partial) JSON configuration document.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
