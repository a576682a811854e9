//! Seed data for the mock backend.
//!
//! The catalog ships as `catalog.json` next to this file, in the same camelCase
//! shape the model serializes to. Some graph templates have no listed
//! application; they are reachable by id only.

use std::collections::HashMap;

use serde::Deserialize;

use crate::model::{Application, GraphData};

const CATALOG_JSON: &str = include_str!("catalog.json");

/// Accents handed out to user-created applications, in rotation.
pub const CREATED_APP_ACCENTS: &[&str] = &["#3b82f6", "#10b981", "#f97316", "#a855f7", "#14b8a6"];

/// Everything the backend starts with.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
	/// Listed applications, in display order.
	pub applications: Vec<Application>,
	/// Graph templates keyed by application id.
	pub graphs: HashMap<String, GraphData>,
}

/// Parse the bundled catalog.
pub fn load() -> Result<Seed, serde_json::Error> {
	serde_json::from_str(CATALOG_JSON)
}
