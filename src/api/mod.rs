//! Mock backend serving the application catalog and per-application graphs.
//!
//! Every fetch waits a random delay before answering and can be told to fail,
//! which is enough to exercise loading, error and retry paths in the views.
//! Callers always receive owned copies; nothing they do to a response can leak
//! back into the catalog.

mod catalog;
mod latency;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub use catalog::CREATED_APP_ACCENTS;
pub use latency::{InstantSleep, Sleep, TimeoutSleep};

use crate::config::{AppConfig, LatencyConfig};
use crate::layout::{LayoutConfig, arrange_with};
use crate::model::{Application, GraphData};

/// Returned when failure simulation is switched on for a request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("mock API error while fetching {resource}: flip the failure toggle to recover")]
pub struct MockFetchError {
	/// What was being fetched, e.g. `"applications"`.
	pub resource: String,
}

/// Rejected catalog mutations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
	/// The name was empty after trimming.
	#[error("application name must not be empty")]
	EmptyName,
}

struct Catalog {
	applications: Vec<Application>,
	graphs: HashMap<String, GraphData>,
	/// Graph served for unknown ids; survives deletion of its application.
	fallback: GraphData,
	created: usize,
}

/// In-memory mock backend.
///
/// Cheap to clone: clones share the same catalog, timer and RNG, which is how
/// the view layer hands it to spawned fetch tasks.
#[derive(Clone)]
pub struct MockApi {
	catalog: Rc<RefCell<Catalog>>,
	sleeper: Rc<dyn Sleep>,
	rng: Rc<RefCell<StdRng>>,
	latency: LatencyConfig,
	layout: LayoutConfig,
}

impl MockApi {
	/// Build a backend with an explicit timer and RNG.
	pub fn new(config: &AppConfig, sleeper: impl Sleep + 'static, rng: StdRng) -> Self {
		let seed = catalog::load().unwrap_or_else(|err| {
			warn!("service-canvas: bundled catalog is invalid: {err}");
			catalog::Seed::default()
		});
		let graphs = seed.graphs;
		let fallback = match graphs.get(&config.default_application) {
			Some(graph) => graph.clone(),
			None => {
				warn!(
					"service-canvas: default application {:?} has no graph template",
					config.default_application
				);
				GraphData::default()
			}
		};

		Self {
			catalog: Rc::new(RefCell::new(Catalog {
				applications: seed.applications,
				graphs,
				fallback,
				created: 0,
			})),
			sleeper: Rc::new(sleeper),
			rng: Rc::new(RefCell::new(rng)),
			latency: config.latency.clone(),
			layout: config.layout.clone(),
		}
	}

	/// Backend for the browser: `setTimeout` latency and an entropy-seeded RNG.
	pub fn browser(config: &AppConfig) -> Self {
		Self::new(config, TimeoutSleep, StdRng::from_entropy())
	}

	/// Draw a delay uniformly from `[min_ms, max_ms)`.
	fn latency(&self) -> Duration {
		let LatencyConfig { min_ms, max_ms } = self.latency;
		let millis = if max_ms > min_ms {
			self.rng.borrow_mut().gen_range(min_ms..max_ms)
		} else {
			min_ms
		};
		Duration::from_millis(millis)
	}

	async fn respond(&self, resource: &str, simulate_failure: bool) -> Result<(), MockFetchError> {
		let delay = self.latency();
		debug!("service-canvas: fetching {resource} ({}ms)", delay.as_millis());
		self.sleeper.sleep(delay).await;

		if simulate_failure {
			warn!("service-canvas: simulated failure fetching {resource}");
			return Err(MockFetchError {
				resource: resource.to_string(),
			});
		}
		Ok(())
	}

	/// Fetch the application catalog.
	///
	/// The listing is copied when the call is made; edits to the catalog while
	/// the response is delayed do not show up in it.
	pub fn fetch_applications(
		&self,
		simulate_failure: bool,
	) -> impl Future<Output = Result<Vec<Application>, MockFetchError>> + 'static {
		let applications = self.catalog.borrow().applications.clone();
		let api = self.clone();
		async move {
			api.respond("applications", simulate_failure).await?;
			Ok(applications)
		}
	}

	/// Fetch the graph of `application_id`, laid out for display.
	///
	/// Unknown ids get the default application's graph instead of an error.
	/// Like [`MockApi::fetch_applications`], the graph is taken from the
	/// catalog at call time.
	pub fn fetch_graph(
		&self,
		application_id: &str,
		simulate_failure: bool,
	) -> impl Future<Output = Result<GraphData, MockFetchError>> + 'static {
		let graph = self.snapshot_graph(application_id);
		let resource = format!("graph {application_id}");
		let api = self.clone();
		async move {
			api.respond(&resource, simulate_failure).await?;
			Ok(graph)
		}
	}

	fn snapshot_graph(&self, application_id: &str) -> GraphData {
		let catalog = self.catalog.borrow();
		let template = catalog.graphs.get(application_id).unwrap_or_else(|| {
			debug!("service-canvas: no graph for {application_id:?}, serving default");
			&catalog.fallback
		});
		GraphData {
			nodes: arrange_with(&self.layout, &template.nodes),
			edges: template.edges.clone(),
		}
	}

	/// Append a new application with an empty graph.
	pub fn create_application(&self, name: &str, icon: &str) -> Result<Application, CatalogError> {
		let name = name.trim();
		if name.is_empty() {
			return Err(CatalogError::EmptyName);
		}

		let mut catalog = self.catalog.borrow_mut();
		let id = unique_id(&slugify(name, "app"), |candidate| {
			catalog.applications.iter().any(|a| a.id == candidate)
				|| catalog.graphs.contains_key(candidate)
		});
		let application = Application {
			id: id.clone(),
			name: name.to_string(),
			accent_color: CREATED_APP_ACCENTS[catalog.created % CREATED_APP_ACCENTS.len()]
				.to_string(),
			icon: icon.to_string(),
		};
		catalog.created += 1;
		catalog.applications.push(application.clone());
		catalog.graphs.insert(id, GraphData::default());

		info!("service-canvas: created application {:?}", application.id);
		Ok(application)
	}

	/// Remove an application and its graph. Returns whether it existed.
	pub fn delete_application(&self, id: &str) -> bool {
		let mut catalog = self.catalog.borrow_mut();
		let before = catalog.applications.len();
		catalog.applications.retain(|a| a.id != id);
		let removed = catalog.applications.len() != before;
		if removed {
			catalog.graphs.remove(id);
			info!("service-canvas: deleted application {id:?}");
		}
		removed
	}
}

/// Lowercase `name`, keep ASCII alphanumerics and join the rest with `-`.
pub(crate) fn slugify(name: &str, fallback: &str) -> String {
	let slug = name
		.to_lowercase()
		.split(|c: char| !c.is_ascii_alphanumeric())
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("-");
	if slug.is_empty() { fallback.to_string() } else { slug }
}

/// `base`, or `base-2`, `base-3`, ... for the first candidate not `taken`.
pub(crate) fn unique_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
	if !taken(base) {
		return base.to_string();
	}
	(2..)
		.map(|n| format!("{base}-{n}"))
		.find(|candidate| !taken(candidate))
		.unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;
	use pretty_assertions::assert_eq;

	use super::*;

	fn api() -> (MockApi, InstantSleep) {
		let sleeper = InstantSleep::default();
		let api = MockApi::new(&AppConfig::default(), sleeper.clone(), StdRng::seed_from_u64(7));
		(api, sleeper)
	}

	#[test]
	fn latency_samples_stay_in_configured_window() {
		let (api, sleeper) = api();
		for _ in 0..50 {
			block_on(api.fetch_applications(false)).unwrap();
		}
		let requested = sleeper.requested();
		assert_eq!(requested.len(), 50);
		for delay in requested {
			assert!(delay >= Duration::from_millis(400) && delay < Duration::from_millis(1000));
		}
	}

	#[test]
	fn degenerate_window_uses_minimum() {
		let sleeper = InstantSleep::default();
		let config = AppConfig {
			latency: LatencyConfig { min_ms: 25, max_ms: 25 },
			..AppConfig::default()
		};
		let api = MockApi::new(&config, sleeper.clone(), StdRng::seed_from_u64(1));
		block_on(api.fetch_graph("data-pipeline", false)).unwrap();
		assert_eq!(sleeper.requested(), vec![Duration::from_millis(25)]);
	}

	#[test]
	fn failures_still_wait_before_rejecting() {
		let (api, sleeper) = api();
		let err = block_on(api.fetch_graph("edge-platform", true)).unwrap_err();
		assert_eq!(err.resource, "graph edge-platform");
		assert_eq!(sleeper.requested().len(), 1);
	}

	#[test]
	fn created_applications_get_unique_slugs() {
		let (api, _) = api();
		let first = api.create_application("  Billing Service ", "cloud").unwrap();
		let second = api.create_application("billing service", "box").unwrap();
		assert_eq!(first.id, "billing-service");
		assert_eq!(first.name, "Billing Service");
		assert_eq!(second.id, "billing-service-2");
		assert_ne!(first.accent_color, second.accent_color);

		let apps = block_on(api.fetch_applications(false)).unwrap();
		assert_eq!(apps.len(), 7);
		assert_eq!(apps[6].id, "billing-service-2");
	}

	#[test]
	fn created_application_ids_avoid_unlisted_templates() {
		let (api, _) = api();
		let app = api.create_application("supertokens java", "box").unwrap();
		assert_eq!(app.id, "supertokens-java-2");
	}

	#[test]
	fn blank_names_are_rejected() {
		let (api, _) = api();
		assert_eq!(api.create_application("   ", "cloud"), Err(CatalogError::EmptyName));
	}

	#[test]
	fn created_application_starts_with_empty_graph() {
		let (api, _) = api();
		let app = api.create_application("Scratch", "layers").unwrap();
		let graph = block_on(api.fetch_graph(&app.id, false)).unwrap();
		assert_eq!(graph, GraphData::default());
	}

	#[test]
	fn deleting_cascades_to_the_graph() {
		let (api, _) = api();
		let fallback = block_on(api.fetch_graph("supertokens-golang", false)).unwrap();

		assert!(api.delete_application("data-pipeline"));
		assert!(!api.delete_application("data-pipeline"));

		let apps = block_on(api.fetch_applications(false)).unwrap();
		assert!(apps.iter().all(|a| a.id != "data-pipeline"));
		// The graph went with it, so the id now resolves like any unknown id.
		let graph = block_on(api.fetch_graph("data-pipeline", false)).unwrap();
		assert_eq!(graph, fallback);
	}

	#[test]
	fn in_flight_fetches_keep_the_graph_they_asked_for() {
		let (api, _) = api();
		let expected = block_on(api.fetch_graph("data-pipeline", false)).unwrap();

		let pending_graph = api.fetch_graph("data-pipeline", false);
		let pending_apps = api.fetch_applications(false);
		assert!(api.delete_application("data-pipeline"));

		assert_eq!(block_on(pending_graph).unwrap(), expected);
		let apps = block_on(pending_apps).unwrap();
		assert!(apps.iter().any(|a| a.id == "data-pipeline"));
	}

	#[test]
	fn default_graph_survives_deleting_its_application() {
		let (api, _) = api();
		let before = block_on(api.fetch_graph("unknown", false)).unwrap();
		assert!(api.delete_application("supertokens-golang"));
		let after = block_on(api.fetch_graph("unknown", false)).unwrap();
		assert_eq!(before, after);
		assert_eq!(after.nodes.len(), 4);
	}

	#[test]
	fn slugify_collapses_separators() {
		assert_eq!(slugify("Edge  Platform!!", "app"), "edge-platform");
		assert_eq!(slugify("***", "app"), "app");
		assert_eq!(slugify("Über API", "app"), "ber-api");
	}
}
