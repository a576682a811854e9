//! Bookkeeping for in-flight fetches.
//!
//! The mock backend never cancels a request, so responses can arrive out of
//! order when the user switches applications quickly. A [`RequestGate`] hands
//! out a ticket per request; only the most recently issued ticket is current,
//! and responses carrying any other ticket are dropped.

/// Proof that a request was issued, carried alongside its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<K> {
	/// What the request was for.
	pub key: K,
	generation: u64,
}

/// Last-request-wins guard.
#[derive(Clone, Debug)]
pub struct RequestGate<K> {
	generation: u64,
	latest: Option<K>,
}

impl<K> Default for RequestGate<K> {
	fn default() -> Self {
		Self {
			generation: 0,
			latest: None,
		}
	}
}

impl<K: Clone + PartialEq> RequestGate<K> {
	/// Record a new request for `key`, superseding every earlier ticket.
	pub fn issue(&mut self, key: K) -> Ticket<K> {
		self.generation += 1;
		self.latest = Some(key.clone());
		Ticket {
			key,
			generation: self.generation,
		}
	}

	/// Whether `ticket` belongs to the most recently issued request.
	pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
		ticket.generation == self.generation && self.latest.as_ref() == Some(&ticket.key)
	}
}

/// Lifecycle of a fetch as seen by a view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState<T> {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// A request is in flight.
	Loading,
	/// The latest request succeeded.
	Ready(T),
	/// The latest request failed with this message.
	Failed(String),
}

impl<T> FetchState<T> {
	/// Whether a request is in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self, FetchState::Loading)
	}

	/// The loaded value, if any.
	pub fn ready(&self) -> Option<&T> {
		match self {
			FetchState::Ready(value) => Some(value),
			_ => None,
		}
	}

	/// The failure message, if the latest request failed.
	pub fn error(&self) -> Option<&str> {
		match self {
			FetchState::Failed(message) => Some(message),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type GraphKey = (String, bool);

	fn key(app: &str, fail: bool) -> GraphKey {
		(app.to_string(), fail)
	}

	#[test]
	fn later_request_supersedes_earlier_one() {
		let mut gate = RequestGate::default();
		let first = gate.issue(key("data-pipeline", false));
		let second = gate.issue(key("edge-platform", false));

		// The first response arrives late and must be ignored.
		assert!(!gate.is_current(&first));
		assert!(gate.is_current(&second));
	}

	#[test]
	fn reissuing_the_same_key_still_invalidates_the_old_ticket() {
		let mut gate = RequestGate::default();
		let first = gate.issue(key("edge-platform", false));
		let retry = gate.issue(key("edge-platform", false));
		assert!(!gate.is_current(&first));
		assert!(gate.is_current(&retry));
	}

	#[test]
	fn flipping_the_failure_toggle_changes_the_key() {
		let mut gate = RequestGate::default();
		let failing = gate.issue(key("edge-platform", true));
		let recovered = gate.issue(key("edge-platform", false));
		assert!(!gate.is_current(&failing));
		assert!(gate.is_current(&recovered));
	}

	#[test]
	fn fetch_state_accessors() {
		let ready: FetchState<u8> = FetchState::Ready(3);
		assert_eq!(ready.ready(), Some(&3));
		assert!(!ready.is_loading());

		let failed: FetchState<u8> = FetchState::Failed("boom".into());
		assert_eq!(failed.error(), Some("boom"));
		assert!(!failed.is_loading());
		assert!(FetchState::<u8>::Loading.is_loading());
		assert!(!FetchState::<u8>::Idle.is_loading());
		assert_eq!(FetchState::<u8>::default(), FetchState::Idle);
	}
}
