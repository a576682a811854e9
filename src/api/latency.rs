//! Timer seam for simulated request latency.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use wasm_bindgen::JsValue;

/// Suspends the caller for a duration without blocking the event loop.
pub trait Sleep {
	/// Resolve once `duration` has passed.
	fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Browser timer backed by `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutSleep;

impl Sleep for TimeoutSleep {
	fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
		let millis = duration.as_millis().min(i32::MAX as u128) as i32;
		async move {
			let promise = js_sys::Promise::new(&mut |resolve, _reject| {
				let scheduled = web_sys::window().and_then(|window| {
					window
						.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
						.ok()
				});
				// Without a window there is nothing to wait on; resolve right away.
				if scheduled.is_none() {
					let _ = resolve.call0(&JsValue::NULL);
				}
			});
			let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
		}
		.boxed_local()
	}
}

/// Resolves immediately and remembers every requested duration.
#[derive(Clone, Debug, Default)]
pub struct InstantSleep {
	requested: Rc<RefCell<Vec<Duration>>>,
}

impl InstantSleep {
	/// Durations requested so far, oldest first.
	pub fn requested(&self) -> Vec<Duration> {
		self.requested.borrow().clone()
	}
}

impl Sleep for InstantSleep {
	fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
		self.requested.borrow_mut().push(duration);
		futures::future::ready(()).boxed_local()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn instant_sleep_records_and_resolves() {
		let sleeper = InstantSleep::default();
		let handle = sleeper.clone();
		futures::executor::block_on(sleeper.sleep(Duration::from_millis(420)));
		futures::executor::block_on(sleeper.sleep(Duration::from_millis(10)));
		assert_eq!(
			handle.requested(),
			vec![Duration::from_millis(420), Duration::from_millis(10)]
		);
	}
}
