//! Zoom-dependent sizes for canvas decorations.
//!
//! Cards are drawn in world space and simply scale with the view. Strokes and
//! the dot grid would get unreadably thin or dense when zoomed out, so their
//! sizes are resolved per frame from the zoom level `k`.

/// How a length reacts to zoom.
#[derive(Clone, Copy, Debug)]
pub enum ScaleBehavior {
	/// Constant screen-space size (pixels).
	Screen,
	/// World-space size, clamped to `min_screen..=max_screen` pixels.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space length to draw with after the canvas transform is applied.
	pub fn apply(self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Opacity ramp: zero at `zero_k`, fully visible from `full_k` on.
#[derive(Clone, Copy, Debug)]
pub struct Fade {
	pub zero_k: f64,
	pub full_k: f64,
}

impl Fade {
	/// Opacity at zoom `k`.
	pub fn apply(self, k: f64) -> f64 {
		if self.zero_k == self.full_k {
			return 1.0;
		}
		((k - self.zero_k) / (self.full_k - self.zero_k)).clamp(0.0, 1.0)
	}
}

const DOT_GAP: f64 = 18.0;
/// Dots closer than this on screen are thinned out.
const MIN_DOT_SPACING: f64 = 12.0;
const EDGE_WIDTH: ScaleBehavior = ScaleBehavior::Clamped {
	min_screen: 1.0,
	max_screen: 3.0,
};
const DETAIL_FADE: Fade = Fade {
	zero_k: 0.4,
	full_k: 0.6,
};

/// Per-frame resolved values, in world units unless noted.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these values were resolved for.
	pub k: f64,
	pub edge_width: f64,
	pub arrow_size: f64,
	pub dot_gap: f64,
	pub dot_size: f64,
	/// Opacity of the metrics rows; the header stays readable at any zoom.
	pub detail_alpha: f64,
}

impl ScaledValues {
	pub fn new(k: f64) -> Self {
		let mut dot_gap = DOT_GAP;
		while dot_gap * k < MIN_DOT_SPACING {
			dot_gap *= 2.0;
		}

		let edge_width = EDGE_WIDTH.apply(1.5, k);
		Self {
			k,
			edge_width,
			arrow_size: (edge_width * 5.0).max(ScaleBehavior::Screen.apply(6.0, k)),
			dot_gap,
			dot_size: ScaleBehavior::Screen.apply(2.0, k),
			detail_alpha: DETAIL_FADE.apply(k),
		}
	}
}
