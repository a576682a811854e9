//! Colors and visual style for the service canvas.
//!
//! There is a single dark theme; cards take their accent from the node kind
//! and their status pill from the node status.

use crate::model::{NodeKind, NodeStatus};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, different opacity.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let channel = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: channel(self.r),
			g: channel(self.g),
			b: channel(self.b),
			a: self.a,
		}
	}

	/// Parse `#rrggbb`, `#rgb`, `rgb(..)` or `rgba(..)`.
	pub fn parse(css: &str) -> Option<Self> {
		let css = css.trim();
		if let Some(hex) = css.strip_prefix('#') {
			if !hex.is_ascii() {
				return None;
			}
			let channel = |s: &str| u8::from_str_radix(s, 16).ok();
			return match hex.len() {
				6 => Some(Color::rgb(
					channel(&hex[0..2])?,
					channel(&hex[2..4])?,
					channel(&hex[4..6])?,
				)),
				3 => {
					let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
					Some(Color::rgb(short(0)?, short(1)?, short(2)?))
				}
				_ => None,
			};
		}

		let inner = css
			.strip_prefix("rgba(")
			.or_else(|| css.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
		let (r, g, b) = (
			parts.first()?.parse().ok()?,
			parts.get(1)?.parse().ok()?,
			parts.get(2)?.parse().ok()?,
		);
		let a = match parts.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}

	/// CSS form: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Card colors for one node kind.
#[derive(Clone, Debug)]
pub struct KindStyle {
	/// Card background.
	pub fill: Color,
	/// Card outline.
	pub border: Color,
	/// Outline of the selected card.
	pub selected_border: Color,
	/// Kind badge and default scale bar color.
	pub accent: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct CanvasTheme {
	/// Canvas fill behind the dot grid.
	pub background: Color,
	/// Dot grid color.
	pub dots: Color,
	/// Resting edge color.
	pub edge: Color,
	/// Edges touching the selected node.
	pub edge_active: Color,
	/// Fill under the kind tint.
	pub card_base: Color,
	/// Card titles and values.
	pub text: Color,
	/// Labels and secondary text.
	pub text_muted: Color,
	/// Empty part of the scale bar.
	pub track: Color,
	/// Service cards.
	pub service: KindStyle,
	/// Database cards.
	pub database: KindStyle,
	/// Pill for [`NodeStatus::Healthy`].
	pub healthy: Color,
	/// Pill for [`NodeStatus::Degraded`].
	pub degraded: Color,
	/// Pill for [`NodeStatus::Down`].
	pub down: Color,
	/// CSS font stack for card text.
	pub font_family: &'static str,
}

impl CanvasTheme {
	/// Card style for `kind`.
	pub fn kind(&self, kind: NodeKind) -> &KindStyle {
		match kind {
			NodeKind::Service => &self.service,
			NodeKind::Database => &self.database,
		}
	}

	/// Pill color for `status`.
	pub fn status(&self, status: NodeStatus) -> Color {
		match status {
			NodeStatus::Healthy => self.healthy,
			NodeStatus::Degraded => self.degraded,
			NodeStatus::Down => self.down,
		}
	}

	/// CSS font shorthand at `px` pixels.
	pub fn font(&self, weight: u16, px: f64) -> String {
		format!("{weight} {px}px {}", self.font_family)
	}
}

impl Default for CanvasTheme {
	fn default() -> Self {
		Self {
			background: Color::rgb(20, 20, 20),
			dots: Color::rgba(137, 145, 157, 0.12),
			edge: Color::rgba(148, 163, 184, 0.55),
			edge_active: Color::rgba(96, 165, 250, 0.95),
			card_base: Color::rgb(26, 27, 31),
			text: Color::rgb(255, 255, 255),
			text_muted: Color::rgb(156, 163, 175),
			track: Color::rgba(255, 255, 255, 0.08),
			service: KindStyle {
				fill: Color::rgba(59, 130, 246, 0.13),
				border: Color::rgba(59, 130, 246, 0.3),
				selected_border: Color::rgba(59, 130, 246, 0.75),
				accent: Color::rgb(96, 165, 250),
			},
			database: KindStyle {
				fill: Color::rgba(139, 92, 246, 0.13),
				border: Color::rgba(139, 92, 246, 0.3),
				selected_border: Color::rgba(139, 92, 246, 0.75),
				accent: Color::rgb(167, 139, 250),
			},
			healthy: Color::rgb(74, 222, 128),
			degraded: Color::rgb(251, 191, 36),
			down: Color::rgb(248, 113, 113),
			font_family: "Inter, system-ui, sans-serif",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_notation() {
		assert_eq!(Color::parse("#38bdf8"), Some(Color::rgb(0x38, 0xbd, 0xf8)));
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(Color::parse("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
		assert_eq!(Color::parse("rgba(1,2,3,0.5)"), Some(Color::rgba(1, 2, 3, 0.5)));
		assert_eq!(Color::parse("tomato"), None);
		assert_eq!(Color::parse("#12345"), None);
	}

	#[test]
	fn css_output_drops_opaque_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(Color::rgba(0, 0, 0, 0.25).to_css(), "rgba(0, 0, 0, 0.25)");
	}

	#[test]
	fn lighten_moves_towards_white() {
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(0, 100, 255).lighten(0.0), Color::rgb(0, 100, 255));
	}

	#[test]
	fn status_colors_are_distinct() {
		let theme = CanvasTheme::default();
		let colors: Vec<Color> = NodeStatus::ALL.iter().map(|s| theme.status(*s)).collect();
		assert_ne!(colors[0], colors[1]);
		assert_ne!(colors[1], colors[2]);
		assert_ne!(theme.kind(NodeKind::Service).accent, theme.kind(NodeKind::Database).accent);
	}
}
