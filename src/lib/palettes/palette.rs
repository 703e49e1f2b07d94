use std::fmt::{Display, Formatter};

use rand::Rng;

use crate::palettes::MAX_CHANNEL_SUM;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl From<[u8; 3]> for Color {
	fn from(v: [u8; 3]) -> Self {
		Self {
			r: v[0],
			g: v[1],
			b: v[2],
		}
	}
}

impl From<u32> for Color {
	fn from(v: u32) -> Self {
		Self {
			r: ((v >> 16) & 0xFF) as u8,
			g: ((v >> 8) & 0xFF) as u8,
			b: (v & 0xFF) as u8,
		}
	}
}

impl Color {
	/// Parses a color from a string of exactly six hex digits.
	/// A single leading `#` is tolerated and ignored.
	pub fn from_hex(s: &str) -> Result<Self, ColorError> {
		let digits = s.strip_prefix('#').unwrap_or(s);
		if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ColorError::InvalidHex(s.to_owned()));
		}

		let parsed_int = u32::from_str_radix(digits, 16)
			.map_err(|_| ColorError::InvalidHex(s.to_owned()))?;

		Ok(Self::from(parsed_int))
	}

	/// Formats the color as six lowercase hex digits behind the given prefix.
	pub fn hex_format(&self, prefix: &str) -> String {
		format!("{prefix}{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	pub fn channel_sum(&self) -> u16 {
		u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
	}

	/// Draws a random color whose channel sum is at least `minimum_seed`.
	/// Values above [MAX_CHANNEL_SUM] are clamped down to it.
	///
	/// Each channel is drawn uniformly from the range that still lets the
	/// remaining channels make up the rest of the required sum.
	pub fn random_with_minimum<R: Rng>(rng: &mut R, minimum_seed: u16) -> Self {
		let minimum_seed = minimum_seed.min(MAX_CHANNEL_SUM);

		let r = rng.gen_range(minimum_seed.saturating_sub(255 * 2) as u8..=255);
		let g = rng.gen_range(minimum_seed.saturating_sub(u16::from(r) + 255) as u8..=255);
		let b = rng.gen_range(minimum_seed.saturating_sub(u16::from(r) + u16::from(g)) as u8..=255);

		Self { r, g, b }
	}
}

impl Display for Color {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let mut rgb = self.r as u32;
		rgb = (rgb << 8) | self.g as u32;
		rgb = (rgb << 8) | self.b as u32;
		write!(f, "#{:06X}", rgb)
	}
}

#[derive(Debug)]
pub enum ColorError {
	InvalidHex(String),
}

impl Display for ColorError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ColorError::InvalidHex(s) => write!(f, "\"{s}\" is not a 6-digit hex color"),
		}
	}
}

impl std::error::Error for ColorError {}
