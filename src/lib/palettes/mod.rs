pub mod palette;

/// The largest possible channel sum of a fully lit color, 3 × 255.
pub const MAX_CHANNEL_SUM: u16 = 255 * 3;
