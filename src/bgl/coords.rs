//! Fixed-point conversions used by scenery object headers.

const LON_UNITS: f64 = 3.0 * 0x1000_0000 as f64;
const LAT_UNITS: f64 = 2.0 * 0x1000_0000 as f64;

/// Convert a packed longitude to decimal degrees.
pub fn longitude(raw: u32) -> f64 {
	f64::from(raw) * (360.0 / LON_UNITS) - 180.0
}

/// Convert a packed latitude to decimal degrees.
pub fn latitude(raw: u32) -> f64 {
	90.0 - f64::from(raw) * (180.0 / LAT_UNITS)
}

/// Convert a packed pitch/bank/heading value to degrees.
pub fn angle(raw: u16) -> f32 {
	f32::from(raw) * 360.0 / 65536.0
}

/// Convert a millimetre altitude to metres.
pub fn altitude(raw: i32) -> f64 {
	f64::from(raw) / 1000.0
}
