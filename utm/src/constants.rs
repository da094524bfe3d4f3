/// WGS84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Scale factor on the central meridian.
pub const K0: f64 = 0.9996;

/// Easting of every zone's central meridian, in meters.
pub const FALSE_EASTING: f64 = 500_000.0;

/// Width of a zone in degrees of longitude.
pub const ZONE_WIDTH_DEG: f64 = 6.0;

pub const ZONE_COUNT: u8 = 60;
