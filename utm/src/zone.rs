use crate::{
    constants::{ZONE_COUNT, ZONE_WIDTH_DEG},
    UtmError,
};
use std::fmt;

/// A UTM longitude zone, numbered 1 through 60 eastward from the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zone(u8);

impl Zone {
    pub fn new(number: u8) -> Result<Self, UtmError> {
        if (1..=ZONE_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(UtmError::Zone(number))
        }
    }

    /// Returns the zone containing `longitude` (decimal degrees).
    ///
    /// A longitude on a zone boundary belongs to the zone east of it,
    /// except for 180° which is folded into zone 60.
    pub fn from_longitude(longitude: f64) -> Result<Self, UtmError> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(UtmError::Longitude(longitude));
        }
        let index = ((longitude + 180.0) / ZONE_WIDTH_DEG).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let number = (index as u8 + 1).min(ZONE_COUNT);
        Ok(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Returns the longitude of this zone's central meridian in
    /// decimal degrees.
    pub fn central_meridian(self) -> f64 {
        f64::from(self.0) * ZONE_WIDTH_DEG - 183.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
