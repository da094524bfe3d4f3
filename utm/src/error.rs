use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum UtmError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),

    #[error("zone {0} outside 1..=60")]
    Zone(u8),
}
