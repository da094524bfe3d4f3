//! Universal Transverse Mercator (UTM) projection on the WGS84
//! ellipsoid.
//!
//! Southern-hemisphere points are not given the customary 10 000 km
//! false northing; their northings are negative, so points on both
//! sides of the equator share one continuous axis.
//!
//! # References
//!
//! 1. C. F. F. Karney, [Transverse Mercator with an accuracy of a few
//!    nanometers](https://arxiv.org/abs/1002.1417), J. Geodesy 85(8),
//!    475–485 (2011).
//! 1. NGA.SIG.0012, _The Universal Grids and the Transverse Mercator
//!    and Polar Stereographic Map Projections_.

mod constants;
mod error;
mod projection;
mod zone;

pub use crate::{
    error::UtmError,
    projection::{project, Utm},
    zone::Zone,
};
pub use geo;
