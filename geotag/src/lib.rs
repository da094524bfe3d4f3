//! Photo geotags (EXIF GPS attributes).
//!
//! Reads the tag table embedded in an image, exposes it as a
//! name-keyed [Metadata] map, and turns its GPS sub-table into a
//! decimal-degree [GeoPoint].
//!
//! # References
//!
//! 1. CIPA DC-008, _Exchangeable image file format for digital still
//!    cameras_, GPS attribute information.
//! 1. [kamadak-exif](https://docs.rs/kamadak-exif), the container and
//!    TIFF parser underneath.

mod coordinates;
mod error;
#[cfg(any(test, feature = "fixtures"))]
#[doc(hidden)]
pub mod fixtures;
mod metadata;

pub use crate::{
    coordinates::{dms_to_decimal, extract_coordinates, GeoPoint},
    error::GeotagError,
    metadata::Metadata,
};
pub use exif;
