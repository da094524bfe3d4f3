//! GPS sub-table to decimal-degree conversion.

use crate::Metadata;
use exif::{Tag, Value};
use geo::Coord;
use log::debug;

/// A photo's capture location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Decimal degrees, positive north.
    pub latitude: f64,
    /// Decimal degrees, positive east.
    pub longitude: f64,
    /// Meters, as stored in the image.
    pub altitude: f64,
}

impl GeoPoint {
    /// Returns this point's horizontal position as a `geo` coordinate
    /// (`x` = longitude, `y` = latitude).
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Converts degrees, minutes and seconds to decimal degrees.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Returns the location stored in `metadata`'s GPS sub-table.
///
/// Latitude, longitude and both hemisphere references must all be
/// present; otherwise the image is unsuitable and `None` is returned.
/// A missing altitude is not: it defaults to `0.0`.
pub fn extract_coordinates(metadata: &Metadata) -> Option<GeoPoint> {
    let latitude = metadata.gps_field(Tag::GPSLatitude).and_then(decode_dms);
    let latitude_ref = metadata.gps_field(Tag::GPSLatitudeRef).and_then(decode_ref);
    let longitude = metadata.gps_field(Tag::GPSLongitude).and_then(decode_dms);
    let longitude_ref = metadata
        .gps_field(Tag::GPSLongitudeRef)
        .and_then(decode_ref);

    let (Some(latitude), Some(latitude_ref), Some(longitude), Some(longitude_ref)) =
        (latitude, latitude_ref, longitude, longitude_ref)
    else {
        debug!("incomplete GPS position");
        return None;
    };

    let altitude = metadata
        .gps_field(Tag::GPSAltitude)
        .and_then(decode_altitude)
        .unwrap_or(0.0);

    Some(GeoPoint {
        latitude: signed(latitude, &latitude_ref, "S"),
        longitude: signed(longitude, &longitude_ref, "W"),
        altitude,
    })
}

fn signed(value: f64, reference: &str, negative: &str) -> f64 {
    if reference == negative {
        -value
    } else {
        value
    }
}

/// Decodes a `[degrees, minutes, seconds]` rational triple.
fn decode_dms(value: &Value) -> Option<f64> {
    let dms = match value {
        Value::Rational(v) if v.len() >= 3 => {
            dms_to_decimal(v[0].to_f64(), v[1].to_f64(), v[2].to_f64())
        }
        Value::SRational(v) if v.len() >= 3 => {
            dms_to_decimal(v[0].to_f64(), v[1].to_f64(), v[2].to_f64())
        }
        _ => return None,
    };
    dms.is_finite().then_some(dms)
}

/// Decodes a hemisphere reference (`"N"`, `"S"`, `"E"`, `"W"`).
fn decode_ref(value: &Value) -> Option<String> {
    let Value::Ascii(strings) = value else {
        return None;
    };
    let raw = String::from_utf8_lossy(strings.first()?);
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn decode_altitude(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(v) => v.first().filter(|r| r.denom != 0).map(|r| r.to_f64()),
        Value::SRational(v) => v.first().filter(|r| r.denom != 0).map(|r| r.to_f64()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{dms_to_decimal, extract_coordinates, GeoPoint};
    use crate::{
        fixtures::{ascii, dms},
        Metadata,
    };
    use approx::assert_relative_eq;
    use exif::{Rational, SRational, Tag, Value};

    fn altitude(num: u32, denom: u32) -> Value {
        Value::Rational(vec![Rational::from((num, denom))])
    }

    /// 37°46'30"N 122°25'6"W.
    fn san_francisco(lat_ref: &str, lon_ref: &str) -> Metadata {
        let mut metadata = Metadata::default();
        metadata.insert(Tag::GPSLatitude, dms([37, 46, 30]));
        metadata.insert(Tag::GPSLatitudeRef, ascii(lat_ref));
        metadata.insert(Tag::GPSLongitude, dms([122, 25, 6]));
        metadata.insert(Tag::GPSLongitudeRef, ascii(lon_ref));
        metadata
    }

    #[test]
    fn test_dms_to_decimal() {
        assert_relative_eq!(dms_to_decimal(37.0, 46.0, 30.0), 37.775);
        assert_relative_eq!(dms_to_decimal(122.0, 25.0, 6.0), 122.418_333_333_333_33);
        assert_relative_eq!(dms_to_decimal(0.0, 0.0, 36.0), 0.01);
        for (d, m, s) in [(0.0, 0.0, 0.0), (89.0, 59.0, 59.99), (179.0, 30.0, 0.5)] {
            assert_relative_eq!(dms_to_decimal(d, m, s), d + m / 60.0 + s / 3600.0);
        }
    }

    #[test]
    fn test_hemisphere_sign() {
        let point = extract_coordinates(&san_francisco("N", "W")).unwrap();
        assert_relative_eq!(point.latitude, 37.775);
        assert_relative_eq!(point.longitude, -122.418_333_333_333_33);

        let point = extract_coordinates(&san_francisco("S", "E")).unwrap();
        assert!(point.latitude < 0.0);
        assert!(point.longitude > 0.0);

        // Anything but an exact "S"/"W" leaves the sign alone.
        let point = extract_coordinates(&san_francisco("s?", "West")).unwrap();
        assert!(point.latitude > 0.0);
        assert!(point.longitude > 0.0);

        // NUL padding from fixed-width writers.
        let point = extract_coordinates(&san_francisco("S\0", "W ")).unwrap();
        assert!(point.latitude < 0.0);
        assert!(point.longitude < 0.0);
    }

    #[test]
    fn test_missing_field_yields_none() {
        for tag in [
            Tag::GPSLatitude,
            Tag::GPSLatitudeRef,
            Tag::GPSLongitude,
            Tag::GPSLongitudeRef,
        ] {
            let mut metadata = san_francisco("N", "W");
            metadata.gps.as_mut().unwrap().remove(&tag.to_string());
            metadata.insert(Tag::GPSAltitude, altitude(30, 1));
            assert_eq!(extract_coordinates(&metadata), None, "without {tag}");
        }
        assert_eq!(extract_coordinates(&Metadata::default()), None);
    }

    #[test]
    fn test_malformed_fields_count_as_absent() {
        let mut metadata = san_francisco("N", "W");
        metadata.insert(
            Tag::GPSLatitude,
            Value::Rational(vec![Rational::from((37, 1)), Rational::from((46, 1))]),
        );
        assert_eq!(extract_coordinates(&metadata), None);

        let mut metadata = san_francisco("N", "W");
        metadata.insert(
            Tag::GPSLongitude,
            Value::Rational(vec![
                Rational::from((122, 0)),
                Rational::from((25, 1)),
                Rational::from((6, 1)),
            ]),
        );
        assert_eq!(extract_coordinates(&metadata), None);

        let metadata = san_francisco("", "W");
        assert_eq!(extract_coordinates(&metadata), None);
    }

    #[test]
    fn test_altitude() {
        let point = extract_coordinates(&san_francisco("N", "W")).unwrap();
        assert_eq!(point.altitude, 0.0);

        let mut metadata = san_francisco("N", "W");
        metadata.insert(Tag::GPSAltitude, altitude(61, 2));
        let point = extract_coordinates(&metadata).unwrap();
        assert_relative_eq!(point.altitude, 30.5);

        metadata.insert(Tag::GPSAltitude, altitude(30, 0));
        let point = extract_coordinates(&metadata).unwrap();
        assert_eq!(point.altitude, 0.0);

        metadata.insert(Tag::GPSAltitude, ascii("30"));
        let point = extract_coordinates(&metadata).unwrap();
        assert_eq!(point.altitude, 0.0);
    }

    #[test]
    fn test_signed_rationals() {
        let mut metadata = san_francisco("N", "W");
        metadata.insert(
            Tag::GPSLatitude,
            Value::SRational(vec![
                SRational::from((37, 1)),
                SRational::from((93, 2)),
                SRational::from((0, 1)),
            ]),
        );
        let point = extract_coordinates(&metadata).unwrap();
        assert_relative_eq!(point.latitude, 37.775);
    }

    #[test]
    fn test_equator_and_prime_meridian_are_kept() {
        let mut metadata = Metadata::default();
        metadata.insert(Tag::GPSLatitude, dms([0, 0, 0]));
        metadata.insert(Tag::GPSLatitudeRef, ascii("N"));
        metadata.insert(Tag::GPSLongitude, dms([0, 0, 0]));
        metadata.insert(Tag::GPSLongitudeRef, ascii("E"));
        let point = extract_coordinates(&metadata).unwrap();
        assert_eq!(
            point,
            GeoPoint {
                latitude: 0.0,
                longitude: 0.0,
                altitude: 0.0
            }
        );
        assert_eq!(point.coord(), geo::coord! { x: 0.0, y: 0.0 });
    }
}
