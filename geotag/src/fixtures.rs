//! Synthetic geotagged images, for tests of this and downstream
//! crates.
//!
//! Every image carries a `Software` tag besides the given fields, so
//! its primary IFD is never empty.

use exif::{experimental::Writer, Error, Field, In, Rational, Tag, Value};
use std::io::Cursor;

const PNG_SIG: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

/// Returns a `[degrees, minutes, seconds]` rational triple.
pub fn dms([d, m, s]: [u32; 3]) -> Value {
    Value::Rational(vec![
        Rational::from((d, 1)),
        Rational::from((m, 1)),
        Rational::from((s, 1)),
    ])
}

pub fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

/// Returns GPS fields for the given position, in whole seconds.
pub fn gps_fields(
    lat: [u32; 3],
    lat_ref: &str,
    lon: [u32; 3],
    lon_ref: &str,
    altitude: Option<u32>,
) -> Vec<Field> {
    let mut fields = vec![
        field(Tag::GPSLatitudeRef, ascii(lat_ref)),
        field(Tag::GPSLatitude, dms(lat)),
        field(Tag::GPSLongitudeRef, ascii(lon_ref)),
        field(Tag::GPSLongitude, dms(lon)),
    ];
    if let Some(altitude) = altitude {
        fields.push(field(
            Tag::GPSAltitude,
            Value::Rational(vec![Rational::from((altitude, 1))]),
        ));
    }
    fields
}

/// 37°46'30"N 122°25'6"W, `altitude` meters.
pub fn san_francisco(altitude: Option<u32>) -> Vec<Field> {
    gps_fields([37, 46, 30], "N", [122, 25, 6], "W", altitude)
}

/// Returns a big-endian TIFF block holding `fields`.
pub fn tiff(fields: &[Field]) -> Result<Vec<u8>, Error> {
    let software = field(Tag::Software, ascii("geotag fixtures"));
    let mut writer = Writer::new();
    writer.push_field(&software);
    for field in fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false)?;
    Ok(tiff.into_inner())
}

/// Returns a JPEG consisting of SOI, one APP1 EXIF segment holding
/// `fields`, and EOI.
pub fn jpeg(fields: &[Field]) -> Result<Vec<u8>, Error> {
    let tiff = tiff(fields)?;
    let segment_len = u16::try_from(2 + 6 + tiff.len())
        .map_err(|_| Error::InvalidFormat("TIFF block exceeds one APP1 segment"))?;
    let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xff, 0xd9]);
    Ok(jpeg)
}

/// Returns a 1×1 grayscale PNG header (signature, IHDR) followed by an
/// `eXIf` chunk holding `fields`, and IEND.
pub fn png(fields: &[Field]) -> Result<Vec<u8>, Error> {
    let tiff = tiff(fields)?;
    let mut png = PNG_SIG.to_vec();
    // width 1, height 1, bit depth 8, grayscale, default methods
    let ihdr = [0, 0, 0, 1, 0, 0, 0, 1, 8, 0, 0, 0, 0];
    push_chunk(&mut png, b"IHDR", &ihdr)?;
    push_chunk(&mut png, b"eXIf", &tiff)?;
    push_chunk(&mut png, b"IEND", &[])?;
    Ok(png)
}

fn push_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<(), Error> {
    let len =
        u32::try_from(data.len()).map_err(|_| Error::InvalidFormat("PNG chunk too long"))?;
    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);
    png.extend_from_slice(&len.to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);
    png.extend_from_slice(&crc.finalize().to_be_bytes());
    Ok(())
}
