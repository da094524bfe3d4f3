//! Writes synthetic geotagged images into scratch directories.

pub use geotag::fixtures::{gps_fields, san_francisco};
use geotag::{exif::Field, fixtures};
use std::path::Path;

pub fn write_jpeg(path: &Path, fields: &[Field]) {
    write(path, &fixtures::jpeg(fields).unwrap());
}

pub fn write_png(path: &Path, fields: &[Field]) {
    write(path, &fixtures::png(fields).unwrap());
}

fn write(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}
