//! EXIF tag table of a single image.

use crate::GeotagError;
use exif::{Context, Field, In, Reader, Tag, Value};
use log::debug;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, Seek},
    path::Path,
};

/// Primary-image tags keyed by tag name (`"Make"`, `"DateTime"`,
/// ...), with the GPS IFD expanded into its own sub-table
/// (`"GPSLatitude"`, `"GPSLatitudeRef"`, ...).
///
/// An image without an EXIF block yields an empty `Metadata`.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Tags outside the GPS sub-table.
    pub tags: BTreeMap<String, Value>,

    /// The GPS sub-table, if the image has one.
    pub gps: Option<BTreeMap<String, Value>>,
}

impl Metadata {
    /// Returns the metadata of the image file at `path`.
    ///
    /// The file is closed before returning, whether or not parsing
    /// succeeded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GeotagError> {
        let mut rdr = BufReader::new(File::open(path)?);
        Self::from_reader(&mut rdr)
    }

    /// Returns the metadata of the image read from `rdr`.
    ///
    /// Missing or blank EXIF data is not an error. Data which can't be
    /// parsed (unknown container, truncated segments, a broken TIFF
    /// structure) is.
    pub fn from_reader<R: BufRead + Seek>(rdr: &mut R) -> Result<Self, GeotagError> {
        match Reader::new().read_from_container(rdr) {
            Ok(exif) => Ok(Self::from_fields(exif.fields())),
            Err(exif::Error::NotFound(container)) => {
                debug!("no EXIF block in {container} container");
                Ok(Self::default())
            }
            Err(exif::Error::BlankValue(msg)) => {
                debug!("blank EXIF block, {msg}");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Collects the primary-image entries of `fields`.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a Field>,
    {
        let mut metadata = Self::default();
        for field in fields.into_iter().filter(|f| f.ifd_num == In::PRIMARY) {
            metadata.insert(field.tag, field.value.clone());
        }
        metadata
    }

    /// Stores `value` under `tag`'s name, routing GPS tags into the
    /// GPS sub-table.
    ///
    /// IFD pointer tags are structural and never stored.
    pub fn insert(&mut self, tag: Tag, value: Value) {
        if is_ifd_pointer(tag) {
            return;
        }
        let name = tag.to_string();
        match tag.context() {
            Context::Gps => {
                self.gps.get_or_insert_with(BTreeMap::new).insert(name, value);
            }
            _ => {
                self.tags.insert(name, value);
            }
        }
    }

    /// Returns the GPS sub-table entry for `tag`, if any.
    pub fn gps_field(&self, tag: Tag) -> Option<&Value> {
        self.gps.as_ref()?.get(&tag.to_string())
    }

    /// Returns true when the image carried no tags at all.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.gps.as_ref().map_or(true, BTreeMap::is_empty)
    }
}

fn is_ifd_pointer(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::ExifIFDPointer | Tag::GPSInfoIFDPointer | Tag::InteropIFDPointer
    )
}
