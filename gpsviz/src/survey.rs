//! Directory traversal and point accumulation.

use anyhow::{Context, Error as AnyError};
use geotag::{extract_coordinates, GeoPoint, GeotagError, Metadata};
use log::{debug, info, warn};
use std::{
    collections::BTreeSet,
    ffi::OsStr,
    path::{Path, PathBuf},
};
use utm::{project, UtmError, Zone};
use walkdir::{DirEntry, WalkDir};

const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// A photo location in UTM coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub zone: Zone,
    pub easting: f64,
    pub northing: f64,
    pub altitude: f64,
}

impl TryFrom<GeoPoint> for ProjectedPoint {
    type Error = UtmError;

    fn try_from(point: GeoPoint) -> Result<Self, UtmError> {
        let utm = project(point.coord())?;
        Ok(Self {
            zone: utm.zone,
            easting: utm.easting,
            northing: utm.northing,
            altitude: point.altitude,
        })
    }
}

/// A discovered image and the location it carries, if any.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub location: Option<GeoPoint>,
}

impl ImageRecord {
    pub fn read(path: &Path) -> Result<Self, GeotagError> {
        let metadata = Metadata::open(path)?;
        Ok(Self {
            path: path.to_owned(),
            location: extract_coordinates(&metadata),
        })
    }
}

/// What to do with an image whose metadata can't be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unreadable {
    /// Fail the whole run.
    Abort,
    /// Log a warning and move on.
    Skip,
}

/// Projected locations of every geotagged image below a directory, in
/// traversal order.
#[derive(Debug, Default)]
pub struct Survey {
    pub points: Vec<ProjectedPoint>,
    /// Image files examined.
    pub visited: usize,
    /// Image files which contributed no point.
    pub skipped: usize,
}

impl Survey {
    /// Walks `root` recursively, in file name order, collecting the
    /// location of every image carrying one.
    ///
    /// Only failing to read `root` itself aborts the walk; unreadable
    /// subdirectories are logged and skipped.
    pub fn scan(root: &Path, unreadable: Unreadable) -> Result<Self, AnyError> {
        let mut survey = Self::default();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("reading {}", root.display()));
                }
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };
            if is_file(&entry) && is_image(entry.file_name()) {
                survey.visit(entry.path(), unreadable)?;
            }
        }
        Ok(survey)
    }

    fn visit(&mut self, path: &Path, unreadable: Unreadable) -> Result<(), AnyError> {
        self.visited += 1;
        let record = match ImageRecord::read(path) {
            Ok(record) => record,
            Err(GeotagError::Io(e)) => {
                debug!("skipping {}, {e}", path.display());
                self.skipped += 1;
                return Ok(());
            }
            Err(e) if unreadable == Unreadable::Skip => {
                warn!("skipping {}, {e}", path.display());
                self.skipped += 1;
                return Ok(());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", path.display()));
            }
        };
        match record.location {
            Some(location) => self.add(&record.path, location),
            None => {
                debug!("skipping {}, no GPS position", path.display());
                self.skipped += 1;
            }
        }
        Ok(())
    }

    /// Projects and appends `location`, read from `path`.
    pub fn add(&mut self, path: &Path, location: GeoPoint) {
        match ProjectedPoint::try_from(location) {
            Ok(point) => {
                debug!(
                    "{}: zone {} E {:.1} N {:.1} alt {:.1}",
                    path.display(),
                    point.zone,
                    point.easting,
                    point.northing,
                    point.altitude
                );
                self.points.push(point);
            }
            Err(e) => {
                warn!("skipping {}, {e}", path.display());
                self.skipped += 1;
            }
        }
    }

    /// Returns the distinct zones the points fall in.
    pub fn zones(&self) -> BTreeSet<Zone> {
        self.points.iter().map(|point| point.zone).collect()
    }

    /// Logs the run totals.
    pub fn summarize(&self) {
        info!(
            "{} images visited, {} points plotted, {} images skipped",
            self.visited,
            self.points.len(),
            self.skipped
        );
        let zones = self.zones();
        if zones.len() > 1 {
            let zones: Vec<String> = zones.iter().map(Zone::to_string).collect();
            warn!(
                "points span UTM zones {}, plotted on one shared axis",
                zones.join(", ")
            );
        }
    }
}

/// Symlinks to files are read through; symlinks to directories are
/// never descended into.
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_image(file_name: &OsStr) -> bool {
    let name = file_name.to_string_lossy().to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
