use anyhow::{Context, Error as AnyError};
use clap::Parser;
use std::path::PathBuf;

/// Plot where photos were taken, from their embedded GPS tags.
///
/// Every .png, .jpg and .jpeg file below DIR is read; the locations
/// found are projected to UTM and plotted, colored by altitude, next
/// to an altitude-by-photo chart.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Directory to scan [default: the directory containing this
    /// executable].
    pub dir: Option<PathBuf>,

    /// Output image file name, written into DIR.
    #[arg(short, long, default_value = "photo_locations_and_altitudes.png")]
    pub output: PathBuf,

    /// Output image width in pixels.
    #[arg(long, default_value_t = 6000, value_parser = clap::value_parser!(u32).range(400..=20_000))]
    pub width: u32,

    /// Output image height in pixels.
    #[arg(long, default_value_t = 2400, value_parser = clap::value_parser!(u32).range(200..=20_000))]
    pub height: u32,

    /// Warn about and skip images whose metadata can't be parsed
    /// instead of aborting.
    #[arg(long, default_value_t = false)]
    pub skip_unreadable: bool,
}

impl Cli {
    /// Returns the directory to scan.
    pub fn root_dir(&self) -> Result<PathBuf, AnyError> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().context("locating executable")?;
        exe.parent()
            .map(PathBuf::from)
            .with_context(|| format!("{} has no parent directory", exe.display()))
    }

    /// Returns the path of the plot to write.
    pub fn output_path(&self) -> Result<PathBuf, AnyError> {
        Ok(self.root_dir()?.join(&self.output))
    }
}
