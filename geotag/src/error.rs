use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeotagError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("unreadable EXIF data, {0}")]
    Exif(#[from] exif::Error),
}
