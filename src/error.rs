use std::path::PathBuf;
use thiserror::Error;

use crate::bit_grid::CELL_COUNT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {CELL_COUNT} isolated 0/1 values, found {0}")]
    TokenCount(usize),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no image path given")]
    NoPath,
    #[error("{}: file does not exist", .0.display())]
    Missing(PathBuf),
    #[error("failed to read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
    #[error("clipboard holds no text")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("Invalid matrix format. Ensure both are 32x32 arrays of 0s and 1s.")]
    InvalidPanel {
        panel: usize,
        #[source]
        source: DecodeError,
    },
    #[error("need two pasted bitmaps to compare, have {0}")]
    NotEnoughHistory(usize),
}
