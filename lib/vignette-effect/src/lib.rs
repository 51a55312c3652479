pub mod batch;
pub mod convert;
pub mod falloff;
pub mod vignette;

use ndarray::{Array3, ArrayView3};
use std::path::PathBuf;

pub use falloff::falloff_field;
pub use vignette::{Vignette, to_ubyte, vignette, vignette_rgb};

pub type VignetteResult<T> = Result<T, VignetteError>;

#[derive(thiserror::Error, Debug)]
pub enum VignetteError {
    #[error("Invalid dimension: falloff field requested for {width}x{height}")]
    InvalidDimension { width: usize, height: usize },
    #[error("Invalid image shape: {0}")]
    InvalidImageShape(String),
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("Failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An image transform over `(rows, cols, channels)` float samples in `[0, 1]`
/// that yields the 8-bit representation.
pub trait Effect {
    fn apply(&self, image: ArrayView3<'_, f32>) -> VignetteResult<Array3<u8>>;
}
