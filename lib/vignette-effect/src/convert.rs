//! Bridge between `image` buffers and `(rows, cols, channels)` sample grids.

use crate::{VignetteError, VignetteResult};
use image::{DynamicImage, GenericImageView, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use ndarray::{Array3, ArrayBase, Data, Ix3};
use std::path::Path;

/// Convert a decoded image to float samples in `[0, 1]`.
///
/// The channel layout of the source is kept: luma, luma + alpha, RGB or RGBA.
pub fn image_to_array(image: &DynamicImage) -> VignetteResult<Array3<f32>> {
    let (width, height) = image.dimensions();
    let color = image.color();

    let (channels, samples) = match (color.channel_count(), color.has_alpha()) {
        (1, _) => (1, image.to_luma32f().into_raw()),
        (2, _) => (2, image.to_luma_alpha32f().into_raw()),
        (_, false) => (3, image.to_rgb32f().into_raw()),
        (_, true) => (4, image.to_rgba32f().into_raw()),
    };

    Ok(Array3::from_shape_vec(
        (height as usize, width as usize, channels),
        samples,
    )?)
}

/// Convert an 8-bit sample grid back into an image buffer.
pub fn array_to_image<S>(samples: &ArrayBase<S, Ix3>) -> VignetteResult<DynamicImage>
where
    S: Data<Elem = u8>,
{
    let (rows, cols, channels) = samples.dim();
    let invalid =
        || VignetteError::InvalidImageShape(format!("cannot encode {rows}x{cols}x{channels}"));

    let width = u32::try_from(cols).map_err(|_| invalid())?;
    let height = u32::try_from(rows).map_err(|_| invalid())?;
    let raw = samples.iter().copied().collect::<Vec<u8>>();

    let image = match channels {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => GrayAlphaImage::from_raw(width, height, raw).map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, raw).map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, raw).map(DynamicImage::ImageRgba8),
        _ => None,
    };

    image.ok_or_else(invalid)
}

/// Decode `path` and normalize its samples to `[0, 1]`.
pub fn load_image(path: impl AsRef<Path>) -> VignetteResult<Array3<f32>> {
    let path = path.as_ref();

    let image = image::open(path).map_err(|source| VignetteError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    image_to_array(&image)
}

/// Encode an 8-bit sample grid to `path`. The format follows the extension.
pub fn save_image<S>(samples: &ArrayBase<S, Ix3>, path: impl AsRef<Path>) -> VignetteResult<()>
where
    S: Data<Elem = u8>,
{
    let path = path.as_ref();

    array_to_image(samples)?
        .save(path)
        .map_err(|source| VignetteError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}
