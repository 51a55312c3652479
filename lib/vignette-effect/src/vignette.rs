use crate::{Effect, VignetteError, VignetteResult, falloff::falloff_field};
use ndarray::{Array, Array3, ArrayBase, ArrayD, ArrayView3, Axis, Data, Dimension, Ix2, Ix3};

/// Radial falloff vignette. The multiplier is derived from each image's own
/// extent, so every image is darkened relative to its own corners.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vignette;

impl Vignette {
    pub fn new() -> Self {
        Self
    }
}

impl Effect for Vignette {
    fn apply(&self, image: ArrayView3<'_, f32>) -> VignetteResult<Array3<u8>> {
        vignette_rgb(&image)
    }
}

/// Apply the vignette to a `(rows, cols)` or `(rows, cols, channels)` grid
/// of samples in `[0, 1]`. The returned grid has the input's shape.
pub fn vignette(image: &ArrayD<f32>) -> VignetteResult<ArrayD<u8>> {
    match image.ndim() {
        2 => {
            let image = image.view().into_dimensionality::<Ix2>()?;
            let (rows, cols) = image.dim();
            let falloff = falloff_field(rows, cols)?;
            Ok(to_ubyte(&(&image * &falloff)).into_dyn())
        }
        3 => {
            let image = image.view().into_dimensionality::<Ix3>()?;
            Ok(vignette_rgb(&image)?.into_dyn())
        }
        ndim => Err(VignetteError::InvalidImageShape(format!(
            "expected a 2D or 3D grid, got {ndim}D with shape {:?}",
            image.shape()
        ))),
    }
}

/// Apply the vignette to a `(rows, cols, channels)` grid. Every channel of a
/// pixel is scaled by the same falloff value.
pub fn vignette_rgb<S>(image: &ArrayBase<S, Ix3>) -> VignetteResult<Array3<u8>>
where
    S: Data<Elem = f32>,
{
    let (rows, cols, channels) = image.dim();
    if channels == 0 {
        return Err(VignetteError::InvalidImageShape(format!(
            "image {rows}x{cols} has no channels"
        )));
    }

    let falloff = falloff_field(rows, cols)?.insert_axis(Axis(2));
    let result = image * &falloff;

    Ok(to_ubyte(&result))
}

/// Convert `[0, 1]` float samples to `[0, 255]`, clamping out-of-range values.
pub fn to_ubyte<S, D>(samples: &ArrayBase<S, D>) -> Array<u8, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    samples.mapv(sample_to_u8)
}

#[inline]
fn sample_to_u8(value: f32) -> u8 {
    // NaN casts to 0
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
