//! Per-image radial falloff field.

use crate::{VignetteError, VignetteResult};
use ndarray::{Array1, Array2, Axis};

/// Build the radial falloff field for an image whose first axis has
/// `width` samples and whose second axis has `height` samples.
///
/// `F(r, c) = exp(-((r - width/2)^2 + (c - height/2)^2) / sigma_sq)` where
/// `sigma_sq` is the squared distance from the center to a corner. The field
/// is 1.0 at `(width/2, height/2)` and `exp(-1)` at the origin corner.
///
/// The squared-distance grid is the outer sum of two 1-D coordinate vectors,
/// broadcast `(width, 1) + (1, height)`.
pub fn falloff_field(width: usize, height: usize) -> VignetteResult<Array2<f32>> {
    if width == 0 || height == 0 {
        return Err(VignetteError::InvalidDimension { width, height });
    }

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let sigma_sq = center_x * center_x + center_y * center_y;

    let dx_sq = Array1::from_iter((0..width).map(|r| (r as f32 - center_x).powi(2)));
    let dy_sq = Array1::from_iter((0..height).map(|c| (c as f32 - center_y).powi(2)));

    let distance_sq = &dx_sq.insert_axis(Axis(1)) + &dy_sq.insert_axis(Axis(0));

    Ok(distance_sq.mapv_into(|d| (-d / sigma_sq).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_shape_matches_request() {
        let field = falloff_field(7, 12).unwrap();
        assert_eq!(field.dim(), (7, 12));
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert!(matches!(
            falloff_field(0, 5),
            Err(VignetteError::InvalidDimension { width: 0, height: 5 })
        ));
        assert!(matches!(
            falloff_field(5, 0),
            Err(VignetteError::InvalidDimension { width: 5, height: 0 })
        ));
    }

    #[test]
    fn test_center_is_one_and_values_in_range() {
        for (w, h) in [(2, 2), (4, 4), (8, 6), (10, 32), (64, 48)] {
            let field = falloff_field(w, h).unwrap();
            assert!((field[[w / 2, h / 2]] - 1.0).abs() < EPS);
            assert!(field.iter().all(|&v| v > 0.0 && v <= 1.0));
        }
    }

    #[test]
    fn test_odd_extents_stay_in_range() {
        for (w, h) in [(1, 1), (3, 5), (9, 1), (11, 13)] {
            let field = falloff_field(w, h).unwrap();
            assert!(field.iter().all(|&v| v > 0.0 && v <= 1.0));

            let max = field.iter().copied().fold(f32::MIN, f32::max);
            assert!((field[[w / 2, h / 2]] - max).abs() < EPS);
        }
    }

    #[test]
    fn test_origin_corner_is_exp_minus_one() {
        for (w, h) in [(1, 1), (4, 4), (5, 9), (100, 30)] {
            let field = falloff_field(w, h).unwrap();
            assert!((field[[0, 0]] - (-1.0f32).exp()).abs() < EPS);
        }
    }

    #[test]
    fn test_reflection_symmetry_about_center() {
        for (w, h) in [(4, 4), (5, 8), (9, 7)] {
            let field = falloff_field(w, h).unwrap();

            // Exact reflection through (w/2, h/2).
            for r in 1..w {
                for c in 1..h {
                    assert!((field[[r, c]] - field[[w - r, c]]).abs() < EPS);
                    assert!((field[[r, c]] - field[[r, h - c]]).abs() < EPS);
                }
            }

            // Index reflection is off by the half-pixel center alignment only.
            let sigma_sq = (w * w + h * h) as f32 / 4.0;
            let tolerance = (w.max(h) + 1) as f32 / sigma_sq;
            for r in 0..w {
                for c in 0..h {
                    assert!((field[[r, c]] - field[[w - 1 - r, c]]).abs() <= tolerance);
                    assert!((field[[r, c]] - field[[r, h - 1 - c]]).abs() <= tolerance);
                }
            }
        }
    }

    #[test]
    fn test_decays_toward_corner() {
        let field = falloff_field(16, 16).unwrap();
        for k in 0..8 {
            assert!(field[[k, k]] < field[[k + 1, k + 1]]);
        }
    }

    #[test]
    fn test_calibrated_per_image() {
        let small = falloff_field(4, 4).unwrap();
        let large = falloff_field(400, 400).unwrap();
        assert!((small[[0, 0]] - large[[0, 0]]).abs() < EPS);
    }
}
