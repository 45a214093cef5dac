//! Blending of a base slice with two thresholded overlays.
//!
//! Layers stack as overlay-2 over overlay-1 over base:
//!
//! ```text
//! out = base * (1 - a1) * (1 - a2) + overlay1 * a1 * (1 - a2) + overlay2 * a2
//! ```
//!
//! where `a1` and `a2` are the overlay opacities, except that an overlay
//! pixel below the threshold, or not finite, gets an opacity of zero and
//! the layers under it show through. Pixels equal to the threshold are
//! kept. The result is rounded, clamped to `0..=255` and stored as `u8`.

use ndarray::{Array2, ArrayView2, Zip};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositeError {
    #[error(
        "Slice shapes differ: base {base:?}, overlay-1 {overlay1:?}, overlay-2 {overlay2:?}"
    )]
    ShapeMismatch {
        base: (usize, usize),
        overlay1: (usize, usize),
        overlay2: (usize, usize),
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BlendParams {
    opacity1: f32,
    opacity2: f32,
    threshold: u8,
}

impl BlendParams {
    /// Opacities are clamped into `0.0..=1.0`; NaN counts as fully transparent.
    pub fn new(opacity1: f32, opacity2: f32, threshold: u8) -> Self {
        Self {
            opacity1: Self::clamp_opacity(opacity1),
            opacity2: Self::clamp_opacity(opacity2),
            threshold,
        }
    }

    #[inline]
    fn clamp_opacity(opacity: f32) -> f32 {
        if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        }
    }

    pub fn opacity1(&self) -> f32 {
        self.opacity1
    }

    pub fn opacity2(&self) -> f32 {
        self.opacity2
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Lay `overlay` over `below`. Overlay pixels that are hidden, below
    /// the threshold or not finite leave `below` untouched.
    #[inline]
    fn over(&self, below: f32, overlay: f32, opacity: f32) -> f32 {
        if opacity == 0.0 || !overlay.is_finite() || overlay < f32::from(self.threshold) {
            return below;
        }
        below * (1.0 - opacity) + overlay * opacity
    }

    #[inline]
    fn blend_pixel(&self, base: f32, overlay1: f32, overlay2: f32) -> u8 {
        let under = self.over(base, overlay1, self.opacity1);
        quantize(self.over(under, overlay2, self.opacity2))
    }
}

#[inline]
fn quantize(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// Blend three equally shaped display-domain slices into one 8-bit image.
///
/// # Errors
///
/// Returns [`CompositeError::ShapeMismatch`] if any two inputs differ in shape.
pub fn composite(
    base: ArrayView2<'_, f32>,
    overlay1: ArrayView2<'_, f32>,
    overlay2: ArrayView2<'_, f32>,
    params: &BlendParams,
) -> Result<Array2<u8>, CompositeError> {
    if base.dim() != overlay1.dim() || base.dim() != overlay2.dim() {
        return Err(CompositeError::ShapeMismatch {
            base: base.dim(),
            overlay1: overlay1.dim(),
            overlay2: overlay2.dim(),
        });
    }

    Ok(Zip::from(&base)
        .and(&overlay1)
        .and(&overlay2)
        .par_map_collect(|&b, &o1, &o2| params.blend_pixel(b, o1, o2)))
}
