use crate::enums::{Normalization, Orientation};

use log::debug;
use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VolumeError {
    #[error("Slice index {index} is outside 0..{depth}")]
    IndexOutOfRange { index: usize, depth: usize },

    #[error("{layer} volume has shape {found:?}, expected {expected:?}")]
    ShapeMismatch {
        layer: &'static str,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },
}

/// A scalar intensity volume, sliced along its last axis.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array3<f32>,
    intensity_range: (f32, f32),
}

impl Volume {
    pub fn new(data: Array3<f32>) -> Self {
        let intensity_range = Self::scan_intensity_range(&data);
        Self {
            data,
            intensity_range,
        }
    }

    /// Get the dimensions of the volume (X, Y, Z)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of slices along the slicing axis
    pub fn depth(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Smallest and largest finite intensity, `(0.0, 0.0)` if there is none
    pub fn intensity_range(&self) -> (f32, f32) {
        self.intensity_range
    }

    fn scan_intensity_range(data: &Array3<f32>) -> (f32, f32) {
        let empty = || (f32::INFINITY, f32::NEG_INFINITY);
        let (lo, hi) = data
            .par_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(empty, |(lo, hi), v| (lo.min(v), hi.max(v)))
            .reduce(empty, |a, b| (a.0.min(b.0), a.1.max(b.1)));
        if lo > hi { (0.0, 0.0) } else { (lo, hi) }
    }

    pub fn slice_at(&self, index: usize) -> Result<ArrayView2<'_, f32>, VolumeError> {
        let depth = self.depth();
        if index >= depth {
            return Err(VolumeError::IndexOutOfRange { index, depth });
        }
        Ok(self.data.index_axis(Axis(2), index))
    }

    /// Slice at `index` mapped into the 0..=255 display domain.
    pub fn display_slice(
        &self,
        index: usize,
        normalization: Normalization,
    ) -> Result<Array2<f32>, VolumeError> {
        let slice = self.slice_at(index)?;
        let display = match normalization {
            Normalization::Clamp => slice.to_owned(),
            Normalization::MinMax => {
                let (lo, hi) = self.intensity_range;
                let span = hi - lo;
                if span > 0.0 {
                    slice.mapv(|v| Self::rescale_to_display(v, lo, span))
                } else {
                    Array2::zeros(slice.raw_dim())
                }
            }
        };
        Ok(display)
    }

    #[inline]
    fn rescale_to_display(value: f32, lo: f32, span: f32) -> f32 {
        ((value - lo) / span) * 255.0
    }

    /// Copy of this volume transformed so that its last axis walks through
    /// the requested plane.
    ///
    /// Always call this on the axial (as loaded) volume; applying it to an
    /// already reoriented copy compounds the rotations.
    pub fn reoriented(&self, orientation: Orientation) -> Volume {
        let view = self.data.view();
        let view = match orientation {
            Orientation::Axial => view,
            Orientation::Sagittal => rot90(rot90(view, 1, (1, 2)), 3, (0, 1)),
            Orientation::Coronal => rot90(view.reversed_axes(), 2, (0, 1)),
        };
        let data = view.as_standard_layout().into_owned();
        debug!(
            "Reoriented volume {:?} to {} plane with shape {:?}",
            self.dim(),
            orientation,
            data.dim()
        );
        Volume {
            data,
            intensity_range: self.intensity_range,
        }
    }
}

/// Rotate by `k` quarter turns in the plane of `axes`, turning from the
/// first axis towards the second. Only strides change; no data is copied.
pub(crate) fn rot90(
    mut view: ArrayView3<'_, f32>,
    k: i32,
    axes: (usize, usize),
) -> ArrayView3<'_, f32> {
    let (first, second) = axes;
    match k.rem_euclid(4) {
        0 => {}
        1 => {
            view.invert_axis(Axis(second));
            view.swap_axes(first, second);
        }
        2 => {
            view.invert_axis(Axis(first));
            view.invert_axis(Axis(second));
        }
        _ => {
            view.swap_axes(first, second);
            view.invert_axis(Axis(second));
        }
    }
    view
}
