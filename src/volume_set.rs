use crate::enums::{Normalization, Orientation};
use crate::volume::{Volume, VolumeError};

use ndarray::Array2;

/// The base volume and its two overlays, all of one shape.
#[derive(Debug, Clone)]
pub struct VolumeSet {
    base: Volume,
    overlay1: Volume,
    overlay2: Volume,
}

/// Display-domain slices of the three layers at one index.
pub struct SliceSet {
    pub base: Array2<f32>,
    pub overlay1: Array2<f32>,
    pub overlay2: Array2<f32>,
}

impl VolumeSet {
    pub fn new(base: Volume, overlay1: Volume, overlay2: Volume) -> Result<Self, VolumeError> {
        let expected = base.dim();
        for (layer, volume) in [("overlay-1", &overlay1), ("overlay-2", &overlay2)] {
            if volume.dim() != expected {
                return Err(VolumeError::ShapeMismatch {
                    layer,
                    expected,
                    found: volume.dim(),
                });
            }
        }
        Ok(Self {
            base,
            overlay1,
            overlay2,
        })
    }

    pub fn base(&self) -> &Volume {
        &self.base
    }

    pub fn overlay1(&self) -> &Volume {
        &self.overlay1
    }

    pub fn overlay2(&self) -> &Volume {
        &self.overlay2
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        self.base.dim()
    }

    pub fn depth(&self) -> usize {
        self.base.depth()
    }

    /// Reorient all three layers. Shapes stay equal because every layer
    /// goes through the same transform.
    pub fn reoriented(&self, orientation: Orientation) -> VolumeSet {
        VolumeSet {
            base: self.base.reoriented(orientation),
            overlay1: self.overlay1.reoriented(orientation),
            overlay2: self.overlay2.reoriented(orientation),
        }
    }

    pub fn display_slices(
        &self,
        index: usize,
        normalization: Normalization,
    ) -> Result<SliceSet, VolumeError> {
        Ok(SliceSet {
            base: self.base.display_slice(index, normalization)?,
            overlay1: self.overlay1.display_slice(index, normalization)?,
            overlay2: self.overlay2.display_slice(index, normalization)?,
        })
    }
}
