//! Single owned controller behind the viewer's sliders and plane buttons.
//!
//! A host toolkit translates widget callbacks into [`ViewEvent`]s and hands
//! them to [`Viewer::handle`], which returns the freshly blended composite.
//! Everything is recomputed synchronously on every event.

use crate::compositor::{BlendParams, CompositeError, composite};
use crate::enums::{Normalization, Orientation};
use crate::volume::VolumeError;
use crate::volume_set::VolumeSet;

use log::debug;
use ndarray::Array2;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Opacity sliders run over `0..=OPACITY_SLIDER_MAX`.
pub const OPACITY_SLIDER_MAX: u16 = 1000;
pub const OPACITY_TICK_INTERVAL: u16 = 100;
pub const THRESHOLD_TICK_INTERVAL: u8 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    Composite(#[from] CompositeError),
}

/// Typed payload of a "parameter changed" event.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub opacity1: f32,
    pub opacity2: f32,
    pub slice_index: usize,
    pub threshold: u8,
}

impl ViewParams {
    pub fn blend(&self) -> BlendParams {
        BlendParams::new(self.opacity1, self.opacity2, self.threshold)
    }
}

/// Raw integer slider positions as a widget toolkit reports them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SliderPositions {
    pub opacity1: u16,
    pub opacity2: u16,
    pub slice: usize,
    pub threshold: u8,
}

impl From<SliderPositions> for ViewParams {
    fn from(positions: SliderPositions) -> Self {
        let scale = f32::from(OPACITY_SLIDER_MAX);
        ViewParams {
            opacity1: f32::from(positions.opacity1) / scale,
            opacity2: f32::from(positions.opacity2) / scale,
            slice_index: positions.slice,
            threshold: positions.threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    ParametersChanged(ViewParams),
    PlaneSelected(Orientation),
}

pub struct Viewer {
    originals: VolumeSet,
    current: VolumeSet,
    orientation: Orientation,
    params: ViewParams,
    normalization: Normalization,
}

impl Viewer {
    /// Start on the axial plane at the middle slice with both overlays hidden.
    pub fn new(originals: VolumeSet, normalization: Normalization) -> Self {
        let params = ViewParams {
            slice_index: originals.depth() / 2,
            ..ViewParams::default()
        };
        Self {
            current: originals.clone(),
            originals,
            orientation: Orientation::Axial,
            params,
            normalization,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn params(&self) -> ViewParams {
        self.params
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Volumes as currently oriented
    pub fn volumes(&self) -> &VolumeSet {
        &self.current
    }

    /// Valid slice slider positions for the current plane
    pub fn slice_range(&self) -> RangeInclusive<usize> {
        0..=self.current.depth().saturating_sub(1)
    }

    pub fn slice_tick_interval(&self) -> usize {
        (self.current.depth() / 10).max(1)
    }

    pub fn handle(&mut self, event: ViewEvent) -> Result<Array2<u8>, ViewerError> {
        match event {
            ViewEvent::ParametersChanged(params) => {
                if !self.slice_range().contains(&params.slice_index) {
                    return Err(VolumeError::IndexOutOfRange {
                        index: params.slice_index,
                        depth: self.current.depth(),
                    }
                    .into());
                }
                self.params = params;
            }
            ViewEvent::PlaneSelected(orientation) => self.set_orientation(orientation),
        }
        self.render()
    }

    /// Switch planes, always starting from the volumes as loaded.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation == self.orientation {
            return;
        }
        self.current = self.originals.reoriented(orientation);
        self.orientation = orientation;

        let last = *self.slice_range().end();
        if self.params.slice_index > last {
            debug!(
                "Slice {} is past the {} range, clamping to {}",
                self.params.slice_index, orientation, last
            );
            self.params.slice_index = last;
        }
    }

    /// Extract the current slice of every layer and blend it.
    pub fn render(&self) -> Result<Array2<u8>, ViewerError> {
        let slices = self
            .current
            .display_slices(self.params.slice_index, self.normalization)?;
        let image = composite(
            slices.base.view(),
            slices.overlay1.view(),
            slices.overlay2.view(),
            &self.params.blend(),
        )?;
        Ok(image)
    }
}
