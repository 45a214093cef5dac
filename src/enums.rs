use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Anatomical viewing plane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Axial,
    Sagittal,
    Coronal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Axial,
        Orientation::Sagittal,
        Orientation::Coronal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Axial => "axial",
            Orientation::Sagittal => "sagittal",
            Orientation::Coronal => "coronal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown plane '{0}' (expected axial, sagittal or coronal)")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Orientation::ALL
            .into_iter()
            .find(|plane| plane.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOrientationError(s.to_string()))
    }
}

/// How raw voxel intensities are mapped into the 0..=255 display domain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Use intensities as stored; the compositor clamps the result.
    #[default]
    Clamp,
    /// Rescale the volume's intensity range linearly onto 0..=255.
    MinMax,
}

#[derive(Debug, Error)]
#[error("unknown normalization '{0}' (expected clamp or min-max)")]
pub struct ParseNormalizationError(String);

impl FromStr for Normalization {
    type Err = ParseNormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(Normalization::Clamp),
            "min-max" | "minmax" => Ok(Normalization::MinMax),
            _ => Err(ParseNormalizationError(s.to_string())),
        }
    }
}
