use crate::volume::{Volume, VolumeError, rot90};
use crate::volume_set::VolumeSet;

use log::{debug, info};
use ndarray::{Array3, ArrayD, Axis, Ix3};
use nifti::error::NiftiError;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("Failed to read {}: {source}", path.display())]
    Nifti {
        path: PathBuf,
        #[source]
        source: NiftiError,
    },

    #[error("{} is not a 3-D volume (shape {shape:?})", path.display())]
    NotThreeDimensional { path: PathBuf, shape: Vec<usize> },

    #[error("{} contains no voxels (shape {shape:?})", path.display())]
    EmptyVolume { path: PathBuf, shape: Vec<usize> },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Incompatible volumes: {0}")]
    Incompatible(#[from] VolumeError),
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// Load a volume from a `.nii` or `.nii.gz` file
    ///
    /// The scan is turned a quarter counter-clockwise in the plane of its
    /// first two axes so that axial slices come out upright.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be parsed as NIfTI or does not hold
    /// exactly three non-singleton dimensions
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Volume, VolumeLoaderError> {
        let path = path.as_ref();
        let nifti_error = |source| VolumeLoaderError::Nifti {
            path: path.to_path_buf(),
            source,
        };

        let object = ReaderOptions::new().read_file(path).map_err(nifti_error)?;
        let pixdim = object.header().pixdim;
        let array: ArrayD<f32> = object
            .into_volume()
            .into_ndarray::<f32>()
            .map_err(nifti_error)?;

        let scan = Self::into_three_dimensional(array, path)?;
        debug!(
            "Read {} with shape {:?} and voxel size {:?}",
            path.display(),
            scan.dim(),
            &pixdim[1..4]
        );

        let data = rot90(scan.view(), 1, (0, 1))
            .as_standard_layout()
            .into_owned();
        let volume = Volume::new(data);
        info!(
            "Loaded {} as {:?} volume, intensities {:?}",
            path.display(),
            volume.dim(),
            volume.intensity_range()
        );
        Ok(volume)
    }

    /// Load the base volume and both overlays
    ///
    /// # Errors
    ///
    /// Returns error if any file fails to load or the shapes differ
    pub fn load_set(
        base: impl AsRef<Path>,
        overlay1: impl AsRef<Path>,
        overlay2: impl AsRef<Path>,
    ) -> Result<VolumeSet, VolumeLoaderError> {
        let base = Self::load_from_file(base)?;
        let overlay1 = Self::load_from_file(overlay1)?;
        let overlay2 = Self::load_from_file(overlay2)?;
        Ok(VolumeSet::new(base, overlay1, overlay2)?)
    }

    // Trailing singleton axes (a single time point, say) are dropped.
    fn into_three_dimensional(
        mut array: ArrayD<f32>,
        path: &Path,
    ) -> Result<Array3<f32>, VolumeLoaderError> {
        let shape = array.shape().to_vec();
        if shape.len() < 3 || shape[3..].iter().any(|&extent| extent != 1) {
            return Err(VolumeLoaderError::NotThreeDimensional {
                path: path.to_path_buf(),
                shape,
            });
        }
        if shape.contains(&0) {
            return Err(VolumeLoaderError::EmptyVolume {
                path: path.to_path_buf(),
                shape,
            });
        }

        while array.ndim() > 3 {
            let last = array.ndim() - 1;
            array = array.index_axis_move(Axis(last), 0);
        }
        Ok(array.into_dimensionality::<Ix3>()?)
    }
}
