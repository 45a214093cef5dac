//! # NIfTI overlay library
//!
//! This crate blends an anatomical NIfTI volume with two co-registered
//! overlay volumes, one 2-D slice at a time.

//!
//! Volumes are read from `.nii` or `.nii.gz` files with the nifti crate
//! and turned a quarter so that axial slices come out upright. The three
//! volumes can be viewed in the three medical planes:
//!  - Axial
//!  - Sagittal
//!  - Coronal
//!
//!  Each plane is derived from the volumes as loaded, never from a
//!  previously reoriented copy. A slice of every layer is mapped to the
//!  0..=255 display range and blended with two overlay opacities and an
//!  intensity threshold that hides faint overlay pixels. The
//!  [`viewer::Viewer`] owns all of this state for a GUI host; the
//!  `nifti-overlay` binary drives it from the command line.
//!
//! # Examples
//!
//! ## Blending one coronal slice
//!
//! Load three volumes, switch to the coronal plane and write the middle
//! slice with overlay-1 at half opacity.
//!
//! ```no_run
//! # use nifti_overlay::{Normalization, Orientation, VolumeLoader};
//! # use nifti_overlay::viewer::{ViewEvent, ViewParams, Viewer};
//! let volumes = VolumeLoader::load_set("t1.nii.gz", "lesion.nii.gz", "mask.nii.gz")
//!     .expect("should have loaded all three volumes");
//! let mut viewer = Viewer::new(volumes, Normalization::MinMax);
//! viewer.set_orientation(Orientation::Coronal);
//! let middle = viewer.volumes().depth() / 2;
//! let image = viewer
//!     .handle(ViewEvent::ParametersChanged(ViewParams {
//!         opacity1: 0.5,
//!         opacity2: 0.0,
//!         slice_index: middle,
//!         threshold: 30,
//!     }))
//!     .expect("should have blended the middle slice");
//! nifti_overlay::display::save_png(image.view(), "result.png")
//!     .expect("should have written the composite");
//! ```

pub mod compositor;
pub mod display;
pub mod enums;
pub mod viewer;
pub mod volume;
pub mod volume_loader;
pub mod volume_set;

pub use compositor::{BlendParams, CompositeError, composite};
pub use enums::{Normalization, Orientation};
pub use volume::{Volume, VolumeError};
pub use volume_loader::{VolumeLoader, VolumeLoaderError};
pub use volume_set::VolumeSet;
