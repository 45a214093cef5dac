mod common;

use common::{labeled, write_nifti, write_volume};
use nifti_overlay::{Orientation, VolumeError, VolumeLoader, VolumeLoaderError};

#[test]
fn test_load_applies_quarter_turn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.nii");
    let scan = labeled((2, 3, 4), 0.0);
    write_volume(&path, &scan);

    let volume = VolumeLoader::load_from_file(&path).unwrap();

    // loaded[a, b, c] == scan[b, 2 - a, c]
    assert_eq!(volume.dim(), (3, 2, 4));
    assert_eq!(volume.data()[[0, 0, 0]], scan[[0, 2, 0]]);
    assert_eq!(volume.data()[[2, 1, 3]], scan[[1, 0, 3]]);
    assert_eq!(volume.data()[[1, 1, 2]], scan[[1, 1, 2]]);
    assert_eq!(volume.intensity_range(), (0.0, 19.0));
}

#[test]
fn test_load_gzipped_volume() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("scan.nii");
    let gzipped = dir.path().join("scan.nii.gz");
    let scan = labeled((3, 3, 2), 5.0);
    write_volume(&plain, &scan);
    write_volume(&gzipped, &scan);

    let plain = VolumeLoader::load_from_file(&plain).unwrap();
    let gzipped = VolumeLoader::load_from_file(&gzipped).unwrap();
    assert_eq!(plain.data(), gzipped.data());
}

#[test]
fn test_load_single_time_point_as_volume() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bold.nii");
    let data: Vec<f32> = (0..24).map(|v| v as f32).collect();
    write_nifti(&path, &[2, 3, 4, 1], &data);

    let volume = VolumeLoader::load_from_file(&path).unwrap();
    assert_eq!(volume.dim(), (3, 2, 4));
}

#[test]
fn test_reject_time_series() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bold.nii");
    let data = vec![0.0; 2 * 2 * 2 * 3];
    write_nifti(&path, &[2, 2, 2, 3], &data);

    let err = VolumeLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, VolumeLoaderError::NotThreeDimensional { .. }));
}

#[test]
fn test_reject_planar_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slice.nii");
    write_nifti(&path, &[4, 4], &[1.0; 16]);

    let err = VolumeLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, VolumeLoaderError::NotThreeDimensional { .. }));
}

#[test]
fn test_reject_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.nii");
    std::fs::write(&path, b"definitely not a scan").unwrap();

    let err = VolumeLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, VolumeLoaderError::Nifti { .. }));
}

#[test]
fn test_load_set_validates_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.nii");
    let overlay1 = dir.path().join("overlay1.nii");
    let overlay2 = dir.path().join("overlay2.nii");
    write_volume(&base, &labeled((4, 4, 4), 0.0));
    write_volume(&overlay1, &labeled((4, 4, 4), 1.0));
    write_volume(&overlay2, &labeled((4, 4, 3), 2.0));

    let err = VolumeLoader::load_set(&base, &overlay1, &overlay2).unwrap_err();
    assert!(matches!(
        err,
        VolumeLoaderError::Incompatible(VolumeError::ShapeMismatch { layer: "overlay-2", .. })
    ));

    let set = VolumeLoader::load_set(&base, &overlay1, &overlay1).unwrap();
    assert_eq!(set.reoriented(Orientation::Coronal).dim(), (4, 4, 4));
}
