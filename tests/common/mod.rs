#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use ndarray::Array3;
use std::io::Write;
use std::path::Path;

const HEADER_SIZE: usize = 348;
const VOX_OFFSET: usize = 352;
const DT_FLOAT32: i16 = 16;

/// Minimal single-file NIfTI-1 image holding little-endian float32 voxels.
///
/// `data` must be in file order, first axis varying fastest.
pub fn nifti_bytes(dims: &[usize], data: &[f32]) -> Vec<u8> {
    assert!(dims.len() <= 7);
    assert_eq!(dims.iter().product::<usize>(), data.len());

    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(&(HEADER_SIZE as i32).to_le_bytes());

    let mut dim = [1i16; 8];
    dim[0] = dims.len() as i16;
    for (i, &extent) in dims.iter().enumerate() {
        dim[i + 1] = extent as i16;
    }
    for (i, d) in dim.iter().enumerate() {
        let offset = 40 + i * 2;
        header[offset..offset + 2].copy_from_slice(&d.to_le_bytes());
    }

    header[70..72].copy_from_slice(&DT_FLOAT32.to_le_bytes());
    header[72..74].copy_from_slice(&32i16.to_le_bytes());

    for i in 0..8 {
        let offset = 76 + i * 4;
        header[offset..offset + 4].copy_from_slice(&1.0f32.to_le_bytes());
    }

    header[108..112].copy_from_slice(&(VOX_OFFSET as f32).to_le_bytes());
    header[112..116].copy_from_slice(&1.0f32.to_le_bytes());
    header[344..348].copy_from_slice(b"n+1\0");

    let mut bytes = Vec::with_capacity(VOX_OFFSET + data.len() * 4);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&[0u8; VOX_OFFSET - HEADER_SIZE]);
    for value in data {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

pub fn write_nifti(path: &Path, dims: &[usize], data: &[f32]) {
    let bytes = nifti_bytes(dims, data);
    let is_gzip = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes).unwrap();
        std::fs::write(path, encoder.finish().unwrap()).unwrap();
    } else {
        std::fs::write(path, bytes).unwrap();
    }
}

pub fn write_volume(path: &Path, volume: &Array3<f32>) {
    let (x, y, z) = volume.dim();
    // Reversing the axes makes logical order walk the first axis fastest.
    let data: Vec<f32> = volume.t().iter().copied().collect();
    write_nifti(path, &[x, y, z], &data);
}

/// Voxel (i, j, k) holds `10 * i + 3 * j + k + offset`.
pub fn labeled(shape: (usize, usize, usize), offset: f32) -> Array3<f32> {
    Array3::from_shape_fn(shape, |(i, j, k)| (10 * i + 3 * j + k) as f32 + offset)
}
