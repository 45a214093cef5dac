use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use log::{info, warn};
use nifti_overlay::{
    Normalization, Orientation, VolumeLoader, display,
    viewer::{ViewEvent, ViewParams, Viewer},
};

/// Blend a NIfTI volume with two overlays and write one slice as PNG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Anatomical base volume (.nii or .nii.gz)
    base: PathBuf,

    /// First overlay volume
    overlay1: PathBuf,

    /// Second overlay volume, drawn on top of the first
    overlay2: PathBuf,

    /// Viewing plane: axial, sagittal or coronal
    #[arg(short, long, default_value = "axial")]
    plane: Orientation,

    /// Slice index along the plane (defaults to the middle slice)
    #[arg(short, long)]
    slice: Option<usize>,

    /// Opacity of the first overlay, 0.0 to 1.0
    #[arg(long, default_value_t = 0.5)]
    opacity1: f32,

    /// Opacity of the second overlay, 0.0 to 1.0
    #[arg(long, default_value_t = 0.0)]
    opacity2: f32,

    /// Overlay pixels below this display intensity are hidden
    #[arg(short, long, default_value_t = 0)]
    threshold: u8,

    /// Intensity mapping into 0..=255: clamp or min-max
    #[arg(short, long, default_value = "clamp")]
    normalization: Normalization,

    /// Where to write the composite
    #[arg(short, long, default_value = "composite.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    for opacity in [cli.opacity1, cli.opacity2] {
        if !(0.0..=1.0).contains(&opacity) {
            warn!("Opacity {opacity} is outside 0.0..=1.0 and will be clamped");
        }
    }

    let volumes = VolumeLoader::load_set(&cli.base, &cli.overlay1, &cli.overlay2)
        .context("failed to load volumes")?;
    if cli.normalization == Normalization::MinMax {
        let (lo, hi) = volumes.base().intensity_range();
        if lo == hi {
            warn!("Base volume is flat ({lo}); min-max normalization will render it black");
        }
    }

    let mut viewer = Viewer::new(volumes, cli.normalization);
    viewer.set_orientation(cli.plane);

    let range = viewer.slice_range();
    let slice_index = cli.slice.unwrap_or(viewer.volumes().depth() / 2);
    if !range.contains(&slice_index) {
        bail!(
            "slice {slice_index} is outside {}..={} for the {} plane",
            range.start(),
            range.end(),
            cli.plane
        );
    }

    let image = viewer
        .handle(ViewEvent::ParametersChanged(ViewParams {
            opacity1: cli.opacity1,
            opacity2: cli.opacity2,
            slice_index,
            threshold: cli.threshold,
        }))
        .context("failed to blend slice")?;

    display::save_png(image.view(), &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(
        "Wrote {} slice {} ({}x{}) to {}",
        cli.plane,
        slice_index,
        image.ncols(),
        image.nrows(),
        cli.output.display()
    );
    Ok(())
}
