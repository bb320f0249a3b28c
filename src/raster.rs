//! Raster exchange at the crate boundary. The simulation core only ever sees
//! decoded `Array2` values and opaque georeferencing; this module is the
//! collaborator that produces and consumes them, using `.npy` grids with an
//! optional `.geo.json` sidecar for the georeference.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::Array2;
use ndarray_npy::{read_npy, write_npy};

use crate::model::{GeoReference, LandCoverSnapshot};

fn sidecar_path(raster: &Path) -> PathBuf {
    raster.with_extension("geo.json")
}

/// Reads a land cover raster and its georeference sidecar. A missing sidecar
/// falls back to an identity georeference with no-data value 0.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<LandCoverSnapshot> {
    let path = path.as_ref();
    let grid: Array2<i32> =
        read_npy(path).with_context(|| format!("reading land cover raster {}", path.display()))?;
    let georef = read_georeference(path)?;
    LandCoverSnapshot::new(grid, georef)
        .with_context(|| format!("validating land cover raster {}", path.display()))
}

pub fn read_factor_grid(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    let path = path.as_ref();
    read_npy(path).with_context(|| format!("reading growth factor raster {}", path.display()))
}

pub fn read_georeference(raster_path: &Path) -> Result<GeoReference> {
    let sidecar = sidecar_path(raster_path);
    if !sidecar.exists() {
        return Ok(GeoReference::default());
    }
    let file =
        File::open(&sidecar).with_context(|| format!("opening sidecar {}", sidecar.display()))?;
    let georef = serde_json::from_reader(file)
        .with_context(|| format!("parsing sidecar {}", sidecar.display()))?;
    Ok(georef)
}

/// Writes the predicted layer next to a sidecar carrying the source
/// snapshot's georeference, so downstream GIS tooling can re-attach it.
pub fn write_predicted(
    path: impl AsRef<Path>,
    predicted: &Array2<i32>,
    georef: &GeoReference,
) -> Result<()> {
    let path = path.as_ref();
    write_npy(path, predicted)
        .with_context(|| format!("writing predicted raster {}", path.display()))?;
    let sidecar = sidecar_path(path);
    let file =
        File::create(&sidecar).with_context(|| format!("creating sidecar {}", sidecar.display()))?;
    serde_json::to_writer_pretty(file, georef)
        .with_context(|| format!("writing sidecar {}", sidecar.display()))?;
    Ok(())
}
