use ndarray::Array2;
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Georeferencing carried alongside a class grid. The simulation core never
/// interprets these fields; they are copied from the source snapshot onto
/// whatever the raster export collaborator writes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeoReference {
    /// GDAL-style affine transform (origin x, pixel width, row rotation,
    /// origin y, column rotation, pixel height).
    pub transform: [f64; 6],
    /// Projection identifier, e.g. a WKT string or an EPSG code.
    pub projection: String,
    /// Sentinel written for cells outside the defined class range.
    pub no_data_value: i32,
}

impl Default for GeoReference {
    fn default() -> Self {
        GeoReference {
            transform: [0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
            projection: String::new(),
            no_data_value: 0,
        }
    }
}

/// A land cover class grid at one point in time. Immutable once built; the
/// growth engine works on its own copy.
#[derive(Clone, Debug)]
pub struct LandCoverSnapshot {
    grid: Array2<i32>,
    georef: GeoReference,
    class_range: (i32, i32),
}

impl LandCoverSnapshot {
    pub fn new(grid: Array2<i32>, georef: GeoReference) -> Result<Self, ModelError> {
        let (rows, cols) = grid.dim();
        if rows == 0 || cols == 0 {
            return Err(ModelError::EmptyGrid);
        }
        let min = *grid.min().map_err(|_| ModelError::EmptyGrid)?;
        let max = *grid.max().map_err(|_| ModelError::EmptyGrid)?;
        Ok(LandCoverSnapshot {
            grid,
            georef,
            class_range: (min, max),
        })
    }

    pub fn grid(&self) -> &Array2<i32> {
        &self.grid
    }

    pub fn georef(&self) -> &GeoReference {
        &self.georef
    }

    pub fn dim(&self) -> (usize, usize) {
        self.grid.dim()
    }

    /// Smallest and largest class label present, both inclusive.
    pub fn class_range(&self) -> (i32, i32) {
        self.class_range
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn class_range_spans_min_to_max() {
        let snapshot = LandCoverSnapshot::new(
            array![[2, 1, 3], [4, 2, 2]],
            GeoReference::default(),
        )
        .unwrap();
        assert_eq!(snapshot.class_range(), (1, 4));
        assert_eq!(snapshot.dim(), (2, 3));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let result = LandCoverSnapshot::new(Array2::zeros((0, 5)), GeoReference::default());
        assert_eq!(result.unwrap_err(), ModelError::EmptyGrid);
    }
}
