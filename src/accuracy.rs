use ndarray::Array2;

use crate::alignment::check_grids_aligned;
use crate::error::ModelError;
use crate::model::LandCoverSnapshot;

const SQUARE_METERS_PER_KM2: f64 = 1_000_000.0;

/// Area of the cells whose built-up membership differs between the two
/// grids, in km². Symmetric churn, not signed growth: a cell counts whether
/// it gained or lost built-up status. `cell_size` is the linear cell size in
/// the raster's units (meters for the usual 30 m land cover products).
pub fn builtup_area_difference(
    a: &Array2<i32>,
    b: &Array2<i32>,
    builtup_class: i32,
    cell_size: f64,
) -> f64 {
    let changed = a
        .iter()
        .zip(b.iter())
        .filter(|(&left, &right)| (left == builtup_class) != (right == builtup_class))
        .count();
    changed as f64 * cell_size * cell_size / SQUARE_METERS_PER_KM2
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccuracyReport {
    /// Built-up churn between source and target, km².
    pub actual_growth_km2: f64,
    /// Built-up churn between source and prediction, km².
    pub predicted_growth_km2: f64,
    /// 100 minus the built-up membership mismatch between prediction and
    /// target, as a percentage of the target's built-up cell count.
    pub spatial_accuracy: f64,
}

pub struct AccuracyEvaluator {
    builtup_class: i32,
    cell_size: f64,
}

impl AccuracyEvaluator {
    pub fn new(builtup_class: i32, cell_size: f64) -> Self {
        AccuracyEvaluator {
            builtup_class,
            cell_size,
        }
    }

    pub fn evaluate(
        &self,
        source: &LandCoverSnapshot,
        target: &LandCoverSnapshot,
        predicted: &Array2<i32>,
    ) -> Result<AccuracyReport, ModelError> {
        check_grids_aligned(&[source.dim(), target.dim(), predicted.dim()])?;

        let target_builtup = target
            .grid()
            .iter()
            .filter(|&&c| c == self.builtup_class)
            .count();
        if target_builtup == 0 {
            return Err(ModelError::NoBuiltupCells);
        }

        let mismatches = predicted
            .iter()
            .zip(target.grid().iter())
            .filter(|(&p, &t)| (p == self.builtup_class) != (t == self.builtup_class))
            .count();

        Ok(AccuracyReport {
            actual_growth_km2: builtup_area_difference(
                source.grid(),
                target.grid(),
                self.builtup_class,
                self.cell_size,
            ),
            predicted_growth_km2: builtup_area_difference(
                source.grid(),
                predicted,
                self.builtup_class,
                self.cell_size,
            ),
            spatial_accuracy: 100.0 - (mismatches as f64 / target_builtup as f64) * 100.0,
        })
    }
}
