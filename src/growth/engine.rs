use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{s, Array2};
use rayon::prelude::*;

use crate::alignment::check_grids_aligned;
use crate::error::ModelError;
use crate::growth::progress::{ProgressSink, SilentProgress};
use crate::model::{GrowthFactorSet, LandCoverSnapshot, ThresholdRule};

pub const DEFAULT_KERNEL_SIZE: usize = 4;

/// Cellular-automata growth simulator. Promotes non-built-up cells into the
/// built-up class when enough of their neighborhood is already built up and
/// at least one growth factor rule fires.
pub struct GrowthEngine {
    builtup_class: i32,
    neighbor_threshold: usize,
    kernel_size: usize,
    rules: Vec<ThresholdRule>,
}

impl GrowthEngine {
    pub fn new(builtup_class: i32, neighbor_threshold: usize, rules: Vec<ThresholdRule>) -> Self {
        GrowthEngine {
            builtup_class,
            neighbor_threshold,
            kernel_size: DEFAULT_KERNEL_SIZE,
            rules,
        }
    }

    /// Kernel sides below 1 are clamped to 1.
    pub fn with_kernel_size(mut self, kernel_size: usize) -> Self {
        self.kernel_size = kernel_size.max(1);
        self
    }

    pub fn predict(
        &self,
        source: &LandCoverSnapshot,
        factors: &GrowthFactorSet,
    ) -> Result<Array2<i32>, ModelError> {
        self.predict_with_progress(source, factors, &SilentProgress)
    }

    /// Runs one simulation pass over the interior of `source`.
    ///
    /// Neighborhood counts are always taken from the immutable source grid,
    /// never from the predicted copy, so a promotion cannot influence the
    /// decision at any other cell and the scan order does not matter. That
    /// also makes the row partitioning below safe: workers only read shared
    /// grids and emit disjoint promotions.
    pub fn predict_with_progress(
        &self,
        source: &LandCoverSnapshot,
        factors: &GrowthFactorSet,
        progress: &dyn ProgressSink,
    ) -> Result<Array2<i32>, ModelError> {
        if self.rules.len() != factors.len() {
            return Err(ModelError::ThresholdCountMismatch {
                rules: self.rules.len(),
                factors: factors.len(),
            });
        }
        let mut dims = vec![source.dim()];
        dims.extend(factors.iter().map(|f| f.dim()));
        check_grids_aligned(&dims)?;

        let (rows, cols) = source.dim();
        let mut predicted = source.grid().clone();

        // Margin arithmetic replicated from the calibrated model: the scan
        // covers margin <= y < rows - (margin - 1), and the window around
        // (y, x) spans [y - margin + 1, y + margin), a side of 2*margin - 1.
        // The asymmetric border this leaves untouched is part of the model.
        let margin = (self.kernel_size + 1) / 2;
        let y_end = (rows + 1).saturating_sub(margin);
        let x_end = (cols + 1).saturating_sub(margin);
        if y_end <= margin || x_end <= margin {
            // Grid smaller than the kernel: nothing to evaluate.
            return Ok(predicted);
        }

        let grid = source.grid();
        let total_rows = y_end - margin;
        let rows_done = AtomicUsize::new(0);

        let promotions: Vec<(usize, usize)> = (margin..y_end)
            .into_par_iter()
            .flat_map_iter(|y| {
                let mut promoted = vec![];
                for x in margin..x_end {
                    let window = grid.slice(s![
                        y - margin + 1..y + margin,
                        x - margin + 1..x + margin
                    ]);
                    let builtup_count =
                        window.iter().filter(|&&c| c == self.builtup_class).count();
                    if builtup_count >= self.neighbor_threshold {
                        let triggered = factors
                            .iter()
                            .zip(&self.rules)
                            .any(|(factor, rule)| rule.satisfied_by(factor.grid()[[y, x]]));
                        if triggered {
                            promoted.push((y, x));
                        }
                    }
                }
                let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                progress.rows_completed(done, total_rows);
                promoted.into_iter()
            })
            .collect();

        for (y, x) in promotions {
            predicted[[y, x]] = self.builtup_class;
        }
        Ok(predicted)
    }
}
