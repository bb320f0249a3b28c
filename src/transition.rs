use ndarray::Array2;

use crate::alignment::{check_class_range_match, check_grids_aligned};
use crate::error::ModelError;
use crate::model::LandCoverSnapshot;

/// Class-to-class change counts between two time-indexed snapshots of the
/// same area, with row-normalized transition probabilities.
#[derive(Clone, Debug)]
pub struct TransitionMatrix {
    /// raw[(i, j)] = cells that moved from class `min + i` to class `min + j`.
    pub raw: Array2<u64>,
    /// Row-normalized probabilities. Rows listed in `undefined_rows` are left
    /// at zero instead of holding a division artifact.
    pub normalized: Array2<f64>,
    /// Class labels whose raw row summed to zero, so no probability is
    /// defined for them.
    pub undefined_rows: Vec<i32>,
    class_min: i32,
}

impl TransitionMatrix {
    /// Counts transitions between aligned snapshots. The matrix side is
    /// derived from the shared class range (`max - min + 1`), never assumed.
    pub fn between(
        source: &LandCoverSnapshot,
        target: &LandCoverSnapshot,
    ) -> Result<Self, ModelError> {
        check_grids_aligned(&[source.dim(), target.dim()])?;
        let (min, max) = check_class_range_match(source, target)?;
        let n_classes = (max - min + 1) as usize;

        let mut raw = Array2::<u64>::zeros((n_classes, n_classes));
        for (&from, &to) in source.grid().iter().zip(target.grid().iter()) {
            raw[[(from - min) as usize, (to - min) as usize]] += 1;
        }

        let mut normalized = Array2::<f64>::zeros((n_classes, n_classes));
        let mut undefined_rows = vec![];
        for i in 0..n_classes {
            let row_sum: u64 = raw.row(i).sum();
            if row_sum == 0 {
                undefined_rows.push(min + i as i32);
                continue;
            }
            for j in 0..n_classes {
                normalized[[i, j]] = raw[[i, j]] as f64 / row_sum as f64;
            }
        }

        Ok(TransitionMatrix {
            raw,
            normalized,
            undefined_rows,
            class_min: min,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.raw.nrows()
    }

    /// Probability of a cell of class `from` becoming class `to`. `None` when
    /// either label is outside the class range or the `from` row is undefined.
    pub fn probability(&self, from: i32, to: i32) -> Option<f64> {
        let i = usize::try_from(from - self.class_min).ok()?;
        let j = usize::try_from(to - self.class_min).ok()?;
        if i >= self.n_classes() || j >= self.n_classes() {
            return None;
        }
        if self.undefined_rows.contains(&from) {
            return None;
        }
        Some(self.normalized[[i, j]])
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::model::GeoReference;

    fn snapshot(grid: Array2<i32>) -> LandCoverSnapshot {
        LandCoverSnapshot::new(grid, GeoReference::default()).unwrap()
    }

    #[test]
    fn counts_cover_every_cell() {
        let source = snapshot(array![[1, 2, 2], [3, 2, 1], [4, 4, 2]]);
        let target = snapshot(array![[1, 1, 2], [3, 1, 1], [4, 2, 2]]);
        let matrix = TransitionMatrix::between(&source, &target).unwrap();

        assert_eq!(matrix.n_classes(), 4);
        assert_eq!(matrix.raw.sum(), 9);
        assert_eq!(matrix.raw[[0, 0]], 2); // both built-up cells stayed
        assert_eq!(matrix.raw[[1, 0]], 2); // two vegetation cells urbanized
        assert_eq!(matrix.raw[[3, 1]], 1);
    }

    #[test]
    fn nonzero_rows_are_stochastic() {
        let source = snapshot(array![[1, 2, 2], [3, 2, 1], [4, 4, 2]]);
        let target = snapshot(array![[1, 1, 2], [3, 1, 1], [4, 2, 2]]);
        let matrix = TransitionMatrix::between(&source, &target).unwrap();

        assert!(matrix.undefined_rows.is_empty());
        for i in 0..matrix.n_classes() {
            assert_relative_eq!(matrix.normalized.row(i).sum(), 1.0, max_relative = 1e-9);
        }
        assert_relative_eq!(matrix.probability(2, 1).unwrap(), 0.5);
    }

    #[test]
    fn matrix_side_follows_the_class_range() {
        // Classes 1 and 3 only: range 1..=3, so a 3x3 matrix with an empty
        // middle row, not a 2x2 one.
        let source = snapshot(array![[1, 3], [3, 3]]);
        let target = snapshot(array![[1, 1], [3, 3]]);
        let matrix = TransitionMatrix::between(&source, &target).unwrap();

        assert_eq!(matrix.n_classes(), 3);
        assert_eq!(matrix.undefined_rows, vec![2]);
        assert_eq!(matrix.probability(2, 1), None);
        assert_relative_eq!(matrix.probability(3, 1).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn zero_based_class_labels_are_supported() {
        let source = snapshot(array![[0, 1], [1, 0]]);
        let target = snapshot(array![[0, 0], [1, 1]]);
        let matrix = TransitionMatrix::between(&source, &target).unwrap();

        assert_eq!(matrix.n_classes(), 2);
        assert_eq!(matrix.raw[[0, 0]], 1);
        assert_eq!(matrix.raw[[1, 0]], 1);
        assert_relative_eq!(matrix.probability(1, 1).unwrap(), 0.5);
    }

    #[test]
    fn misaligned_snapshots_are_rejected_before_counting() {
        let source = snapshot(array![[1, 2], [2, 1]]);
        let target = snapshot(array![[1, 2, 1], [2, 1, 2]]);
        let err = TransitionMatrix::between(&source, &target).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                index: 1,
                expected: (2, 2),
                found: (2, 3),
            }
        );
    }
}
