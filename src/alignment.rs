//! Gate checks run before any component touches grid contents. Each check
//! returns a result consumed immediately by the caller; nothing is signalled
//! through shared state.

use crate::error::ModelError;
use crate::model::LandCoverSnapshot;

/// Verifies that every grid shares the dimensions of the first one and
/// returns those dimensions. The reported index identifies the offending
/// grid in input order.
pub fn check_grids_aligned(dims: &[(usize, usize)]) -> Result<(usize, usize), ModelError> {
    let expected = *dims.first().ok_or(ModelError::EmptyGrid)?;
    for (index, &found) in dims.iter().enumerate().skip(1) {
        if found != expected {
            return Err(ModelError::DimensionMismatch {
                index,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

/// Verifies that two land cover snapshots span the same class labels and
/// returns the shared (min, max) range.
pub fn check_class_range_match(
    left: &LandCoverSnapshot,
    right: &LandCoverSnapshot,
) -> Result<(i32, i32), ModelError> {
    if left.class_range() != right.class_range() {
        return Err(ModelError::ClassRangeMismatch {
            left: left.class_range(),
            right: right.class_range(),
        });
    }
    Ok(left.class_range())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::model::GeoReference;

    #[test]
    fn aligned_grids_pass() {
        let dims = [(4, 6), (4, 6), (4, 6)];
        assert_eq!(check_grids_aligned(&dims).unwrap(), (4, 6));
    }

    #[test]
    fn mismatched_grid_is_identified_by_index() {
        let dims = [(4, 6), (4, 6), (5, 6)];
        let err = check_grids_aligned(&dims).unwrap_err();
        assert_eq!(
            err,
            ModelError::DimensionMismatch {
                index: 2,
                expected: (4, 6),
                found: (5, 6),
            }
        );
    }

    #[test]
    fn differing_class_ranges_are_rejected() {
        let a = LandCoverSnapshot::new(array![[1, 2], [3, 4]], GeoReference::default()).unwrap();
        let b = LandCoverSnapshot::new(array![[1, 2], [3, 3]], GeoReference::default()).unwrap();
        let err = check_class_range_match(&a, &b).unwrap_err();
        assert_eq!(
            err,
            ModelError::ClassRangeMismatch {
                left: (1, 4),
                right: (1, 3),
            }
        );
    }

    #[test]
    fn matching_class_ranges_return_the_shared_range() {
        let a = LandCoverSnapshot::new(array![[1, 2], [3, 4]], GeoReference::default()).unwrap();
        let b = LandCoverSnapshot::new(array![[4, 3], [2, 1]], GeoReference::default()).unwrap();
        assert_eq!(check_class_range_match(&a, &b).unwrap(), (1, 4));
    }
}
