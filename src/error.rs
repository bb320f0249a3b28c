use thiserror::Error;

/// Validation and degenerate-input failures raised by the simulation core.
/// Every variant is raised before any dependent computation runs, so a
/// caller that gets an `Err` knows no grid was mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("input grid has zero rows or zero columns")]
    EmptyGrid,

    #[error("grid {index} is {found:?}, expected {expected:?} (rows, cols)")]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("land cover class ranges differ: {left:?} vs {right:?} (min, max)")]
    ClassRangeMismatch {
        left: (i32, i32),
        right: (i32, i32),
    },

    #[error("{rules} threshold rules supplied for {factors} growth factors")]
    ThresholdCountMismatch { rules: usize, factors: usize },

    #[error("threshold magnitude for factor {index} is zero, sign is needed to pick the comparison direction")]
    InvalidThresholdMagnitude { index: usize },

    #[error("target land cover has no built-up cells, spatial accuracy is undefined")]
    NoBuiltupCells,
}
