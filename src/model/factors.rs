use ndarray::Array2;

use crate::error::ModelError;

/// One growth driver raster, e.g. population density or slope.
#[derive(Clone, Debug)]
pub struct GrowthFactor {
    name: String,
    grid: Array2<f64>,
}

impl GrowthFactor {
    pub fn new(name: impl Into<String>, grid: Array2<f64>) -> Self {
        GrowthFactor {
            name: name.into(),
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grid(&self) -> &Array2<f64> {
        &self.grid
    }

    pub fn dim(&self) -> (usize, usize) {
        self.grid.dim()
    }
}

/// Ordered set of growth factors. Order is significant: threshold rules are
/// matched to factors positionally.
#[derive(Clone, Debug, Default)]
pub struct GrowthFactorSet {
    factors: Vec<GrowthFactor>,
}

impl GrowthFactorSet {
    pub fn new() -> Self {
        GrowthFactorSet { factors: vec![] }
    }

    pub fn with_factor(mut self, name: impl Into<String>, grid: Array2<f64>) -> Self {
        self.factors.push(GrowthFactor::new(name, grid));
        self
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GrowthFactor> {
        self.factors.iter()
    }
}

/// Directional comparison against one growth factor. Configured as a signed
/// magnitude: negative means "at most |m| triggers" (proximity-style rules),
/// positive means "at least m triggers".
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdRule {
    AtMost(f64),
    AtLeast(f64),
}

impl ThresholdRule {
    pub fn from_signed(magnitude: f64, index: usize) -> Result<Self, ModelError> {
        if magnitude == 0.0 {
            Err(ModelError::InvalidThresholdMagnitude { index })
        } else if magnitude < 0.0 {
            Ok(ThresholdRule::AtMost(-magnitude))
        } else {
            Ok(ThresholdRule::AtLeast(magnitude))
        }
    }

    /// Builds rules from signed magnitudes in factor registration order.
    pub fn from_signed_list(magnitudes: &[f64]) -> Result<Vec<Self>, ModelError> {
        magnitudes
            .iter()
            .enumerate()
            .map(|(index, &m)| ThresholdRule::from_signed(m, index))
            .collect()
    }

    pub fn satisfied_by(&self, value: f64) -> bool {
        match self {
            ThresholdRule::AtMost(limit) => value <= *limit,
            ThresholdRule::AtLeast(limit) => value >= *limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_magnitude_is_an_upper_bound() {
        let rule = ThresholdRule::from_signed(-5.0, 0).unwrap();
        assert_eq!(rule, ThresholdRule::AtMost(5.0));
        assert!(rule.satisfied_by(4.9));
        assert!(rule.satisfied_by(5.0));
        assert!(!rule.satisfied_by(5.1));
    }

    #[test]
    fn positive_magnitude_is_a_lower_bound() {
        let rule = ThresholdRule::from_signed(5.0, 0).unwrap();
        assert_eq!(rule, ThresholdRule::AtLeast(5.0));
        assert!(!rule.satisfied_by(4.9));
        assert!(rule.satisfied_by(5.0));
        assert!(rule.satisfied_by(5.1));
    }

    #[test]
    fn zero_magnitude_is_rejected_at_construction() {
        let err = ThresholdRule::from_signed(0.0, 3).unwrap_err();
        assert_eq!(err, ModelError::InvalidThresholdMagnitude { index: 3 });

        let err = ThresholdRule::from_signed_list(&[1500.0, 60.0, 0.0, -900.0]).unwrap_err();
        assert_eq!(err, ModelError::InvalidThresholdMagnitude { index: 2 });
    }
}
