mod factors;
mod snapshot;

pub use factors::{GrowthFactor, GrowthFactorSet, ThresholdRule};
pub use snapshot::{GeoReference, LandCoverSnapshot};
