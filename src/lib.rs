pub mod accuracy;
pub mod alignment;
pub mod config;
pub mod error;
pub mod growth;
pub mod model;
pub mod raster;
pub mod transition;
