pub mod aggregator;
pub mod config;
pub mod error;
pub mod outcome;
pub mod report;
pub mod summary;

pub use error::LoadstatsError;
