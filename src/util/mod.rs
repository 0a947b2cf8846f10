pub mod export;
pub mod human;
pub mod metrics;
