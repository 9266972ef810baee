//! Core pricing, formatting and ordering logic

pub mod catalog;
pub mod config;
pub mod filters;
pub mod log;
pub mod period;
pub mod pricing;
pub mod sort;

// Re-export main types for cleaner imports
pub use catalog::{DiskDescriptor, InstanceType, RawPrice, ReservationPriceRecord};
pub use config::{AppConfig, DisplaySettings};
pub use period::Period;
pub use pricing::PricingCalculator;
pub use sort::{SortField, sort_instances};
