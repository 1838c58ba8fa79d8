//! Data models for public water system entities.
//!
//! This module contains the data structures returned by the water quality
//! API:
//!
//! - `WaterSystem`: inventory record with location and contact info
//! - `SafetyStatus`: advisory safe / not-safe drinking status
//! - `Violation`: compliance violation with its period and health flag
//! - `SystemStatistics`: statewide rollup counts

pub mod statistics;
pub mod system;
pub mod violation;

pub use statistics::SystemStatistics;
pub use system::{SafetyStatus, WaterSystem};
pub use violation::Violation;
