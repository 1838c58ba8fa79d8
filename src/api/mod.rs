//! REST API client module for the water quality data service.
//!
//! This module provides the `ApiClient` for looking up public water
//! systems, their advisory safety status, violation records, and
//! statewide statistics.
//!
//! Requests carry the persisted JWT bearer token when one exists; the
//! server decides what each caller may see.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_API_URL};
pub use error::ApiError;
