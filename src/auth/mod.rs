//! Session and authorization layer.
//!
//! This module provides:
//! - `TokenStore`: file-backed bearer credential persistence
//! - `decode` / `ClaimSet`: non-validating JWT payload inspection
//! - `Session`: the current credential and the role derived from it
//! - `decide`: fail-closed role gate for restricted views
//!
//! Decoded claims are advisory. The client never verifies token
//! signatures; the API enforces authorization on every request it serves.

pub mod claims;
pub mod guard;
pub mod session;
pub mod store;

pub use claims::{decode, ClaimSet, DecodeError, Role};
pub use guard::{decide, GuardDecision};
pub use session::Session;
pub use store::TokenStore;
