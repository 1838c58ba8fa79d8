//! Clearwell - a terminal client for public drinking water system data.
//!
//! The core of the crate is the session and authorization layer under
//! [`auth`]: a file-backed bearer token with non-validating claim decoding
//! and a fail-closed role gate in front of the restricted views. On top
//! of that sit a typed client for the water quality API and the plain-text
//! command handlers.

pub mod api;
pub mod app;
pub mod auth;
pub mod commands;
pub mod config;
pub mod models;
pub mod utils;
pub mod views;
