//! Shared building blocks for the Airboard portal crates.
//!
//! Configuration loading, the core error type and route constants live here
//! so that the domain crates and the HTTP binary agree on them.

pub mod config;
pub mod constants;
pub mod error;
