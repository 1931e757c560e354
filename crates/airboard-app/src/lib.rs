//! Airboard portal HTTP surface for calendar expansion.

pub mod app;
pub mod error;
pub mod expander_handler;
