//! HTTP route handlers.

pub mod aggregates;
pub mod chains;
pub mod health;
pub mod metrics;
