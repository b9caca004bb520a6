//! HTTP handlers for the inspection service.

pub mod analyze;
pub mod health;
pub mod training;
