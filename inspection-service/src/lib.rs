//! Inspection relay service.
//!
//! Forwards image-analysis requests to Gemini with a system instruction built
//! from recently labelled examples, and keeps those examples in a bounded
//! JSON file.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
