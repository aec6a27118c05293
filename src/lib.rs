//! Sampledb - sample relational schema, seed batch and canned reports
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod pipeline;
pub mod render;
