//! Sightline - headless driver for the sight engine
//!
//! The binary's logic lives here so integration tests can call it directly.

pub mod config;
pub mod driver;
