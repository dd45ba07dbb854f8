//! Epimethean turn engine library.
//!
//! Exposes the unit catalog, galaxy model, order language, phase resolvers
//! and turn engine for use by integration tests and the binary entry point.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod galaxy;
pub mod orders;
pub mod resolve;
