//! Carbon Tracker Engine Library
//!
//! Host layer around the calculation core: configuration, reference data
//! loading, shared engine state and the tracking and export services.

pub mod config;
pub mod error;
pub mod loader;
pub mod replay;
pub mod services;
pub mod state;
