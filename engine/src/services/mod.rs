//! Business logic services
//!
//! Services coordinate the calculation core with the engine state.

pub mod export;
pub mod tracking;

pub use export::{ExportService, HistoryExport};
pub use tracking::{TrackingOutcome, TrackingService};
