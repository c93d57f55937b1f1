//! Hypothesis analysis modules.
//!
//! Grouping/reduction primitives plus the eight scripted hypothesis
//! routines that turn the loaded table into charts and conclusions.

pub mod aggregator;
pub mod hypotheses;

pub use hypotheses::{analyze, conclusion};
