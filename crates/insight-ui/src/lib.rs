//! Terminal UI layer for cf-insight.
//!
//! Provides themes, the interactive dashboard event loop, and one view per
//! chart of the analysis report, built on top of [`ratatui`].

pub mod app;
pub mod themes;
pub mod views;

pub use insight_core as core;
