//! Palmer penguins dashboard: a shared read-only table, a per-session
//! species filter with cached derivations, and an egui scatter plot.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod reactive;
pub mod state;
pub mod ui;
