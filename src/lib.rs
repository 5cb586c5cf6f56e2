//! Pricelens - technical indicator and forecast overlay engine for price dashboards

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{ChartError, Result};
pub use services::{build_dashboard, DashboardInput, DashboardView, NormalizedSeries, SeriesAligner};
pub use types::*;
