//! Debt Projection - compound-interest growth of unpaid credit card balances
//!
//! This library provides:
//! - Monthly-compounded balance projection for a single card
//! - Time series generation over a monthly grid
//! - Per-card or merged ("Total Debt") aggregation
//! - Chart-ready output (years axis, labelled series) with CSV/JSON writers

pub mod error;
pub mod card;
pub mod projection;
pub mod aggregate;
pub mod chart;
pub mod simulation;

// Re-export commonly used types
pub use error::ProjectionError;
pub use card::{CardInput, DebtEntity, EntityId};
pub use projection::{
    projected_balance, project_series, ProjectionEngine, ProjectionConfig, TimeGrid,
};
pub use aggregate::{aggregate, AggregateMode, EntitySeries, LabeledSeries};
pub use chart::ChartData;
pub use simulation::{simulate, SimulationParams};
