//! Projection engine for single and multi-card balance projections

mod grid;
mod engine;

pub use grid::TimeGrid;
pub use engine::{
    projected_balance, checked_projected_balance, project_series, ProjectionEngine,
    ProjectionConfig,
};

// ============================================================================
// Compounding and Horizon Defaults
// ============================================================================
// Card interest is capitalized monthly at every call site. The grid is also
// monthly, so each grid step is exactly one compounding period.

/// Months in a year; also the number of grid points per projected year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Compounding periods per year (monthly)
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 12;

/// Default projection horizon (years)
pub const DEFAULT_HORIZON_YEARS: u32 = 5;

/// Longest supported projection horizon (years)
pub const MAX_HORIZON_YEARS: u32 = 30;
