use serde::Serialize;

use super::MONTHS_PER_YEAR;
use crate::error::ProjectionError;

/// Month indices `0..=horizon_years * 12`, both endpoints included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeGrid {
    horizon_years: u32,
    last_month: u32,
}

impl TimeGrid {
    /// Rejects a zero horizon and any horizon whose month count overflows `u32`
    pub fn new(horizon_years: u32) -> Result<Self, ProjectionError> {
        let last_month = horizon_years
            .checked_mul(MONTHS_PER_YEAR)
            .filter(|&m| m > 0)
            .ok_or_else(|| ProjectionError::invalid("horizon_years", horizon_years as f64))?;
        Ok(Self { horizon_years, last_month })
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Last month index (inclusive)
    pub fn last_month(&self) -> u32 {
        self.last_month
    }

    /// Number of grid points
    pub fn len(&self) -> usize {
        self.last_month() as usize + 1
    }

    /// Never true; a grid always holds at least months 0 through 12
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn months(&self) -> impl Iterator<Item = u32> {
        0..=self.last_month()
    }

    /// Elapsed years at each grid point (month / 12)
    pub fn years_axis(&self) -> Vec<f64> {
        self.months()
            .map(|m| m as f64 / MONTHS_PER_YEAR as f64)
            .collect()
    }
}
