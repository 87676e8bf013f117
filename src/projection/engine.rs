use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::{TimeGrid, DEFAULT_HORIZON_YEARS, DEFAULT_PERIODS_PER_YEAR, MONTHS_PER_YEAR};
use crate::aggregate::EntitySeries;
use crate::card::DebtEntity;
use crate::error::ProjectionError;

/// Balance after `elapsed_years` of discrete compounding with no payments.
///
/// `principal * (1 + annual_rate / n) ^ (n * elapsed_years)`
///
/// Inputs are assumed pre-validated (`principal`, `annual_rate`,
/// `elapsed_years` >= 0, `periods_per_year` > 0); use
/// [`checked_projected_balance`] at an untrusted boundary.
pub fn projected_balance(
    principal: f64,
    annual_rate: f64,
    elapsed_years: f64,
    periods_per_year: u32,
) -> f64 {
    let n = periods_per_year as f64;
    principal * (1.0 + annual_rate / n).powf(n * elapsed_years)
}

/// [`projected_balance`] with range checks on every argument
pub fn checked_projected_balance(
    principal: f64,
    annual_rate: f64,
    elapsed_years: f64,
    periods_per_year: u32,
) -> Result<f64, ProjectionError> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(ProjectionError::invalid("principal", principal));
    }
    if !annual_rate.is_finite() || annual_rate < 0.0 {
        return Err(ProjectionError::invalid("annual_rate", annual_rate));
    }
    if !elapsed_years.is_finite() || elapsed_years < 0.0 {
        return Err(ProjectionError::invalid("elapsed_years", elapsed_years));
    }
    if periods_per_year == 0 {
        return Err(ProjectionError::invalid("periods_per_year", 0.0));
    }
    Ok(projected_balance(principal, annual_rate, elapsed_years, periods_per_year))
}

/// Monthly balances for one card over `horizon_years`, compounded monthly.
///
/// Returns `horizon_years * 12 + 1` values, one per month from 0 through the
/// horizon inclusive.
pub fn project_series(
    entity: &DebtEntity,
    horizon_years: u32,
) -> Result<Vec<f64>, ProjectionError> {
    let grid = TimeGrid::new(horizon_years)?;
    Ok(series_on_grid(entity, &grid, DEFAULT_PERIODS_PER_YEAR))
}

fn series_on_grid(entity: &DebtEntity, grid: &TimeGrid, periods_per_year: u32) -> Vec<f64> {
    grid.months()
        .map(|month| {
            let elapsed_years = month as f64 / MONTHS_PER_YEAR as f64;
            projected_balance(entity.principal, entity.annual_rate, elapsed_years, periods_per_year)
        })
        .collect()
}

/// Configuration for projection runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Years to project (grid covers months 0 through years * 12)
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Compounding periods per year (12 = monthly)
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

fn default_horizon_years() -> u32 { DEFAULT_HORIZON_YEARS }
fn default_periods_per_year() -> u32 { DEFAULT_PERIODS_PER_YEAR }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
        }
    }
}

/// Projects cards over a shared monthly grid
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
    grid: TimeGrid,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        if config.periods_per_year == 0 {
            return Err(ProjectionError::invalid("periods_per_year", 0.0));
        }
        let grid = TimeGrid::new(config.horizon_years)?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Project a single card
    pub fn project_entity(&self, entity: &DebtEntity) -> EntitySeries {
        let values = series_on_grid(entity, &self.grid, self.config.periods_per_year);
        trace!(
            "Projected {:?} '{}': {:.2} -> {:.2}",
            entity.id,
            entity.name,
            entity.principal,
            values.last().copied().unwrap_or(entity.principal)
        );
        EntitySeries {
            id: entity.id,
            name: entity.name.clone(),
            values,
        }
    }

    /// Project every card, preserving input order
    pub fn project_all(&self, entities: &[DebtEntity]) -> Vec<EntitySeries> {
        debug!(
            "Projecting {} cards over {} years ({} points)",
            entities.len(),
            self.config.horizon_years,
            self.grid.len()
        );
        entities.iter().map(|e| self.project_entity(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::EntityId;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn card(principal: f64, rate: f64) -> DebtEntity {
        DebtEntity::new(EntityId(0), "Test", principal, rate).unwrap()
    }

    #[test]
    fn test_one_year_at_twenty_percent() {
        let balance = projected_balance(1000.0, 0.20, 1.0, 12);
        assert_abs_diff_eq!(balance, 1219.39, epsilon = 0.01);
        assert_relative_eq!(
            balance,
            1000.0 * (1.0 + 0.2 / 12.0_f64).powi(12),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_rate_is_flat() {
        assert_eq!(projected_balance(1000.0, 0.0, 5.0, 12), 1000.0);
        assert_eq!(projected_balance(1234.56, 0.0, 17.25, 12), 1234.56);
    }

    #[test]
    fn test_zero_elapsed_returns_principal() {
        for &(p, r) in &[(0.0, 0.3), (1000.0, 0.2), (5_000.5, 0.0), (1.0, 2.5)] {
            assert_eq!(projected_balance(p, r, 0.0, 12), p);
        }
    }

    #[test]
    fn test_zero_principal_stays_zero() {
        assert_eq!(projected_balance(0.0, 0.25, 30.0, 12), 0.0);
    }

    #[test]
    fn test_strictly_increasing_in_time() {
        let mut prev = projected_balance(500.0, 0.18, 0.0, 12);
        for month in 1..=360 {
            let next = projected_balance(500.0, 0.18, month as f64 / 12.0, 12);
            assert!(next > prev, "month {} did not grow: {} <= {}", month, next, prev);
            prev = next;
        }
    }

    #[test]
    fn test_fractional_years() {
        // Half a year of monthly compounding is six periods
        let balance = projected_balance(1000.0, 0.12, 0.5, 12);
        assert_relative_eq!(balance, 1000.0 * 1.01_f64.powi(6), max_relative = 1e-12);
    }

    #[test]
    fn test_other_compounding_frequency() {
        let annual = projected_balance(1000.0, 0.10, 2.0, 1);
        assert_relative_eq!(annual, 1210.0, max_relative = 1e-12);
    }

    #[test]
    fn test_checked_balance_rejects_bad_inputs() {
        assert!(checked_projected_balance(-1.0, 0.1, 1.0, 12).is_err());
        assert!(checked_projected_balance(1.0, -0.1, 1.0, 12).is_err());
        assert!(checked_projected_balance(1.0, 0.1, -1.0, 12).is_err());
        assert!(checked_projected_balance(1.0, 0.1, 1.0, 0).is_err());
        assert!(checked_projected_balance(f64::NAN, 0.1, 1.0, 12).is_err());
        assert_eq!(checked_projected_balance(1000.0, 0.0, 5.0, 12).unwrap(), 1000.0);
    }

    #[test]
    fn test_series_length() {
        let entity = card(1000.0, 0.2);
        assert_eq!(project_series(&entity, 1).unwrap().len(), 13);
        assert_eq!(project_series(&entity, 30).unwrap().len(), 361);
        for years in 1..=30 {
            assert_eq!(project_series(&entity, years).unwrap().len(), (years * 12 + 1) as usize);
        }
    }

    #[test]
    fn test_series_matches_balance_formula() {
        let entity = card(2500.0, 0.249);
        let series = project_series(&entity, 3).unwrap();

        assert_eq!(series[0], 2500.0);
        assert_eq!(series[12], projected_balance(2500.0, 0.249, 1.0, 12));
        assert_eq!(series[36], projected_balance(2500.0, 0.249, 3.0, 12));
        assert!(series.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_series_is_reproducible() {
        let entity = card(1234.5, 0.1999);
        let first = project_series(&entity, 10).unwrap();
        let second = project_series(&entity, 10).unwrap();

        let first_bits: Vec<u64> = first.iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        assert!(project_series(&card(1.0, 0.1), 0).is_err());
    }

    #[test]
    fn test_horizon_past_month_range_rejected() {
        let result = project_series(&card(1.0, 0.0), 357_913_942);
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidRange { field: "horizon_years", .. })
        ));
    }

    #[test]
    fn test_engine_preserves_order_and_ids() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            horizon_years: 2,
            ..Default::default()
        })
        .unwrap();
        let entities = vec![
            DebtEntity::new(EntityId(0), "B", 100.0, 0.1).unwrap(),
            DebtEntity::new(EntityId(1), "A", 200.0, 0.2).unwrap(),
        ];

        let series = engine.project_all(&entities);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "B");
        assert_eq!(series[1].id, EntityId(1));
        assert_eq!(series[1].values.len(), engine.grid().len());
        assert_eq!(series[0].values, project_series(&entities[0], 2).unwrap());
    }

    #[test]
    fn test_engine_rejects_bad_config() {
        let no_horizon = ProjectionConfig {
            horizon_years: 0,
            periods_per_year: 12,
        };
        let no_periods = ProjectionConfig {
            horizon_years: 1,
            periods_per_year: 0,
        };
        assert!(ProjectionEngine::new(no_horizon).is_err());
        assert!(ProjectionEngine::new(no_periods).is_err());
    }
}
