//! End-to-end simulation from user inputs to chart data
//!
//! `SimulationParams` is the presentation layer's input: cards with APR in
//! percent, a shared horizon and the merge toggle. Defaults match a fresh
//! calculator: one $1,000 card at 20% over 5 years, shown individually.

use std::io::Read;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateMode};
use crate::card::{CardInput, DebtEntity, MAX_CARDS};
use crate::chart::ChartData;
use crate::error::ProjectionError;
use crate::projection::{
    ProjectionConfig, ProjectionEngine, DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS,
};

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Cards to project (1 to 10)
    #[serde(default = "default_cards")]
    pub cards: Vec<CardInput>,

    /// Years to project (1 to 30)
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Show a single summed "Total Debt" series instead of one per card
    #[serde(default)]
    pub merged: bool,
}

fn default_cards() -> Vec<CardInput> { vec![CardInput::default_at(0)] }
fn default_horizon_years() -> u32 { DEFAULT_HORIZON_YEARS }

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            cards: default_cards(),
            horizon_years: DEFAULT_HORIZON_YEARS,
            merged: false,
        }
    }
}

impl SimulationParams {
    /// Read params from JSON; missing fields take their defaults
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ProjectionError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Layer command-line choices over these params.
    ///
    /// A non-empty `cards` list replaces the existing cards; `horizon_years`
    /// replaces the horizon when given; `merged` can only switch merging on.
    pub fn apply_overrides(
        &mut self,
        cards: Vec<CardInput>,
        horizon_years: Option<u32>,
        merged: bool,
    ) {
        if !cards.is_empty() {
            self.cards = cards;
        }
        if let Some(years) = horizon_years {
            self.horizon_years = years;
        }
        if merged {
            self.merged = true;
        }
    }

    pub fn mode(&self) -> AggregateMode {
        AggregateMode::from_merged_flag(self.merged)
    }

    /// Check card count, horizon and every card's balance and APR
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.cards.is_empty() {
            return Err(ProjectionError::NoCards);
        }
        if self.cards.len() > MAX_CARDS {
            return Err(ProjectionError::TooManyCards {
                count: self.cards.len(),
                max: MAX_CARDS,
            });
        }
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ProjectionError::invalid("horizon_years", self.horizon_years as f64));
        }
        for card in &self.cards {
            card.validate()?;
        }
        Ok(())
    }

    /// Validated projection entities, identified by input position
    pub fn entities(&self) -> Result<Vec<DebtEntity>, ProjectionError> {
        self.validate()?;
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| card.to_entity(i))
            .collect()
    }
}

/// Validate, project every card, aggregate by mode and build the chart data
pub fn simulate(params: &SimulationParams) -> Result<ChartData, ProjectionError> {
    let entities = params.entities()?;
    let mode = params.mode();

    let engine = ProjectionEngine::new(ProjectionConfig {
        horizon_years: params.horizon_years,
        ..Default::default()
    })?;

    let projected = engine.project_all(&entities);
    let series = aggregate(&projected, mode, engine.grid());
    debug!("Aggregated into {} series ({:?})", series.len(), mode);

    let chart = ChartData::new(engine.grid(), mode, series);
    info!(
        "Simulated {} cards over {} years: {}",
        entities.len(),
        params.horizon_years,
        chart.title
    );
    Ok(chart)
}
