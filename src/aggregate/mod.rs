//! Combine per-card series for display
//!
//! Individual mode passes every card through under its own label; Merged mode
//! sums all cards month by month into a single "Total Debt" series.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::EntityId;
use crate::projection::TimeGrid;

/// Label of the summed series in merged mode
pub const TOTAL_DEBT_LABEL: &str = "Total Debt";

/// How card series are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateMode {
    /// One series per card, in input order
    #[default]
    Individual,
    /// A single series summing every card
    Merged,
}

impl AggregateMode {
    pub fn from_merged_flag(merged: bool) -> Self {
        if merged {
            Self::Merged
        } else {
            Self::Individual
        }
    }
}

/// Projected balances of one card, aligned with the time grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySeries {
    pub id: EntityId,
    pub name: String,
    pub values: Vec<f64>,
}

/// A display-ready series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl LabeledSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Aggregate card series according to `mode`.
///
/// With no cards, Individual yields nothing and Merged yields an all-zero
/// series spanning `grid`.
///
/// # Panics
/// In Merged mode, if any series length differs from `grid.len()`. Series
/// produced by one `ProjectionEngine` always share its grid.
pub fn aggregate(
    series: &[EntitySeries],
    mode: AggregateMode,
    grid: &TimeGrid,
) -> Vec<LabeledSeries> {
    match mode {
        AggregateMode::Individual => {
            warn_on_duplicate_names(series);
            series
                .iter()
                .map(|s| LabeledSeries::new(s.name.clone(), s.values.clone()))
                .collect()
        }
        AggregateMode::Merged => {
            let mut total = vec![0.0; grid.len()];
            for s in series {
                assert_eq!(
                    s.values.len(),
                    total.len(),
                    "series for {:?} '{}' does not match the time grid",
                    s.id,
                    s.name
                );
                for (acc, value) in total.iter_mut().zip(&s.values) {
                    *acc += value;
                }
            }
            debug!("Merged {} cards into '{}'", series.len(), TOTAL_DEBT_LABEL);
            vec![LabeledSeries::new(TOTAL_DEBT_LABEL, total)]
        }
    }
}

fn warn_on_duplicate_names(series: &[EntitySeries]) {
    let mut seen = HashSet::new();
    for s in series {
        if !seen.insert(s.name.as_str()) {
            warn!("Card name '{}' is used more than once; legend labels will repeat", s.name);
        }
    }
}
