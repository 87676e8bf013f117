//! Chart-ready projection output
//!
//! The x axis is elapsed time in fractional years (month / 12); every series
//! holds one balance per x value.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateMode, LabeledSeries};
use crate::error::ProjectionError;
use crate::projection::TimeGrid;

pub const X_AXIS_LABEL: &str = "Years";
pub const Y_AXIS_LABEL: &str = "Amount ($)";

const MERGED_TITLE: &str = "Total Debt Accumulation Over Time";
const BY_CARD_TITLE: &str = "Debt Accumulation Over Time by Card";
const SINGLE_CARD_TITLE: &str = "Debt Accumulation Over Time";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub series: Vec<LabeledSeries>,
}

impl ChartData {
    /// # Panics
    /// If any series length differs from `grid.len()`.
    pub fn new(grid: &TimeGrid, mode: AggregateMode, series: Vec<LabeledSeries>) -> Self {
        for s in &series {
            assert_eq!(
                s.values.len(),
                grid.len(),
                "series '{}' does not match the time grid",
                s.label
            );
        }
        let title = match mode {
            AggregateMode::Merged => MERGED_TITLE,
            AggregateMode::Individual if series.len() == 1 => SINGLE_CARD_TITLE,
            AggregateMode::Individual => BY_CARD_TITLE,
        };
        Self {
            title: title.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            x: grid.years_axis(),
            series,
        }
    }

    /// Final balance of each series
    pub fn final_balances(&self) -> Vec<(&str, f64)> {
        self.series
            .iter()
            .filter_map(|s| s.last().map(|v| (s.label.as_str(), v)))
            .collect()
    }

    /// Every series must hold exactly one value per x-axis point
    pub fn check_lengths(&self) -> Result<(), ProjectionError> {
        match self.series.iter().find(|s| s.values.len() != self.x.len()) {
            Some(s) => Err(ProjectionError::SeriesLength {
                label: s.label.clone(),
                expected: self.x.len(),
                actual: s.values.len(),
            }),
            None => Ok(()),
        }
    }

    /// Write one row per grid point: years, then one amount column per series
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ProjectionError> {
        self.check_lengths()?;
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![self.x_label.clone()];
        header.extend(self.series.iter().map(|s| s.label.clone()));
        wtr.write_record(&header)?;

        for (i, years) in self.x.iter().enumerate() {
            let mut row = Vec::with_capacity(self.series.len() + 1);
            row.push(format!("{:.4}", years));
            for s in &self.series {
                row.push(format!("{:.2}", s.values[i]));
            }
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ProjectionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
