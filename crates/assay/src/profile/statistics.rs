//! Descriptive statistics of a single column, chosen by its kind.

use serde::Serialize;

use crate::inference::value_to_datetime;
use crate::schema::{Column, ColumnKind};
use crate::stats::{mean, round_to, sample_std_dev, shannon_entropy};

/// Statistics of one column's non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldStatistics {
    Numeric {
        min: f64,
        max: f64,
        mean: f64,
        /// Absent for a single value.
        std_dev: Option<f64>,
        entropy: f64,
    },
    Temporal {
        min: Option<String>,
        max: Option<String>,
        temporal_spread_days: Option<i64>,
    },
    Categorical {
        unique_values: usize,
        entropy: f64,
    },
}

impl FieldStatistics {
    /// Compute statistics for a column, rounding to `decimals` places.
    /// Returns `None` when the column has no non-missing value.
    pub fn compute(column: &Column, decimals: u32) -> Option<Self> {
        column.non_null().next()?;

        let entropy = || round_to(shannon_entropy(column.value_counts().into_values()), decimals);

        let stats = match column.kind() {
            ColumnKind::Numeric => {
                let values = column.numeric_values();
                let min = values.iter().copied().fold(f64::INFINITY, f64::min);
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                FieldStatistics::Numeric {
                    min: round_to(min, decimals),
                    max: round_to(max, decimals),
                    mean: round_to(mean(&values)?, decimals),
                    std_dev: sample_std_dev(&values).map(|sd| round_to(sd, decimals)),
                    entropy: entropy(),
                }
            }
            ColumnKind::Temporal => {
                let dates: Vec<_> = column.non_null().filter_map(value_to_datetime).collect();
                let min = dates.iter().min();
                let max = dates.iter().max();
                FieldStatistics::Temporal {
                    min: min.map(|d| d.date().to_string()),
                    max: max.map(|d| d.date().to_string()),
                    temporal_spread_days: min.zip(max).map(|(lo, hi)| (*hi - *lo).num_days()),
                }
            }
            ColumnKind::Categorical => FieldStatistics::Categorical {
                unique_values: column.distinct_count(),
                entropy: entropy(),
            },
        };

        Some(stats)
    }
}
