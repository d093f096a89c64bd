use std::cmp::Ordering;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::dataset::Table;

/// Descriptive statistics for one numeric column. Undefined statistics
/// (empty column, `std` of a single value) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    fn describe(column: &str, values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                column: column.to_string(),
                count: 0,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let variance =
                values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        Self {
            column: column.to_string(),
            count: n,
            mean,
            std,
            min: sorted[0],
            q25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q75: percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }
}

/// Pearson correlations between numeric columns; rows and columns follow
/// `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(f64::NAN)
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub columns: Vec<ColumnStats>,
    pub correlation: CorrelationMatrix,
}

impl NumericSummary {
    pub fn stats_for(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|stats| stats.column == column)
    }
}

/// Describes each numeric column and correlates every pair of them.
pub fn summarize_numeric(table: &Table, numeric_cols: &[String]) -> Result<NumericSummary> {
    let mut series: Vec<Vec<Option<f64>>> = Vec::with_capacity(numeric_cols.len());
    for name in numeric_cols {
        let column = table.column(name)?;
        if !column.kind().is_numeric() {
            bail!(
                "Column '{}' is {} and cannot be summarised numerically",
                name,
                column.kind().as_str()
            );
        }
        series.push(column.numeric_values());
    }

    let columns = numeric_cols
        .iter()
        .zip(&series)
        .map(|(name, values)| {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            ColumnStats::describe(name, &present)
        })
        .collect();

    Ok(NumericSummary {
        columns,
        correlation: correlation_matrix(numeric_cols, &series),
    })
}

fn correlation_matrix(names: &[String], series: &[Vec<Option<f64>>]) -> CorrelationMatrix {
    let n = series.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = if pearson(&series[i], &series[i]).is_nan() {
            f64::NAN
        } else {
            1.0
        };
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        columns: names.to_vec(),
        values,
    }
}

/// Pearson correlation over pairwise-complete observations. Fewer than two
/// pairs or zero variance on either side yields `NaN`.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    match lower.cmp(&upper) {
        Ordering::Equal => sorted[lower],
        _ => sorted[lower] * (1.0 - frac) + sorted[upper] * frac,
    }
}
