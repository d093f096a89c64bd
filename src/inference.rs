//! Value-kind inference for columns that arrive as raw strings.
//!
//! Delimited text carries no types, so every cell is sampled here before the
//! column is materialised. A column takes a kind only when *every* non-missing
//! cell agrees with it; one stray token demotes the whole column to text.
//! Sources that already carry types (Excel cells, JSON scalars) skip the
//! string pass and go straight to [`settle_kind`].

use crate::{
    data::{DayOrder, Value, parse_temporal_in, parse_temporal_value_in},
    dataset::{Column, ValueKind},
};

/// Tokens that mean "no value" in delimited exports. Matching is exact, so a
/// whitespace-only cell is a present text value.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS.contains(&value)
}

#[derive(Debug, Default, Clone)]
struct KindCandidate {
    non_empty: usize,
    integer_matches: usize,
    float_matches: usize,
    boolean_matches: usize,
    month_first_matches: usize,
    day_first_matches: usize,
}

impl KindCandidate {
    fn update(&mut self, value: &str) {
        let trimmed = value.trim();
        self.non_empty += 1;

        if trimmed.parse::<i64>().is_ok() {
            self.integer_matches += 1;
            self.float_matches += 1;
            return;
        }
        if parse_finite_float(trimmed).is_some() {
            self.float_matches += 1;
            return;
        }
        if parse_boolean(trimmed).is_some() {
            self.boolean_matches += 1;
            return;
        }
        if parse_temporal_in(trimmed, DayOrder::MonthFirst).is_some() {
            self.month_first_matches += 1;
        }
        if parse_temporal_in(trimmed, DayOrder::DayFirst).is_some() {
            self.day_first_matches += 1;
        }
    }

    fn unanimous(&self, count: usize) -> bool {
        count > 0 && count == self.non_empty
    }

    /// The one day order that reads every value, month-first preferred.
    fn day_order(&self) -> Option<DayOrder> {
        if self.unanimous(self.month_first_matches) {
            Some(DayOrder::MonthFirst)
        } else if self.unanimous(self.day_first_matches) {
            Some(DayOrder::DayFirst)
        } else {
            None
        }
    }

    fn decide(&self) -> ValueKind {
        if self.non_empty == 0 {
            ValueKind::Empty
        } else if self.unanimous(self.integer_matches) {
            ValueKind::Integer
        } else if self.unanimous(self.float_matches) {
            ValueKind::Float
        } else if self.unanimous(self.boolean_matches) {
            ValueKind::Boolean
        } else if self.day_order().is_some() {
            ValueKind::Temporal
        } else {
            ValueKind::Text
        }
    }
}

fn parse_finite_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

fn parse_boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Infers the kind of a column of raw string cells and converts the cells.
/// `None` cells and missing tokens both become missing values.
pub fn infer_column(name: String, raw: Vec<Option<String>>) -> Column {
    let cells: Vec<Option<String>> = raw
        .into_iter()
        .map(|cell| cell.filter(|value| !is_missing_token(value)))
        .collect();

    let mut candidate = KindCandidate::default();
    for value in cells.iter().flatten() {
        candidate.update(value);
    }
    let kind = candidate.decide();
    let order = candidate.day_order().unwrap_or(DayOrder::MonthFirst);

    let values = cells
        .into_iter()
        .map(|cell| cell.and_then(|value| convert(&value, kind, order)))
        .collect();
    Column::new(name, kind, values)
}

fn convert(raw: &str, kind: ValueKind, order: DayOrder) -> Option<Value> {
    let trimmed = raw.trim();
    match kind {
        ValueKind::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
        ValueKind::Float => parse_finite_float(trimmed).map(Value::Float),
        ValueKind::Boolean => parse_boolean(trimmed).map(Value::Boolean),
        ValueKind::Temporal => parse_temporal_value_in(trimmed, order),
        ValueKind::Text | ValueKind::Mixed => Some(Value::Text(raw.to_string())),
        ValueKind::Empty => None,
    }
}

/// Settles the kind of a column whose cells were typed by the source.
pub fn settle_kind(values: &[Option<Value>]) -> ValueKind {
    let mut present = values.iter().flatten().peekable();
    if present.peek().is_none() {
        return ValueKind::Empty;
    }

    let (mut integers, mut floats, mut booleans, mut temporals, mut texts, mut total) =
        (0usize, 0usize, 0usize, 0usize, 0usize, 0usize);
    for value in present {
        total += 1;
        match value {
            Value::Integer(_) => integers += 1,
            Value::Float(_) => floats += 1,
            Value::Boolean(_) => booleans += 1,
            Value::Date(_) | Value::DateTime(_) => temporals += 1,
            Value::Text(_) => texts += 1,
        }
    }

    if integers == total {
        ValueKind::Integer
    } else if integers + floats == total {
        ValueKind::Float
    } else if booleans == total {
        ValueKind::Boolean
    } else if temporals == total {
        ValueKind::Temporal
    } else if texts == total {
        ValueKind::Text
    } else {
        ValueKind::Mixed
    }
}

/// Converts an all-text column to datetimes when every value parses as one
/// under a single day order.
pub fn promote_temporal_text(values: &[Option<Value>]) -> Option<Vec<Option<Value>>> {
    DayOrder::ALL
        .into_iter()
        .find_map(|order| promote_in(values, order))
}

fn promote_in(values: &[Option<Value>], order: DayOrder) -> Option<Vec<Option<Value>>> {
    let mut promoted = Vec::with_capacity(values.len());
    let mut any = false;
    for value in values {
        match value {
            None => promoted.push(None),
            Some(Value::Text(text)) => {
                let parsed = parse_temporal_value_in(text.trim(), order)?;
                promoted.push(Some(parsed));
                any = true;
            }
            Some(_) => return None,
        }
    }
    any.then_some(promoted)
}
