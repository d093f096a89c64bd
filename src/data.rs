use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// A single typed cell. Missing cells are represented as `None` by the
/// column holding them, so every variant here is a present value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Boolean(b) => b.to_string(),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Calendar date of the value, discarding any time of day. Text is
    /// coerced leniently; anything unparseable yields `None`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Text(s) => parse_temporal(s.trim()).map(|dt| dt.date()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            other => serializer.serialize_str(&other.as_display()),
        }
    }
}

pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// How a numeric `a/b/yyyy` date is read. Month-first is the default; a
/// column switches to day-first only when every value requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOrder {
    MonthFirst,
    DayFirst,
}

impl DayOrder {
    /// Orders in the sequence they are tried.
    pub const ALL: [DayOrder; 2] = [DayOrder::MonthFirst, DayOrder::DayFirst];

    fn date_formats(self) -> &'static [&'static str] {
        match self {
            DayOrder::MonthFirst => &["%m/%d/%Y", "%m-%d-%Y"],
            DayOrder::DayFirst => &["%d/%m/%Y", "%d-%m-%Y"],
        }
    }

    fn datetime_formats(self) -> &'static [&'static str] {
        match self {
            DayOrder::MonthFirst => &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"],
            DayOrder::DayFirst => &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"],
        }
    }
}

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a date using ISO layouts and the numeric layouts of `order` only.
pub fn parse_date_in(value: &str, order: DayOrder) -> Option<NaiveDate> {
    ISO_DATE_FORMATS
        .iter()
        .chain(order.date_formats())
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

pub fn parse_datetime_in(value: &str, order: DayOrder) -> Option<NaiveDateTime> {
    ISO_DATETIME_FORMATS
        .iter()
        .chain(order.datetime_formats())
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parses a date or datetime with a fixed day order, promoting bare dates
/// to midnight.
pub fn parse_temporal_in(value: &str, order: DayOrder) -> Option<NaiveDateTime> {
    match parse_date_in(value, order) {
        Some(date) => date.and_hms_opt(0, 0, 0),
        None => parse_datetime_in(value, order),
    }
}

/// Like [`parse_temporal_in`] but keeps bare dates as [`Value::Date`].
pub fn parse_temporal_value_in(value: &str, order: DayOrder) -> Option<Value> {
    match parse_date_in(value, order) {
        Some(date) => Some(Value::Date(date)),
        None => parse_datetime_in(value, order).map(Value::DateTime),
    }
}

/// Parses a lone date or datetime, reading month-first before day-first.
pub fn parse_temporal(value: &str) -> Option<NaiveDateTime> {
    DayOrder::ALL
        .into_iter()
        .find_map(|order| parse_temporal_in(value, order))
}

pub fn parse_temporal_value(value: &str) -> Option<Value> {
    DayOrder::ALL
        .into_iter()
        .find_map(|order| parse_temporal_value_in(value, order))
}
