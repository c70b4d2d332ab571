//! Result rows and conversion into domain records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// A timestamp.
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Returns whether the value is `NULL`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Timestamp(t) => Some(t.to_rfc3339()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One result row; columns keep their result-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    /// Appends a column in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Column names, in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the value of `column`, if the result set has it.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    fn require(&self, column: &str) -> Result<&Value> {
        self.get(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    fn conversion(column: &str, message: impl Into<String>) -> Error {
        Error::Conversion {
            column: column.to_string(),
            message: message.into(),
        }
    }

    /// A required, non-null text column.
    pub fn string(&self, column: &str) -> Result<String> {
        self.opt_string(column)?
            .ok_or_else(|| Self::conversion(column, "unexpected NULL"))
    }

    /// A nullable text column; numbers and booleans are stringified.
    pub fn opt_string(&self, column: &str) -> Result<Option<String>> {
        Ok(self.require(column)?.as_text())
    }

    /// A text column that may be absent from the result set altogether.
    #[must_use]
    pub fn maybe_string(&self, column: &str) -> Option<String> {
        self.get(column).and_then(Value::as_text)
    }

    /// A nullable boolean column; accepts `true`/`false`, `Y`/`N` and integers.
    pub fn opt_bool(&self, column: &str) -> Result<Option<bool>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::Int(i) => Ok(Some(*i != 0)),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "y" | "yes" | "1" => Ok(Some(true)),
                "false" | "n" | "no" | "0" => Ok(Some(false)),
                "" => Ok(None),
                other => Err(Self::conversion(column, format!("not a boolean: {other:?}"))),
            },
            other => Err(Self::conversion(column, format!("not a boolean: {other:?}"))),
        }
    }

    /// A required boolean column.
    pub fn bool(&self, column: &str) -> Result<bool> {
        self.opt_bool(column)?
            .ok_or_else(|| Self::conversion(column, "unexpected NULL"))
    }

    /// A nullable integer column.
    pub fn opt_i64(&self, column: &str) -> Result<Option<i64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(*i)),
            Value::Text(s) if s.trim().is_empty() => Ok(None),
            Value::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| Self::conversion(column, format!("{e}"))),
            other => Err(Self::conversion(column, format!("not an integer: {other:?}"))),
        }
    }

    /// A required integer column.
    pub fn i64(&self, column: &str) -> Result<i64> {
        self.opt_i64(column)?
            .ok_or_else(|| Self::conversion(column, "unexpected NULL"))
    }

    /// A nullable floating point column.
    pub fn opt_f64(&self, column: &str) -> Result<Option<f64>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Float(f) => Ok(Some(*f)),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(i) => Ok(Some(*i as f64)),
            Value::Text(s) if s.trim().is_empty() => Ok(None),
            Value::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| Self::conversion(column, format!("{e}"))),
            other => Err(Self::conversion(column, format!("not a number: {other:?}"))),
        }
    }

    /// A nullable timestamp column; text is parsed as RFC 3339 or
    /// `YYYY-MM-DD HH:MM:SS[.f] ±zzzz`.
    pub fn opt_time(&self, column: &str) -> Result<Option<DateTime<Utc>>> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Timestamp(t) => Ok(Some(*t)),
            Value::Text(s) if s.trim().is_empty() => Ok(None),
            Value::Text(s) => parse_timestamp(s)
                .map(Some)
                .ok_or_else(|| Self::conversion(column, format!("not a timestamp: {s:?}"))),
            other => Err(Self::conversion(column, format!("not a timestamp: {other:?}"))),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc())
}

/// Conversion of a result row into a domain record.
pub trait FromRow: Sized {
    /// Converts one row.
    fn from_row(row: &Row) -> Result<Self>;
}

/// Parses an optional enum column, logging and dropping unknown values.
pub(crate) fn parse_enum_soft<T: FromStr>(column: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(column, value = raw, "unknown enum value, leaving field unset");
            None
        }
    }
}

/// Parses an optional identifier column, logging and dropping bad values.
pub(crate) fn parse_identifier_soft<T: FromStr>(column: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(column, value = raw, "unparsable identifier, leaving field unset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;
    use crate::identifiers::AccountObjectIdentifier;
    use crate::resources::compute_pools::ComputePoolState;

    fn row() -> Row {
        Row::new()
            .with("name", "cp")
            .with("min_nodes", 1_i64)
            .with("auto_resume", "true")
            .with("is_default", "N")
            .with("comment", Value::Null)
            .with("created_on", "2024-05-01 10:20:30.123 -0700")
            .with("budget", "12.5")
    }

    #[test]
    fn test_getters() {
        let row = row();
        assert_eq!(row.string("name").unwrap(), "cp");
        assert_eq!(row.i64("min_nodes").unwrap(), 1);
        assert_eq!(row.opt_string("min_nodes").unwrap().as_deref(), Some("1"));
        assert_eq!(row.opt_bool("auto_resume").unwrap(), Some(true));
        assert_eq!(row.opt_bool("is_default").unwrap(), Some(false));
        assert_eq!(row.opt_string("comment").unwrap(), None);
        assert_eq!(row.opt_f64("budget").unwrap(), Some(12.5));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let err = row().opt_string("owner").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "owner"));
    }

    #[test]
    fn test_null_required_column() {
        assert!(matches!(
            row().string("comment"),
            Err(Error::Conversion { .. })
        ));
    }

    #[test]
    fn test_timestamps() {
        let t = row().opt_time("created_on").unwrap().unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 5, 1));
        assert_eq!(t.hour(), 17);
        let t = Row::new()
            .with("t", "2024-05-01T10:20:30Z")
            .opt_time("t")
            .unwrap()
            .unwrap();
        assert_eq!(t.minute(), 20);
    }

    #[test]
    fn test_soft_parsers() {
        assert_eq!(
            parse_enum_soft::<ComputePoolState>("state", Some("active")),
            Some(ComputePoolState::Active)
        );
        assert_eq!(
            parse_enum_soft::<ComputePoolState>("state", Some("SOMETHING_NEW")),
            None
        );
        assert_eq!(
            parse_identifier_soft::<AccountObjectIdentifier>("owner", Some(r#""a"b"#)),
            None
        );
        assert_eq!(
            parse_identifier_soft::<AccountObjectIdentifier>("owner", Some("APP")),
            Some(AccountObjectIdentifier::new("APP"))
        );
    }
}
