//! Parameter value types and string coercion.
//!
//! Enum-valued parameters use open enums: a value the SDK does not know is
//! passed through and left for the backend to reject.

use std::fmt;

use crate::error::{Error, Result};

open_sql_enum! {
    /// Severity threshold for event table logging.
    pub enum LogLevel {
        Trace => "TRACE",
        Debug => "DEBUG",
        Info => "INFO",
        Warn => "WARN",
        Error => "ERROR",
        Fatal => "FATAL",
        Off => "OFF",
    }
}

open_sql_enum! {
    /// Which spans are captured in the event table.
    pub enum TraceLevel {
        Always => "ALWAYS",
        OnEvent => "ON_EVENT",
        Off => "OFF",
    }
}

open_sql_enum! {
    /// Encoding of binary string input.
    pub enum BinaryInputFormat {
        Hex => "HEX",
        Base64 => "BASE64",
        Utf8 => "UTF8",
    }
}

open_sql_enum! {
    /// Encoding of binary output.
    pub enum BinaryOutputFormat {
        Hex => "HEX",
        Base64 => "BASE64",
    }
}

open_sql_enum! {
    /// Output format of geospatial values.
    pub enum GeographyOutputFormat {
        GeoJson => "GeoJSON",
        Wkt => "WKT",
        Wkb => "WKB",
        Ewkt => "EWKT",
        Ewkb => "EWKB",
    }
}

open_sql_enum! {
    /// The timestamp variant `TIMESTAMP` is an alias for.
    pub enum TimestampTypeMapping {
        Ltz => "TIMESTAMP_LTZ",
        Ntz => "TIMESTAMP_NTZ",
        Tz => "TIMESTAMP_TZ",
    }
}

open_sql_enum! {
    /// The timestamp variant used when binding client timestamps.
    pub enum ClientTimestampTypeMapping {
        Ltz => "TIMESTAMP_LTZ",
        Ntz => "TIMESTAMP_NTZ",
    }
}

open_sql_enum! {
    /// Default isolation level of new transactions.
    pub enum TransactionDefaultIsolationLevel {
        ReadCommitted => "READ COMMITTED",
    }
}

open_sql_enum! {
    /// Handling of DDL the backend does not support.
    pub enum UnsupportedDdlAction {
        Ignore => "IGNORE",
        Fail => "FAIL",
    }
}

open_sql_enum! {
    /// Warehouse size, as used by serverless task defaults.
    pub enum WarehouseSize {
        XSmall => "XSMALL",
        Small => "SMALL",
        Medium => "MEDIUM",
        Large => "LARGE",
        XLarge => "XLARGE",
        XXLarge => "XXLARGE",
        XXXLarge => "XXXLARGE",
        X4Large => "X4LARGE",
        X5Large => "X5LARGE",
        X6Large => "X6LARGE",
    }
}

/// The enum type an enum-valued parameter takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    LogLevel,
    TraceLevel,
    BinaryInputFormat,
    BinaryOutputFormat,
    GeographyOutputFormat,
    TimestampTypeMapping,
    ClientTimestampTypeMapping,
    TransactionDefaultIsolationLevel,
    UnsupportedDdlAction,
    WarehouseSize,
}

impl EnumKind {
    /// Wraps `value` in the enum type; unknown values are kept as `Other`.
    #[must_use]
    pub fn wrap(self, value: &str) -> EnumValue {
        match self {
            Self::LogLevel => EnumValue::LogLevel(value.into()),
            Self::TraceLevel => EnumValue::TraceLevel(value.into()),
            Self::BinaryInputFormat => EnumValue::BinaryInputFormat(value.into()),
            Self::BinaryOutputFormat => EnumValue::BinaryOutputFormat(value.into()),
            Self::GeographyOutputFormat => EnumValue::GeographyOutputFormat(value.into()),
            Self::TimestampTypeMapping => EnumValue::TimestampTypeMapping(value.into()),
            Self::ClientTimestampTypeMapping => {
                EnumValue::ClientTimestampTypeMapping(value.into())
            }
            Self::TransactionDefaultIsolationLevel => {
                EnumValue::TransactionDefaultIsolationLevel(value.into())
            }
            Self::UnsupportedDdlAction => EnumValue::UnsupportedDdlAction(value.into()),
            Self::WarehouseSize => EnumValue::WarehouseSize(value.into()),
        }
    }
}

/// A value of one of the parameter enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValue {
    LogLevel(LogLevel),
    TraceLevel(TraceLevel),
    BinaryInputFormat(BinaryInputFormat),
    BinaryOutputFormat(BinaryOutputFormat),
    GeographyOutputFormat(GeographyOutputFormat),
    TimestampTypeMapping(TimestampTypeMapping),
    ClientTimestampTypeMapping(ClientTimestampTypeMapping),
    TransactionDefaultIsolationLevel(TransactionDefaultIsolationLevel),
    UnsupportedDdlAction(UnsupportedDdlAction),
    WarehouseSize(WarehouseSize),
}

impl EnumValue {
    /// The SQL token of the wrapped value.
    #[must_use]
    pub fn as_sql(&self) -> &str {
        match self {
            Self::LogLevel(v) => v.as_sql(),
            Self::TraceLevel(v) => v.as_sql(),
            Self::BinaryInputFormat(v) => v.as_sql(),
            Self::BinaryOutputFormat(v) => v.as_sql(),
            Self::GeographyOutputFormat(v) => v.as_sql(),
            Self::TimestampTypeMapping(v) => v.as_sql(),
            Self::ClientTimestampTypeMapping(v) => v.as_sql(),
            Self::TransactionDefaultIsolationLevel(v) => v.as_sql(),
            Self::UnsupportedDdlAction(v) => v.as_sql(),
            Self::WarehouseSize(v) => v.as_sql(),
        }
    }
}

/// The value type a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Bool,
    Int,
    Text,
    Enum(EnumKind),
}

/// A typed parameter value, ready to render.
///
/// Booleans and integers render bare. Text and enum values always render
/// single-quoted, so multi-word spellings such as `'READ COMMITTED'` and
/// unknown open-enum values stay one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterLiteral {
    Bool(bool),
    Int(i64),
    Text(String),
    Enum(EnumValue),
}

impl fmt::Display for ParameterLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{value}'"),
            Self::Enum(value) => write!(f, "'{}'", value.as_sql()),
        }
    }
}

/// Coerces the string `value` to the type of `parameter`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameterValue`] when a boolean is not `true` or
/// `false` (in any case), or an integer is not a base-10 `i64`.
pub fn coerce(parameter: &str, kind: ParameterKind, value: &str) -> Result<ParameterLiteral> {
    let invalid = |message: String| Error::InvalidParameterValue {
        parameter: parameter.to_string(),
        value: value.to_string(),
        message,
    };
    match kind {
        ParameterKind::Bool => {
            if value.eq_ignore_ascii_case("true") {
                Ok(ParameterLiteral::Bool(true))
            } else if value.eq_ignore_ascii_case("false") {
                Ok(ParameterLiteral::Bool(false))
            } else {
                Err(invalid("expected true or false".to_string()))
            }
        }
        ParameterKind::Int => value
            .parse::<i64>()
            .map(ParameterLiteral::Int)
            .map_err(|err| invalid(err.to_string())),
        ParameterKind::Text => Ok(ParameterLiteral::Text(value.to_string())),
        ParameterKind::Enum(kind) => Ok(ParameterLiteral::Enum(kind.wrap(value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_coercion_is_strict() {
        assert_eq!(
            coerce("AUTOCOMMIT", ParameterKind::Bool, "TRUE").unwrap(),
            ParameterLiteral::Bool(true)
        );
        assert_eq!(
            coerce("AUTOCOMMIT", ParameterKind::Bool, "false").unwrap(),
            ParameterLiteral::Bool(false)
        );
        for rejected in ["1", "yes", "t", "", " true"] {
            let err = coerce("AUTOCOMMIT", ParameterKind::Bool, rejected).unwrap_err();
            assert!(matches!(err, Error::InvalidParameterValue { .. }), "{rejected:?}");
        }
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(
            coerce("LOCK_TIMEOUT", ParameterKind::Int, "-42").unwrap(),
            ParameterLiteral::Int(-42)
        );
        let err = coerce("LOCK_TIMEOUT", ParameterKind::Int, "0x10").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"0x10\" for parameter LOCK_TIMEOUT: invalid digit found in string"
        );
        assert!(coerce("LOCK_TIMEOUT", ParameterKind::Int, "1.5").is_err());
    }

    #[test]
    fn test_enum_coercion_keeps_unknown_values() {
        let known = coerce(
            "LOG_LEVEL",
            ParameterKind::Enum(EnumKind::LogLevel),
            "debug",
        )
        .unwrap();
        assert_eq!(known, ParameterLiteral::Enum(EnumValue::LogLevel(LogLevel::Debug)));
        assert_eq!(known.to_string(), "'DEBUG'");

        let unknown = coerce(
            "LOG_LEVEL",
            ParameterKind::Enum(EnumKind::LogLevel),
            "VERBOSE",
        )
        .unwrap();
        assert_eq!(unknown.to_string(), "'VERBOSE'");
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(ParameterLiteral::Bool(true).to_string(), "true");
        assert_eq!(ParameterLiteral::Int(3600).to_string(), "3600");
        assert_eq!(
            ParameterLiteral::Text("YYYY-MM-DD".to_string()).to_string(),
            "'YYYY-MM-DD'"
        );
        assert_eq!(
            ParameterLiteral::Enum(EnumValue::TransactionDefaultIsolationLevel(
                TransactionDefaultIsolationLevel::ReadCommitted
            ))
            .to_string(),
            "'READ COMMITTED'"
        );
        assert_eq!(
            ParameterLiteral::Enum(EnumValue::GeographyOutputFormat(
                GeographyOutputFormat::GeoJson
            ))
            .to_string(),
            "'GeoJSON'"
        );
    }
}
