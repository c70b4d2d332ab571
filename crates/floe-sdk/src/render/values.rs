//! Directive value impls for primitives and identifiers.

use std::borrow::Cow;

use super::{IdentifierValue, KeywordValue, ListItem, ParameterValue, RenderError};
use crate::identifiers::{
    AccountIdentifier, AccountObjectIdentifier, AnyIdentifier, DatabaseObjectIdentifier,
    ObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments,
};

/// A string parameter that is rendered even when empty.
///
/// Plain `String` parameters are skipped when empty; wrap the value when an
/// explicit `''` must reach the server, e.g. to clear a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AllowEmpty(pub String);

impl AllowEmpty {
    /// Wraps a string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The wrapped string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl KeywordValue for bool {
    fn keyword_set(&self) -> bool {
        *self
    }
}

impl<T: KeywordValue> KeywordValue for Option<T> {
    fn keyword_set(&self) -> bool {
        self.as_ref().is_some_and(KeywordValue::keyword_set)
    }

    fn keyword_token(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(KeywordValue::keyword_token)
    }
}

impl ParameterValue for String {
    fn parameter_set(&self) -> bool {
        !self.is_empty()
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        Ok(self.clone())
    }
}

impl ParameterValue for AllowEmpty {
    fn parameter_set(&self) -> bool {
        true
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        Ok(self.0.clone())
    }
}

impl ParameterValue for bool {
    fn parameter_set(&self) -> bool {
        true
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        Ok(self.to_string())
    }
}

macro_rules! integer_parameter {
    ($($ty:ty),+) => {
        $(
            impl ParameterValue for $ty {
                fn parameter_set(&self) -> bool {
                    true
                }

                fn parameter_value(&self) -> Result<String, RenderError> {
                    Ok(self.to_string())
                }
            }
        )+
    };
}

integer_parameter!(i32, i64, u32, u64, usize);

impl ParameterValue for f64 {
    fn parameter_set(&self) -> bool {
        true
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        if self.is_finite() {
            Ok(self.to_string())
        } else {
            Err(RenderError::InvalidValue(self.to_string()))
        }
    }
}

impl<T: ParameterValue> ParameterValue for Option<T> {
    fn parameter_set(&self) -> bool {
        self.is_some()
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        match self {
            Some(value) => value.parameter_value(),
            None => Ok(String::new()),
        }
    }
}

impl<T: IdentifierValue> IdentifierValue for Option<T> {
    fn identifier_set(&self) -> bool {
        self.as_ref().is_some_and(IdentifierValue::identifier_set)
    }

    fn qualified_name(&self) -> Result<String, RenderError> {
        match self {
            Some(value) => value.qualified_name(),
            None => Ok(String::new()),
        }
    }
}

impl ListItem for String {
    fn list_item(&self) -> Result<String, RenderError> {
        Ok(self.clone())
    }
}

fn checked_name<T: ObjectIdentifier>(id: &T) -> Result<String, RenderError> {
    let name = id.fully_qualified_name();
    if id.is_valid() {
        Ok(name)
    } else {
        Err(RenderError::InvalidIdentifier(name))
    }
}

macro_rules! identifier_values {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IdentifierValue for $ty {
                fn qualified_name(&self) -> Result<String, RenderError> {
                    checked_name(self)
                }
            }

            impl ParameterValue for $ty {
                fn parameter_set(&self) -> bool {
                    true
                }

                fn parameter_value(&self) -> Result<String, RenderError> {
                    checked_name(self)
                }
            }

            impl ListItem for $ty {
                fn list_item(&self) -> Result<String, RenderError> {
                    checked_name(self)
                }
            }
        )+
    };
}

identifier_values!(
    AccountObjectIdentifier,
    DatabaseObjectIdentifier,
    SchemaObjectIdentifier,
    SchemaObjectIdentifierWithArguments,
    AccountIdentifier,
    AnyIdentifier,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_presence() {
        assert!(!String::new().parameter_set());
        assert!("x".to_string().parameter_set());
        assert!(AllowEmpty::default().parameter_set());
        assert!(Some(String::new()).parameter_set());
        assert!(!None::<String>.parameter_set());
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(true.parameter_value().unwrap(), "true");
        assert_eq!(42_i64.parameter_value().unwrap(), "42");
        assert_eq!(1.5_f64.parameter_value().unwrap(), "1.5");
        assert!(f64::NAN.parameter_value().is_err());
    }

    #[test]
    fn test_identifier_values() {
        let id = DatabaseObjectIdentifier::new("db", "sch");
        assert_eq!(id.qualified_name().unwrap(), r#""db"."sch""#);
        assert_eq!(id.list_item().unwrap(), r#""db"."sch""#);
        assert!(matches!(
            DatabaseObjectIdentifier::new("db", "").qualified_name(),
            Err(RenderError::InvalidIdentifier(_))
        ));
        assert!(!None::<AccountObjectIdentifier>.identifier_set());
    }
}
