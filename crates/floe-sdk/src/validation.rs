//! Option validation.
//!
//! Every option type implements [`Validate`]. Implementations build a
//! [`Violations`] collector named after the option type, feed it field
//! predicates and return [`Violations::finish`]. All violations are reported
//! together; the execution façade never renders options that fail here.

use std::fmt;

use thiserror::Error;

use crate::identifiers::ObjectIdentifier;
use crate::render::AllowEmpty;

/// A single precondition violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No options were supplied.
    #[error("options cannot be nil")]
    NilOptions,

    /// An identifier field has an empty or overlong component.
    #[error("invalid object identifier {option}.{field}")]
    InvalidIdentifier {
        /// The option type.
        option: &'static str,
        /// The offending field.
        field: &'static str,
    },

    /// Not exactly one field of the group is set.
    #[error("exactly one of {}{{{}}} must be set", .option, .fields.join(", "))]
    ExactlyOneOf {
        /// The option type.
        option: &'static str,
        /// The field group.
        fields: Vec<&'static str>,
    },

    /// No field of the group is set.
    #[error("at least one of {}{{{}}} must be set", .option, .fields.join(", "))]
    AtLeastOneOf {
        /// The option type.
        option: &'static str,
        /// The field group.
        fields: Vec<&'static str>,
    },

    /// Mutually exclusive fields are set together.
    #[error(
        "fields {}{{{}}} are incompatible and cannot be set at the same time",
        .option,
        .fields.join(", ")
    )]
    Conflicting {
        /// The option type.
        option: &'static str,
        /// The conflicting fields.
        fields: Vec<&'static str>,
    },

    /// An integer is outside an inclusive range.
    #[error("{option}.{field} must be between {min} and {max}, got {value}")]
    IntOutOfRange {
        /// The option type.
        option: &'static str,
        /// The offending field.
        field: &'static str,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
        /// The rejected value.
        value: i64,
    },

    /// An integer is not strictly greater than a bound.
    #[error("{option}.{field} must be greater than {bound}, got {value}")]
    IntNotGreaterThan {
        /// The option type.
        option: &'static str,
        /// The offending field.
        field: &'static str,
        /// The exclusive bound.
        bound: i64,
        /// The rejected value.
        value: i64,
    },

    /// An integer is below an inclusive bound.
    #[error("{option}.{field} must be greater than or equal to {bound}, got {value}")]
    IntNotGreaterOrEqual {
        /// The option type.
        option: &'static str,
        /// The offending field.
        field: &'static str,
        /// The inclusive bound.
        bound: i64,
        /// The rejected value.
        value: i64,
    },

    /// A required list is empty.
    #[error("{option}.{field} must not be empty")]
    EmptyList {
        /// The option type.
        option: &'static str,
        /// The offending field.
        field: &'static str,
    },

    /// A type-specific rule failed.
    #[error("{0}")]
    Constraint(String),
}

/// All violations found in one option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a list of violations.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// The individual violations.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns whether any violation matches `predicate`.
    pub fn contains(&self, predicate: impl Fn(&ValidationError) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

/// Checks option values before they are rendered.
pub trait Validate {
    /// Returns every violation found, or `Ok(())`.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Some(value) => value.validate(),
            None => Err(ValidationError::NilOptions.into()),
        }
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> Result<(), ValidationErrors> {
        (**self).validate()
    }
}

/// Presence test used by the field-group predicates.
pub trait Present {
    /// Whether the field counts as set.
    fn is_present(&self) -> bool;
}

impl Present for bool {
    fn is_present(&self) -> bool {
        *self
    }
}

impl<T> Present for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Present for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Present for AllowEmpty {
    fn is_present(&self) -> bool {
        true
    }
}

impl<T> Present for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Collects the violations of one option value.
#[derive(Debug)]
#[must_use]
pub struct Violations {
    option: &'static str,
    errors: Vec<ValidationError>,
}

impl Violations {
    /// Starts collecting for the option type `option`.
    pub const fn new(option: &'static str) -> Self {
        Self {
            option,
            errors: Vec::new(),
        }
    }

    fn push(mut self, error: ValidationError) -> Self {
        self.errors.push(error);
        self
    }

    /// Requires a valid identifier.
    pub fn identifier<T: ObjectIdentifier + ?Sized>(self, field: &'static str, id: &T) -> Self {
        if id.is_valid() {
            return self;
        }
        let option = self.option;
        self.push(ValidationError::InvalidIdentifier { option, field })
    }

    /// Requires a valid identifier when one is given.
    pub fn identifier_if_set<T: ObjectIdentifier>(self, field: &'static str, id: Option<&T>) -> Self {
        match id {
            Some(id) => self.identifier(field, id),
            None => self,
        }
    }

    fn count(fields: &[(&'static str, &dyn Present)]) -> (usize, Vec<&'static str>) {
        let set = fields.iter().filter(|(_, value)| value.is_present()).count();
        (set, fields.iter().map(|(name, _)| *name).collect())
    }

    /// Requires exactly one field of the group to be set.
    pub fn exactly_one_of(self, fields: &[(&'static str, &dyn Present)]) -> Self {
        let (set, names) = Self::count(fields);
        if set == 1 {
            return self;
        }
        let option = self.option;
        self.push(ValidationError::ExactlyOneOf {
            option,
            fields: names,
        })
    }

    /// Requires at least one field of the group to be set.
    pub fn at_least_one_of(self, fields: &[(&'static str, &dyn Present)]) -> Self {
        let (set, names) = Self::count(fields);
        if set > 0 {
            return self;
        }
        let option = self.option;
        self.push(ValidationError::AtLeastOneOf {
            option,
            fields: names,
        })
    }

    /// Rejects setting more than one field of the group.
    pub fn conflicting(self, fields: &[(&'static str, &dyn Present)]) -> Self {
        let (set, names) = Self::count(fields);
        if set < 2 {
            return self;
        }
        let option = self.option;
        self.push(ValidationError::Conflicting {
            option,
            fields: names,
        })
    }

    /// Requires `min <= value <= max` when a value is given.
    pub fn int_in_range(self, field: &'static str, value: Option<i64>, min: i64, max: i64) -> Self {
        match value {
            Some(value) if value < min || value > max => {
                let option = self.option;
                self.push(ValidationError::IntOutOfRange {
                    option,
                    field,
                    min,
                    max,
                    value,
                })
            }
            _ => self,
        }
    }

    /// Requires `value > bound` when a value is given.
    pub fn int_greater_than(self, field: &'static str, value: Option<i64>, bound: i64) -> Self {
        match value {
            Some(value) if value <= bound => {
                let option = self.option;
                self.push(ValidationError::IntNotGreaterThan {
                    option,
                    field,
                    bound,
                    value,
                })
            }
            _ => self,
        }
    }

    /// Requires `value >= bound` when a value is given.
    pub fn int_greater_or_equal(self, field: &'static str, value: Option<i64>, bound: i64) -> Self {
        match value {
            Some(value) if value < bound => {
                let option = self.option;
                self.push(ValidationError::IntNotGreaterOrEqual {
                    option,
                    field,
                    bound,
                    value,
                })
            }
            _ => self,
        }
    }

    /// Requires a non-empty list.
    pub fn non_empty<T>(self, field: &'static str, list: &[T]) -> Self {
        if !list.is_empty() {
            return self;
        }
        let option = self.option;
        self.push(ValidationError::EmptyList { option, field })
    }

    /// Adds the violations of a nested option value, if it is set.
    pub fn nested<T: Validate>(mut self, value: Option<&T>) -> Self {
        if let Some(Err(errors)) = value.map(Validate::validate) {
            self.errors.extend(errors.0);
        }
        self
    }

    /// Adds a type-specific violation unless `ok` holds.
    pub fn check(self, ok: bool, message: impl FnOnce() -> String) -> Self {
        if ok {
            self
        } else {
            self.push(ValidationError::Constraint(message()))
        }
    }

    /// Returns the collected violations.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}
