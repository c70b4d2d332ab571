//! Error types for the SDK.

use thiserror::Error;

use crate::identifiers::IdentifierParseError;
use crate::parsers::ArgumentParseError;
use crate::render::RenderError;
use crate::validation::{ValidationError, ValidationErrors};

/// An error reported by the connection while executing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    code: Option<String>,
    message: String,
}

impl BackendError {
    /// Creates a backend error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Attaches the vendor error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the vendor error code, if the driver reported one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code().map(|code| code.into_owned()));
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// SDK errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The options were rejected before any SQL was built.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The options could not be rendered to SQL.
    #[error("failed to build SQL: {0}")]
    Render(#[from] RenderError),

    /// The object, or one of its parents, does not exist or is not visible.
    #[error("object does not exist or not authorized: {0}")]
    ObjectNotExistOrAuthorized(BackendError),

    /// The object, or one of its parents, does not exist or the operation is not allowed.
    #[error("does not exist or operation cannot be performed: {0}")]
    DoesNotExistOrOperationCannotBePerformed(BackendError),

    /// The programmatic access token does not exist.
    #[error("programmatic access token not found: {0}")]
    PatNotFound(BackendError),

    /// Any other error reported by the backend.
    #[error("backend error: {0}")]
    Backend(BackendError),

    /// No object matched the request.
    #[error("object does not exist")]
    ObjectNotFound,

    /// More than one row was returned where exactly one was expected.
    #[error("expected exactly one row, got {0}")]
    MultipleRows(usize),

    /// An expected column is absent from the result set.
    #[error("column {0} is missing from the result set")]
    MissingColumn(String),

    /// A column value could not be converted.
    #[error("failed to convert column {column}: {message}")]
    Conversion {
        /// The column name.
        column: String,
        /// What went wrong.
        message: String,
    },

    /// An identifier string could not be parsed.
    #[error(transparent)]
    IdentifierParse(#[from] IdentifierParseError),

    /// An argument signature could not be parsed.
    #[error(transparent)]
    ArgumentParse(#[from] ArgumentParseError),

    /// A parameter value could not be coerced to the parameter's type.
    #[error("invalid value {value:?} for parameter {parameter}: {message}")]
    InvalidParameterValue {
        /// The parameter name.
        parameter: String,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        message: String,
    },

    /// The parameter cannot be set or unset at the requested scope.
    #[error("parameter {parameter} is not supported at {scope} scope")]
    UnsupportedParameter {
        /// The parameter name.
        parameter: String,
        /// The scope it was requested at.
        scope: &'static str,
    },

    /// Several errors occurred.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"))]
    Joined(Vec<Error>),
}

impl Error {
    /// Classifies a backend error by its message.
    pub(crate) fn from_backend(err: BackendError) -> Self {
        let message = err.message().to_lowercase();
        if message.contains("programmatic access token")
            && (message.contains("not found") || message.contains("does not exist"))
        {
            Self::PatNotFound(err)
        } else if message.contains("does not exist or not authorized") {
            Self::ObjectNotExistOrAuthorized(err)
        } else if message.contains("does not exist or operation cannot be performed") {
            Self::DoesNotExistOrOperationCannotBePerformed(err)
        } else {
            Self::Backend(err)
        }
    }

    /// Joins errors, flattening a single error to itself.
    #[must_use]
    pub fn join(mut errors: Vec<Self>) -> Self {
        if errors.len() == 1 {
            if let Some(err) = errors.pop() {
                return err;
            }
        }
        Self::Joined(errors)
    }

    fn any(&self, predicate: &dyn Fn(&Self) -> bool) -> bool {
        match self {
            Self::Joined(errors) => errors.iter().any(|e| e.any(predicate)),
            other => predicate(other),
        }
    }

    /// Returns whether this is, or contains, the canonical not-found error.
    #[must_use]
    pub fn is_object_not_found(&self) -> bool {
        self.any(&|e| matches!(e, Self::ObjectNotFound))
    }

    /// Returns whether this is the ambiguous "does not exist or not authorized" error.
    #[must_use]
    pub fn is_object_not_exist_or_authorized(&self) -> bool {
        self.any(&|e| matches!(e, Self::ObjectNotExistOrAuthorized(_)))
    }

    /// Returns whether this is the "does not exist or operation cannot be performed" error.
    #[must_use]
    pub fn is_operation_not_permitted(&self) -> bool {
        self.any(&|e| matches!(e, Self::DoesNotExistOrOperationCannotBePerformed(_)))
    }

    /// Returns whether this is the programmatic access token not found error.
    #[must_use]
    pub fn is_pat_not_found(&self) -> bool {
        self.any(&|e| matches!(e, Self::PatNotFound(_)))
    }

    /// Returns whether validation rejected missing options.
    #[must_use]
    pub fn is_nil_options(&self) -> bool {
        self.any(&|e| {
            matches!(e, Self::Validation(v) if v.contains(|v| matches!(v, ValidationError::NilOptions)))
        })
    }

    /// Returns whether validation rejected an identifier.
    #[must_use]
    pub fn is_invalid_identifier(&self) -> bool {
        self.any(&|e| match e {
            Self::Validation(v) => {
                v.contains(|v| matches!(v, ValidationError::InvalidIdentifier { .. }))
            }
            Self::Render(RenderError::InvalidIdentifier(_)) => true,
            _ => false,
        })
    }

    /// Returns whether the backend signalled that a parent in the hierarchy
    /// may be missing or inaccessible.
    #[must_use]
    pub fn is_ambiguous_hierarchy(&self) -> bool {
        self.is_object_not_exist_or_authorized() || self.is_operation_not_permitted()
    }
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_classification() {
        let err = Error::from_backend(BackendError::new(
            "SQL compilation error:\nDatabase 'D' does not exist or not authorized.",
        ));
        assert!(err.is_object_not_exist_or_authorized());
        assert!(err.is_ambiguous_hierarchy());

        let err = Error::from_backend(BackendError::new(
            "Schema 'D.S' does not exist or operation cannot be performed.",
        ));
        assert!(err.is_operation_not_permitted());
        assert!(err.is_ambiguous_hierarchy());

        let err = Error::from_backend(BackendError::new(
            "Programmatic access token TOKEN not found.",
        ));
        assert!(err.is_pat_not_found());
        assert!(!err.is_ambiguous_hierarchy());

        let err = Error::from_backend(BackendError::new("syntax error line 1"));
        assert!(matches!(err, Error::Backend(_)));
    }

    #[test]
    fn test_joined_error_predicates() {
        let err = Error::join(vec![
            Error::from_backend(BackendError::new("does not exist or not authorized")),
            Error::ObjectNotFound,
        ]);
        assert!(err.is_object_not_found());
        assert!(err.is_object_not_exist_or_authorized());
        assert_eq!(
            err.to_string(),
            "object does not exist or not authorized: does not exist or not authorized\nobject does not exist"
        );
    }

    #[test]
    fn test_join_single_error_is_flattened() {
        assert!(matches!(
            Error::join(vec![Error::ObjectNotFound]),
            Error::ObjectNotFound
        ));
    }

    #[test]
    fn test_backend_error_code() {
        let err = BackendError::new("boom").with_code("002003");
        assert_eq!(err.code(), Some("002003"));
        assert_eq!(err.message(), "boom");
    }
}
