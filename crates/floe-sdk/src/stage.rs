//! Stage locations.

use std::fmt;

use crate::identifiers::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::render::{ParameterValue, RenderError};

/// A path inside a named stage, rendered as `@"db"."schema"."stage"/path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StageLocation {
    stage: SchemaObjectIdentifier,
    path: String,
}

impl StageLocation {
    /// Creates a location; leading and trailing `/` are trimmed from `path`.
    pub fn new(stage: SchemaObjectIdentifier, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            stage,
            path: path.trim_matches('/').to_string(),
        }
    }

    /// The stage.
    #[must_use]
    pub fn stage(&self) -> &SchemaObjectIdentifier {
        &self.stage
    }

    /// The path inside the stage.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The SQL fragment; empty when any stage component is empty.
    #[must_use]
    pub fn to_sql(&self) -> String {
        if self.stage.components().iter().any(|c| c.is_empty()) {
            return String::new();
        }
        let stage = self.stage.fully_qualified_name();
        if self.path.is_empty() {
            format!("@{stage}")
        } else {
            format!("@{stage}/{}", self.path)
        }
    }
}

impl fmt::Display for StageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl ParameterValue for StageLocation {
    fn parameter_set(&self) -> bool {
        !self.to_sql().is_empty()
    }

    fn parameter_value(&self) -> Result<String, RenderError> {
        Ok(self.to_sql())
    }
}
