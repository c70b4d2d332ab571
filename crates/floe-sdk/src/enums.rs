//! Declarative SQL enums.
//!
//! `sql_enum!` declares a closed enum whose variants map to fixed SQL tokens;
//! parsing is case-insensitive and unknown values are an error.
//! `open_sql_enum!` declares an enum that also keeps unknown values in an
//! `Other` variant, for values the backend validates on its own.

use thiserror::Error;

/// Failed to parse a string into a SQL enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {type_name}: {value:?}")]
pub struct ParseEnumError {
    /// Name of the enum type.
    pub type_name: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $sql:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the SQL token of the variant.
            #[must_use]
            pub const fn as_sql(&self) -> &'static str {
                match self {
                    $(Self::$variant => $sql,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_sql())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::enums::ParseEnumError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($sql) {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::enums::ParseEnumError {
                    type_name: stringify!($name),
                    value: s.to_string(),
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_sql())
            }
        }

        impl $crate::render::KeywordValue for $name {
            fn keyword_set(&self) -> bool {
                true
            }

            fn keyword_token(&self) -> Option<::std::borrow::Cow<'_, str>> {
                Some(::std::borrow::Cow::Borrowed(self.as_sql()))
            }
        }

        impl $crate::render::ParameterValue for $name {
            fn parameter_set(&self) -> bool {
                true
            }

            fn parameter_value(&self) -> ::std::result::Result<String, $crate::render::RenderError> {
                Ok(self.as_sql().to_string())
            }
        }

        impl $crate::render::ListItem for $name {
            fn list_item(&self) -> ::std::result::Result<String, $crate::render::RenderError> {
                Ok(self.as_sql().to_string())
            }
        }
    };
}

macro_rules! open_sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $sql:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
            /// A value this SDK does not know; passed to the backend verbatim.
            Other(String),
        }

        impl $name {
            /// Returns the SQL token of the variant.
            #[must_use]
            pub fn as_sql(&self) -> &str {
                match self {
                    $(Self::$variant => $sql,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                let trimmed = value.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($sql) {
                        return Self::$variant;
                    }
                )+
                Self::Other(value.to_string())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_sql())
            }
        }

        impl $crate::render::ParameterValue for $name {
            fn parameter_set(&self) -> bool {
                true
            }

            fn parameter_value(&self) -> ::std::result::Result<String, $crate::render::RenderError> {
                Ok(self.as_sql().to_string())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    sql_enum! {
        /// Test enum.
        pub enum Color {
            Red => "RED",
            DarkBlue => "DARK BLUE",
        }
    }

    open_sql_enum! {
        /// Test open enum.
        pub enum Level {
            Info => "INFO",
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Color::from_str("red").unwrap(), Color::Red);
        assert_eq!(Color::from_str(" dark blue ").unwrap(), Color::DarkBlue);
    }

    #[test]
    fn test_parse_unknown_value() {
        let err = Color::from_str("GREEN").unwrap_err();
        assert_eq!(err.type_name, "Color");
        assert_eq!(err.to_string(), "invalid Color: \"GREEN\"");
    }

    #[test]
    fn test_all_and_display() {
        assert_eq!(Color::ALL, &[Color::Red, Color::DarkBlue]);
        assert_eq!(Color::DarkBlue.to_string(), "DARK BLUE");
    }

    #[test]
    fn test_open_enum_keeps_unknown_values() {
        assert_eq!(Level::from("info"), Level::Info);
        assert_eq!(Level::from("VERBOSE"), Level::Other("VERBOSE".to_string()));
        assert_eq!(Level::from("VERBOSE").as_sql(), "VERBOSE");
    }
}
