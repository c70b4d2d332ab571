//! Tokenizer for argument signatures such as `(DEFAULT a NUMBER(10, 2), b VARCHAR)`.
//!
//! The tokenizer is lenient: anything with balanced parenthesis counts is
//! split into segments, and a segment that does not look like `name TYPE`
//! is kept whole as the data type. This keeps signatures printed by newer
//! server versions usable for identifier reconstruction.

use thiserror::Error;

/// Failed to tokenize an argument signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentParseError {
    /// `(` and `)` counts differ.
    #[error("unbalanced parentheses in arguments {0:?}")]
    UnbalancedParentheses(String),

    /// The signature ends in a comma.
    #[error("trailing comma in arguments {0:?}")]
    TrailingComma(String),

    /// Two commas with nothing in between.
    #[error("empty argument at position {position} in arguments {input:?}")]
    EmptyArgument {
        /// The whole signature.
        input: String,
        /// Zero-based index of the empty argument.
        position: usize,
    },
}

/// One argument of a signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgument {
    /// Whether the argument was prefixed with `DEFAULT`.
    pub is_default: bool,
    /// The argument name; empty when the signature only lists types.
    pub name: String,
    /// The data type, including any parenthesized parameters.
    pub data_type: String,
}

const DEFAULT_PREFIX: &str = "DEFAULT ";

/// Tokenizes an argument signature.
///
/// ```rust
/// use floe_sdk::parsers::parse_arguments;
///
/// let args = parse_arguments("(DEFAULT ab NUMBER(10, 2), x FLOAT)").unwrap();
/// assert_eq!(args[0].name, "ab");
/// assert_eq!(args[0].data_type, "NUMBER(10, 2)");
/// assert!(!args[1].is_default);
/// ```
pub fn parse_arguments(input: &str) -> Result<Vec<ParsedArgument>, ArgumentParseError> {
    let mut trimmed = input.trim();
    if let Some(inner) = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        trimmed = inner.trim();
    }

    let opening = trimmed.matches('(').count();
    let closing = trimmed.matches(')').count();
    if opening != closing {
        return Err(ArgumentParseError::UnbalancedParentheses(input.to_string()));
    }
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let segments = split_top_level(trimmed);
    // A blank final segment means the input ends in a comma at depth 0.
    if segments.last().is_some_and(|last| last.trim().is_empty()) {
        return Err(ArgumentParseError::TrailingComma(input.to_string()));
    }
    let mut arguments = Vec::with_capacity(segments.len());
    for (position, segment) in segments.into_iter().enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(ArgumentParseError::EmptyArgument {
                input: input.to_string(),
                position,
            });
        }
        arguments.push(parse_segment(segment));
    }
    Ok(arguments)
}

fn split_top_level(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0_i32;
    let mut start = 0;
    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                segments.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&input[start..]);
    segments
}

fn parse_segment(segment: &str) -> ParsedArgument {
    let (is_default, rest) = match segment.get(..DEFAULT_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DEFAULT_PREFIX) => {
            (true, segment[DEFAULT_PREFIX.len()..].trim_start())
        }
        _ => (false, segment),
    };

    let space = rest.find(' ');
    let paren = rest.find('(');
    let (name, data_type) = match (space, paren) {
        (Some(space), None) => (&rest[..space], &rest[space..]),
        (Some(space), Some(paren)) if space < paren => (&rest[..space], &rest[space..]),
        _ => ("", rest),
    };

    ParsedArgument {
        is_default,
        name: name.to_string(),
        data_type: data_type.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(input: &str) -> Vec<(bool, String, String)> {
        parse_arguments(input)
            .unwrap()
            .into_iter()
            .map(|a| (a.is_default, a.name, a.data_type))
            .collect()
    }

    #[test]
    fn test_mixed_defaults_and_names() {
        assert_eq!(
            triples("(DEFAULT ab NUMBER(10, 2), x FLOAT, DEFAULT FLOAT)"),
            vec![
                (true, "ab".to_string(), "NUMBER(10, 2)".to_string()),
                (false, "x".to_string(), "FLOAT".to_string()),
                (true, String::new(), "FLOAT".to_string()),
            ]
        );
    }

    #[test]
    fn test_types_only() {
        assert_eq!(
            triples("NUMBER(38, 0), VECTOR(FLOAT, 20)"),
            vec![
                (false, String::new(), "NUMBER(38, 0)".to_string()),
                (false, String::new(), "VECTOR(FLOAT, 20)".to_string()),
            ]
        );
    }

    #[test]
    fn test_liberal_whitespace() {
        assert_eq!(
            triples("  (  default   a   VARCHAR ,b   BOOLEAN  )  "),
            vec![
                (true, "a".to_string(), "VARCHAR".to_string()),
                (false, "b".to_string(), "BOOLEAN".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_signature() {
        assert!(parse_arguments("").unwrap().is_empty());
        assert!(parse_arguments("()").unwrap().is_empty());
        assert!(parse_arguments("  (  )  ").unwrap().is_empty());
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(matches!(
            parse_arguments("(a NUMBER(10, 2)"),
            Err(ArgumentParseError::UnbalancedParentheses(_))
        ));
        assert!(matches!(
            parse_arguments("VECTOR(FLOAT, 20))"),
            Err(ArgumentParseError::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn test_trailing_and_empty_arguments() {
        assert!(matches!(
            parse_arguments("(a NUMBER, )"),
            Err(ArgumentParseError::TrailingComma(_))
        ));
        assert!(matches!(
            parse_arguments("a NUMBER,,b NUMBER"),
            Err(ArgumentParseError::EmptyArgument { position: 1, .. })
        ));
    }

    #[test]
    fn test_trailing_comma_wins_over_empty_argument() {
        for input in [",", "a NUMBER,", "a NUMBER,,", "(a NUMBER,,)"] {
            assert!(
                matches!(
                    parse_arguments(input),
                    Err(ArgumentParseError::TrailingComma(_))
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_malformed_type_is_kept_opaque() {
        assert_eq!(
            triples("VECTOR)2("),
            vec![(false, String::new(), "VECTOR)2(".to_string())]
        );
    }
}
