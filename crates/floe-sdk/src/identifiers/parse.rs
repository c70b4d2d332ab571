//! Parsing of dot-separated, optionally double-quoted identifiers.

use thiserror::Error;

/// Failed to parse an identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierParseError {
    /// The input is empty.
    #[error("incompatible identifier: empty input")]
    Empty,

    /// A quoted component is never closed.
    #[error("incompatible identifier {input:?}: unterminated quoted component")]
    UnterminatedQuote {
        /// The whole input.
        input: String,
    },

    /// Something other than `.` follows a closing quote.
    #[error("incompatible identifier {input:?}: unexpected character at byte {position}")]
    UnexpectedCharacter {
        /// The whole input.
        input: String,
        /// Byte offset of the offending character.
        position: usize,
    },

    /// The number of components does not match the identifier shape.
    #[error("unexpected number of parts {actual} in identifier {input:?}, expected {expected}")]
    WrongComponentCount {
        /// The whole input.
        input: String,
        /// Components required by the identifier shape.
        expected: usize,
        /// Components found.
        actual: usize,
    },

    /// The argument signature could not be parsed.
    #[error("incompatible identifier {input:?}: {message}")]
    Arguments {
        /// The whole input.
        input: String,
        /// The signature parser's message.
        message: String,
    },
}

/// Splits `input` into exactly `N` components.
pub(super) fn components<const N: usize>(input: &str) -> Result<[String; N], IdentifierParseError> {
    let parts = split_components(input)?;
    let actual = parts.len();
    parts
        .try_into()
        .map_err(|_| IdentifierParseError::WrongComponentCount {
            input: input.to_string(),
            expected: N,
            actual,
        })
}

/// Splits an identifier at unquoted dots.
///
/// A component is either a bare run of characters up to the next `.`, or a
/// double-quoted string in which `""` stands for one `"`.
pub(crate) fn split_components(input: &str) -> Result<Vec<String>, IdentifierParseError> {
    if input.trim().is_empty() {
        return Err(IdentifierParseError::Empty);
    }

    let mut parts = Vec::new();
    let mut chars = input.char_indices().peekable();

    loop {
        let mut current = String::new();
        if chars.peek().is_some_and(|&(_, c)| c == '"') {
            chars.next();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                if c == '"' {
                    if chars.peek().is_some_and(|&(_, next)| next == '"') {
                        chars.next();
                        current.push('"');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    current.push(c);
                }
            }
            if !closed {
                return Err(IdentifierParseError::UnterminatedQuote {
                    input: input.to_string(),
                });
            }
            match chars.next() {
                None => {
                    parts.push(current);
                    return Ok(parts);
                }
                Some((_, '.')) => parts.push(current),
                Some((position, _)) => {
                    return Err(IdentifierParseError::UnexpectedCharacter {
                        input: input.to_string(),
                        position,
                    });
                }
            }
        } else {
            loop {
                match chars.next() {
                    None => {
                        parts.push(current);
                        return Ok(parts);
                    }
                    Some((_, '.')) => {
                        parts.push(current);
                        break;
                    }
                    Some((position, '"')) => {
                        return Err(IdentifierParseError::UnexpectedCharacter {
                            input: input.to_string(),
                            position,
                        });
                    }
                    Some((_, c)) => current.push(c),
                }
            }
        }
    }
}

/// Finds the byte index of the first `needle` outside double quotes.
pub(crate) fn find_unquoted(input: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (index, c) in input.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c == needle && !quoted {
            return Some(index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_unquoted() {
        assert_eq!(split_components("a.b.c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_components("abc").unwrap(), vec!["abc"]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_components(r#""a.b"."c""d""#).unwrap(),
            vec!["a.b", "c\"d"]
        );
        assert_eq!(
            split_components(r#"db."My Schema".x"#).unwrap(),
            vec!["db", "My Schema", "x"]
        );
    }

    #[test]
    fn test_split_preserves_case() {
        assert_eq!(split_components("Db.sCh").unwrap(), vec!["Db", "sCh"]);
    }

    #[test]
    fn test_split_errors() {
        assert_eq!(split_components(""), Err(IdentifierParseError::Empty));
        assert!(matches!(
            split_components(r#""abc"#),
            Err(IdentifierParseError::UnterminatedQuote { .. })
        ));
        assert!(matches!(
            split_components(r#""a"b"#),
            Err(IdentifierParseError::UnexpectedCharacter { position: 3, .. })
        ));
    }

    #[test]
    fn test_component_count() {
        let err = components::<3>("a.b").unwrap_err();
        assert_eq!(
            err,
            IdentifierParseError::WrongComponentCount {
                input: "a.b".to_string(),
                expected: 3,
                actual: 2,
            }
        );
        let [a, b] = components::<2>("a.b").unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("a", "b"));
    }

    #[test]
    fn test_find_unquoted() {
        assert_eq!(find_unquoted(r#""a(b"."c"(X)"#, '('), Some(9));
        assert_eq!(find_unquoted("abc", '('), None);
    }
}
