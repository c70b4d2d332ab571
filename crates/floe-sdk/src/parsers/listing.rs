//! Parsers for bracketed lists such as `["a", "b"]` or `[ORG.ACC1, ORG.ACC2]`.

use std::str::FromStr;

use crate::identifiers::{AccountIdentifier, IdentifierParseError};

/// Splits a bracketed, comma separated list into trimmed elements.
///
/// Commas inside `"..."` or `'...'` do not split, and element quotes are
/// kept. An empty list yields no elements.
#[must_use]
pub fn parse_comma_separated_list(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in trimmed.chars() {
        match (quote, c) {
            (None, '"' | '\'') => {
                quote = Some(c);
                current.push(c);
            }
            (Some(open), _) if c == open => {
                quote = None;
                current.push(c);
            }
            (None, ',') => items.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    items.push(current.trim().to_string());
    items
}

/// Like [`parse_comma_separated_list`], with one level of surrounding quotes
/// stripped from each element.
#[must_use]
pub fn parse_comma_separated_unquoted_list(input: &str) -> Vec<String> {
    parse_comma_separated_list(input)
        .into_iter()
        .map(|item| strip_quotes(&item).to_string())
        .collect()
}

fn strip_quotes(item: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = item
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    item
}

/// Parses every element of a bracketed list as an identifier.
pub fn parse_comma_separated_identifiers<T>(input: &str) -> Result<Vec<T>, T::Err>
where
    T: FromStr,
{
    parse_comma_separated_list(input)
        .iter()
        .map(|item| item.parse())
        .collect()
}

/// Parses a bracketed list of `ORG.ACCOUNT` references.
pub fn parse_comma_separated_account_identifiers(
    input: &str,
) -> Result<Vec<AccountIdentifier>, IdentifierParseError> {
    parse_comma_separated_identifiers(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::SchemaObjectIdentifier;

    #[test]
    fn test_plain_list() {
        assert_eq!(parse_comma_separated_list("[a, b, c]"), vec!["a", "b", "c"]);
        assert_eq!(parse_comma_separated_list("a,b"), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_comma_separated_list("[]").is_empty());
        assert!(parse_comma_separated_list("  [ ] ").is_empty());
        assert!(parse_comma_separated_list("").is_empty());
    }

    #[test]
    fn test_quoted_commas_do_not_split() {
        let items = parse_comma_separated_list(r#"["a,b", 'c, d', "e"]"#);
        assert_eq!(items, vec![r#""a,b""#, "'c, d'", r#""e""#]);
        assert_eq!(
            parse_comma_separated_unquoted_list(r#"["a,b", 'c, d', "e"]"#),
            vec!["a,b", "c, d", "e"]
        );
    }

    #[test]
    fn test_length_matches_token_count() {
        for count in 1..6 {
            let input = format!(
                "[{}]",
                (0..count)
                    .map(|i| format!("\"t{i}, x\""))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            assert_eq!(parse_comma_separated_list(&input).len(), count);
        }
    }

    #[test]
    fn test_account_identifiers() {
        let accounts = parse_comma_separated_account_identifiers("[ORG.ACC1, \"ORG\".\"Acc2\"]").unwrap();
        assert_eq!(
            accounts,
            vec![AccountIdentifier::new("ORG", "ACC1"), AccountIdentifier::new("ORG", "Acc2")]
        );
        assert!(parse_comma_separated_account_identifiers("[ORG]").is_err());
    }

    #[test]
    fn test_typed_identifiers() {
        let ids: Vec<SchemaObjectIdentifier> =
            parse_comma_separated_identifiers(r#"["db"."s"."t", db.s.u]"#).unwrap();
        assert_eq!(ids[1], SchemaObjectIdentifier::new("db", "s", "u"));
    }
}
