//! Parsers for text the warehouse prints in result columns.

mod arguments;
mod listing;

pub use arguments::{parse_arguments, ArgumentParseError, ParsedArgument};
pub use listing::{
    parse_comma_separated_account_identifiers, parse_comma_separated_identifiers,
    parse_comma_separated_list, parse_comma_separated_unquoted_list,
};
