//! Declarative SQL rendering.
//!
//! Option structs derive [`RenderSql`] through `#[derive(SqlOptions)]`. The
//! generated code walks the fields in declaration order and calls one strategy
//! function per directive kind:
//!
//! | directive    | function        | value trait        |
//! |--------------|-----------------|--------------------|
//! | `static`     | push the token  | -                  |
//! | `keyword`    | [`keyword`]     | [`KeywordValue`]   |
//! | `parameter`  | [`parameter`]   | [`ParameterValue`] |
//! | `identifier` | [`identifier`]  | [`IdentifierValue`]|
//! | `list`       | [`list`]        | [`ListValue`]      |
//! | `nested`     | [`nested`]      | [`RenderSql`]      |
//!
//! Each value trait carries its own presence test, so absent values simply
//! produce no token. Tokens are joined with a single space.
//!
//! # Example
//!
//! ```rust
//! use floe_sdk::{render, AccountObjectIdentifier, SqlOptions, Static};
//!
//! #[derive(Default, SqlOptions)]
//! struct DropWarehouse {
//!     #[sql(static = "DROP WAREHOUSE")]
//!     drop: Static,
//!     #[sql(keyword = "IF EXISTS")]
//!     if_exists: bool,
//!     #[sql(identifier)]
//!     name: AccountObjectIdentifier,
//! }
//!
//! let opts = DropWarehouse {
//!     if_exists: true,
//!     name: AccountObjectIdentifier::new("wh"),
//!     ..Default::default()
//! };
//! assert_eq!(render(&opts).unwrap(), r#"DROP WAREHOUSE IF EXISTS "wh""#);
//! ```

mod values;

use std::borrow::Cow;

use thiserror::Error;

pub use values::AllowEmpty;

/// Failed to render an option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An identifier has an empty or overlong component.
    #[error("invalid object identifier: {0}")]
    InvalidIdentifier(String),

    /// A value cannot be represented in the requested position.
    #[error("cannot render value: {0}")]
    InvalidValue(String),
}

/// Zero-sized marker for `static` directive fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Static;

/// Accumulates SQL tokens and joins them with a separator.
#[derive(Debug)]
pub struct SqlWriter {
    tokens: Vec<String>,
    separator: &'static str,
}

impl Default for SqlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlWriter {
    /// Creates a writer that joins tokens with a single space.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_separator(" ")
    }

    /// Creates a writer that joins tokens with `separator`.
    #[must_use]
    pub const fn with_separator(separator: &'static str) -> Self {
        Self {
            tokens: Vec::new(),
            separator,
        }
    }

    /// Appends a token; empty tokens are dropped.
    pub fn push_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            self.tokens.push(token);
        }
    }

    /// Returns whether no token was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins the tokens.
    #[must_use]
    pub fn finish(self) -> String {
        self.tokens.join(self.separator)
    }
}

/// A value that renders itself into a [`SqlWriter`].
pub trait RenderSql {
    /// Writes the value's tokens.
    fn render_sql(&self, w: &mut SqlWriter) -> Result<(), RenderError>;

    /// Presence test for `nested` directives.
    fn is_set(&self) -> bool {
        true
    }
}

impl<T: RenderSql> RenderSql for Option<T> {
    fn render_sql(&self, w: &mut SqlWriter) -> Result<(), RenderError> {
        match self {
            Some(value) => value.render_sql(w),
            None => Ok(()),
        }
    }

    fn is_set(&self) -> bool {
        self.as_ref().is_some_and(RenderSql::is_set)
    }
}

impl<T: RenderSql + ?Sized> RenderSql for Box<T> {
    fn render_sql(&self, w: &mut SqlWriter) -> Result<(), RenderError> {
        (**self).render_sql(w)
    }

    fn is_set(&self) -> bool {
        (**self).is_set()
    }
}

/// A value usable in a `keyword` directive.
pub trait KeywordValue {
    /// Whether the keyword is emitted.
    fn keyword_set(&self) -> bool;

    /// The value's own token, emitted after the directive's token.
    fn keyword_token(&self) -> Option<Cow<'_, str>> {
        None
    }
}

/// A value usable in a `parameter` directive.
pub trait ParameterValue {
    /// Whether the parameter is emitted.
    fn parameter_set(&self) -> bool;

    /// The unquoted value text.
    fn parameter_value(&self) -> Result<String, RenderError>;
}

/// A value usable in an `identifier` directive.
pub trait IdentifierValue {
    /// Whether the identifier is emitted.
    fn identifier_set(&self) -> bool {
        true
    }

    /// The double-quoted fully qualified name; fails for invalid identifiers.
    fn qualified_name(&self) -> Result<String, RenderError>;
}

/// An element of a `list` directive.
pub trait ListItem {
    /// Renders the element on its own.
    fn list_item(&self) -> Result<String, RenderError>;
}

/// A collection usable in a `list` directive.
pub trait ListValue {
    /// Whether the list is emitted at all.
    fn list_set(&self) -> bool;

    /// The rendered elements, in order.
    fn list_items(&self) -> Result<Vec<String>, RenderError>;
}

impl<T: ListItem> ListValue for Vec<T> {
    fn list_set(&self) -> bool {
        true
    }

    fn list_items(&self) -> Result<Vec<String>, RenderError> {
        self.iter().map(ListItem::list_item).collect()
    }
}

impl<T: ListValue> ListValue for Option<T> {
    fn list_set(&self) -> bool {
        self.as_ref().is_some_and(ListValue::list_set)
    }

    fn list_items(&self) -> Result<Vec<String>, RenderError> {
        match self {
            Some(value) => value.list_items(),
            None => Ok(Vec::new()),
        }
    }
}

/// How a `parameter` value is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quotes {
    /// Emitted raw.
    #[default]
    None,
    /// Wrapped in `'...'`; interior quotes are the caller's concern.
    Single,
    /// Wrapped in `"..."`.
    Double,
    /// Wrapped in `$$...$$`.
    DoubleDollar,
}

impl Quotes {
    /// Wraps `value` in the quotes.
    #[must_use]
    pub fn wrap(self, value: &str) -> String {
        match self {
            Self::None => value.to_string(),
            Self::Single => format!("'{value}'"),
            Self::Double => format!("\"{value}\""),
            Self::DoubleDollar => format!("$${value}$$"),
        }
    }
}

/// Settings of a `parameter` directive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterDirective {
    /// Leading key, e.g. `COMMENT`.
    pub key: Option<&'static str>,
    /// Quoting of the value.
    pub quotes: Quotes,
    /// Whether `=` separates key and value.
    pub equals: bool,
    /// Whether the value is wrapped in `()`.
    pub parentheses: bool,
}

/// Parenthesization of a `list` directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListParentheses {
    /// `(...)` around non-empty lists.
    #[default]
    Default,
    /// `(...)` even around empty lists.
    Must,
    /// Never parenthesized.
    None,
}

/// Settings of a `list` directive.
#[derive(Debug, Clone, Copy)]
pub struct ListDirective {
    /// Leading token, e.g. `WITH TAG`.
    pub token: Option<&'static str>,
    /// Parenthesization.
    pub parentheses: ListParentheses,
    /// Separator between elements.
    pub separator: &'static str,
    /// Whether `=` follows the token.
    pub equals: bool,
}

impl Default for ListDirective {
    fn default() -> Self {
        Self {
            token: None,
            parentheses: ListParentheses::Default,
            separator: ", ",
            equals: false,
        }
    }
}

fn with_key(key: Option<&str>, equals: bool, value: &str) -> String {
    match key {
        Some(key) if equals => format!("{key} = {value}"),
        Some(key) => format!("{key} {value}"),
        None => value.to_string(),
    }
}

/// Renders a `keyword` directive.
pub fn keyword<T: KeywordValue + ?Sized>(w: &mut SqlWriter, value: &T, token: Option<&str>) {
    if !value.keyword_set() {
        return;
    }
    if let Some(token) = token {
        w.push_token(token);
    }
    if let Some(own) = value.keyword_token() {
        w.push_token(own.into_owned());
    }
}

/// Renders a `parameter` directive.
pub fn parameter<T: ParameterValue + ?Sized>(
    w: &mut SqlWriter,
    value: &T,
    directive: &ParameterDirective,
) -> Result<(), RenderError> {
    if !value.parameter_set() {
        return Ok(());
    }
    let mut rendered = directive.quotes.wrap(&value.parameter_value()?);
    if directive.parentheses {
        rendered = format!("({rendered})");
    }
    w.push_token(with_key(directive.key, directive.equals, &rendered));
    Ok(())
}

/// Renders an `identifier` directive.
pub fn identifier<T: IdentifierValue + ?Sized>(
    w: &mut SqlWriter,
    value: &T,
    token: Option<&str>,
    equals: bool,
) -> Result<(), RenderError> {
    if !value.identifier_set() {
        return Ok(());
    }
    let name = value.qualified_name()?;
    w.push_token(with_key(token, equals, &name));
    Ok(())
}

/// Renders a `list` directive.
pub fn list<T: ListValue + ?Sized>(
    w: &mut SqlWriter,
    value: &T,
    directive: &ListDirective,
) -> Result<(), RenderError> {
    if !value.list_set() {
        return Ok(());
    }
    let items = value.list_items()?;
    if items.is_empty() && directive.parentheses != ListParentheses::Must {
        return Ok(());
    }
    let joined = items.join(directive.separator);
    let rendered = match directive.parentheses {
        ListParentheses::Default | ListParentheses::Must => format!("({joined})"),
        ListParentheses::None => joined,
    };
    w.push_token(with_key(directive.token, directive.equals, &rendered));
    Ok(())
}

/// Renders a `nested` directive.
pub fn nested<T: RenderSql + ?Sized>(
    w: &mut SqlWriter,
    value: &T,
    token: Option<&str>,
) -> Result<(), RenderError> {
    if !value.is_set() {
        return Ok(());
    }
    if let Some(token) = token {
        w.push_token(token);
    }
    value.render_sql(w)
}

/// Renders an option value to SQL text.
pub fn render<T: RenderSql + ?Sized>(value: &T) -> Result<String, RenderError> {
    let mut w = SqlWriter::new();
    value.render_sql(&mut w)?;
    Ok(w.finish())
}
