//! Derive macro for declarative SQL option structs.
//!
//! This crate provides the `#[derive(SqlOptions)]` macro. Each field carries a
//! `#[sql(...)]` rendering directive; the generated `RenderSql` impl walks the
//! fields in declaration order and hands every field to the matching strategy
//! function in `floe_sdk::render`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, parse_macro_input};

/// Derives `RenderSql` and `ListItem` for a struct of rendering directives.
///
/// # Struct Attributes
///
/// - `#[sql(separator = ", ")]` - Joins the struct's tokens with the given
///   separator instead of a single space
///
/// # Field Attributes
///
/// - `#[sql(static = "TOKEN")]` - Always emits `TOKEN`
/// - `#[sql(keyword)]`, `#[sql(keyword = "TOKEN")]` - Emits `TOKEN` (and the
///   value's own keyword, for enums) when the value is set
/// - `#[sql(parameter = "KEY", ...)]` - Emits `KEY = value`; modifiers are
///   `single_quotes`, `double_quotes`, `double_dollar_quotes`, `no_quotes`,
///   `no_equals` and `parentheses`
/// - `#[sql(identifier)]`, `#[sql(identifier = "TOKEN", equals)]` - Emits the
///   fully qualified name
/// - `#[sql(list = "TOKEN", ...)]` - Emits a comma separated list; modifiers
///   are `must_parentheses`, `no_parentheses`, `no_comma` and `equals`
/// - `#[sql(nested)]`, `#[sql(nested = "TOKEN")]` - Renders a nested struct
///
/// Fields without a `#[sql]` attribute are not rendered.
#[proc_macro_derive(SqlOptions, attributes(sql))]
pub fn derive_sql_options(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_sql_options_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_sql_options_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let separator = get_separator(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "SqlOptions derive needs at least one annotated field",
                ));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "SqlOptions derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "SqlOptions derive only supports structs",
            ));
        }
    };

    let mut statements: Vec<TokenStream2> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        if let Some(directive) = parse_field_directive(&field.attrs)? {
            statements.push(directive.to_tokens(field_name));
        }
    }

    let body = match separator {
        Some(separator) => quote! {
            let mut __inner = ::floe_sdk::render::SqlWriter::with_separator(#separator);
            {
                let __w = &mut __inner;
                #(#statements)*
            }
            __out.push_token(__inner.finish());
        },
        None => quote! {
            let __w = __out;
            #(#statements)*
        },
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::floe_sdk::render::RenderSql for #struct_name #ty_generics #where_clause {
            fn render_sql(
                &self,
                __out: &mut ::floe_sdk::render::SqlWriter,
            ) -> ::core::result::Result<(), ::floe_sdk::render::RenderError> {
                #body
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::floe_sdk::render::ListItem for #struct_name #ty_generics #where_clause {
            fn list_item(&self) -> ::core::result::Result<
                ::std::string::String,
                ::floe_sdk::render::RenderError,
            > {
                ::floe_sdk::render::render(self)
            }
        }
    };

    Ok(expanded)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Static,
    Keyword,
    Parameter,
    Identifier,
    List,
    Nested,
}

#[derive(Clone, Copy)]
enum Quotes {
    None,
    Single,
    Double,
    DoubleDollar,
}

#[derive(Clone, Copy)]
enum ListParentheses {
    Default,
    Must,
    None,
}

struct Directive {
    kind: Kind,
    token: Option<String>,
    quotes: Quotes,
    no_equals: bool,
    equals: bool,
    parentheses: bool,
    list_parentheses: ListParentheses,
    no_comma: bool,
}

impl Directive {
    fn to_tokens(&self, field: &Ident) -> TokenStream2 {
        let token = match &self.token {
            Some(token) => quote! { ::core::option::Option::Some(#token) },
            None => quote! { ::core::option::Option::None },
        };

        match self.kind {
            Kind::Static => {
                let value = self.token.clone().unwrap_or_default();
                quote! {
                    __w.push_token(#value);
                }
            }
            Kind::Keyword => quote! {
                ::floe_sdk::render::keyword(__w, &self.#field, #token);
            },
            Kind::Parameter => {
                let quotes = match self.quotes {
                    Quotes::None => quote! { ::floe_sdk::render::Quotes::None },
                    Quotes::Single => quote! { ::floe_sdk::render::Quotes::Single },
                    Quotes::Double => quote! { ::floe_sdk::render::Quotes::Double },
                    Quotes::DoubleDollar => quote! { ::floe_sdk::render::Quotes::DoubleDollar },
                };
                let equals = !self.no_equals;
                let parentheses = self.parentheses;
                quote! {
                    ::floe_sdk::render::parameter(
                        __w,
                        &self.#field,
                        &::floe_sdk::render::ParameterDirective {
                            key: #token,
                            quotes: #quotes,
                            equals: #equals,
                            parentheses: #parentheses,
                        },
                    )?;
                }
            }
            Kind::Identifier => {
                let equals = self.equals;
                quote! {
                    ::floe_sdk::render::identifier(__w, &self.#field, #token, #equals)?;
                }
            }
            Kind::List => {
                let parentheses = match self.list_parentheses {
                    ListParentheses::Default => {
                        quote! { ::floe_sdk::render::ListParentheses::Default }
                    }
                    ListParentheses::Must => quote! { ::floe_sdk::render::ListParentheses::Must },
                    ListParentheses::None => quote! { ::floe_sdk::render::ListParentheses::None },
                };
                let separator = if self.no_comma { " " } else { ", " };
                let equals = self.equals;
                quote! {
                    ::floe_sdk::render::list(
                        __w,
                        &self.#field,
                        &::floe_sdk::render::ListDirective {
                            token: #token,
                            parentheses: #parentheses,
                            separator: #separator,
                            equals: #equals,
                        },
                    )?;
                }
            }
            Kind::Nested => quote! {
                ::floe_sdk::render::nested(__w, &self.#field, #token)?;
            },
        }
    }
}

fn get_separator(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut separator = None;
    for attr in attrs {
        if attr.path().is_ident("sql") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("separator") {
                    separator = Some(parse_string_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported struct-level sql attribute"))
                }
            })?;
        }
    }
    Ok(separator)
}

fn parse_field_directive(attrs: &[Attribute]) -> syn::Result<Option<Directive>> {
    let mut result: Option<Directive> = None;

    for attr in attrs {
        if !attr.path().is_ident("sql") {
            continue;
        }

        let mut kind = None;
        let mut directive = Directive {
            kind: Kind::Keyword,
            token: None,
            quotes: Quotes::None,
            no_equals: false,
            equals: false,
            parentheses: false,
            list_parentheses: ListParentheses::Default,
            no_comma: false,
        };

        attr.parse_nested_meta(|meta| {
            let found = if meta.path.is_ident("static") {
                Some(Kind::Static)
            } else if meta.path.is_ident("keyword") {
                Some(Kind::Keyword)
            } else if meta.path.is_ident("parameter") {
                Some(Kind::Parameter)
            } else if meta.path.is_ident("identifier") {
                Some(Kind::Identifier)
            } else if meta.path.is_ident("list") {
                Some(Kind::List)
            } else if meta.path.is_ident("nested") {
                Some(Kind::Nested)
            } else {
                None
            };

            if let Some(found) = found {
                if kind.is_some() {
                    return Err(meta.error("only one rendering directive is allowed per field"));
                }
                kind = Some(found);
                if meta.input.peek(syn::Token![=]) {
                    directive.token = Some(parse_string_value(&meta)?);
                }
                return Ok(());
            }

            if meta.path.is_ident("single_quotes") {
                directive.quotes = Quotes::Single;
            } else if meta.path.is_ident("double_quotes") {
                directive.quotes = Quotes::Double;
            } else if meta.path.is_ident("double_dollar_quotes") {
                directive.quotes = Quotes::DoubleDollar;
            } else if meta.path.is_ident("no_quotes") {
                directive.quotes = Quotes::None;
            } else if meta.path.is_ident("no_equals") {
                directive.no_equals = true;
            } else if meta.path.is_ident("equals") {
                directive.equals = true;
            } else if meta.path.is_ident("parentheses") {
                directive.parentheses = true;
            } else if meta.path.is_ident("must_parentheses") {
                directive.list_parentheses = ListParentheses::Must;
            } else if meta.path.is_ident("no_parentheses") {
                directive.list_parentheses = ListParentheses::None;
            } else if meta.path.is_ident("no_comma") {
                directive.no_comma = true;
            } else {
                return Err(meta.error("unsupported sql field attribute"));
            }
            Ok(())
        })?;

        let Some(kind) = kind else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected one of static, keyword, parameter, identifier, list or nested",
            ));
        };
        if kind == Kind::Static && directive.token.is_none() {
            return Err(syn::Error::new_spanned(
                attr,
                "static directive needs a token, e.g. #[sql(static = \"CREATE\")]",
            ));
        }
        if result.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "only one sql attribute is allowed per field",
            ));
        }
        directive.kind = kind;
        result = Some(directive);
    }

    Ok(result)
}

fn parse_string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}
