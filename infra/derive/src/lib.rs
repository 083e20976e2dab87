#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros used across the beacon workspace.
//!
//! Consumers depend on `thiserror` themselves, since the expansion refers to
//! `::thiserror::Error`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into the workspace's standard error type.
///
/// # Injected items
///
/// * `#[derive(Debug, thiserror::Error)]`, skipping whichever is already derived.
/// * A `<ErrorName>Ext` trait whose `.context(...)` attaches a note to the
///   `context` field of any variant that has one. It is implemented for
///   `Result<T, ErrorName>` and, for every variant wrapping a `source`, for
///   `Result<T, SourceError>` as well.
/// * `From<SourceError>` for every variant wrapping a `source`, so `?` works.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field must be `Option<Cow<'static, str>>`.
/// * A variant with a source (a field named `source` or marked `#[source]`)
///   must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[beacon_derive::beacon_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("reading snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn beacon_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
