#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every Agora crate: error enums, feature slices,
//! API models/handlers and the runtime bootstrap for `main`.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros;
//! the consuming crates exercise them in their tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Bootstraps the Agora Tokio runtime around an `async fn main`.
///
/// Accepts an optional profile: `high_performance`, `memory_efficient` or `default`.
///
/// ```rust,ignore
/// #[agora_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares an API data model (view model or request body).
///
/// * Adds `Debug`, `Serialize` and `Deserialize` when they are not derived already.
/// * Adds `utoipa::ToSchema` behind the consuming crate's `server` feature.
/// * Applies `#[serde(rename_all = "camelCase")]` unless `rename_all = "..."` is given.
/// * Applies `#[serde(deny_unknown_fields)]` unless `deny_unknown_fields = false`.
///
/// ```rust,ignore
/// #[api_model(deny_unknown_fields = false)]
/// pub struct ThreadPreview {
///     pub slug: String,
///     pub title: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` when the `server` feature is on.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK)), tag = "System")]
/// pub async fn health_handler() -> impl IntoResponse { "up" }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into the crate's error type.
///
/// * Derives `Debug` and `thiserror::Error` when missing.
/// * Generates `<Name>Ext` with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that wraps a `source`.
/// * Generates `From<Source>` for those variants so `?` works.
/// * Generates `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * Emits a private `format_context` helper used inside `#[error(...)]` strings.
///
/// Every variant must use named fields; variants with a source must carry
/// `context: Option<Cow<'static, str>>`.
///
/// ```rust,ignore
/// #[agora_error]
/// pub enum DataError {
///     #[error("Storage unavailable{}: {message}", format_context(.context))]
///     Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///     #[error("Internal data error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn agora_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that
/// derefs to it and implements `FeatureSlice` so it can be registered in `ApiState`.
///
/// ```rust,ignore
/// #[agora_derive::agora_slice]
/// pub struct Forums {
///     pub settings: ForumsSettings,
/// }
///
/// let forums = Forums::new(ForumsInner { settings });
/// ```
#[proc_macro_attribute]
pub fn agora_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
