//! Derive macro for `logscrub`.
//!
//! This crate generates the `ToValue` conversion behind `#[derive(ToValue)]`.
//! It:
//! - reads `#[sensitive]` tags on fields, variants and containers
//! - reads the `#[serde(...)]` options that change the logged shape
//! - emits a `ToValue` implementation that builds a `logscrub::Value`
//!
//! It does **not** redact anything. Field names and tags are recorded in the
//! produced value, and the `logscrub` redactor decides at log time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod rename;
mod serde_attr;
mod strategy;
mod transform;
use container::parse_container_options;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_to_value_bounds;

/// Derives `logscrub::ToValue` for structs and enums.
///
/// # Container Attributes
///
/// - `#[sensitive]` - Tags every field of the type for redaction.
/// - `#[serde(rename_all = "...")]` - Renames struct fields, or enum variants,
///   using serde's rule names (`"camelCase"`, `"snake_case"`, ...).
///
/// # Variant Attributes
///
/// - `#[sensitive]` - Tags every field of the variant.
/// - `#[serde(rename = "...")]` - Exposed variant name.
/// - `#[serde(rename_all = "...")]` - Renames the variant's fields.
///
/// # Field Attributes
///
/// - **No annotation**: string leaves inside the field are redacted when the
///   field's exposed name is a sensitive key (`password`, `email`, ...).
///
/// - `#[sensitive]`: string leaves inside the field are always redacted.
///   Numbers and booleans are kept either way.
///
/// - `#[serde(rename = "...")]` or `#[serde(rename(serialize = "..."))]`:
///   the exposed name, which is also the name matched against sensitive keys.
///
/// - `#[serde(skip)]` / `#[serde(skip_serializing)]`: the field is left out.
///
/// Every converted field's type must implement `ToValue`. Generic parameters
/// used by converted fields get a `ToValue` bound; `PhantomData<T>` does not
/// count as a use.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(ToValue, attributes(sensitive, serde))]
pub fn derive_to_value(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the logscrub crate root.
///
/// Handles crate renaming (e.g., `scrub = { package = "logscrub", ... }`).
/// `logscrub` declares `extern crate self as logscrub`, so the absolute path
/// also resolves inside the crate itself and in its doctests.
fn crate_root() -> TokenStream {
    match crate_name("logscrub") {
        Ok(FoundCrate::Itself) => quote! { ::logscrub },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::logscrub },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let container = parse_container_options(&attrs)?;

    let (body, used_generics) = match &data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data, &generics, &container)?;
            (output.body, output.used_generics)
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data, &generics, &container)?;
            (output.body, output.used_generics)
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`ToValue` cannot be derived for unions",
            ));
        }
    };

    let to_value_path = crate_path("ToValue");
    let value_path = crate_path("Value");
    let bounded = add_to_value_bounds(generics, &used_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        impl #impl_generics #to_value_path for #ident #ty_generics #where_clause {
            fn to_value(&self) -> #value_path {
                #body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::expand;

    fn expand_str(tokens: proc_macro2::TokenStream) -> String {
        let input: DeriveInput = syn::parse2(tokens).unwrap();
        expand(input).unwrap().to_string()
    }

    #[test]
    fn named_struct_uses_exposed_names_and_tags() {
        let out = expand_str(quote! {
            #[serde(rename_all = "camelCase")]
            struct Login {
                user_name: String,
                #[sensitive]
                pin: String,
                #[serde(rename = "dev")]
                device_id: String,
                #[serde(skip)]
                cache: Vec<u8>,
            }
        });
        assert!(out.contains("StructValue :: named (\"Login\""));
        assert!(out.contains("\"userName\" , false"));
        assert!(out.contains("\"pin\" , true"));
        assert!(out.contains("\"dev\" , false"));
        assert!(!out.contains("cache"));
    }

    #[test]
    fn container_tag_applies_to_every_field() {
        let out = expand_str(quote! {
            #[sensitive]
            struct Secret(String, String);
        });
        assert!(out.contains("StructValue :: tuple (\"Secret\""));
        assert!(out.contains("\"0\" , true"));
        assert!(out.contains("\"1\" , true"));
    }

    #[test]
    fn unit_struct_is_null() {
        let out = expand_str(quote! { struct Marker; });
        assert!(out.contains("Value :: Null"));
    }

    #[test]
    fn enum_variants_are_renamed_and_tagged() {
        let out = expand_str(quote! {
            #[serde(rename_all = "snake_case")]
            enum Payment {
                Cash,
                #[sensitive]
                CreditCard { number: String },
                #[serde(rename = "wire")]
                BankTransfer(String),
            }
        });
        assert!(out.contains("VariantValue :: unit (\"Payment\" , \"cash\")"));
        assert!(out.contains("\"credit_card\""));
        assert!(out.contains("\"number\" , true"));
        assert!(out.contains("\"wire\""));
        assert!(out.contains("\"0\" , false"));
    }

    #[test]
    fn generic_bounds_skip_phantom_data_and_skipped_fields() {
        let out = expand_str(quote! {
            struct Tagged<T, U, M> {
                value: T,
                #[serde(skip)]
                hidden: U,
                marker: ::core::marker::PhantomData<M>,
            }
        });
        assert!(out.contains("T : :: logscrub :: ToValue"));
        assert!(!out.contains("U : :: logscrub :: ToValue"));
        assert!(!out.contains("M : :: logscrub :: ToValue"));
    }

    #[test]
    fn empty_enum_matches_on_the_dereferenced_value() {
        let out = expand_str(quote! { enum Never {} });
        assert!(out.contains("match * self"));
    }

    #[test]
    fn unions_are_rejected() {
        let input: DeriveInput = syn::parse2(quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap();
        let err = expand(input).unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }
}
