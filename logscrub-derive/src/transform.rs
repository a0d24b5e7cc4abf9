//! Shared field conversion logic for struct and enum derivation.
//!
//! Structs and enum variants have the same three field layouts, so the code
//! that turns a list of `syn::Fields` into a `StructValue` expression lives
//! here and both derivations call into it.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{ext::IdentExt, spanned::Spanned, Fields, Result};

use crate::{
    crate_path, generics::collect_generics_from_type, rename::RenameRule,
    strategy::parse_field_options,
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) used_generics: &'a mut Vec<Ident>,
}

/// Naming and tagging rules inherited from the container or variant.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Inherited {
    pub(crate) sensitive: bool,
    pub(crate) rename_all: Option<RenameRule>,
}

/// A destructuring pattern plus the expression that builds the value.
pub(crate) struct Converted {
    /// Pattern suffix after the struct or variant path, e.g. `{ a, b, .. }`.
    pub(crate) pattern: TokenStream,
    /// `None` for unit layouts.
    pub(crate) value: Option<TokenStream>,
}

/// Converts the fields of a struct or variant called `name`.
pub(crate) fn convert_fields(
    ctx: &mut DeriveContext<'_>,
    name: &str,
    fields: &Fields,
    inherited: Inherited,
) -> Result<Converted> {
    let field_path = crate_path("Field");
    let struct_path = crate_path("StructValue");
    let to_value_path = crate_path("ToValue");

    match fields {
        Fields::Named(named) => {
            let mut bindings = Vec::new();
            let mut entries = Vec::new();
            for field in &named.named {
                let options = parse_field_options(&field.attrs)?;
                if options.skip {
                    continue;
                }
                let Some(ident) = field.ident.clone() else {
                    return Err(syn::Error::new(field.span(), "named field without a name"));
                };
                let declared = ident.unraw().to_string();
                let exposed = options.rename.unwrap_or_else(|| {
                    inherited
                        .rename_all
                        .map_or_else(|| declared.clone(), |rule| rule.apply_to_field(&declared))
                });
                let tagged = options.strategy.or_tagged(inherited.sensitive).is_tagged();
                collect_generics_from_type(&field.ty, ctx.generics, ctx.used_generics);

                entries.push(quote_spanned! { field.ty.span() =>
                    #field_path::new(#exposed, #tagged, #to_value_path::to_value(#ident))
                });
                bindings.push(ident);
            }
            Ok(Converted {
                pattern: quote! { { #(#bindings,)* .. } },
                value: Some(quote! {
                    #struct_path::named(#name, ::std::vec![#(#entries),*])
                }),
            })
        }
        Fields::Unnamed(unnamed) => {
            let mut patterns = Vec::new();
            let mut entries = Vec::new();
            for (index, field) in unnamed.unnamed.iter().enumerate() {
                let options = parse_field_options(&field.attrs)?;
                if options.skip {
                    patterns.push(quote! { _ });
                    continue;
                }
                let binding = format_ident!("field_{index}");
                let position = index.to_string();
                let tagged = options.strategy.or_tagged(inherited.sensitive).is_tagged();
                collect_generics_from_type(&field.ty, ctx.generics, ctx.used_generics);

                entries.push(quote_spanned! { field.ty.span() =>
                    #field_path::new(#position, #tagged, #to_value_path::to_value(#binding))
                });
                patterns.push(quote! { #binding });
            }
            Ok(Converted {
                pattern: quote! { ( #(#patterns),* ) },
                value: Some(quote! {
                    #struct_path::tuple(#name, ::std::vec![#(#entries),*])
                }),
            })
        }
        Fields::Unit => Ok(Converted {
            pattern: quote! {},
            value: None,
        }),
    }
}
