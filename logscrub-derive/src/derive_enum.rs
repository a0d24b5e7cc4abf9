//! Enum-specific `ToValue` derivation.
//!
//! Each variant becomes a `Value::Variant` arm. Unit variants carry no
//! payload; the others carry a `StructValue` built from their fields.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, DataEnum, Result};

use crate::{
    container::ContainerOptions,
    crate_path,
    strategy::parse_variant_options,
    transform::{convert_fields, Converted, DeriveContext, Inherited},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_enum(
    name: &Ident,
    data: &DataEnum,
    generics: &syn::Generics,
    container: &ContainerOptions,
) -> Result<EnumDeriveOutput> {
    let value_path = crate_path("Value");
    let variant_path = crate_path("VariantValue");
    let enum_name = name.to_string();
    let mut used_generics = Vec::new();
    let mut arms = Vec::new();

    for variant in &data.variants {
        let options = parse_variant_options(variant)?;
        let variant_ident = &variant.ident;
        let declared = variant_ident.unraw().to_string();
        let exposed = options.rename.unwrap_or_else(|| {
            container
                .rename_all
                .map_or_else(|| declared.clone(), |rule| rule.apply_to_variant(&declared))
        });
        let inherited = Inherited {
            sensitive: container.sensitive || options.sensitive,
            rename_all: options.rename_all,
        };

        let mut ctx = DeriveContext {
            generics,
            used_generics: &mut used_generics,
        };
        let Converted { pattern, value } =
            convert_fields(&mut ctx, &declared, &variant.fields, inherited)?;

        arms.push(match value {
            Some(value) => quote! {
                Self::#variant_ident #pattern => #value_path::Variant(
                    #variant_path::new(#enum_name, #exposed, #value_path::Struct(#value))
                )
            },
            None => quote! {
                Self::#variant_ident => #value_path::Variant(
                    #variant_path::unit(#enum_name, #exposed)
                )
            },
        });
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms),*
            }
        }
    };

    Ok(EnumDeriveOutput {
        body,
        used_generics,
    })
}
