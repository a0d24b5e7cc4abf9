//! Struct-specific `ToValue` derivation.
//!
//! Named structs become `Value::Struct` with named fields, tuple structs
//! become `Value::Struct` with positional fields, unit structs become
//! `Value::Null`.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataStruct, Result};

use crate::{
    container::ContainerOptions,
    crate_path,
    transform::{convert_fields, Converted, DeriveContext, Inherited},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: &DataStruct,
    generics: &syn::Generics,
    container: &ContainerOptions,
) -> Result<StructDeriveOutput> {
    let value_path = crate_path("Value");
    let mut used_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        used_generics: &mut used_generics,
    };
    let inherited = Inherited {
        sensitive: container.sensitive,
        rename_all: container.rename_all,
    };

    let Converted { pattern, value } =
        convert_fields(&mut ctx, &name.to_string(), &data.fields, inherited)?;
    let body = match value {
        Some(value) => quote! {
            let Self #pattern = self;
            #value_path::Struct(#value)
        },
        None => quote! { #value_path::Null },
    };

    Ok(StructDeriveOutput {
        body,
        used_generics,
    })
}
