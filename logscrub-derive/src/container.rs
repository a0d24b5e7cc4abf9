//! Container-level attribute parsing for `#[derive(ToValue)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, Result};

use crate::{rename::RenameRule, serde_attr::parse_serde_options, strategy::parse_sensitive_flag};

/// Options parsed from container-level attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Bare `#[sensitive]` on the container tags every field.
    pub(crate) sensitive: bool,
    /// `#[serde(rename_all = "...")]`: renames fields of a struct, variants of
    /// an enum.
    pub(crate) rename_all: Option<RenameRule>,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let sensitive = parse_sensitive_flag(attrs, "container")?;
    let serde = parse_serde_options(attrs)?;
    Ok(ContainerOptions {
        sensitive,
        rename_all: serde.rename_all,
    })
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            struct Dummy;
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let options = parse_container_options(&parse_attrs(quote! {})).unwrap();
        assert!(!options.sensitive);
        assert!(options.rename_all.is_none());
    }

    #[test]
    fn bare_sensitive_tags_the_container() {
        let options = parse_container_options(&parse_attrs(quote! { #[sensitive] })).unwrap();
        assert!(options.sensitive);
    }

    #[test]
    fn sensitive_with_arguments_errors() {
        let result = parse_container_options(&parse_attrs(quote! { #[sensitive(skip_debug)] }));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("#[sensitive] on a container takes no arguments"));
    }

    #[test]
    fn rename_all_is_parsed() {
        let options = parse_container_options(&parse_attrs(quote! {
            #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        }))
        .unwrap();
        assert_eq!(options.rename_all, Some(RenameRule::ScreamingSnakeCase));
    }
}
