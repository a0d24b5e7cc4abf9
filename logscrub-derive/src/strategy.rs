//! Parsing of field and variant attributes.
//!
//! This module maps attribute syntax to per-field decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

use crate::{rename::RenameRule, serde_attr::parse_serde_options};

/// How a field's value is tagged for redaction.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `ByName` | Redacted when the field name is a sensitive key |
/// | `#[sensitive]` | `Tagged` | Redacted regardless of the field name |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    ByName,
    Tagged,
}

impl Strategy {
    pub(crate) fn or_tagged(self, tagged: bool) -> Self {
        if tagged {
            Self::Tagged
        } else {
            self
        }
    }

    pub(crate) fn is_tagged(self) -> bool {
        self == Self::Tagged
    }
}

/// Everything the derive needs to know about one field.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    pub(crate) strategy: Strategy,
    pub(crate) rename: Option<String>,
    pub(crate) skip: bool,
}

/// Everything the derive needs to know about one enum variant.
#[derive(Clone, Debug)]
pub(crate) struct VariantOptions {
    /// Tags every field of the variant.
    pub(crate) sensitive: bool,
    pub(crate) rename: Option<String>,
    /// Renames the variant's fields.
    pub(crate) rename_all: Option<RenameRule>,
}

fn set_once(target: &mut bool, span: Span, position: &str) -> Result<()> {
    if *target {
        return Err(syn::Error::new(
            span,
            format!("multiple #[sensitive] attributes specified on the same {position}"),
        ));
    }
    *target = true;
    Ok(())
}

/// Reads bare `#[sensitive]`, rejecting argument forms and duplicates.
pub(crate) fn parse_sensitive_flag(attrs: &[Attribute], position: &str) -> Result<bool> {
    let mut sensitive = false;
    for attr in attrs {
        if !attr.path().is_ident("sensitive") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => set_once(&mut sensitive, attr.span(), position)?,
            Meta::List(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    format!("#[sensitive] on a {position} takes no arguments"),
                ));
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[sensitive]",
                ));
            }
        }
    }
    Ok(sensitive)
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let strategy = if parse_sensitive_flag(attrs, "field")? {
        Strategy::Tagged
    } else {
        Strategy::ByName
    };
    let serde = parse_serde_options(attrs)?;
    Ok(FieldOptions {
        strategy,
        rename: serde.rename,
        skip: serde.skip,
    })
}

pub(crate) fn parse_variant_options(variant: &syn::Variant) -> Result<VariantOptions> {
    let sensitive = parse_sensitive_flag(&variant.attrs, "variant")?;
    let serde = parse_serde_options(&variant.attrs)?;
    if serde.skip {
        return Err(syn::Error::new(
            variant.span(),
            "skipped enum variants cannot be converted with ToValue",
        ));
    }
    Ok(VariantOptions {
        sensitive,
        rename: serde.rename,
        rename_all: serde.rename_all,
    })
}
