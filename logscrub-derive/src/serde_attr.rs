//! Reading the subset of `#[serde(...)]` that changes how a value looks.
//!
//! Only `rename`, `rename_all`, `skip` and `skip_serializing` matter for the
//! logged shape. Anything else inside `#[serde(...)]` belongs to serde and is
//! consumed without interpretation; serde itself reports invalid forms.

use syn::{meta::ParseNestedMeta, Attribute, LitStr, Result, Token};

use crate::rename::RenameRule;

#[derive(Clone, Debug, Default)]
pub(crate) struct SerdeOptions {
    pub(crate) rename: Option<String>,
    pub(crate) rename_all: Option<RenameRule>,
    pub(crate) skip: bool,
}

pub(crate) fn parse_serde_options(attrs: &[Attribute]) -> Result<SerdeOptions> {
    let mut options = SerdeOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(name) = serialize_name(&meta)? {
                    options.rename = Some(name.value());
                }
            } else if meta.path.is_ident("rename_all") {
                if let Some(name) = serialize_name(&meta)? {
                    let rule = RenameRule::from_name(&name.value()).ok_or_else(|| {
                        syn::Error::new(
                            name.span(),
                            format!(
                                "unknown rename rule `{}`; expected one of {}",
                                name.value(),
                                RenameRule::expected()
                            ),
                        )
                    })?;
                    options.rename_all = Some(rule);
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                options.skip = true;
            } else {
                skip_value(&meta)?;
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// Reads `name = "x"` or `name(serialize = "x", deserialize = "y")`.
fn serialize_name(meta: &ParseNestedMeta<'_>) -> Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }
    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(inner.value()?.parse()?);
        } else {
            skip_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(name)
}

fn skip_value(meta: &ParseNestedMeta<'_>) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.input.parse::<proc_macro2::TokenTree>()?;
    }
    Ok(())
}
