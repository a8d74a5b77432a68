//! Attribute parsing utilities

use syn::{ExprLit, Field, Lit};

/// Extract column name from field attributes
///
/// Returns an error when the attribute is present but is not `#[column_name = "..."]`.
pub fn extract_column_name(field: &Field) -> syn::Result<Option<String>> {
    for attr in &field.attrs {
        if attr.path().is_ident("column_name") {
            let meta = attr.meta.require_name_value()?;
            if let syn::Expr::Lit(ExprLit {
                lit: Lit::Str(s), ..
            }) = &meta.value
            {
                if s.value().is_empty() {
                    return Err(syn::Error::new_spanned(s, "column_name cannot be empty"));
                }
                return Ok(Some(s.value()));
            }
            return Err(syn::Error::new_spanned(
                &meta.value,
                "column_name expects a string literal",
            ));
        }
    }
    Ok(None)
}

/// Check if field has the `#[readonly]` attribute
pub fn has_readonly_attr(field: &Field) -> bool {
    field
        .attrs
        .iter()
        .any(|attr| attr.path().is_ident("readonly"))
}
