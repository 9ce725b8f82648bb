mod attribute;
mod field;
mod record;

pub(self) const ATTRIBUTE: &str = "flagbind";

pub(self) fn invalid_error(span: proc_macro2::Span, message: impl Into<String>) -> syn::Error {
    syn::Error::new(span, format!("Invalid - {}", message.into()))
}

pub(self) fn incompatible_error(
    field_name: &syn::Ident,
    left: impl Into<String>,
    right: impl Into<String>,
) -> syn::Error {
    invalid_error(
        field_name.span(),
        format!(
            "field cannot be both `{}` and `{}`.",
            left.into(),
            right.into(),
        ),
    )
}
