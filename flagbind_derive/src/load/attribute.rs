use crate::load::{invalid_error, ATTRIBUTE};
use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;
use syn::spanned::Spanned;

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let mut attributes = IntermediateAttributes::default();

        for expression in value.parse_args_with(attributes_parser)? {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    attributes
                        .pairs
                        .entry(left.to_string())
                        .or_default()
                        .push(DeriveValue {
                            tokens: assignment.right.to_token_stream(),
                        });
                }
                syn::Expr::Path(syn::ExprPath { path, .. }) if path.get_ident().is_some() => {
                    attributes
                        .singletons
                        .insert(path.to_token_stream().to_string());
                }
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(literal),
                    ..
                }) => {
                    attributes.literals.push(DeriveValue {
                        tokens: literal.to_token_stream(),
                    });
                }
                _ => {
                    return Err(invalid_error(
                        expression.span(),
                        format!(
                            "unparseable attribute `{}`.",
                            expression.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(attributes)
    }
}

impl IntermediateAttributes {
    /// Collect every `#[flagbind(..)]` attribute among `attrs`.
    pub(crate) fn collect(attrs: &[syn::Attribute]) -> Result<Self, syn::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in attrs {
            if attribute.path().is_ident(ATTRIBUTE) {
                let IntermediateAttributes {
                    literals,
                    singletons,
                    pairs,
                } = IntermediateAttributes::try_from(attribute)?;
                attributes.literals.extend(literals);
                attributes.singletons.extend(singletons);

                for (key, values) in pairs {
                    attributes.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        Ok(attributes)
    }

    /// The single string value of the pair `key`, if present.
    pub(crate) fn string(
        &self,
        span: proc_macro2::Span,
        key: &str,
    ) -> Result<Option<String>, syn::Error> {
        match self.pairs.get(key).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([value]) => string_literal(span, key, value).map(Some),
            Some(_) => Err(invalid_error(
                span,
                format!("attribute `{key}` may only be given once."),
            )),
        }
    }

    /// The single compact literal, if present.
    pub(crate) fn literal(&self, span: proc_macro2::Span) -> Result<Option<String>, syn::Error> {
        match self.literals.as_slice() {
            [] => Ok(None),
            [value] => string_literal(span, "compact", value).map(Some),
            _ => Err(invalid_error(
                span,
                "the compact attribute may only be given once.",
            )),
        }
    }
}

fn string_literal(
    span: proc_macro2::Span,
    key: &str,
    value: &DeriveValue,
) -> Result<String, syn::Error> {
    match syn::parse2::<syn::LitStr>(value.tokens.clone()) {
        Ok(literal) => Ok(literal.value()),
        Err(_) => Err(invalid_error(
            span,
            format!(
                "attribute `{key}` expects a string literal, found `{}`.",
                value.tokens
            ),
        )),
    }
}
