use crate::load::invalid_error;
use crate::model::{DeriveField, DeriveRecord};

impl TryFrom<syn::DeriveInput> for DeriveRecord {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let struct_name = value.ident;

        if !value.generics.params.is_empty() {
            return Err(invalid_error(
                struct_name.span(),
                format!("FlagRecord `{struct_name}` cannot be generic."),
            ));
        }

        match &value.data {
            syn::Data::Struct(data_struct) => {
                let fields = match &data_struct.fields {
                    syn::Fields::Named(fields) => fields
                        .named
                        .iter()
                        .map(DeriveField::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                    syn::Fields::Unit => Vec::default(),
                    syn::Fields::Unnamed(fields) if fields.unnamed.is_empty() => Vec::default(),
                    syn::Fields::Unnamed(_) => {
                        return Err(invalid_error(
                            struct_name.span(),
                            format!("FlagRecord `{struct_name}` must have named fields."),
                        ));
                    }
                };

                Ok(DeriveRecord {
                    struct_name,
                    fields,
                })
            }
            syn::Data::Enum(_) | syn::Data::Union(_) => Err(invalid_error(
                struct_name.span(),
                format!("FlagRecord `{struct_name}` must be a struct."),
            )),
        }
    }
}
