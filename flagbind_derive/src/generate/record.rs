use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveRecord;

impl From<DeriveRecord> for TokenStream2 {
    fn from(value: DeriveRecord) -> Self {
        let DeriveRecord {
            struct_name,
            fields,
        } = value;
        let registrations = fields.into_iter().map(TokenStream2::from);

        quote! {
            impl ::flagbind::Record for #struct_name {
                fn schema() -> ::flagbind::Schema<Self> {
                    ::flagbind::Schema::new()
                        #( #registrations )*
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeriveField, DeriveFlag, DeriveSubCommand};
    use proc_macro2::Span;

    #[test]
    fn render_record_empty() {
        // Setup
        let record = DeriveRecord {
            struct_name: ident("my_struct"),
            fields: vec![],
        };

        // Execute
        let token_stream = TokenStream2::from(record);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"impl :: flagbind :: Record for my_struct {
 fn schema () -> :: flagbind :: Schema < Self > {
 :: flagbind :: Schema :: new () }
 }
"#,
        );
    }

    #[test]
    fn render_record() {
        // Setup
        let record = DeriveRecord {
            struct_name: ident("my_struct"),
            fields: vec![
                DeriveField {
                    field_name: ident("my_flag"),
                    flag: Some(DeriveFlag {
                        name: "my-flag".to_string(),
                        short: None,
                        default: None,
                        usage: None,
                        command: None,
                        provider: None,
                    }),
                    sub_command: None,
                    residual: false,
                },
                DeriveField {
                    field_name: ident("my_field"),
                    flag: None,
                    sub_command: None,
                    residual: false,
                },
                DeriveField {
                    field_name: ident("run"),
                    flag: None,
                    sub_command: Some(DeriveSubCommand {
                        name: "run".to_string(),
                        usage: None,
                    }),
                    residual: false,
                },
            ],
        };

        // Execute
        let token_stream = TokenStream2::from(record);

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"impl :: flagbind :: Record for my_struct {
 fn schema () -> :: flagbind :: Schema < Self > {
 :: flagbind :: Schema :: new () . flag (:: flagbind :: Flag :: new ("my-flag" , | r : & mut Self | & mut r . my_flag)) . sub_command (:: flagbind :: SubCommand :: new ("run" , "run_command" , | r : & mut Self | r . run_command ())) }
 }
"#,
        );
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn simple_format(rust_str: String) -> String {
        rust_str
            .replace("{", "{\n")
            .replace("}", "}\n")
            .replace(";", ";\n")
    }
}
