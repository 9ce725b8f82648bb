use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

use crate::model::{DeriveCommand, DeriveField, DeriveFlag, DeriveSubCommand, DeriveTrigger};

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField {
            field_name,
            flag,
            sub_command,
            residual,
        } = value;
        let mut registrations = Vec::default();

        if let Some(flag) = flag {
            let flag = generate_flag(&field_name, flag);
            registrations.push(quote! { .flag(#flag) });
        }

        if let Some(sub_command) = sub_command {
            let sub_command = generate_sub_command(&field_name, sub_command);
            registrations.push(quote! { .sub_command(#sub_command) });
        }

        if residual {
            registrations.push(quote! { .residual(|r: &mut Self| &mut r.#field_name) });
        }

        quote! { #( #registrations )* }
    }
}

fn generate_flag(field_name: &syn::Ident, flag: DeriveFlag) -> TokenStream2 {
    let DeriveFlag {
        name,
        short,
        default,
        usage,
        command,
        provider,
    } = flag;
    let mut chain = quote! {
        ::flagbind::Flag::new(#name, |r: &mut Self| &mut r.#field_name)
    };

    if let Some(short) = short {
        chain = quote! { #chain.short(#short) };
    }

    if let Some(default) = default {
        chain = quote! { #chain.default(#default) };
    }

    if let Some(usage) = usage {
        chain = quote! { #chain.usage(#usage) };
    }

    if let Some(provider) = provider {
        chain = quote! { #chain.provider(|r: &Self| r.#provider()) };
    }

    if let Some(DeriveCommand { method, trigger }) = command {
        let handler = format_ident!("{}_command", method, span = field_name.span());
        chain = quote! { #chain.command(#method, |r: &mut Self| r.#handler()) };

        if let Some(trigger) = trigger {
            let trigger = match trigger {
                DeriveTrigger::True => quote! { True },
                DeriveTrigger::False => quote! { False },
                DeriveTrigger::Empty => quote! { Empty },
                DeriveTrigger::NotEmpty => quote! { NotEmpty },
            };
            chain = quote! { #chain.trigger(::flagbind::Trigger::#trigger) };
        }
    }

    chain
}

fn generate_sub_command(field_name: &syn::Ident, sub_command: DeriveSubCommand) -> TokenStream2 {
    let DeriveSubCommand { name, usage } = sub_command;
    let handler = format_ident!("{}_command", field_name);
    let handler_name = handler.to_string();
    let chain = quote! {
        ::flagbind::SubCommand::new(#name, #handler_name, |r: &mut Self| r.#handler())
    };

    match usage {
        Some(usage) => quote! { #chain.usage(#usage) },
        None => chain,
    }
}
