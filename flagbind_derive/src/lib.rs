//! The `#[derive(FlagRecord)]` macro of `flagbind`.
//!
//! Use it through the `flagbind` crate, which re-exports the macro along with the types the generated code refers to.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

use crate::model::DeriveRecord;

/// Derive `flagbind::Record` for a struct with named fields.
///
/// Fields are annotated with `#[flagbind(..)]`:
/// * `"name,default,usage"` or `flag = "..", default = "..", usage = ".."` declare a flag.
/// * `short = ".."` gives the flag a short alias.
/// * `command` or `command = "method,trigger"` fire `<method>_command` in option-triggered mode.
/// * `provider` or `provider = "method"` compute the flag's value from the record, `<field>_default` by default.
/// * `sub_command = ".."` selects `<field>_command` in sub-command mode.
///
/// An unannotated `args: Vec<String>` field receives the residual tokens.
#[proc_macro_derive(FlagRecord, attributes(flagbind))]
pub fn flag_record(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveRecord::try_from(derive_input) {
        Ok(record) => TokenStream2::from(record).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
