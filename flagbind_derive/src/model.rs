use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub(crate) struct DeriveValue {
    pub(crate) tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        let st = &self.tokens.to_string();
        let ot = &other.tokens.to_string();
        st == ot
    }
}

impl Eq for DeriveValue {}

/// The raw contents of the `#[flagbind(..)]` attributes on one item.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct IntermediateAttributes {
    // The compact form: `#[flagbind("name,default,usage")]`.
    pub(crate) literals: Vec<DeriveValue>,
    pub(crate) singletons: HashSet<String>,
    pub(crate) pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveCommand {
    pub(crate) method: String,
    pub(crate) trigger: Option<DeriveTrigger>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeriveTrigger {
    True,
    False,
    Empty,
    NotEmpty,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveFlag {
    pub(crate) name: String,
    pub(crate) short: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) usage: Option<String>,
    pub(crate) command: Option<DeriveCommand>,
    pub(crate) provider: Option<syn::Ident>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveSubCommand {
    pub(crate) name: String,
    pub(crate) usage: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveField {
    pub(crate) field_name: syn::Ident,
    pub(crate) flag: Option<DeriveFlag>,
    pub(crate) sub_command: Option<DeriveSubCommand>,
    pub(crate) residual: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DeriveRecord {
    pub(crate) struct_name: syn::Ident,
    pub(crate) fields: Vec<DeriveField>,
}
