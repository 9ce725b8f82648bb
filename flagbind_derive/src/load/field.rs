use crate::load::{incompatible_error, invalid_error};
use crate::model::{
    DeriveCommand, DeriveField, DeriveFlag, DeriveSubCommand, DeriveTrigger,
    IntermediateAttributes,
};

const RESIDUAL_FIELD: &str = "args";
const KNOWN_PAIRS: [&str; 7] = [
    "flag",
    "default",
    "usage",
    "short",
    "command",
    "sub_command",
    "provider",
];
const KNOWN_SINGLETONS: [&str; 2] = ["command", "provider"];

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let field_name = match &value.ident {
            Some(ident) => ident.clone(),
            None => {
                return Err(invalid_error(
                    proc_macro2::Span::call_site(),
                    "FlagRecord fields must be named.",
                ))
            }
        };
        let span = field_name.span();
        let attributes = IntermediateAttributes::collect(&value.attrs)?;

        for key in attributes.pairs.keys() {
            if !KNOWN_PAIRS.contains(&key.as_str()) {
                return Err(invalid_error(span, format!("unknown attribute `{key} = ..`.")));
            }
        }

        for key in &attributes.singletons {
            if !KNOWN_SINGLETONS.contains(&key.as_str()) {
                return Err(invalid_error(span, format!("unknown attribute `{key}`.")));
            }
        }

        let compact = attributes.literal(span)?.map(|literal| parse_compact(&literal));
        let mut name = attributes.string(span, "flag")?;
        let mut default = attributes.string(span, "default")?;
        let mut usage = attributes.string(span, "usage")?;

        if let Some((compact_name, compact_default, compact_usage)) = compact {
            for (key, present) in [
                ("flag", name.is_some()),
                ("default", default.is_some()),
                ("usage", usage.is_some()),
            ] {
                if present {
                    return Err(incompatible_error(
                        &field_name,
                        "#[flagbind(\"..\")]",
                        format!("#[flagbind({key} = ..)]"),
                    ));
                }
            }

            name = compact_name;
            default = compact_default;
            usage = compact_usage;
        }

        let short = attributes.string(span, "short")?;
        let command = load_command(&field_name, &attributes)?;
        let provider = load_provider(&field_name, &attributes)?;
        let sub_command = match attributes.string(span, "sub_command")? {
            Some(sub_command) => {
                let sub_command = sub_command.trim().to_string();

                if sub_command.is_empty() || sub_command.starts_with('-') {
                    return Err(invalid_error(
                        span,
                        format!("sub-command `{sub_command}` must be non-empty and must not begin with `-`."),
                    ));
                }

                Some(DeriveSubCommand {
                    name: sub_command,
                    usage: usage.clone(),
                })
            }
            None => None,
        };

        if sub_command.is_some() && name.is_some() {
            return Err(incompatible_error(
                &field_name,
                "#[flagbind(sub_command = ..)]",
                "a flag",
            ));
        }

        let flag = match name {
            Some(name) => Some(DeriveFlag {
                name,
                short,
                default,
                usage,
                command,
                provider,
            }),
            None => {
                for (key, present) in [
                    ("short", short.is_some()),
                    ("default", default.is_some()),
                    ("command", command.is_some()),
                    ("provider", provider.is_some()),
                ] {
                    if present {
                        return Err(invalid_error(
                            span,
                            format!("field `{field_name}` has `{key}` but no flag name."),
                        ));
                    }
                }

                None
            }
        };

        let residual = flag.is_none() && field_name == RESIDUAL_FIELD && is_string_vec(&value.ty);

        Ok(DeriveField {
            field_name,
            flag,
            sub_command,
            residual,
        })
    }
}

// Components are trimmed, and an empty component is absent.
fn parse_compact(literal: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut parts = literal.splitn(3, ',').map(|part| {
        Some(part.trim())
            .filter(|part| !part.is_empty())
            .map(str::to_string)
    });

    (
        parts.next().flatten(),
        parts.next().flatten(),
        parts.next().flatten(),
    )
}

fn load_command(
    field_name: &syn::Ident,
    attributes: &IntermediateAttributes,
) -> Result<Option<DeriveCommand>, syn::Error> {
    let span = field_name.span();
    let implicit = attributes.singletons.contains("command");
    let explicit = attributes.string(span, "command")?;

    if implicit && explicit.is_some() {
        return Err(incompatible_error(
            field_name,
            "#[flagbind(command)]",
            "#[flagbind(command = ..)]",
        ));
    }

    let annotation = match explicit {
        Some(annotation) => annotation,
        None if implicit => String::default(),
        None => return Ok(None),
    };
    let (method, trigger) = match annotation.split_once(',') {
        Some((method, trigger)) => (method.trim(), trigger.trim()),
        None => (annotation.trim(), ""),
    };
    let trigger = match trigger {
        "" => None,
        "true" => Some(DeriveTrigger::True),
        "false" => Some(DeriveTrigger::False),
        "empty" => Some(DeriveTrigger::Empty),
        "notempty" => Some(DeriveTrigger::NotEmpty),
        other => {
            return Err(invalid_error(
                span,
                format!("unknown trigger `{other}` (expected one of: true, false, empty, notempty)."),
            ))
        }
    };
    let method = if method.is_empty() {
        field_name.to_string()
    } else {
        method.to_string()
    };
    method_ident(span, &format!("{method}_command"))?;

    Ok(Some(DeriveCommand { method, trigger }))
}

fn load_provider(
    field_name: &syn::Ident,
    attributes: &IntermediateAttributes,
) -> Result<Option<syn::Ident>, syn::Error> {
    let span = field_name.span();
    let implicit = attributes.singletons.contains("provider");
    let explicit = attributes.string(span, "provider")?;

    if implicit && explicit.is_some() {
        return Err(incompatible_error(
            field_name,
            "#[flagbind(provider)]",
            "#[flagbind(provider = ..)]",
        ));
    }

    match explicit {
        Some(method) if !method.trim().is_empty() => method_ident(span, method.trim()).map(Some),
        Some(_) => method_ident(span, &format!("{field_name}_default")).map(Some),
        None if implicit => method_ident(span, &format!("{field_name}_default")).map(Some),
        None => Ok(None),
    }
}

fn method_ident(span: proc_macro2::Span, method: &str) -> Result<syn::Ident, syn::Error> {
    match syn::parse_str::<syn::Ident>(method) {
        Ok(ident) => Ok(syn::Ident::new(&ident.to_string(), span)),
        Err(_) => Err(invalid_error(
            span,
            format!("`{method}` is not a method name."),
        )),
    }
}

fn is_string_vec(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };

    if segment.ident != "Vec" {
        return false;
    }

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(arguments) => matches!(
            arguments.args.first(),
            Some(syn::GenericArgument::Type(syn::Type::Path(inner)))
                if arguments.args.len() == 1 && inner.path.is_ident("String")
        ),
        _ => false,
    }
}
