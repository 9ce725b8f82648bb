use std::collections::HashMap;

use crate::api::AnonymousBinder;
use crate::constant::*;
use crate::parser::{BindError, ConfigError, ParseError};

/// The names registered for one binder: its flag name and optional short alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagNames {
    pub(crate) name: String,
    pub(crate) short: Option<String>,
}

/// Tokenizes command line input against the registered flags.
///
/// The grammar is single-dash long form:
/// * `-name=value`, `-name value`, with `--name` equivalent to `-name`.
/// * `bool` flags take no separate value: `-name` sets `true`, `-name=false` sets `false`.
/// * `--` ends the flags, as does the first token that is not a flag.
/// * `-h`/`-help` request help, unless defined by the user.
#[derive(Debug)]
pub(crate) struct FlagSet {
    lookup: HashMap<String, usize>,
}

impl FlagSet {
    /// Register the names for each binder; the binder for `names[i]` is `binders[i]` during `parse`.
    pub(crate) fn new(names: &[FlagNames]) -> Result<Self, ConfigError> {
        let mut lookup = HashMap::default();

        for (index, FlagNames { name, short }) in names.iter().enumerate() {
            for alias in std::iter::once(name).chain(short.iter()) {
                validate_name(alias)?;

                if lookup.insert(alias.clone(), index).is_some() {
                    return Err(ConfigError(format!(
                        "flag redefined: {FLAG_PREFIX}{alias}."
                    )));
                }
            }
        }

        Ok(Self { lookup })
    }

    /// Apply the flags in `tokens` to `record`, returning the residual (non-flag) tokens.
    pub(crate) fn parse<R>(
        &self,
        record: &mut R,
        binders: &mut [Box<dyn AnonymousBinder<R>>],
        tokens: &[&str],
    ) -> Result<Vec<String>, BindError> {
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];

            if token.chars().count() < 2 || !token.starts_with(FLAG_PREFIX) {
                break;
            }

            let mut name = &token[1..];

            if let Some(stripped) = name.strip_prefix(FLAG_PREFIX) {
                if stripped.is_empty() {
                    // The terminator is consumed, everything after it is residual.
                    index += 1;
                    break;
                }

                name = stripped;
            }

            if name.is_empty() || name.starts_with(FLAG_PREFIX) || name.starts_with('=') {
                return Err(ParseError(format!("bad flag syntax: {token}")).into());
            }

            index += 1;
            let (name, inline) = match name.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (name, None),
            };

            let position = match self.lookup.get(name) {
                Some(position) => *position,
                None if name == HELP_NAME || name == HELP_SHORT => return Err(BindError::Help),
                None => {
                    return Err(ParseError(format!(
                        "flag provided but not defined: {FLAG_PREFIX}{name}"
                    ))
                    .into())
                }
            };
            let binder = &mut binders[position];

            if binder.is_bool_flag() {
                let value = inline.unwrap_or("true");
                binder.set(record, value).map_err(|_| {
                    ParseError(format!(
                        "invalid boolean value '{value}' for {FLAG_PREFIX}{name}"
                    ))
                })?;
            } else {
                let value = match inline {
                    Some(value) => value,
                    None if index < tokens.len() => {
                        index += 1;
                        tokens[index - 1]
                    }
                    None => {
                        return Err(ParseError(format!(
                            "flag needs an argument: {FLAG_PREFIX}{name}"
                        ))
                        .into())
                    }
                };
                binder.set(record, value).map_err(|error| {
                    ParseError(format!(
                        "invalid value '{value}' for flag {FLAG_PREFIX}{name}: {error}"
                    ))
                })?;
            }
        }

        Ok(tokens[index..].iter().map(|token| token.to_string()).collect())
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError("flag names must not be empty.".to_string()));
    }

    if name.starts_with(FLAG_PREFIX) {
        return Err(ConfigError(format!(
            "flag '{name}' must not begin with '{FLAG_PREFIX}'."
        )));
    }

    if name.contains('=') {
        return Err(ConfigError(format!("flag '{name}' must not contain '='.")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Binder;
    use crate::model::Config;
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Record {
        count: u32,
        verbose: bool,
        name: String,
    }

    fn names(name: &str, short: Option<&str>) -> FlagNames {
        FlagNames {
            name: name.to_string(),
            short: short.map(|s| s.to_string()),
        }
    }

    fn setup() -> (FlagSet, Vec<Box<dyn AnonymousBinder<Record>>>) {
        let flag_set = FlagSet::new(&[
            names("count", Some("c")),
            names("verbose", Some("v")),
            names("name", None),
        ])
        .unwrap();
        let mut binders: Vec<Box<dyn AnonymousBinder<Record>>> = vec![
            Box::new(Binder::new(|r: &mut Record| &mut r.count, None, None)),
            Box::new(Binder::new(|r: &mut Record| &mut r.verbose, None, None)),
            Box::new(Binder::new(|r: &mut Record| &mut r.name, None, None)),
        ];

        for binder in binders.iter_mut() {
            binder.configure(&Config::default());
        }

        (flag_set, binders)
    }

    fn parse(tokens: &[&str]) -> (Record, Result<Vec<String>, BindError>) {
        let (flag_set, mut binders) = setup();
        let mut record = Record::default();
        let result = flag_set.parse(&mut record, &mut binders, tokens);
        (record, result)
    }

    #[test]
    fn no_tokens() {
        let (record, result) = parse(&[]);
        assert_eq!(result.unwrap(), Vec::<String>::default());
        assert_eq!(record.count, 0);
        assert!(!record.verbose);
    }

    #[rstest]
    #[case(vec!["-count=5"])]
    #[case(vec!["-count", "5"])]
    #[case(vec!["--count=5"])]
    #[case(vec!["--count", "5"])]
    #[case(vec!["-c=5"])]
    #[case(vec!["-c", "5"])]
    #[case(vec!["-count=1", "-c", "5"])]
    fn value_forms(#[case] tokens: Vec<&str>) {
        let (record, result) = parse(&tokens);
        assert_eq!(result.unwrap(), Vec::<String>::default());
        assert_eq!(record.count, 5);
    }

    #[rstest]
    #[case(vec!["-verbose"], true)]
    #[case(vec!["-v"], true)]
    #[case(vec!["--verbose"], true)]
    #[case(vec!["-verbose=true"], true)]
    #[case(vec!["-verbose=T"], true)]
    #[case(vec!["-verbose=false"], false)]
    #[case(vec!["-verbose", "-verbose=0"], false)]
    fn bool_forms(#[case] tokens: Vec<&str>, #[case] expected: bool) {
        let (record, result) = parse(&tokens);
        result.unwrap();
        assert_eq!(record.verbose, expected);
    }

    #[test]
    fn bool_does_not_consume_next() {
        let (record, result) = parse(&["-verbose", "false"]);
        assert_eq!(result.unwrap(), vec!["false".to_string()]);
        assert!(record.verbose);
    }

    #[test]
    fn value_may_look_like_flag() {
        let (record, result) = parse(&["-name", "-count"]);
        assert_eq!(result.unwrap(), Vec::<String>::default());
        assert_eq!(record.name, "-count");
        assert_eq!(record.count, 0);
    }

    #[test]
    fn empty_inline_value() {
        let (record, result) = parse(&["-name=", "-c=2"]);
        result.unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.count, 2);
    }

    #[rstest]
    #[case(vec!["a"], vec!["a"])]
    #[case(vec!["-", "-c=1"], vec!["-", "-c=1"])]
    #[case(vec!["-c=1", "a", "-v"], vec!["a", "-v"])]
    #[case(vec!["-c=1", "--", "-v"], vec!["-v"])]
    #[case(vec!["--", "--"], vec!["--"])]
    #[case(vec!["--"], vec![])]
    fn residual(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let (record, result) = parse(&tokens);
        assert_eq!(
            result.unwrap(),
            expected.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
        assert!(!record.verbose);
    }

    #[rstest]
    #[case(vec!["---count=1"], "bad flag syntax: ---count=1")]
    #[case(vec!["-=1"], "bad flag syntax: -=1")]
    #[case(vec!["--=1"], "bad flag syntax: --=1")]
    #[case(vec!["-what"], "flag provided but not defined: -what")]
    #[case(vec!["-what=1"], "flag provided but not defined: -what")]
    #[case(vec!["-count"], "flag needs an argument: -count")]
    #[case(vec!["-count=abc"], "invalid value 'abc' for flag -count: 'abc' cannot convert to u32.")]
    #[case(vec!["-c", "-1"], "invalid value '-1' for flag -c: '-1' cannot convert to u32.")]
    #[case(vec!["-verbose=maybe"], "invalid boolean value 'maybe' for -verbose")]
    fn errors(#[case] tokens: Vec<&str>, #[case] expected: &str) {
        let (_, result) = parse(&tokens);
        assert_matches!(result, Err(BindError::Parse(ParseError(message))) => {
            assert_eq!(message, expected);
        });
    }

    #[test]
    fn error_keeps_prior() {
        let (record, result) = parse(&["-c=3", "-count=x"]);
        assert_matches!(result, Err(BindError::Parse(_)));
        assert_eq!(record.count, 3);
    }

    #[rstest]
    #[case(vec!["-h"])]
    #[case(vec!["-help"])]
    #[case(vec!["--help"])]
    #[case(vec!["-c=1", "-h", "-what"])]
    fn help(#[case] tokens: Vec<&str>) {
        let (_, result) = parse(&tokens);
        assert_matches!(result, Err(BindError::Help));
    }

    #[test]
    fn help_user_defined() {
        // Setup
        let flag_set = FlagSet::new(&[names("help", Some("h"))]).unwrap();
        let mut binders: Vec<Box<dyn AnonymousBinder<Record>>> =
            vec![Box::new(Binder::new(|r: &mut Record| &mut r.verbose, None, None))];
        binders[0].configure(&Config::default());
        let mut record = Record::default();

        // Execute
        let result = flag_set.parse(&mut record, &mut binders, &["-h"]);

        // Verify
        result.unwrap();
        assert!(record.verbose);
    }

    #[rstest]
    #[case(vec![names("a", None), names("a", None)], "flag redefined: -a.")]
    #[case(vec![names("a", Some("b")), names("b", None)], "flag redefined: -b.")]
    #[case(vec![names("a", Some("a"))], "flag redefined: -a.")]
    #[case(vec![names("", None)], "flag names must not be empty.")]
    #[case(vec![names("-a", None)], "flag '-a' must not begin with '-'.")]
    #[case(vec![names("a", Some("b=c"))], "flag 'b=c' must not contain '='.")]
    fn invalid_names(#[case] flags: Vec<FlagNames>, #[case] expected: &str) {
        assert_matches!(FlagSet::new(&flags), Err(ConfigError(message)) => {
            assert_eq!(message, expected);
        });
    }
}
