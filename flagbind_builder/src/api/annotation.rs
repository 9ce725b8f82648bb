use std::str::FromStr;

use crate::model::Trigger;
use crate::parser::ConfigError;

/// The compact flag annotation `name[,default[,usage]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FlagAnnotation {
    pub(crate) name: String,
    pub(crate) default: Option<String>,
    pub(crate) usage: Option<String>,
}

/// The command annotation `method[,trigger]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandAnnotation {
    pub(crate) method: Option<String>,
    pub(crate) trigger: Option<Trigger>,
}

// Components are trimmed, and an empty component is absent.
fn component(part: Option<&str>) -> Option<String> {
    part.map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
}

pub(crate) fn parse_flag_annotation(annotation: &str) -> FlagAnnotation {
    // The usage is the remainder, so that it may contain commas.
    let mut parts = annotation.splitn(3, ',');
    let name = component(parts.next()).unwrap_or_default();
    let default = component(parts.next());
    let usage = component(parts.next());

    FlagAnnotation {
        name,
        default,
        usage,
    }
}

pub(crate) fn parse_command_annotation(annotation: &str) -> Result<CommandAnnotation, ConfigError> {
    let (method, trigger) = match annotation.split_once(',') {
        Some((method, trigger)) => (method, Some(trigger)),
        None => (annotation, None),
    };
    let trigger = match component(trigger) {
        Some(trigger) => Some(Trigger::from_str(&trigger)?),
        None => None,
    };

    Ok(CommandAnnotation {
        method: component(Some(method)),
        trigger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn flag(name: &str, default: Option<&str>, usage: Option<&str>) -> FlagAnnotation {
        FlagAnnotation {
            name: name.to_string(),
            default: default.map(str::to_string),
            usage: usage.map(str::to_string),
        }
    }

    #[rstest]
    #[case("", flag("", None, None))]
    #[case("age", flag("age", None, None))]
    #[case(" age ", flag("age", None, None))]
    #[case("age,23", flag("age", Some("23"), None))]
    #[case("age, 23 ,", flag("age", Some("23"), None))]
    #[case("age,,how old", flag("age", None, Some("how old")))]
    #[case("age, 23 , how old ", flag("age", Some("23"), Some("how old")))]
    #[case("tags,a@b,the tags, comma separated", flag("tags", Some("a@b"), Some("the tags, comma separated")))]
    fn flag_annotation(#[case] annotation: &str, #[case] expected: FlagAnnotation) {
        assert_eq!(parse_flag_annotation(annotation), expected);
    }

    #[rstest]
    #[case("", None, None)]
    #[case(",", None, None)]
    #[case("show", Some("show"), None)]
    #[case(" show ,", Some("show"), None)]
    #[case("show,false", Some("show"), Some(Trigger::False))]
    #[case(",empty", None, Some(Trigger::Empty))]
    #[case(" , notempty ", None, Some(Trigger::NotEmpty))]
    fn command_annotation(
        #[case] annotation: &str,
        #[case] method: Option<&str>,
        #[case] trigger: Option<Trigger>,
    ) {
        assert_eq!(
            parse_command_annotation(annotation).unwrap(),
            CommandAnnotation {
                method: method.map(str::to_string),
                trigger,
            }
        );
    }

    #[rstest]
    #[case("show,maybe")]
    #[case("show,true,false")]
    fn command_annotation_invalid(#[case] annotation: &str) {
        assert_matches!(parse_command_annotation(annotation), Err(ConfigError(_)));
    }
}
