use assert_matches::assert_matches;
use flagbind::derive::*;
use flagbind::{BindError, DispatchMode, FlagParser, GeneralParser};
use rstest::rstest;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default, FlagRecord)]
struct Options {
    #[flagbind("name, lycb, The user name.", short = "n")]
    name: String,
    #[flagbind(flag = "age", default = "23", usage = "The user age.")]
    age: i32,
    #[flagbind("sleep, 10ms")]
    sleep: Duration,
    #[flagbind("addr, beijing@linzhou")]
    addresses: Vec<String>,
    #[flagbind("header, name=lisi@age=30", provider)]
    headers: HashMap<String, String>,
    #[flagbind("show_list, false", command)]
    show_list: bool,
    #[flagbind("greeting,, The greeting.", command = "greet,notempty")]
    greeting: String,
    #[flagbind("quiet", command = "shout,false")]
    quiet: bool,
    args: Vec<String>,
    calls: Vec<String>,
}

impl Options {
    fn headers_default(&self) -> HashMap<String, String> {
        HashMap::from([("lang".to_string(), self.name.clone())])
    }

    fn show_list_command(&mut self) {
        self.calls.push("show_list".to_string());
    }

    fn greet_command(&mut self) {
        self.calls.push(format!("greet {}", self.greeting));
    }

    fn shout_command(&mut self) {
        self.calls.push("shout".to_string());
    }
}

#[derive(Debug, Default, FlagRecord)]
struct Store {
    #[flagbind("limit, 10", short = "l")]
    limit: usize,
    #[flagbind(sub_command = "list", usage = "List the items.")]
    list: (),
    #[flagbind(sub_command = "purge-all")]
    purge: (),
    args: Vec<String>,
    ran: Vec<String>,
}

impl Store {
    fn list_command(&mut self) {
        self.ran.push(format!("list {} {:?}", self.limit, self.args));
    }

    fn purge_command(&mut self) {
        self.ran.push("purge".to_string());
    }
}

#[derive(Debug, Default, FlagRecord)]
struct Misconfigured {
    #[flagbind("count", command)]
    count: u32,
}

impl Misconfigured {
    fn count_command(&mut self) {}
}

#[derive(Debug, Default, FlagRecord)]
struct Redefined {
    #[flagbind("level", short = "v")]
    level: u8,
    #[flagbind("v")]
    verbose: bool,
}

#[derive(Debug, Default, FlagRecord)]
struct Person {
    #[flagbind("age, 23", provider = "forty_two")]
    age: u32,
}

impl Person {
    fn forty_two(&self) -> u32 {
        42
    }
}

fn parser(mode: DispatchMode) -> GeneralParser {
    FlagParser::new("program", mode).build_parser().unwrap()
}

#[test]
fn derive_defaults() {
    // Setup
    let mut options = Options::default();

    // Execute
    let dispatcher = parser(DispatchMode::OptionTriggered)
        .parse_tokens(&mut options, &[])
        .unwrap();
    let fired = dispatcher.run(&mut options).unwrap();

    // Verify
    assert_eq!(options.name, "lycb");
    assert_eq!(options.age, 23);
    assert_eq!(options.sleep, Duration::from_millis(10));
    assert_eq!(options.addresses, vec!["beijing", "linzhou"]);
    assert_eq!(
        options.headers,
        HashMap::from([("lang".to_string(), "lycb".to_string())])
    );
    assert!(!options.show_list);
    assert_eq!(options.greeting, "");
    assert!(options.args.is_empty());
    assert_eq!(fired, 1);
    assert_eq!(options.calls, vec!["shout"]);
}

#[test]
fn derive_option_commands() {
    // Setup
    let mut options = Options::default();
    let tokens = [
        "-n", "bob", "-age=40", "-show_list", "-greeting", "hi", "-quiet", "-addr", "x", "rest",
        "more",
    ];

    // Execute
    let dispatcher = parser(DispatchMode::OptionTriggered)
        .parse_tokens(&mut options, &tokens)
        .unwrap();
    let fired = dispatcher.run(&mut options).unwrap();

    // Verify
    assert_eq!(options.name, "bob");
    assert_eq!(options.age, 40);
    assert_eq!(options.addresses, vec!["x"]);
    // The provider sees the defaults, not the command line.
    assert_eq!(options.headers["lang"], "lycb");
    assert_eq!(options.args, vec!["rest", "more"]);
    assert_eq!(fired, 2);
    assert_eq!(options.calls, vec!["show_list", "greet hi"]);
}

#[rstest]
#[case(vec![], 42)]
#[case(vec!["-age=50"], 50)]
fn derive_precedence(#[case] tokens: Vec<&str>, #[case] expected: u32) {
    let mut person = Person::default();

    parser(DispatchMode::OptionTriggered)
        .parse_tokens(&mut person, &tokens)
        .unwrap();

    assert_eq!(person.age, expected);
}

#[test]
fn derive_header_override() {
    let mut options = Options::default();

    parser(DispatchMode::OptionTriggered)
        .parse_tokens(&mut options, &["-header", "a=1@b=2@c"])
        .unwrap();

    assert_eq!(
        options.headers,
        HashMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ])
    );
}

#[rstest]
#[case(vec!["-age", "old"])]
#[case(vec!["-missing"])]
#[case(vec!["-age"])]
#[case(vec!["-quiet=maybe"])]
fn derive_parse_error(#[case] tokens: Vec<&str>) {
    let mut options = Options::default();

    let result = parser(DispatchMode::OptionTriggered).parse_tokens(&mut options, &tokens);

    assert_matches!(result, Err(BindError::Parse(_)));
    assert!(options.calls.is_empty());
}

#[test]
fn derive_help() {
    let mut options = Options::default();

    let result = parser(DispatchMode::OptionTriggered).parse_tokens(&mut options, &["-help"]);

    assert_matches!(result, Err(BindError::Help));
}

#[test]
fn derive_sub_command() {
    // Setup
    let mut store = Store::default();

    // Execute
    let dispatcher = parser(DispatchMode::SubCommandSelected)
        .parse_tokens(&mut store, &["list", "-l", "3", "a", "b"])
        .unwrap();

    // Verify
    assert_eq!(dispatcher.active(), Some("list"));
    assert_eq!(dispatcher.run(&mut store).unwrap(), 1);
    assert_eq!(store.ran, vec![r#"list 3 ["a", "b"]"#]);
}

#[test]
fn derive_sub_command_renamed() {
    let mut store = Store::default();

    let dispatcher = parser(DispatchMode::SubCommandSelected)
        .parse_tokens(&mut store, &["purge-all"])
        .unwrap();
    dispatcher.run(&mut store).unwrap();

    assert_eq!(store.limit, 10);
    assert_eq!(store.ran, vec!["purge"]);
}

#[rstest]
#[case(vec![])]
#[case(vec!["-limit", "3", "list"])]
#[case(vec!["-h"])]
#[case(vec!["--help", "list"])]
fn derive_sub_command_missing(#[case] tokens: Vec<&str>) {
    let mut store = Store::default();

    let result = parser(DispatchMode::SubCommandSelected).parse_tokens(&mut store, &tokens);

    assert_matches!(result, Err(BindError::Usage(_)));
    assert_eq!(result.err().map(|error| error.exit_code()), Some(1));
    assert!(store.ran.is_empty());
}

#[test]
fn derive_sub_command_unknown() {
    let mut store = Store::default();

    let dispatcher = parser(DispatchMode::SubCommandSelected)
        .parse_tokens(&mut store, &["list-all"])
        .unwrap();

    assert_matches!(dispatcher.run(&mut store), Err(BindError::Usage(_)));
    assert!(store.ran.is_empty());
}

#[test]
fn derive_misconfigured() {
    let mut misconfigured = Misconfigured::default();

    let result =
        parser(DispatchMode::OptionTriggered).parse_tokens(&mut misconfigured, &["-count", "1"]);

    assert_matches!(result, Err(BindError::Config(_)));
    assert_eq!(misconfigured.count, 0);
}

#[test]
fn derive_redefined() {
    let mut redefined = Redefined::default();

    let result = parser(DispatchMode::OptionTriggered).parse_tokens(&mut redefined, &[]);

    assert_matches!(result, Err(BindError::Config(error)) => {
        assert_eq!(error.to_string(), "Config error: flag redefined: -v.");
    });
}
