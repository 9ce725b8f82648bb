use flagbind::{DispatchMode, Flag, FlagParser, Record, Schema, Trigger};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Summer {
    items: Vec<u32>,
    weights: BTreeMap<String, f32>,
    quiet: bool,
    label: String,
}

impl Record for Summer {
    fn schema() -> Schema<Self> {
        Schema::new()
            .flag(
                Flag::new("items", |r: &mut Summer| &mut r.items)
                    .short("i")
                    .default("1,2,3")
                    .usage("The items to sum."),
            )
            .flag(
                Flag::new("weights", |r: &mut Summer| &mut r.weights)
                    .usage("The weight of each label.")
                    .provider(|r: &Summer| {
                        BTreeMap::from([(r.label.clone(), 1.0)])
                    }),
            )
            .flag(
                Flag::new("quiet", |r: &mut Summer| &mut r.quiet)
                    .usage("Skip the sum.")
                    .command("loud", |r: &mut Summer| {
                        let sum: u32 = r.items.iter().sum();
                        let weight = r.weights.get(&r.label).copied().unwrap_or(1.0);
                        println!("Sum: {}", sum as f32 * weight);
                    })
                    .trigger(Trigger::False),
            )
            .flag(
                Flag::annotated("label, total, The label to weigh by.", |r: &mut Summer| {
                    &mut r.label
                }),
            )
    }
}

fn main() {
    let mut summer = Summer::default();
    let mut parser = FlagParser::new("summer", DispatchMode::OptionTriggered)
        .item_separator(",")
        .build();
    parser.parse_and_run_command(&mut summer);
}
