use flagbind::derive::*;
use flagbind::{DispatchMode, FlagParser};

#[derive(Debug, Default, FlagRecord)]
struct Store {
    #[flagbind("limit, 10, The maximum number of items.", short = "l")]
    limit: usize,
    #[flagbind("verbose,, Print every field.")]
    verbose: bool,
    #[flagbind(sub_command = "list", usage = "List the items.")]
    list: (),
    #[flagbind(sub_command = "purge", usage = "Delete every item.")]
    purge: (),
    args: Vec<String>,
}

impl Store {
    fn list_command(&mut self) {
        for item in self.args.iter().take(self.limit) {
            if self.verbose {
                println!("item: {item:?}");
            } else {
                println!("{item}");
            }
        }
    }

    fn purge_command(&mut self) {
        println!("Purged {} item(s).", self.args.len());
        self.args.clear();
    }
}

fn main() {
    let mut store = Store::default();
    let mut parser = FlagParser::new("store", DispatchMode::SubCommandSelected)
        .about("Operate on a list of items.")
        .build();
    parser.parse_and_run_command(&mut store);
}
