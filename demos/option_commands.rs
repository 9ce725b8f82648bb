use flagbind::derive::*;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default, FlagRecord)]
struct Options {
    #[flagbind("name, lycb, The user name.", short = "n")]
    name: String,
    #[flagbind("age, 23, The user age.")]
    age: i32,
    #[flagbind("salary, 1200.0, The user salary.")]
    salary: f64,
    #[flagbind("sleep, 10ms, How long to sleep.")]
    sleep: Duration,
    #[flagbind("addr, beijing@linzhou, The home addresses.")]
    addresses: Vec<String>,
    #[flagbind("header,, The request headers.", provider)]
    headers: HashMap<String, String>,
    #[flagbind("show_list, false, Show the list.", command)]
    show_list: bool,
    #[flagbind("show_detail, false, Show the detail.", command = "detail")]
    show_detail: bool,
    args: Vec<String>,
}

impl Options {
    fn headers_default(&self) -> HashMap<String, String> {
        HashMap::from([("lang".to_string(), "rust".to_string())])
    }

    fn show_list_command(&mut self) {
        println!("show list: {:?}", self.addresses);
    }

    fn detail_command(&mut self) {
        println!("show detail: {self:?}");
    }
}

fn main() {
    let mut options = Options::default();
    let fired = flagbind::parse_and_run_command(&mut options);

    if fired == 0 {
        std::thread::sleep(options.sleep);
        println!("{} ({}) earns {}.", options.name, options.age, options.salary);
        println!("Remaining: {:?}", options.args);
    }
}
