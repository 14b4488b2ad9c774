use std::process::{exit, Command};

use action_cli::config::Config;
use action_cli::run;

fn main() {
    let cmd = Command::from(Config::from_env());
    exit(run::run(cmd));
}
