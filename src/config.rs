use crate::script::find_action_script;
use crate::util::split_shell_args;
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::process;

pub const USE_PYTEST_VAR: &str = "INPUT_USE_PYTEST";
pub const ISOLATE_VAR: &str = "INPUT_SHOULD_ISOLATE_TESTING";
pub const SCRIPT_VAR: &str = "ACTION_CLI_SCRIPT";
pub const RUNNER_VAR: &str = "ACTION_CLI_RUNNER";

const SHELL: &str = "bash";

/// A boolean action input.
///
/// Only the exact string `"true"` enables a flag; any other value, including
/// an absent variable, an empty string, or a differently-cased spelling,
/// leaves it disabled. Rendered as `1`/`0` on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flag(bool);

impl Flag {
    fn from_value(value: Option<&str>) -> Self {
        Self(matches!(value, Some("true")))
    }

    pub fn from_env(name: &str) -> Self {
        Self::from_value(env::var(name).ok().as_deref())
    }

    pub fn enabled(self) -> bool {
        self.0
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(if self.0 { "1" } else { "0" })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub enum Runner {
    #[default]
    Default,
    User(String),
}

impl Runner {
    fn from_env() -> Self {
        match nonempty_var(RUNNER_VAR) {
            Some(runner) => Self::User(runner),
            None => Self::Default,
        }
    }
}

/// Launcher configuration, read from the environment exactly once at
/// startup.
#[derive(Debug, Default)]
pub struct Config {
    pub use_pytest: Flag,
    pub isolate: Flag,
    pub script: Option<String>,
    pub runner: Runner,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            use_pytest: Flag::from_env(USE_PYTEST_VAR),
            isolate: Flag::from_env(ISOLATE_VAR),
            script: nonempty_var(SCRIPT_VAR),
            runner: Runner::from_env(),
        }
    }
}

impl From<Config> for process::Command {
    fn from(cfg: Config) -> Self {
        let script = find_action_script(cfg.script.as_deref());

        // fixed argument order: script path, use_pytest, isolate
        let mut script_args = vec![
            script.to_string_lossy().into_owned(),
            cfg.use_pytest.to_string(),
            cfg.isolate.to_string(),
        ];

        let bin: String;
        let mut args: Vec<String> = vec![];

        match cfg.runner {
            Runner::Default => {
                bin = SHELL.to_owned();
                args.append(&mut script_args);
            }
            Runner::User(runner) => {
                let mut user_args = split_shell_args(&runner);
                bin = user_args.remove(0);
                args.append(&mut user_args);
                args.push(SHELL.to_owned());
                args.append(&mut script_args);
            }
        };

        let mut c = process::Command::new(bin);
        c.args(args);
        c
    }
}

fn nonempty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
