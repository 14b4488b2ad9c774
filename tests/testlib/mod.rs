#![allow(dead_code)]

pub use std::fs;
pub use std::path::{Path, PathBuf};
pub use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

pub const LAUNCHER: &str = env!("CARGO_BIN_EXE_action-cli");
pub const GET_PACKAGE_NAME: &str = env!("CARGO_BIN_EXE_get-package-name");

pub fn cmd(bin: &str) -> Command {
    let mut cmd = Command::new(bin);

    // stdout + stderr captured by default
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    cmd.env_clear();
    if let Some(path) = std::env::var_os("PATH") {
        cmd.env("PATH", path);
    }

    cmd
}

pub fn launcher() -> Command {
    cmd(LAUNCHER)
}

pub fn get_package_name() -> Command {
    cmd(GET_PACKAGE_NAME)
}

pub fn output(cmd: &mut Command) -> Output {
    cmd.output().expect("run command")
}

pub fn lines(bytes: &[u8]) -> Vec<String> {
    let data = String::from_utf8(bytes.to_vec()).expect("invalid utf8 bytes");
    data.split('\n')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned())
        .collect()
}

/// A companion script written to its own scratch directory. The directory
/// lives as long as the value does.
pub struct Script {
    dir: TempDir,
    path: PathBuf,
}

impl Script {
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("action.sh");
        fs::write(&path, body).expect("write stub script");
        Self { dir, path }
    }

    pub fn as_str(&self) -> &str {
        self.path.to_str().expect("utf8 path")
    }
}

/// Stub companion that prints each positional argument on its own line.
pub fn echo_args_script() -> Script {
    Script::new("printf '%s\\n' \"$@\"\n")
}

/// Scratch directory populated with the given (filename, contents) pairs.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (name, body) in files {
        fs::write(dir.path().join(name), body).expect("write project file");
    }
    dir
}
