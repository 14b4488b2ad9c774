use std::env;

fn main() {
    println!("cargo::rustc-check-cfg=cfg(default_action_script)");
    println!("cargo::rerun-if-env-changed=ACTION_SCRIPT_PATH");
    if env::var("ACTION_SCRIPT_PATH").is_ok_and(|script| !script.trim().is_empty()) {
        println!("cargo::rustc-cfg=default_action_script");
    }
}
