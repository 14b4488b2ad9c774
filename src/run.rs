use std::os::unix::process::ExitStatusExt;
use std::process::Command;

/// Spawn the command and block until it exits, returning the exit code the
/// launcher should terminate with.
///
/// stdin/stdout/stderr are inherited, so the child writes straight to our
/// streams. No signal handlers are installed: signals reach the child via
/// the shared process group and it reacts on its own.
pub fn run(mut cmd: Command) -> i32 {
    let mut proc = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            let prog = cmd.get_program().to_string_lossy();
            eprintln!("ERROR: failed to run command \"{prog}\": {e}");
            return 2;
        }
    };

    match proc.wait() {
        Ok(status) => match (status.code(), status.signal()) {
            (Some(rc), _) => rc,
            (None, Some(sig)) => sig + 128,
            (None, None) => {
                eprintln!("WARN: child exited without a status code but was not signaled");
                127
            }
        },
        Err(e) => {
            eprintln!("failed waiting for child process to exit: {e}");
            let _ = proc.kill();
            137
        }
    }
}
