use std::env;
use std::path::PathBuf;

pub const SCRIPT_NAME: &str = "action.sh";

/// Resolve the companion script path.
///
/// An explicit override wins, then a default baked in at compile time, then
/// `action.sh` next to the launcher binary. The sibling path is used as-is:
/// a script that is not actually there has to fail the launch instead of
/// silently running something else found on disk.
pub fn find_action_script(script: Option<&str>) -> PathBuf {
    if let Some(path) = script {
        return PathBuf::from(path);
    }

    #[cfg(default_action_script)]
    if let Some(path) = option_env!("ACTION_SCRIPT_PATH") {
        return PathBuf::from(path);
    }

    let Ok(bin) = env::current_exe() else {
        return PathBuf::from(SCRIPT_NAME);
    };

    match bin.parent() {
        Some(parent) => parent.join(SCRIPT_NAME),
        None => PathBuf::from(SCRIPT_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        assert_eq!(
            PathBuf::from("/tmp/other.sh"),
            find_action_script(Some("/tmp/other.sh"))
        );
    }

    #[cfg(not(default_action_script))]
    #[test]
    fn default_is_exe_sibling() {
        let script = find_action_script(None);

        assert_eq!(
            Some(SCRIPT_NAME),
            script.file_name().and_then(|name| name.to_str())
        );

        let exe = env::current_exe().expect("current_exe");
        assert_eq!(exe.parent(), script.parent());
    }
}
