use std::path::PathBuf;
use std::process::exit;

use action_cli::pkgname;

fn main() {
    let root = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    match pkgname::package_name(&root) {
        Ok(name) => println!("{name}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            exit(1);
        }
    }
}
