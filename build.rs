//! Build script that generates the manual page from the CLI definition.

use clap::CommandFactory;
use clap_mangen::Man;
use std::{env, fs, path::PathBuf};

#[path = "src/cli.rs"]
#[expect(
    dead_code,
    reason = "Only type definitions are needed for man page generation"
)]
mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Regenerate the manual page when the CLI or metadata changes.
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_NAME");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_DESCRIPTION");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let cmd = cli::Cli::command();
    let name = cmd.get_name().to_owned();
    let pkg = env::var("CARGO_PKG_NAME").unwrap_or_else(|_| name.clone());
    if name != pkg {
        return Err(format!(
            "CLI name '{name}' differs from Cargo package name '{pkg}'; the man page expects {pkg}.1"
        )
        .into());
    }
    let man = Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    fs::write(out_dir.join(format!("{pkg}.1")), buf)?;

    Ok(())
}
