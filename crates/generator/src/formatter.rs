//! Formatting of generated Go source

use provider_codegen_common::{GeneratorError, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Run `go fmt` on a generated file
pub fn go_fmt(path: &Path) -> Result<()> {
    run_formatter("go", &["fmt"], path)
}

fn run_formatter(program: &str, args: &[&str], path: &Path) -> Result<()> {
    debug!(program, ?args, path = %path.display(), "formatting");

    let output = Command::new(program)
        .args(args)
        .arg(path)
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                GeneratorError::Generation(format!("`{}` not found in PATH", program))
            }
            _ => GeneratorError::Generation(format!("Failed to run `{}`: {}", program, e)),
        })?;

    if !output.status.success() {
        return Err(GeneratorError::Generation(format!(
            "`{} {}` failed on {} ({}): {}",
            program,
            args.join(" "),
            path.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(())
}
