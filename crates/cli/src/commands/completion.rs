//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

pub struct Options {
    pub shell: String,
}

/// Generate shell completion script
pub fn run(options: &Options) -> i32 {
    let stdout = io::stdout();
    match run_inner(options, &mut stdout.lock()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    if name.is_empty() {
        return Err(CliError::Usage(
            "Shell name is required. Supported shells: bash, zsh, fish".to_string(),
        ));
    }
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(CliError::Usage(format!(
            "Unsupported shell: {name}. Supported shells: bash, zsh, fish"
        ))),
    }
}

fn run_inner(options: &Options, out: &mut dyn Write) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    let mut cmd = get_cli_command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
