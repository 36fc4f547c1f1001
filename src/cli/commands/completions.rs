//! Shell completion generation
//!
//! Generates shell completion scripts for bash, zsh, fish, and PowerShell,
//! covering every registered resource command.
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(resctl completions bash)
//!
//! # Zsh - add to ~/.zshrc
//! source <(resctl completions zsh)
//!
//! # Fish
//! resctl completions fish > ~/.config/fish/completions/resctl.fish
//! ```

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for the full command tree
pub fn run(args: &CompletionsArgs, mut cmd: Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, out);
}
