use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use clap_complete::Shell;

use crate::common::paths;

const BIN_NAME: &str = "distro-apps";

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SupportedShell {
    Bash,
    Zsh,
}

impl SupportedShell {
    fn as_complete_shell(self) -> Shell {
        match self {
            SupportedShell::Bash => Shell::Bash,
            SupportedShell::Zsh => Shell::Zsh,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            SupportedShell::Bash => "distro-apps.bash",
            SupportedShell::Zsh => "_distro-apps",
        }
    }

    fn install_instructions(self, install_path: &Path) -> String {
        match self {
            SupportedShell::Bash => format!(
                "Add this to your ~/.bashrc:\n  [ -r \"{0}\" ] && source \"{0}\"",
                install_path.display()
            ),
            SupportedShell::Zsh => format!(
                "Add this directory to your ~/.zshrc:\n  fpath=(\"{}\" $fpath)\nThen run: autoload -U compinit && compinit",
                install_path
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| install_path.to_string_lossy().into())
            ),
        }
    }
}

impl fmt::Display for SupportedShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupportedShell::Bash => write!(f, "bash"),
            SupportedShell::Zsh => write!(f, "zsh"),
        }
    }
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum CompletionCommands {
    /// Print the completion script to stdout
    Generate {
        #[arg(value_enum)]
        shell: SupportedShell,
    },
    /// Write the completion script to the data directory
    Install {
        #[arg(value_enum)]
        shell: SupportedShell,
        /// Write to this path instead
        #[arg(long)]
        output: Option<PathBuf>,
        /// Replace an existing script
        #[arg(long)]
        force: bool,
    },
}

pub fn generate(shell: SupportedShell) -> Result<String> {
    let mut command = crate::cli_command();
    let mut buffer = Vec::new();
    clap_complete::generate(shell.as_complete_shell(), &mut command, BIN_NAME, &mut buffer);
    String::from_utf8(buffer).context("rendering completions")
}

pub fn install(shell: SupportedShell, output: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let target_path = output.unwrap_or_else(|| paths::completions_dir().join(shell.file_name()));

    if target_path.exists() && !force {
        return Err(anyhow!(
            "{} already exists, pass --force to overwrite",
            target_path.display()
        ));
    }

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating completions directory {}", parent.display()))?;
    }

    let script = generate(shell)?;
    fs::write(&target_path, script)
        .with_context(|| format!("writing completion script to {}", target_path.display()))?;

    Ok(target_path)
}

pub fn instructions(shell: SupportedShell, install_path: &Path) -> String {
    shell.install_instructions(install_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mentions_subcommands() {
        let script = generate(SupportedShell::Bash).unwrap();
        assert!(script.contains("distro-apps"));
        assert!(script.contains("jetbrains"));
    }

    #[test]
    fn test_install_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("_distro-apps");

        let written = install(SupportedShell::Zsh, Some(target.clone()), false).unwrap();
        assert_eq!(written, target);
        assert!(install(SupportedShell::Zsh, Some(target.clone()), false).is_err());
        assert!(install(SupportedShell::Zsh, Some(target), true).is_ok());
    }

    #[test]
    fn test_zsh_instructions_point_at_directory() {
        let text = instructions(SupportedShell::Zsh, Path::new("/data/completions/_distro-apps"));
        assert!(text.contains("fpath=(\"/data/completions\" $fpath)"));
    }
}
