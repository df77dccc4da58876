mod apps;
mod commands;
mod common;
mod completions;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::apps::InstallTarget;
use crate::common::arch::Architecture;
use crate::completions::CompletionCommands;
use crate::ui::prelude::*;

/// Install desktop applications the right way for the running distribution
#[derive(Parser, Debug)]
#[command(name = "distro-apps", author, version, about, long_about = None)]
pub struct Cli {
    /// Show debug output such as executed commands and resolved URLs
    #[arg(short, long, global = true)]
    debug: bool,

    /// Print what would be done without changing the system
    #[arg(long, global = true)]
    dry_run: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Detect the distro from this os-release file
    #[arg(long, global = true, value_name = "PATH")]
    os_release: Option<PathBuf>,

    /// Treat the machine as this architecture
    #[arg(long, global = true, value_enum)]
    arch: Option<Architecture>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the detected distribution, architecture and package manager
    Detect,
    /// List installable applications
    List,
    /// Install an application
    Install {
        /// Skip the confirmation notice
        #[arg(short, long, global = true)]
        yes: bool,

        #[command(subcommand)]
        target: InstallTarget,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Shell completion scripts
    Completions {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with every default spelled out
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Globals {
    pub dry_run: bool,
    pub config: Option<PathBuf>,
    pub os_release: Option<PathBuf>,
    pub arch: Option<Architecture>,
}

pub fn cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();

    let color = !cli.no_color && cli.output == OutputFormat::Text;
    if !color {
        colored::control::set_override(false);
    }
    ui::init(cli.output, color);
    ui::set_debug_mode(cli.debug);

    let globals = Globals {
        dry_run: cli.dry_run,
        config: cli.config,
        os_release: cli.os_release,
        arch: cli.arch,
    };

    let result = match cli.command {
        Commands::Detect => commands::handle_detect_command(&globals),
        Commands::List => commands::handle_list_command(),
        Commands::Install { yes, target } => {
            commands::handle_install_command(&globals, target, yes)
        }
        Commands::Config { command } => commands::handle_config_command(&globals, command),
        Commands::Completions { command } => commands::handle_completions_command(command),
    };

    if let Err(err) = result {
        emit(
            Level::Error,
            "error",
            &format!("{} {:#}", char::from(NerdFont::CrossCircle), err),
            None,
        );
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_install_with_global_flags() {
        let cli = Cli::try_parse_from([
            "distro-apps",
            "--dry-run",
            "install",
            "jetbrains",
            "goland",
            "--arch",
            "arm64",
            "--yes",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.arch, Some(Architecture::Arm64));
        match cli.command {
            Commands::Install { yes, target } => {
                assert!(yes);
                assert!(matches!(target, InstallTarget::Jetbrains { .. }));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_firefox_variant_defaults_to_standard() {
        let cli = Cli::try_parse_from(["distro-apps", "install", "firefox"]).unwrap();
        match cli.command {
            Commands::Install {
                target: InstallTarget::Firefox { variant },
                ..
            } => assert_eq!(variant, apps::browser::firefox::FirefoxVariant::Firefox),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
