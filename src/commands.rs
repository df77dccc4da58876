//! Handlers behind each subcommand.

use anyhow::{Context, Result, bail};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use std::path::Path;

use crate::apps::{self, InstallContext, InstallTarget};
use crate::common::arch::Architecture;
use crate::common::cmd;
use crate::common::config::AppsConfig;
use crate::common::distro::{DistroIdentity, OS_RELEASE_PATH, detect_fullname};
use crate::common::host::{DryRunHost, Host, LocalHost};
use crate::common::package::PackageManager;
use crate::completions::{self, CompletionCommands};
use crate::ui::notice::notice;
use crate::ui::prelude::*;
use crate::{ConfigCommands, Globals};

impl Globals {
    fn os_release_path(&self) -> &Path {
        self.os_release
            .as_deref()
            .unwrap_or(Path::new(OS_RELEASE_PATH))
    }

    fn distro(&self) -> DistroIdentity {
        match &self.os_release {
            Some(path) => DistroIdentity::from_os_release_path(path),
            None => DistroIdentity::detect(),
        }
    }

    fn architecture(&self) -> Option<Architecture> {
        self.arch.or_else(Architecture::detect)
    }

    fn load_config(&self) -> Result<AppsConfig> {
        AppsConfig::load(&AppsConfig::path(self.config.as_deref())?)
    }
}

pub fn handle_detect_command(globals: &Globals) -> Result<()> {
    let distro = globals.distro();
    let arch = globals.architecture();
    let fullname = detect_fullname(globals.os_release_path())
        .unwrap_or_else(|_| "unknown".to_string());
    let manager = PackageManager::resolve(distro.family, cmd::command_exists);

    let field = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    let text = format!(
        "{} {}\n  family:          {}\n  derivative:      {}\n  architecture:    {}\n  package manager: {}",
        char::from(NerdFont::Desktop),
        fullname,
        field(distro.family.display_name()),
        field(distro.derivative.as_str()),
        arch.map(|a| a.as_str()).unwrap_or("unknown"),
        manager.map(|m| m.display_name()).unwrap_or("-"),
    );

    emit(
        Level::Info,
        "detect",
        &text,
        Some(serde_json::json!({
            "name": fullname,
            "family": distro.family.as_str(),
            "derivative": distro.derivative.as_str(),
            "arch": arch,
            "package_manager": manager.map(|m| m.display_name()),
        })),
    );
    Ok(())
}

pub fn handle_list_command() -> Result<()> {
    let catalog = apps::catalog();

    if get_output_format() == OutputFormat::Json {
        emit(
            Level::Info,
            "list",
            &format!("{} applications", catalog.len()),
            Some(serde_json::to_value(catalog).context("serializing catalog")?),
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["App", "Category", "Variants", "Supported", "Method"]);
    for info in catalog {
        let variants = if info.variants.is_empty() {
            "-".to_string()
        } else {
            info.variants.join(", ")
        };
        table.add_row(vec![
            format!("{} ({})", info.name, info.id),
            info.category.to_string(),
            variants,
            info.supported.to_string(),
            info.method.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn handle_install_command(globals: &Globals, target: InstallTarget, yes: bool) -> Result<()> {
    let config = globals.load_config()?;
    let distro = globals.distro();
    let arch = globals.architecture();

    let host: Box<dyn Host> = if globals.dry_run {
        Box::new(DryRunHost::new(&config)?)
    } else {
        Box::new(LocalHost::new(&config)?)
    };

    let mut app = target.into_app();

    if !yes && !globals.dry_run {
        let accepted = notice(
            &format!(
                "{} will be installed on this {} system with root privileges",
                app.name(),
                distro
            ),
            "Continue",
        )?;
        if !accepted {
            emit(
                Level::Warn,
                "install.cancelled",
                &format!("{} Installation cancelled", char::from(NerdFont::Info)),
                None,
            );
            return Ok(());
        }
    }

    let ctx = InstallContext::new(host.as_ref(), &config, distro, arch);
    if let Err(err) = apps::install_app(app.as_mut(), &ctx) {
        if err.is_unsupported() {
            emit(
                Level::Info,
                "install.unsupported",
                &format!(
                    "{} Run `distro-apps list` to see where each application can be installed",
                    char::from(NerdFont::Info)
                ),
                None,
            );
        }
        return Err(err.into());
    }
    Ok(())
}

pub fn handle_config_command(globals: &Globals, command: ConfigCommands) -> Result<()> {
    let path = AppsConfig::path(globals.config.as_deref())?;

    match command {
        ConfigCommands::Show => {
            let config = AppsConfig::load(&path)?;
            if get_output_format() == OutputFormat::Json {
                emit(
                    Level::Info,
                    "config.show",
                    &path.display().to_string(),
                    Some(serde_json::to_value(&config).context("serializing config")?),
                );
            } else {
                print!("{}", config.to_toml()?);
            }
        }
        ConfigCommands::Path => {
            emit(
                Level::Info,
                "config.path",
                &path.display().to_string(),
                Some(serde_json::json!({ "path": path, "exists": path.exists() })),
            );
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists, pass --force to overwrite", path.display());
            }
            AppsConfig::default().save(&path)?;
            emit(
                Level::Success,
                "config.init",
                &format!("{} Wrote {}", char::from(NerdFont::Check), path.display()),
                Some(serde_json::json!({ "path": path })),
            );
        }
    }
    Ok(())
}

pub fn handle_completions_command(command: CompletionCommands) -> Result<()> {
    match command {
        CompletionCommands::Generate { shell } => {
            print!("{}", completions::generate(shell)?);
        }
        CompletionCommands::Install {
            shell,
            output,
            force,
        } => {
            let path = completions::install(shell, output, force)?;
            emit(
                Level::Success,
                "completions.install",
                &format!(
                    "{} Installed {} completions to {}",
                    char::from(NerdFont::Check),
                    shell,
                    path.display()
                ),
                Some(serde_json::json!({ "shell": shell.to_string(), "path": path })),
            );
            emit(
                Level::Info,
                "completions.instructions",
                &completions::instructions(shell, &path),
                None,
            );
        }
    }
    Ok(())
}
