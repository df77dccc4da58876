//! Installable applications.
//!
//! Every application is an [`App`]: `prepare` resolves what to install for the
//! detected distro and architecture, `install` performs it through the
//! [`Host`] in the [`InstallContext`].

use clap::Subcommand;
use serde::Serialize;

use crate::common::arch::Architecture;
use crate::common::config::AppsConfig;
use crate::common::distro::{DistroFamily, DistroIdentity};
use crate::common::host::Host;
use crate::common::package;
use crate::ui::prelude::*;

pub mod browser;
pub mod devtools;
pub mod error;

pub use error::InstallError;

use browser::firefox::{Firefox, FirefoxVariant};
use browser::vivaldi::Vivaldi;
use devtools::jetbrains::{Jetbrains, JetbrainsVariant};

/// Everything an installer may look at or act through.
pub struct InstallContext<'a> {
    pub host: &'a dyn Host,
    pub config: &'a AppsConfig,
    pub distro: DistroIdentity,
    pub arch: Option<Architecture>,
}

impl<'a> InstallContext<'a> {
    pub fn new(
        host: &'a dyn Host,
        config: &'a AppsConfig,
        distro: DistroIdentity,
        arch: Option<Architecture>,
    ) -> Self {
        Self {
            host,
            config,
            distro,
            arch,
        }
    }

    pub fn family(&self) -> DistroFamily {
        self.distro.family
    }

    pub fn arch_name(&self) -> &'static str {
        self.arch.map(|a| a.as_str()).unwrap_or("unknown")
    }

    /// The host architecture, if it is one of `supported`.
    pub fn require_arch(&self, supported: &[Architecture]) -> Result<Architecture, InstallError> {
        match self.arch {
            Some(arch) if supported.contains(&arch) => Ok(arch),
            _ => Err(InstallError::UnsupportedArchitecture(
                self.arch_name().to_string(),
            )),
        }
    }

    pub fn install_packages(&self, packages: &[&str]) -> bool {
        package::install_packages(self.host, self.family(), packages)
    }
}

pub trait App {
    /// Human readable name used in messages.
    fn name(&self) -> String;

    /// Resolve packages or download links. May fail with a domain error
    /// before anything on the system is touched.
    fn prepare(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError>;

    fn install(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError>;
}

/// Prepare then install `app`, reporting progress.
pub fn install_app(app: &mut dyn App, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
    let name = app.name();
    emit(
        Level::Info,
        "app.prepare",
        &format!(
            "{} Preparing {} for {} ({})",
            char::from(NerdFont::Gear),
            name,
            ctx.distro,
            ctx.arch_name()
        ),
        Some(serde_json::json!({
            "app": name,
            "distro": ctx.distro,
            "arch": ctx.arch,
        })),
    );

    app.prepare(ctx)?;
    app.install(ctx)?;

    emit(
        Level::Success,
        "app.installed",
        &format!("{} {} installed", char::from(NerdFont::Check), name),
        Some(serde_json::json!({ "app": name })),
    );
    Ok(())
}

#[derive(Subcommand, Debug, Clone)]
pub enum InstallTarget {
    /// Install Firefox from the distro repositories (Mozilla PPA on Ubuntu)
    Firefox {
        #[arg(long, value_enum, default_value_t = FirefoxVariant::Firefox)]
        variant: FirefoxVariant,
    },
    /// Install Vivaldi from the vendor package or the distro repositories
    Vivaldi,
    /// Install a JetBrains IDE from the official tarball
    Jetbrains {
        #[arg(value_enum)]
        variant: JetbrainsVariant,
    },
}

impl InstallTarget {
    pub fn into_app(self) -> Box<dyn App> {
        match self {
            InstallTarget::Firefox { variant } => Box::new(Firefox::new(variant)),
            InstallTarget::Vivaldi => Box::new(Vivaldi::new()),
            InstallTarget::Jetbrains { variant } => Box::new(Jetbrains::new(variant)),
        }
    }
}

/// Static description of an application, shown by `list`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AppInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub variants: &'static [&'static str],
    pub supported: &'static str,
    pub method: &'static str,
}

pub fn catalog() -> [AppInfo; 3] {
    [
        browser::firefox::INFO,
        browser::vivaldi::INFO,
        devtools::jetbrains::INFO,
    ]
}
