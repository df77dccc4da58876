//! Vivaldi, from the vendor's .deb/.rpm or the distro repositories.

use anyhow::{Context, anyhow};
use std::path::PathBuf;

use crate::apps::{App, AppInfo, InstallContext, InstallError};
use crate::common::arch::Architecture;
use crate::common::distro::DistroFamily;
use crate::common::html::anchor_hrefs;
use crate::ui::prelude::*;

const SUPPORTED_DISTROS: &str = "Debian & RHEL & Gentoo & Void Linux";
const DESKTOP_FILE: &str = "/usr/share/applications/vivaldi-stable.desktop";

const DEB_ARCHES: &[Architecture] = &[
    Architecture::Amd64,
    Architecture::Arm64,
    Architecture::I386,
    Architecture::Armhf,
];
const RPM_ARCHES: &[Architecture] = &[Architecture::Amd64, Architecture::I386];

pub const INFO: AppInfo = AppInfo {
    id: "vivaldi",
    name: "Vivaldi",
    category: "browser",
    variants: &[],
    supported: SUPPORTED_DISTROS,
    method: "vendor package, repository on Gentoo/Void",
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// Package downloaded from vivaldi.com and installed as a local file
    Vendor { url: String, extension: &'static str },
    /// Package from the distro repositories
    Repository(&'static str),
}

/// Repository package on families without a vendor build.
fn repository_package(family: DistroFamily) -> Option<&'static str> {
    match family {
        DistroFamily::Gentoo => Some("www-client/vivaldi-snapshot"),
        DistroFamily::Void => Some("vivaldi"),
        _ => None,
    }
}

/// Pick the vendor package link for a family and architecture.
///
/// Vivaldi's page only links some builds, so other architectures are derived
/// by replacing the architecture in the file name.
pub fn select_package_url(
    links: &[String],
    family: DistroFamily,
    arch: Option<Architecture>,
) -> Option<String> {
    let arch = arch?;
    match family {
        DistroFamily::Debian if DEB_ARCHES.contains(&arch) => {
            let native = format!("{}.deb", arch);
            links
                .iter()
                .find(|link| link.ends_with(&native))
                .or_else(|| links.iter().find(|link| link.contains("amd64.deb")))
                .map(|link| link.replace("amd64.deb", &native))
        }
        DistroFamily::RedHat if RPM_ARCHES.contains(&arch) => links
            .iter()
            .find(|link| link.contains(".rpm") && link.contains(".x86_64."))
            .map(|link| match arch {
                Architecture::I386 => link.replace("x86_64", "i386"),
                _ => link.clone(),
            }),
        _ => None,
    }
}

#[derive(Default)]
pub struct Vivaldi {
    source: Option<Source>,
}

impl Vivaldi {
    pub fn new() -> Self {
        Self::default()
    }

    fn scrape_vendor_link(&self, ctx: &InstallContext<'_>) -> Result<Source, InstallError> {
        let page_url = &ctx.config.vivaldi_download_page;
        let page = ctx
            .host
            .fetch_text(page_url)
            .context("Failed to read the Vivaldi download page")?;

        let links = anchor_hrefs(&page);
        emit(
            Level::Debug,
            "vivaldi.links",
            &format!(
                "{} Found {} links on {}",
                char::from(NerdFont::Globe),
                links.len(),
                page_url
            ),
            None,
        );

        let url = select_package_url(&links, ctx.family(), ctx.arch)
            .ok_or_else(|| InstallError::UnsupportedArchitecture(ctx.arch_name().to_string()))?;
        let extension = if ctx.family() == DistroFamily::Debian {
            "deb"
        } else {
            "rpm"
        };

        emit(
            Level::Debug,
            "vivaldi.package_url",
            &format!("Selected {}", url),
            None,
        );
        Ok(Source::Vendor { url, extension })
    }
}

impl App for Vivaldi {
    fn name(&self) -> String {
        "Vivaldi".to_string()
    }

    fn prepare(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        let source = match ctx.family() {
            DistroFamily::Debian | DistroFamily::RedHat => self.scrape_vendor_link(ctx)?,
            family => match repository_package(family) {
                Some(package) => Source::Repository(package),
                None => {
                    return Err(InstallError::DistroOnly {
                        app: "Vivaldi",
                        distro: ctx.distro.to_string(),
                        supported: SUPPORTED_DISTROS,
                    });
                }
            },
        };
        self.source = Some(source);
        Ok(())
    }

    fn install(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        let source = self
            .source
            .clone()
            .ok_or_else(|| anyhow!("Vivaldi must be prepared before installing"))?;

        match source {
            Source::Vendor { url, extension } => {
                let file: PathBuf = ctx
                    .config
                    .download_dir()
                    .join(format!("vivaldi.{}", extension));
                ctx.host
                    .download(&url, &file, true)
                    .with_context(|| format!("Failed to download Vivaldi from {}", url))?;

                let file = file.to_string_lossy().into_owned();
                let msg = format!("when trying to install vivaldi browser from {}", file);
                if extension == "deb" {
                    ctx.host
                        .run_as_root(&["apt", "install", "-y", file.as_str()], &msg);
                } else {
                    ctx.host.run_as_root(&["rpm", "-ivh", file.as_str()], &msg);
                }
            }
            Source::Repository(package) => {
                ctx.install_packages(&[package]);
            }
        }

        ctx.host.run_as_root(
            &[
                "sed",
                "-i",
                "s@Exec=/usr/bin/vivaldi-stable@& --no-sandbox@g",
                DESKTOP_FILE,
            ],
            "when adding no-sandbox to vivaldi",
        );
        Ok(())
    }
}
