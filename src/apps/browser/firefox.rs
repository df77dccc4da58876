//! Mozilla Firefox, standard release or ESR.

use anyhow::{Context, anyhow};
use std::path::Path;

use crate::apps::{App, AppInfo, InstallContext, InstallError};
use crate::common::distro::{DistroFamily, DistroIdentity};
use crate::common::package::{PackageEntry, PackageTable};
use crate::ui::prelude::*;

const MOZILLA_PPA: &str = "ppa:mozillateam/ppa";
const PIN_FILE: &str = "/etc/apt/preferences.d/90-mozilla-firefox";
const PIN_CONTENTS: &str = "Package: *
Pin: release o=LP-PPA-mozillateam,l=Firefox ESR and Thunderbird stable builds
Pin-Priority: 900
";

const ESR_MAIN: PackageTable = PackageTable::new(&[
    PackageEntry::new(DistroFamily::Debian, &["firefox-esr"]),
    PackageEntry::new(DistroFamily::Arch, &["firefox-esr"]),
    PackageEntry::new(DistroFamily::Gentoo, &["www-client/firefox"]),
    PackageEntry::new(DistroFamily::Suse, &["MozillaFirefox-esr"]),
]);

const ESR_EXTRAS: PackageTable = PackageTable::new(&[
    PackageEntry::new(DistroFamily::Debian, &["ffmpeg", "firefox-esr-locale-zh-hans"]),
    PackageEntry::new(DistroFamily::Arch, &["firefox-i18n-zh-cn", "ffmpeg"]),
    PackageEntry::new(DistroFamily::Suse, &["MozillaFirefox-esr-translations-common"]),
]);

const FIREFOX_MAIN: PackageTable = PackageTable::new(&[
    PackageEntry::new(DistroFamily::Debian, &["firefox"]),
    PackageEntry::new(DistroFamily::Arch, &["firefox"]),
    PackageEntry::new(DistroFamily::RedHat, &["firefox"]),
    PackageEntry::new(DistroFamily::Gentoo, &["www-client/firefox-bin"]),
    PackageEntry::new(DistroFamily::Suse, &["MozillaFirefox"]),
]);

const FIREFOX_EXTRAS: PackageTable = PackageTable::new(&[
    PackageEntry::new(DistroFamily::Debian, &["firefox-l10n-zh-cn"]),
    PackageEntry::new(DistroFamily::Arch, &["firefox-i18n-zh-cn", "firefox-i18n-zh-tw"]),
    PackageEntry::new(DistroFamily::Suse, &["MozillaFirefox-translations-common"]),
]);

// Ubuntu locales come from the Mozilla PPA and are named differently
const UBUNTU_FIREFOX_EXTRAS: &[&str] = &["ffmpeg", "^firefox-locale-zh"];

pub const INFO: AppInfo = AppInfo {
    id: "firefox",
    name: "Firefox",
    category: "browser",
    variants: &["firefox", "esr"],
    supported: "Debian, Ubuntu (Mozilla PPA), Red Hat, Arch, Gentoo, SUSE",
    method: "package manager",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FirefoxVariant {
    #[default]
    Firefox,
    Esr,
}

impl FirefoxVariant {
    fn other(self) -> Self {
        match self {
            Self::Firefox => Self::Esr,
            Self::Esr => Self::Firefox,
        }
    }

    /// Debian package name, also the name of its dpkg maintainer scripts.
    fn deb_name(self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Esr => "firefox-esr",
        }
    }

    /// Commands that prove the variant is installed; any one is enough.
    fn binaries(self) -> &'static [&'static str] {
        match self {
            Self::Firefox => &["firefox"],
            Self::Esr => &["firefox", "firefox-esr"],
        }
    }
}

impl std::fmt::Display for FirefoxVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firefox => write!(f, "Firefox"),
            Self::Esr => write!(f, "Firefox ESR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirefoxPackages {
    pub main: &'static [&'static str],
    pub extras: &'static [&'static str],
}

/// Look up the packages for a variant on a distro.
pub fn resolve_packages(variant: FirefoxVariant, distro: DistroIdentity) -> FirefoxPackages {
    match variant {
        FirefoxVariant::Esr => FirefoxPackages {
            main: ESR_MAIN.lookup(distro.family),
            extras: ESR_EXTRAS.lookup(distro.family),
        },
        FirefoxVariant::Firefox => FirefoxPackages {
            main: FIREFOX_MAIN.lookup(distro.family),
            extras: if distro.is_ubuntu() {
                UBUNTU_FIREFOX_EXTRAS
            } else {
                FIREFOX_EXTRAS.lookup(distro.family)
            },
        },
    }
}

pub struct Firefox {
    variant: FirefoxVariant,
    packages: Option<FirefoxPackages>,
}

impl Firefox {
    pub fn new(variant: FirefoxVariant) -> Self {
        Self {
            variant,
            packages: None,
        }
    }

    /// Make sure add-apt-repository is available for PPAs.
    fn setup_ppa_env(&self, ctx: &InstallContext<'_>) {
        if ctx.host.command_exists("add-apt-repository") {
            return;
        }
        ctx.host
            .run_as_root(&["apt", "update", "-y"], "when updating apt index");
        ctx.host.run_as_root(
            &["apt", "install", "software-properties-common", "-y"],
            "when installing software-properties-common for ppa",
        );
    }

    /// Prefer the Mozilla PPA over Ubuntu's snap transition package.
    fn pin_mozilla_ppa(&self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        ctx.host
            .write_file(Path::new(PIN_FILE), PIN_CONTENTS)
            .with_context(|| format!("writing apt preferences to {}", PIN_FILE))?;
        ctx.host.run_as_root(
            &["chmod", "a+r", "-vf", PIN_FILE],
            &format!("when trying to give permission to \"{}\"", PIN_FILE),
        );
        Ok(())
    }

    fn install_variant(
        &self,
        ctx: &InstallContext<'_>,
        variant: FirefoxVariant,
        packages: &FirefoxPackages,
    ) -> bool {
        if variant == FirefoxVariant::Firefox && ctx.family() == DistroFamily::Debian {
            self.setup_ppa_env(ctx);
        }

        let mut names: Vec<&str> = packages.main.to_vec();
        if ctx.config.install_extras {
            names.extend_from_slice(packages.extras);
        }
        ctx.install_packages(&names)
    }

    fn is_present(&self, ctx: &InstallContext<'_>, variant: FirefoxVariant) -> bool {
        variant
            .binaries()
            .iter()
            .any(|binary| ctx.host.command_exists(binary))
    }

    /// Neutralize the postinst `configure` step, which fails in containers,
    /// then let dpkg finish any half-configured packages.
    fn patch_postinst(&self, ctx: &InstallContext<'_>, variant: FirefoxVariant) {
        let postinst = format!("/var/lib/dpkg/info/{}.postinst", variant.deb_name());
        ctx.host.run_as_root(
            &["sed", "-i", "-E", r"s@(configure)@pre\1@", &postinst],
            &format!("when changing configure to preconfigure in {}", postinst),
        );
        ctx.host.run_as_root(
            &["dpkg", "--configure", "-a"],
            "when trying to fix misconfigured deb packages",
        );
    }
}

impl App for Firefox {
    fn name(&self) -> String {
        self.variant.to_string()
    }

    fn prepare(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        if ctx.distro.is_ubuntu() {
            self.setup_ppa_env(ctx);
            ctx.host.run_as_root(
                &["add-apt-repository", MOZILLA_PPA, "-y"],
                "when trying to add mozilla PPA to the system",
            );
            self.pin_mozilla_ppa(ctx)?;
        }

        let packages = resolve_packages(self.variant, ctx.distro);
        emit(
            Level::Debug,
            "firefox.resolved",
            &format!(
                "{} resolved to {:?} with extras {:?}",
                self.variant, packages.main, packages.extras
            ),
            None,
        );
        self.packages = Some(packages);

        if ctx.family() == DistroFamily::Gentoo {
            ctx.host
                .run_as_root(&["dispatch-conf"], "when running dispatch-conf");
        }

        Ok(())
    }

    fn install(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        let packages = self
            .packages
            .clone()
            .ok_or_else(|| anyhow!("{} must be prepared before installing", self.variant))?;

        let mut installed = self.variant;
        self.install_variant(ctx, self.variant, &packages);

        if !self.is_present(ctx, self.variant) {
            let fallback = self.variant.other();
            emit(
                Level::Warn,
                "firefox.fallback",
                &format!(
                    "{} {} is not available after installation, trying {}",
                    char::from(NerdFont::Warning),
                    self.variant,
                    fallback
                ),
                None,
            );
            self.install_variant(ctx, fallback, &resolve_packages(fallback, ctx.distro));
            installed = fallback;
        }

        if ctx.family() == DistroFamily::Debian && ctx.config.patch_dpkg_postinst {
            self.patch_postinst(ctx, installed);
        }

        Ok(())
    }
}
