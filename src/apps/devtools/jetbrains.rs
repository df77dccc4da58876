//! JetBrains IDEs installed from the official Linux tarballs.

use anyhow::{Context, anyhow};

use crate::apps::{App, AppInfo, InstallContext, InstallError};
use crate::common::arch::Architecture;
use crate::common::archive::extract_tgz;
use crate::ui::prelude::*;

const DOWNLOAD_BASE: &str = "https://download.jetbrains.com";
const SUPPORTED_ARCHES: &[Architecture] = &[Architecture::Amd64, Architecture::Arm64];

// Latest tested release of each product
const VERSIONS: &[(&str, &str)] = &[
    ("idea", "2024.3.2.1"),
    ("python", "2024.3.3"),
    ("go", "2024.3.3"),
    ("webide", "2024.3.3"),
    ("webstorm", "2024.3.2.1"),
    ("cpp", "2024.3.3"),
    ("rider", "2024.3.5"),
    ("rustrover", "2024.3.4"),
    ("ruby", "2024.3.2.1"),
];

pub const INFO: AppInfo = AppInfo {
    id: "jetbrains",
    name: "JetBrains IDEs",
    category: "devtools",
    variants: &[
        "idea-community",
        "idea-ultimate",
        "pycharm-community",
        "pycharm-professional",
        "goland",
        "phpstorm",
        "clion",
        "rider",
        "rustrover",
        "rubymine",
        "webstorm",
    ],
    supported: "any distro (amd64, arm64)",
    method: "tarball",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum JetbrainsVariant {
    #[value(name = "idea-community")]
    IdeaCommunity,
    #[value(name = "idea-ultimate")]
    IdeaUltimate,
    #[value(name = "pycharm-community")]
    PycharmCommunity,
    #[value(name = "pycharm-professional")]
    PycharmProfessional,
    #[value(name = "goland")]
    GoLand,
    #[value(name = "phpstorm")]
    PhpStorm,
    #[value(name = "clion")]
    CLion,
    #[value(name = "rider")]
    Rider,
    #[value(name = "rustrover")]
    RustRover,
    #[value(name = "rubymine")]
    RubyMine,
    #[value(name = "webstorm")]
    WebStorm,
}

impl JetbrainsVariant {
    /// Directory on download.jetbrains.com, also the key for versions.
    pub fn product(&self) -> &'static str {
        match self {
            Self::IdeaCommunity | Self::IdeaUltimate => "idea",
            Self::PycharmCommunity | Self::PycharmProfessional => "python",
            Self::GoLand => "go",
            Self::PhpStorm => "webide",
            Self::CLion => "cpp",
            Self::Rider => "rider",
            Self::RustRover => "rustrover",
            Self::RubyMine => "ruby",
            Self::WebStorm => "webstorm",
        }
    }

    pub fn edition(&self) -> Option<&'static str> {
        match self {
            Self::IdeaCommunity | Self::PycharmCommunity => Some("community"),
            Self::IdeaUltimate | Self::PycharmProfessional => Some("professional"),
            _ => None,
        }
    }

    /// Archive base name, before the version.
    fn file_name(&self) -> &'static str {
        match self {
            Self::IdeaCommunity => "ideaIC",
            Self::IdeaUltimate => "ideaU",
            Self::PycharmCommunity => "pycharm-community",
            Self::PycharmProfessional => "pycharm-professional",
            Self::GoLand => "goland",
            Self::PhpStorm => "PhpStorm",
            Self::CLion => "CLion",
            Self::Rider => "JetBrains.Rider",
            Self::RustRover => "RustRover",
            Self::RubyMine => "RubyMine",
            Self::WebStorm => "WebStorm",
        }
    }

    /// Install directory name, shared by both editions of a product. The
    /// launcher script inside `bin/` carries the same name.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::IdeaCommunity | Self::IdeaUltimate => "idea",
            Self::PycharmCommunity | Self::PycharmProfessional => "pycharm",
            Self::GoLand => "goland",
            Self::PhpStorm => "phpstorm",
            Self::CLion => "clion",
            Self::Rider => "rider",
            Self::RustRover => "rustrover",
            Self::RubyMine => "rubymine",
            Self::WebStorm => "webstorm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::IdeaCommunity => "IntelliJ IDEA Community",
            Self::IdeaUltimate => "IntelliJ IDEA Ultimate",
            Self::PycharmCommunity => "PyCharm Community",
            Self::PycharmProfessional => "PyCharm Professional",
            Self::GoLand => "GoLand",
            Self::PhpStorm => "PhpStorm",
            Self::CLion => "CLion",
            Self::Rider => "Rider",
            Self::RustRover => "RustRover",
            Self::RubyMine => "RubyMine",
            Self::WebStorm => "WebStorm",
        }
    }

    /// Name of the launcher link and the downloaded archive, e.g.
    /// `pycharm_community`.
    pub fn link_name(&self) -> String {
        match self.edition() {
            Some(edition) => format!("{}_{}", self.dir_name(), edition),
            None => self.dir_name().to_string(),
        }
    }
}

/// Pinned version of a product code.
pub fn default_version(product: &str) -> Option<&'static str> {
    VERSIONS
        .iter()
        .find(|(code, _)| *code == product)
        .map(|(_, version)| *version)
}

pub fn download_url(variant: JetbrainsVariant, version: &str, arch: Architecture) -> String {
    let suffix = if arch == Architecture::Arm64 {
        "-aarch64"
    } else {
        ""
    };
    format!(
        "{}/{}/{}-{}{}.tar.gz",
        DOWNLOAD_BASE,
        variant.product(),
        variant.file_name(),
        version,
        suffix
    )
}

pub struct Jetbrains {
    variant: JetbrainsVariant,
    prepared: Option<(String, Architecture)>,
}

impl Jetbrains {
    pub fn new(variant: JetbrainsVariant) -> Self {
        Self {
            variant,
            prepared: None,
        }
    }

    fn version(&self, ctx: &InstallContext<'_>) -> Result<String, InstallError> {
        let product = self.variant.product();
        if let Some(version) = ctx.config.jetbrains_versions.get(product) {
            return Ok(version.clone());
        }
        default_version(product)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("No version known for JetBrains product {}", product).into())
    }
}

impl App for Jetbrains {
    fn name(&self) -> String {
        self.variant.display_name().to_string()
    }

    fn prepare(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        let arch = ctx.require_arch(SUPPORTED_ARCHES)?;
        let version = self.version(ctx)?;
        let url = download_url(self.variant, &version, arch);

        emit(
            Level::Debug,
            "jetbrains.url",
            &format!("{} {} from {}", self.variant.display_name(), version, url),
            None,
        );
        self.prepared = Some((url, arch));
        Ok(())
    }

    fn install(&mut self, ctx: &InstallContext<'_>) -> Result<(), InstallError> {
        let (url, arch) = self
            .prepared
            .clone()
            .ok_or_else(|| anyhow!("{} must be prepared before installing", self.name()))?;

        let archive = ctx
            .config
            .download_dir()
            .join(format!("{}-{}.tar.gz", self.variant.link_name(), arch));
        ctx.host
            .download(&url, &archive, true)
            .with_context(|| format!("Failed to download {}", url))?;

        let dir = self.variant.dir_name();
        let install_dir = ctx.config.jetbrains_root().join(dir);
        emit(
            Level::Info,
            "jetbrains.extract",
            &format!(
                "{} Extracting {} into {}",
                char::from(NerdFont::Archive),
                archive.display(),
                install_dir.display()
            ),
            None,
        );
        if !extract_tgz(ctx.host, &archive, &install_dir) {
            emit(
                Level::Warn,
                "jetbrains.extract.failed",
                &format!(
                    "{} Extraction into {} failed, the launcher link may be broken",
                    char::from(NerdFont::Warning),
                    install_dir.display()
                ),
                None,
            );
        }

        let launcher = install_dir.join("bin").join(format!("{}.sh", dir));
        let link = ctx.config.bin_dir().join(self.variant.link_name());
        let launcher = launcher.to_string_lossy().into_owned();
        let link = link.to_string_lossy().into_owned();
        emit(
            Level::Info,
            "jetbrains.link",
            &format!("{} Linking {} to {}", char::from(NerdFont::Link), link, launcher),
            None,
        );
        ctx.host.run_as_root(
            &["ln", "-sfv", launcher.as_str(), link.as_str()],
            &format!("when linking {} to {}", launcher, link),
        );
        Ok(())
    }
}
