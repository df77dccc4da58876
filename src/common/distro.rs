use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";
pub const DEBIAN_VERSION_PATH: &str = "/etc/debian_version";

/// Top-level packaging ecosystem of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistroFamily {
    Debian,
    RedHat,
    Arch,
    Gentoo,
    Suse,
    Void,
    Alpine,
    Unknown,
}

impl DistroFamily {
    /// Short identifier; empty for an unrecognized distro.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::RedHat => "redhat",
            Self::Arch => "arch",
            Self::Gentoo => "gentoo",
            Self::Suse => "suse",
            Self::Void => "void",
            Self::Alpine => "alpine",
            Self::Unknown => "",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Debian => "Debian",
            Self::RedHat => "Red Hat",
            Self::Arch => "Arch Linux",
            Self::Gentoo => "Gentoo",
            Self::Suse => "SUSE",
            Self::Void => "Void Linux",
            Self::Alpine => "Alpine",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DistroFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distribution built on top of a family that needs special handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Derivative {
    Ubuntu,
    Kali,
    Deepin,
    Fedora,
    CentOS,
    None,
}

impl Derivative {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ubuntu => "ubuntu",
            Self::Kali => "kali",
            Self::Deepin => "deepin",
            Self::Fedora => "fedora",
            Self::CentOS => "centos",
            Self::None => "",
        }
    }
}

impl std::fmt::Display for Derivative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Order matters: the first pattern found anywhere in os-release wins.
const FAMILY_PATTERNS: &[(&str, DistroFamily)] = &[
    (r"\bdebian\b", DistroFamily::Debian),
    (r"\bubuntu\b", DistroFamily::Debian),
    (r"(?i)\bdeepin\b|uos\.com", DistroFamily::Debian),
    (r"(?i)\bkali\b", DistroFamily::Debian),
    (r"(?i)\bfedora\b", DistroFamily::RedHat),
    (r"\bcentos\b", DistroFamily::RedHat),
    (r"\brhel\b", DistroFamily::RedHat),
    (r"\brocky\b|\balmalinux\b", DistroFamily::RedHat),
    (r"\barch\b", DistroFamily::Arch),
    (r"\bmanjaro\b|\bendeavouros\b", DistroFamily::Arch),
    (r"\bgentoo\b", DistroFamily::Gentoo),
    (r"(?i)\bsuse\b|\bopensuse", DistroFamily::Suse),
    (r"\bvoid\b", DistroFamily::Void),
    (r"\balpine\b", DistroFamily::Alpine),
];

const DEBIAN_DERIVATIVE_PATTERNS: &[(&str, Derivative)] = &[
    ("ubuntu", Derivative::Ubuntu),
    ("(?i)kali", Derivative::Kali),
    (r"(?i)deepin|uos\.com", Derivative::Deepin),
];

const REDHAT_DERIVATIVE_PATTERNS: &[(&str, Derivative)] = &[
    ("Fedora", Derivative::Fedora),
    (r#"(?m)^ID="?centos"#, Derivative::CentOS),
    (r#"(?m)^ID="?rhel"#, Derivative::CentOS),
];

fn compile<T: Copy>(table: &[(&str, T)]) -> Vec<(Regex, T)> {
    table
        .iter()
        .map(|(pattern, value)| {
            let regex =
                Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern {pattern}: {e}"));
            (regex, *value)
        })
        .collect()
}

lazy_static! {
    static ref FAMILIES: Vec<(Regex, DistroFamily)> = compile(FAMILY_PATTERNS);
    static ref DEBIAN_DERIVATIVES: Vec<(Regex, Derivative)> = compile(DEBIAN_DERIVATIVE_PATTERNS);
    static ref REDHAT_DERIVATIVES: Vec<(Regex, Derivative)> = compile(REDHAT_DERIVATIVE_PATTERNS);
}

fn first_match<T: Copy>(table: &[(Regex, T)], content: &str) -> Option<T> {
    table
        .iter()
        .find(|(regex, _)| regex.is_match(content))
        .map(|(_, value)| *value)
}

/// The (family, derivative) pair identifying the running distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistroIdentity {
    pub family: DistroFamily,
    pub derivative: Derivative,
}

impl DistroIdentity {
    pub const UNKNOWN: Self = Self::new(DistroFamily::Unknown, Derivative::None);

    pub const fn new(family: DistroFamily, derivative: Derivative) -> Self {
        Self { family, derivative }
    }

    /// Detect the running distribution from /etc/os-release.
    pub fn detect() -> Self {
        Self::from_os_release_path(Path::new(OS_RELEASE_PATH))
    }

    /// Detect from an os-release file; an unreadable file yields an unknown identity.
    pub fn from_os_release_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_os_release(&content),
            Err(_) => Self::UNKNOWN,
        }
    }

    pub fn from_os_release(content: &str) -> Self {
        let family = first_match(&FAMILIES, content).unwrap_or(DistroFamily::Unknown);
        let derivative = first_match(&DEBIAN_DERIVATIVES, content)
            .or_else(|| first_match(&REDHAT_DERIVATIVES, content))
            .unwrap_or(Derivative::None);

        Self::new(family, derivative)
    }

    pub fn is_ubuntu(&self) -> bool {
        self.derivative == Derivative::Ubuntu
    }
}

impl std::fmt::Display for DistroIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.family, self.derivative) {
            (DistroFamily::Unknown, _) => write!(f, "unknown distro"),
            (family, Derivative::None) => write!(f, "{}", family),
            (family, derivative) => write!(f, "{} ({})", family, derivative),
        }
    }
}

/// Parse KEY=value lines of an os-release file, dropping quotes.
fn parse_os_release_fields(content: &str) -> HashMap<&str, &str> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches('"').trim_matches('\'')))
        .collect()
}

/// Human readable distro name such as "Ubuntu 22.04.5 LTS (Jammy Jellyfish)".
///
/// Debian only shows the major version in os-release, so the point release
/// from /etc/debian_version replaces it when available.
pub fn distro_fullname(os_release: &str, debian_version: Option<&str>) -> String {
    let fields = parse_os_release_fields(os_release);
    let name = fields
        .get("NAME")
        .or_else(|| fields.get("PRETTY_NAME"))
        .copied()
        .unwrap_or("Linux");

    let Some(version) = fields.get("VERSION").copied() else {
        return name.to_string();
    };

    let is_debian = matches!(fields.get("ID").copied(), Some("debian" | "raspbian"));
    let version = match (is_debian, debian_version.map(str::trim)) {
        (true, Some(full)) if !full.is_empty() => {
            let major = full.split('.').next().unwrap_or(full);
            match version.split_once(' ') {
                Some((shown, rest)) if shown == major => format!("{full} {rest}"),
                None if version == major => full.to_string(),
                _ => version.to_string(),
            }
        }
        _ => version.to_string(),
    };

    format!("{name} {version}")
}

/// Read the full distro name from the system files.
pub fn detect_fullname(os_release_path: &Path) -> Result<String> {
    let os_release = fs::read_to_string(os_release_path)
        .with_context(|| format!("reading {}", os_release_path.display()))?;
    let debian_version = fs::read_to_string(DEBIAN_VERSION_PATH).ok();
    Ok(distro_fullname(&os_release, debian_version.as_deref()))
}
