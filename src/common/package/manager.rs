//! Package manager enum and related functionality.

use crate::common::distro::DistroFamily;

/// Native package manager of a distro family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// APT - Debian/Ubuntu family
    Apt,
    /// DNF - Fedora/RHEL family
    Dnf,
    /// YUM - older RHEL/CentOS without dnf
    Yum,
    /// Pacman - Arch Linux family
    Pacman,
    /// Portage - Gentoo
    Portage,
    /// Zypper - openSUSE/SLES
    Zypper,
    /// XBPS - Void Linux
    Xbps,
    /// APK - Alpine
    Apk,
}

impl PackageManager {
    /// The package manager a family uses, without probing the system.
    pub fn for_family(family: DistroFamily) -> Option<Self> {
        match family {
            DistroFamily::Debian => Some(Self::Apt),
            DistroFamily::RedHat => Some(Self::Dnf),
            DistroFamily::Arch => Some(Self::Pacman),
            DistroFamily::Gentoo => Some(Self::Portage),
            DistroFamily::Suse => Some(Self::Zypper),
            DistroFamily::Void => Some(Self::Xbps),
            DistroFamily::Alpine => Some(Self::Apk),
            DistroFamily::Unknown => None,
        }
    }

    /// Like [`PackageManager::for_family`], but falls back to yum on Red Hat
    /// systems that do not ship dnf.
    pub fn resolve(family: DistroFamily, command_exists: impl Fn(&str) -> bool) -> Option<Self> {
        match Self::for_family(family)? {
            Self::Dnf if !command_exists("dnf") && command_exists("yum") => Some(Self::Yum),
            manager => Some(manager),
        }
    }

    /// The program and base arguments used to install packages.
    pub fn install_command(&self) -> &'static [&'static str] {
        match self {
            Self::Apt => &["apt", "install", "-y"],
            Self::Dnf => &["dnf", "install", "-y"],
            Self::Yum => &["yum", "install", "-y"],
            Self::Pacman => &["pacman", "-S", "--noconfirm", "--needed"],
            Self::Portage => &["emerge", "--noreplace", "--verbose"],
            Self::Zypper => &["zypper", "--non-interactive", "install"],
            Self::Xbps => &["xbps-install", "-Sy"],
            Self::Apk => &["apk", "add"],
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "APT",
            Self::Dnf => "DNF",
            Self::Yum => "YUM",
            Self::Pacman => "Pacman",
            Self::Portage => "Portage",
            Self::Zypper => "Zypper",
            Self::Xbps => "XBPS",
            Self::Apk => "APK",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_family() {
        assert_eq!(PackageManager::for_family(DistroFamily::Debian), Some(PackageManager::Apt));
        assert_eq!(PackageManager::for_family(DistroFamily::RedHat), Some(PackageManager::Dnf));
        assert_eq!(PackageManager::for_family(DistroFamily::Arch), Some(PackageManager::Pacman));
        assert_eq!(PackageManager::for_family(DistroFamily::Gentoo), Some(PackageManager::Portage));
        assert_eq!(PackageManager::for_family(DistroFamily::Suse), Some(PackageManager::Zypper));
        assert_eq!(PackageManager::for_family(DistroFamily::Void), Some(PackageManager::Xbps));
        assert_eq!(PackageManager::for_family(DistroFamily::Alpine), Some(PackageManager::Apk));
        assert_eq!(PackageManager::for_family(DistroFamily::Unknown), None);
    }

    #[test]
    fn test_yum_fallback() {
        let only_yum = |cmd: &str| cmd == "yum";
        assert_eq!(
            PackageManager::resolve(DistroFamily::RedHat, only_yum),
            Some(PackageManager::Yum)
        );

        let has_dnf = |cmd: &str| cmd == "dnf" || cmd == "yum";
        assert_eq!(
            PackageManager::resolve(DistroFamily::RedHat, has_dnf),
            Some(PackageManager::Dnf)
        );

        // Neither present: keep dnf so the failure names the expected tool
        assert_eq!(
            PackageManager::resolve(DistroFamily::RedHat, |_| false),
            Some(PackageManager::Dnf)
        );
    }

    #[test]
    fn test_install_command() {
        assert_eq!(PackageManager::Apt.install_command(), &["apt", "install", "-y"]);
        assert_eq!(PackageManager::Xbps.install_command(), &["xbps-install", "-Sy"]);
    }
}
