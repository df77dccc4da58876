//! Installing packages through the family's package manager.

use super::PackageManager;
use crate::common::cmd::display_command;
use crate::common::distro::DistroFamily;
use crate::common::host::Host;
use crate::ui::prelude::*;

/// Install `packages` with the native package manager of `family`.
///
/// Empty names are dropped. Returns `false` when nothing could be installed;
/// command failures are reported by the host and never propagated.
pub fn install_packages(host: &dyn Host, family: DistroFamily, packages: &[&str]) -> bool {
    let packages: Vec<&str> = packages
        .iter()
        .copied()
        .filter(|p| !p.trim().is_empty())
        .collect();

    if packages.is_empty() {
        emit(
            Level::Warn,
            "package.install.empty",
            &format!(
                "{} No packages known for distro family '{}', nothing to install",
                char::from(NerdFont::Warning),
                family.display_name()
            ),
            None,
        );
        return false;
    }

    let Some(manager) = PackageManager::resolve(family, |cmd| host.command_exists(cmd)) else {
        emit(
            Level::Warn,
            "package.install.unsupported",
            &format!(
                "{} No package manager known for this distro, skipping {}",
                char::from(NerdFont::Warning),
                packages.join(" ")
            ),
            None,
        );
        return false;
    };

    let mut args: Vec<&str> = manager.install_command().to_vec();
    args.extend(&packages);

    emit(
        Level::Info,
        "package.install",
        &format!(
            "{} Installing {} with {}",
            char::from(NerdFont::Package),
            packages.join(", "),
            manager
        ),
        Some(serde_json::json!({
            "manager": manager.display_name(),
            "packages": packages,
        })),
    );

    host.run_as_root(
        &args,
        &format!("when installing packages: {}", display_command(&packages)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::host::testing::RecordingHost;

    #[test]
    fn test_installs_with_family_manager() {
        let host = RecordingHost::new();
        assert!(install_packages(&host, DistroFamily::Arch, &["firefox", "ffmpeg"]));
        assert_eq!(host.commands(), vec!["pacman -S --noconfirm --needed firefox ffmpeg"]);
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let host = RecordingHost::new();
        install_packages(&host, DistroFamily::Suse, &["", "MozillaFirefox"]);
        assert_eq!(host.commands(), vec!["zypper --non-interactive install MozillaFirefox"]);
    }

    #[test]
    fn test_nothing_to_install() {
        let host = RecordingHost::new();
        assert!(!install_packages(&host, DistroFamily::Void, &["", " "]));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_unknown_family() {
        let host = RecordingHost::new();
        assert!(!install_packages(&host, DistroFamily::Unknown, &["firefox"]));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_yum_used_when_dnf_missing() {
        let host = RecordingHost::new().with_binary("yum").as_user();
        install_packages(&host, DistroFamily::RedHat, &["firefox"]);
        assert_eq!(host.commands(), vec!["sudo yum install -y firefox"]);
    }
}
