use std::path::Path;

use crate::common::host::Host;

/// Extract a .tar.gz into `dest`, dropping the archive's top-level directory.
///
/// Runs as root since targets usually live under /opt.
pub fn extract_tgz(host: &dyn Host, archive: &Path, dest: &Path) -> bool {
    let archive = archive.to_string_lossy();
    let dest = dest.to_string_lossy();

    if !host.run_as_root(
        &["mkdir", "-p", &dest],
        &format!("when creating {}", dest),
    ) {
        return false;
    }

    host.run_as_root(
        &["tar", "-xzf", &archive, "-C", &dest, "--strip-components=1"],
        &format!("when extracting {} to {}", archive, dest),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::host::testing::RecordingHost;

    #[test]
    fn test_extract_commands() {
        let host = RecordingHost::new();
        assert!(extract_tgz(
            &host,
            Path::new("/tmp/goland-amd64.tar.gz"),
            Path::new("/opt/goland")
        ));
        assert_eq!(
            host.commands(),
            vec![
                "mkdir -p /opt/goland",
                "tar -xzf /tmp/goland-amd64.tar.gz -C /opt/goland --strip-components=1",
            ]
        );
    }
}
