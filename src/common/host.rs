//! The seam between installers and the machine they run on.
//!
//! Installers never spawn processes, write files or open connections directly;
//! they go through a [`Host`]. [`LocalHost`] does the real work, [`DryRunHost`]
//! only reports what would happen.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::common::cmd::{self, display_command};
use crate::common::config::AppsConfig;
use crate::common::network;
use crate::ui::prelude::*;

pub trait Host {
    /// Run a command; failures are reported and turned into `false`.
    fn run(&self, args: &[&str], msg: &str) -> bool;

    fn is_root(&self) -> bool;

    fn command_exists(&self, name: &str) -> bool;

    /// Write a system file, escalating through sudo when needed.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    fn fetch_text(&self, url: &str) -> Result<String>;

    fn download(&self, url: &str, dest: &Path, overwrite: bool) -> Result<()>;

    /// Run a command with root privileges, prefixing sudo when not root.
    fn run_as_root(&self, args: &[&str], msg: &str) -> bool {
        if self.is_root() {
            self.run(args, msg)
        } else {
            let mut escalated = Vec::with_capacity(args.len() + 1);
            escalated.push("sudo");
            escalated.extend_from_slice(args);
            self.run(&escalated, msg)
        }
    }
}

fn running_as_root() -> bool {
    matches!(sudo::check(), sudo::RunningAs::Root)
}

pub struct LocalHost {
    page_client: Client,
    download_client: Client,
}

impl LocalHost {
    pub fn new(config: &AppsConfig) -> Result<Self> {
        Ok(Self {
            page_client: network::build_client(config.http_timeout_secs)?,
            download_client: network::build_client(config.download_timeout_secs)?,
        })
    }
}

impl Host for LocalHost {
    fn run(&self, args: &[&str], msg: &str) -> bool {
        cmd::run(args, msg)
    }

    fn is_root(&self) -> bool {
        running_as_root()
    }

    fn command_exists(&self, name: &str) -> bool {
        cmd::command_exists(name)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        if self.is_root() {
            return fs::write(path, contents)
                .with_context(|| format!("writing {}", path.display()));
        }

        // Stage the file as the current user, then let sudo move it into place
        let mut staged = tempfile::NamedTempFile::new().context("creating staging file")?;
        staged
            .write_all(contents.as_bytes())
            .context("writing staging file")?;

        let staged_path = staged.path().to_string_lossy().into_owned();
        let target = path.to_string_lossy().into_owned();
        let installed = self.run_as_root(
            &["install", "-m", "644", &staged_path, &target],
            &format!("when writing {}", target),
        );
        if !installed {
            anyhow::bail!("could not write {}", target);
        }
        Ok(())
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        network::fetch_text(&self.page_client, url)
    }

    fn download(&self, url: &str, dest: &Path, overwrite: bool) -> Result<()> {
        network::download(&self.download_client, url, dest, overwrite)
    }
}

/// Prints every side effect instead of performing it.
///
/// Page fetches and PATH lookups still go to the real machine since later
/// decisions depend on them.
pub struct DryRunHost {
    inner: LocalHost,
}

impl DryRunHost {
    pub fn new(config: &AppsConfig) -> Result<Self> {
        Ok(Self {
            inner: LocalHost::new(config)?,
        })
    }

    fn announce(&self, code: &str, message: String) {
        emit(
            Level::Info,
            code,
            &format!("{} [dry-run] {}", char::from(NerdFont::Terminal), message),
            None,
        );
    }
}

impl Host for DryRunHost {
    fn run(&self, args: &[&str], _msg: &str) -> bool {
        self.announce("dry_run.command", display_command(args));
        true
    }

    fn is_root(&self) -> bool {
        self.inner.is_root()
    }

    fn command_exists(&self, name: &str) -> bool {
        self.inner.command_exists(name)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        self.announce(
            "dry_run.write",
            format!("write {}:\n{}", path.display(), contents.trim_end()),
        );
        Ok(())
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        self.inner.fetch_text(url)
    }

    fn download(&self, url: &str, dest: &Path, overwrite: bool) -> Result<()> {
        let mode = if overwrite { "overwrite" } else { "keep existing" };
        self.announce(
            "dry_run.download",
            format!("download {} -> {} ({})", url, dest.display(), mode),
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::path::PathBuf;

    /// Records everything an installer asks for and answers from canned data.
    #[derive(Default)]
    pub struct RecordingHost {
        pub root: bool,
        pub commands: RefCell<Vec<String>>,
        pub written: RefCell<Vec<(PathBuf, String)>>,
        pub downloads: RefCell<Vec<(String, PathBuf)>>,
        binaries: RefCell<HashSet<String>>,
        provides: Vec<(String, String)>,
        pages: HashMap<String, String>,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self {
                root: true,
                ..Self::default()
            }
        }

        pub fn as_user(mut self) -> Self {
            self.root = false;
            self
        }

        pub fn with_binary(self, name: &str) -> Self {
            self.binaries.borrow_mut().insert(name.to_string());
            self
        }

        /// After a command containing `fragment` runs, `binary` is on PATH.
        pub fn providing(mut self, fragment: &str, binary: &str) -> Self {
            self.provides.push((fragment.to_string(), binary.to_string()));
            self
        }

        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn commands(&self) -> Vec<String> {
            self.commands.borrow().clone()
        }

        pub fn ran(&self, command: &str) -> bool {
            self.commands.borrow().iter().any(|c| c == command)
        }
    }

    impl Host for RecordingHost {
        fn run(&self, args: &[&str], _msg: &str) -> bool {
            let line = args.join(" ");
            for (fragment, binary) in &self.provides {
                if line.contains(fragment.as_str()) {
                    self.binaries.borrow_mut().insert(binary.clone());
                }
            }
            self.commands.borrow_mut().push(line);
            true
        }

        fn is_root(&self) -> bool {
            self.root
        }

        fn command_exists(&self, name: &str) -> bool {
            self.binaries.borrow().contains(name)
        }

        fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
            self.written
                .borrow_mut()
                .push((path.to_path_buf(), contents.to_string()));
            Ok(())
        }

        fn fetch_text(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Failed to fetch {}", url))
        }

        fn download(&self, url: &str, dest: &Path, _overwrite: bool) -> Result<()> {
            self.downloads
                .borrow_mut()
                .push((url.to_string(), dest.to_path_buf()));
            Ok(())
        }
    }

    #[test]
    fn test_run_as_root_prefixes_sudo_for_users() {
        let host = RecordingHost::new().as_user();
        host.run_as_root(&["apt", "install", "-y", "ffmpeg"], "");
        assert_eq!(host.commands(), vec!["sudo apt install -y ffmpeg"]);
    }

    #[test]
    fn test_run_as_root_without_sudo_for_root() {
        let host = RecordingHost::new();
        host.run_as_root(&["dpkg", "--configure", "-a"], "");
        assert_eq!(host.commands(), vec!["dpkg --configure -a"]);
    }
}
