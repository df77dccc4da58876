use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use crate::common::progress::{create_download_bar, create_spinner, finish_with_success};
use crate::ui::prelude::*;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Zero seconds means no bound at all.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Create a blocking HTTP client with the given total request timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout_from_secs(timeout_secs))
        .build()
        .context("Failed to create HTTP client")
}

/// GET a page and return its body.
pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let spinner = create_spinner(format!("Fetching {}", url));

    let result = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("Failed to fetch {}", url));

    spinner.finish_and_clear();
    result
}

/// Download `url` to `dest`, keeping an existing file unless `overwrite`.
///
/// The body is streamed into a temporary file in the destination directory and
/// only moved into place once complete.
pub fn download(client: &Client, url: &str, dest: &Path, overwrite: bool) -> Result<()> {
    if dest.exists() && !overwrite {
        emit(
            Level::Info,
            "network.download.cached",
            &format!(
                "{} {} already exists, skipping download",
                char::from(NerdFont::Info),
                dest.display()
            ),
            None,
        );
        return Ok(());
    }

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("creating download directory {}", parent.display()))?;

    let mut response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .with_context(|| format!("Failed to download {}", url))?;

    let mut staging = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("creating temporary file in {}", parent.display()))?;

    let pb = create_download_bar(
        response.content_length(),
        format!("{} Downloading {}", char::from(NerdFont::Download), url),
    );
    let copied = {
        let mut writer = pb.wrap_write(staging.as_file_mut());
        response.copy_to(&mut writer)
    };
    if let Err(err) = copied {
        pb.abandon();
        return Err(err).with_context(|| format!("Failed to download {}", url));
    }

    fs::set_permissions(staging.path(), fs::Permissions::from_mode(0o644))
        .context("Failed to set permissions on downloaded file")?;
    staging
        .persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("moving download to {}", dest.display()))?;

    finish_with_success(
        pb,
        "network.download.done",
        format!("Downloaded {}", dest.display()),
    );
    Ok(())
}
