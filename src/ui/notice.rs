//! Confirmation notice shown before an installer touches the system.

use anyhow::{Context, Result};
use dialoguer::Confirm;

use super::NerdFont;

/// Show `msg` and wait for the user to accept it.
///
/// Returns `false` when the user declines.
pub fn notice(msg: &str, ok: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(format!("{} {}\n  {}?", char::from(NerdFont::Warning), msg, ok))
        .default(true)
        .interact()
        .context("reading confirmation from terminal")
}
