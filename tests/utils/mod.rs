use anyhow::Result;
use serde_json::Value;
use std::process::Command;

use super::common::{TestEnvironment, fixture};

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandOutput {
    /// Every stdout line parsed as a JSON event.
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn events_with_code(&self, code: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|event| event["code"] == code)
            .collect()
    }
}

/// Run the built binary against the environment's config and an os-release
/// fixture. Colors are always off.
pub fn run_distro_apps(
    env: &TestEnvironment,
    distro: &str,
    args: &[&str],
) -> Result<CommandOutput> {
    let output = Command::new(env!("CARGO_BIN_EXE_distro-apps"))
        .arg("--no-color")
        .arg("--config")
        .arg(env.config_path())
        .arg("--os-release")
        .arg(fixture(distro))
        .args(args)
        .env("HOME", env.path())
        .env("XDG_DATA_HOME", env.path().join("data"))
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}
