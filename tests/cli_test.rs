mod common;
mod utils;

use anyhow::Result;
use common::TestEnvironment;
use utils::run_distro_apps;

#[test]
fn test_detect_reports_json() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(
        &env,
        "ubuntu",
        &["--output", "json", "--arch", "arm64", "detect"],
    )?;
    assert_eq!(output.exit_code, 0, "detect failed: {}", output.stderr);

    let events = output.events_with_code("detect");
    assert_eq!(events.len(), 1);
    let data = &events[0]["data"];
    assert_eq!(data["family"], "debian");
    assert_eq!(data["derivative"], "ubuntu");
    assert_eq!(data["arch"], "arm64");
    assert_eq!(data["name"], "Ubuntu 22.04.3 LTS (Jammy Jellyfish)");
    assert_eq!(data["package_manager"], "APT");

    Ok(())
}

#[test]
fn test_detect_text() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "fedora", &["detect"])?;
    assert_eq!(output.exit_code, 0, "detect failed: {}", output.stderr);
    assert!(output.stdout.contains("Fedora Linux 40 (Workstation Edition)"));
    assert!(output.stdout.contains("Red Hat"));
    assert!(output.stdout.contains("fedora"));

    Ok(())
}

#[test]
fn test_list() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "arch", &["list"])?;
    assert_eq!(output.exit_code, 0);
    for expected in ["Firefox", "Vivaldi", "JetBrains IDEs", "idea-community", "esr"] {
        assert!(output.stdout.contains(expected), "missing {expected} in:\n{}", output.stdout);
    }

    let output = run_distro_apps(&env, "arch", &["--output", "json", "list"])?;
    let events = output.events_with_code("list");
    assert_eq!(events[0]["data"].as_array().map(|apps| apps.len()), Some(3));

    Ok(())
}

#[test]
fn test_dry_run_jetbrains_install() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(
        &env,
        "arch",
        &["--output", "json", "--dry-run", "--arch", "amd64", "install", "jetbrains", "goland"],
    )?;
    assert_eq!(output.exit_code, 0, "install failed: {}", output.stderr);

    let downloads = output.events_with_code("dry_run.download");
    assert_eq!(downloads.len(), 1);
    let message = downloads[0]["message"].as_str().unwrap_or_default();
    assert!(message.contains("https://download.jetbrains.com/go/goland-2024.3.3.tar.gz"));
    assert!(message.contains("/tmp/goland-amd64.tar.gz"));

    let commands: Vec<String> = output
        .events_with_code("dry_run.command")
        .iter()
        .filter_map(|event| event["message"].as_str().map(str::to_string))
        .collect();
    assert_eq!(commands.len(), 3, "unexpected commands: {commands:?}");
    assert!(commands[0].contains("mkdir -p /opt/goland"));
    assert!(commands[1].contains("--strip-components=1"));
    assert!(commands[2].contains("ln -sfv /opt/goland/bin/goland.sh /usr/bin/goland"));

    assert_eq!(output.events_with_code("app.installed").len(), 1);
    Ok(())
}

#[test]
fn test_config_file_is_honored() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config(
        r#"jetbrains_root = "/srv/ide"
bin_dir = "/usr/local/bin"

[jetbrains_versions]
rustrover = "2025.1"
"#,
    )?;

    let output = run_distro_apps(
        &env,
        "ubuntu",
        &["--dry-run", "--arch", "arm64", "install", "jetbrains", "rustrover"],
    )?;
    assert_eq!(output.exit_code, 0, "install failed: {}", output.stderr);
    assert!(output
        .stdout
        .contains("https://download.jetbrains.com/rustrover/RustRover-2025.1-aarch64.tar.gz"));
    assert!(output
        .stdout
        .contains("ln -sfv /srv/ide/rustrover/bin/rustrover.sh /usr/local/bin/rustrover"));

    Ok(())
}

#[test]
fn test_unsupported_architecture_fails() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(
        &env,
        "arch",
        &["--dry-run", "--arch", "riscv64", "install", "jetbrains", "clion"],
    )?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("Unsupported architecture: riscv64"));
    assert!(!output.stdout.contains("[dry-run]"));

    Ok(())
}

#[test]
fn test_vivaldi_refuses_arch() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "arch", &["--dry-run", "install", "vivaldi"])?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains(
        "Vivaldi can only be installed on Debian & RHEL & Gentoo & Void Linux, but this system is arch"
    ));

    Ok(())
}

#[test]
fn test_dry_run_firefox_on_arch() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "arch", &["--dry-run", "install", "firefox"])?;
    assert_eq!(output.exit_code, 0, "install failed: {}", output.stderr);
    assert!(output
        .stdout
        .contains("pacman -S --noconfirm --needed firefox firefox-i18n-zh-cn firefox-i18n-zh-tw"));
    assert!(!output.stdout.contains("dpkg"));

    Ok(())
}

#[test]
fn test_config_init_and_show() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "arch", &["config", "init"])?;
    assert_eq!(output.exit_code, 0, "init failed: {}", output.stderr);
    assert!(env.config_path().exists());

    let output = run_distro_apps(&env, "arch", &["config", "init"])?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("--force"));

    let output = run_distro_apps(&env, "arch", &["config", "show"])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains("http_timeout_secs = 10"));
    assert!(output.stdout.contains("vivaldi_download_page"));

    Ok(())
}

#[test]
fn test_completions_generate() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = run_distro_apps(&env, "arch", &["completions", "generate", "zsh"])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stdout.contains("#compdef distro-apps"));

    Ok(())
}
