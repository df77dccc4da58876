//! Subprocess execution that reports failures and keeps going.

use duct::cmd;

use crate::ui::prelude::*;

fn needs_quoting(arg: &str) -> bool {
    arg.is_empty()
        || !arg
            .chars()
            .all(|c| c.is_alphanumeric() || "-_=/.:,+@".contains(c))
}

/// Render an argument list the way a user would type it, single-quoting
/// arguments with shell metacharacters.
pub fn display_command(args: &[&str]) -> String {
    args.iter()
        .map(|arg| {
            if needs_quoting(arg) {
                format!("'{}'", arg.replace('\'', r"'\''"))
            } else {
                arg.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a command failure. `msg` usually starts with "when".
pub fn report_failure(msg: &str, detail: &str) {
    let headline = if msg.is_empty() {
        "An error occurred!".to_string()
    } else {
        format!("An error occurred {}", msg)
    };
    emit(
        Level::Error,
        "cmd.failed",
        &format!("{} [Error] {}", char::from(NerdFont::CrossCircle), headline),
        Some(serde_json::json!({ "detail": detail })),
    );
    emit(
        Level::Error,
        "cmd.failed.detail",
        &format!("Error message\n\t{}", detail),
        None,
    );
}

/// Run a command with inherited stdio.
///
/// Failures are printed and swallowed; the return value only tells whether
/// the command exited successfully.
pub fn run(args: &[&str], msg: &str) -> bool {
    let Some((program, rest)) = args.split_first() else {
        return false;
    };

    let rendered = display_command(args);
    emit(
        Level::Debug,
        "cmd.run",
        &format!("{} {}", char::from(NerdFont::Terminal), rendered),
        None,
    );

    match cmd(*program, rest).unchecked().run() {
        Ok(output) if output.status.success() => true,
        Ok(output) => {
            report_failure(
                msg,
                &format!("Command '{}' returned {}", rendered, output.status),
            );
            false
        }
        Err(err) => {
            report_failure(msg, &format!("Command '{}' could not start: {}", rendered, err));
            false
        }
    }
}

/// Check whether a program is reachable through PATH.
pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}
