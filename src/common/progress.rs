use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ui::prelude::*;

fn hide_in_json_mode(pb: &ProgressBar) {
    if get_output_format() == OutputFormat::Json {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
}

pub fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("⠁⠉⠙⠚⠒⠂⠂⠒⠲⠴⠤⠄⠄⠤⠠⠠⠤⠦⠖⠒⠐⠐⠒⠓⠋⠉ "));
    }
    hide_in_json_mode(&pb);
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Byte progress bar; falls back to a spinner when the size is unknown.
pub fn create_download_bar(total: Option<u64>, message: String) -> ProgressBar {
    let Some(total) = total else {
        return create_spinner(message);
    };

    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg}\n{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
    {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
    }
    hide_in_json_mode(&pb);
    pb.set_message(message);
    pb
}

/// Finish a progress bar and print a success message with a checkmark
pub fn finish_with_success(pb: ProgressBar, code: &str, message: impl Into<String>) {
    pb.finish_and_clear();
    emit(
        Level::Success,
        code,
        &format!("{} {}", char::from(NerdFont::Check), message.into()),
        None,
    );
}
