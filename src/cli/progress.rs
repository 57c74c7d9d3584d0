//! Spinners for slow operations

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::OutputFormat;

/// Spinner on stderr, hidden for JSON output.
///
/// indicatif draws nothing when stderr is not a terminal.
pub fn spinner(message: &str, format: OutputFormat) -> ProgressBar {
    if !format.is_human() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `fut` behind a spinner, clearing it when done.
pub async fn with_spinner<T>(message: &str, format: OutputFormat, fut: impl Future<Output = T>) -> T {
    let pb = spinner(message, format);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
