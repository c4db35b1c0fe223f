//! Terminal progress for category builds.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use picword_import::ImportProgress;

/// Reports build phases through the log and entry progress on a bar.
pub(crate) struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(bar_style());
        Self { bar }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  {bar:30.cyan/dim} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// A ticking spinner, hidden in quiet mode.
pub(crate) fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("/-\\|"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A bar of `len` steps, hidden in quiet mode.
pub(crate) fn bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(bar_style());
    pb
}

impl ImportProgress for CliProgress {
    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
        self.bar.set_position(0);
        self.bar.set_length(0);
        self.bar.set_message("");
    }

    fn on_entry(&self, current: usize, total: usize, label: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(label.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}
