use std::sync::Arc;

use crdl_install::{InstallPhase, Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::{Lazy, OnceCell};

const PB_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {wide_msg}";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec}) {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> =
    Lazy::new(|| ProgressStyle::with_template(SPINNER_STYLE).ok().map(|s| s.tick_chars(TICK)));

/// Download progress on the terminal.
///
/// The bar is created on the first download event, so nothing is drawn
/// while the archive is still being probed or when the cache is hit.
pub struct DownloadTracker {
    prefix: String,
    pb: OnceCell<ProgressBar>,
}

impl DownloadTracker {
    pub fn new(prefix: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            prefix: prefix.into(),
            pb: OnceCell::new(),
        })
    }

    pub fn callback(self: &Arc<Self>) -> ProgressCallback {
        let tracker = Arc::clone(self);
        Arc::new(move |progress: &Progress| tracker.observe(progress))
    }

    pub fn observe(&self, progress: &Progress) {
        let pb = self.pb.get_or_init(|| self.build(progress.total_bytes));
        match progress.phase {
            InstallPhase::Downloading => pb.set_position(progress.bytes_downloaded),
            InstallPhase::Extracting => pb.set_message("unpacking"),
            InstallPhase::Completed => pb.finish_with_message("done"),
        }
    }

    fn build(&self, len: Option<u64>) -> ProgressBar {
        let (pb, style) = match len {
            Some(len) => (ProgressBar::new(len), PB_TEMPLATE.as_ref()),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE.as_ref()),
        };
        let pb = match style {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        pb.set_prefix(self.prefix.clone());
        pb
    }

    /// Remove an unfinished bar from the terminal, e.g. when the install
    /// failed midway. A finished bar stays drawn.
    pub fn abandon(&self) {
        if let Some(pb) = self.pb.get() {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
