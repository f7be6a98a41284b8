//! Progress reporting infrastructure

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::borrow::Cow;

/// CLI progress report of ongoing operations
///
/// To avoid corrupted terminal output, you should not write anything to stdout
/// or stderr yourself as long as a report is being displayed. Please use logs
/// for debug messages.
#[derive(Clone, Debug, Default)]
pub struct ProgressReport(MultiProgress);
//
impl ProgressReport {
    /// Prepare to report progress on the cli
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that is never displayed, for tests
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    /// Prepare to report on a new operation
    pub fn add(&self, what: impl Into<Cow<'static, str>>, work: Work) -> ProgressTracker {
        let (bar, template) = match work {
            Work::Steps(steps) => (
                ProgressBar::new(steps as u64),
                "{prefix} {wide_bar} {percent:>2}% (~{eta} left)",
            ),
            Work::Bytes(Some(bytes)) => (
                ProgressBar::new(bytes),
                "{prefix} {wide_bar} {decimal_bytes}/{decimal_total_bytes} ({decimal_bytes_per_sec})",
            ),
            Work::Bytes(None) => (
                ProgressBar::new_spinner(),
                "{prefix} {spinner} {decimal_bytes} ({decimal_bytes_per_sec})",
            ),
        };
        let bar = bar.with_prefix(what).with_style(
            ProgressStyle::with_template(template)
                .expect("all styles above should be valid indicatif styles"),
        );
        ProgressTracker {
            bar: self.0.add(bar),
            report: self.0.clone(),
        }
    }
}

/// Work whose progression can be tracked
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Work {
    /// Steps to be taken, with a percentage-based display
    Steps(usize),

    /// Bytes to be transferred, if the total is known in advance
    Bytes(Option<u64>),
}

/// Mechanism to track progress
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    /// Progress bar for this specific operation
    bar: ProgressBar,

    /// Underlying process report
    report: MultiProgress,
}
//
impl ProgressTracker {
    /// Show that a certain amount of progress has been made
    pub fn make_progress(&self, progress: u64) {
        self.bar.inc(progress);
    }

    /// Hide the progress bar once the operation is over
    pub fn finish(self) {
        self.bar.finish_and_clear();
        self.report.remove(&self.bar);
    }
}
