use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::batch::scheduler::ProgressSink;

pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    url_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            url_progress: None,
            enabled,
        }
    }

    /// Reporter whose bars are tracked but never drawn
    pub fn hidden() -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
            url_progress: None,
            enabled: true,
        }
    }

    pub fn start_probing(&mut self, total_urls: usize) {
        if !self.enabled {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new(total_urls as u64));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} URLs probed ({percent}%)")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Probing URLs");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.url_progress = Some(pb);
    }

    pub fn update_progress(&self, completed: usize, total: usize) {
        if let Some(ref pb) = self.url_progress {
            pb.set_length(total as u64);
            pb.set_position(completed as u64);
        }
    }

    pub fn position(&self) -> Option<u64> {
        self.url_progress.as_ref().map(ProgressBar::position)
    }

    pub fn finish_probing(&self, success_count: usize, total_count: usize) {
        if let Some(ref pb) = self.url_progress {
            let message = if success_count == total_count {
                format!("✓ Complete! Probed {total_count} URLs")
            } else {
                format!("✓ Complete ({success_count}/{total_count} returned 2xx)")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
        }
    }

    pub fn log_warning(&self, message: &str) {
        if self.enabled {
            self.multi_progress
                .println(format!("⚠ {message}"))
                .unwrap_or(());
        }
    }
}

impl ProgressSink for ProgressReporter {
    fn on_progress(&self, completed: usize, total: usize) {
        self.update_progress(completed, total);
    }
}
