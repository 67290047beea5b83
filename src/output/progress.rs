use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{done, figure, heading, icon};

/// Percentage progress bar driven by the source and pipeline callbacks.
pub struct ExportProgress {
    pb: ProgressBar,
}

impl ExportProgress {
    pub fn start() -> Self {
        eprintln!("{}  {}", icon("⚙️"), heading("Export"));
        let pb = ProgressBar::new(100);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  {msg} [{bar:40.yellow}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.set_message(figure("Fetching issues").to_string());
        Self { pb }
    }

    /// Moves the bar to `percent`; values are clamped to 0..=100 and never
    /// move the bar backwards.
    pub fn set(&self, percent: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let position = percent.clamp(0.0, 100.0).round() as u64;
        if position > self.pb.position() {
            self.pb.set_position(position);
        }
    }

    pub fn start_processing(&self) {
        self.pb
            .set_message(figure("Processing issues").to_string());
    }

    pub fn finish(self) {
        self.pb
            .finish_with_message(done("Issues exported ✓").to_string());
        eprintln!();
    }

    pub fn abandon(self) {
        self.pb.abandon();
        eprintln!();
    }
}
