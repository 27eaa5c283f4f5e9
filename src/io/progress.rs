//! Terminal progress for batch painting runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::painter::events::{PaintObserver, PaintPhase};
use crate::painter::scheduler::PaintStep;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] generation {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static STATUS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} [{elapsed_precise}] {prefix}: {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Generation bar and status spinner for the image being painted
///
/// Clones share the same bars: the painter's handle sets the phase shown as
/// the spinner prefix, the runner's handle counts placements.
#[derive(Clone)]
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    generation_bar: ProgressBar,
    status_bar: ProgressBar,
    placements: usize,
    painted: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with hidden bars
    pub fn new() -> Self {
        let multi_progress = MultiProgress::new();
        let generation_bar = multi_progress.add(ProgressBar::new(0));
        generation_bar.set_style(GENERATION_STYLE.clone());
        let status_bar = multi_progress.add(ProgressBar::new_spinner());
        status_bar.set_style(STATUS_STYLE.clone());

        Self {
            multi_progress,
            batch_bar: None,
            generation_bar,
            status_bar,
            placements: 0,
            painted: 0,
        }
    }

    /// Show a file counter when more than one image is processed
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.insert(0, batch_bar));
        }
    }

    /// Reset the bars for a new image
    pub fn start_file(&mut self, path: &Path, generations: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.generation_bar.set_length(generations as u64);
        self.generation_bar.set_position(0);
        self.generation_bar.set_prefix(display_name);
        self.status_bar.enable_steady_tick(Duration::from_millis(120));
        self.status_bar.set_prefix(PaintPhase::Preparing.to_string());
        self.placements = 0;
        self.painted = 0;
        self.refresh_status();
    }

    /// Count a painter step
    pub fn record_step(&mut self, step: &PaintStep) {
        match step {
            PaintStep::Placement { outcome, .. } => {
                self.placements += 1;
                if outcome.is_painted() {
                    self.painted += 1;
                }
            }
            PaintStep::GenerationEnd { generation } => {
                self.generation_bar.set_position(*generation as u64 + 1);
            }
        }
        self.refresh_status();
    }

    /// Mark the current image as done
    pub fn complete_file(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        self.status_bar
            .set_message(format!("done: {} strokes painted", self.painted));
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        self.status_bar.finish_and_clear();
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn refresh_status(&self) {
        self.status_bar.set_message(format!(
            "{} placements, {} painted",
            self.placements, self.painted
        ));
    }
}

impl PaintObserver for ProgressManager {
    fn on_generation(&mut self, generation: usize) {
        self.generation_bar.set_position(generation as u64);
    }

    fn on_status(&mut self, phase: PaintPhase, _generation: usize) {
        self.status_bar.set_prefix(phase.to_string());
    }
}
