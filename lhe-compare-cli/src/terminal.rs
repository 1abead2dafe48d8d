// ============================================================================
// lhe-compare-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL PRESENTATION: renders pipeline events for a human
//
// One status fragment per produced artifact, a blank line, then the
// comparator output forwarded verbatim. A spinner runs on stderr while each
// ffmpeg pass is in flight; indicatif hides it when stderr is not a terminal.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use lhe_compare_core::{Event, EventHandler, Stage};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Event handler that prints progress for interactive use.
pub struct TerminalEventHandler {
    presenter: Mutex<TerminalPresenter>,
}

impl Default for TerminalEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEventHandler {
    pub fn new() -> Self {
        Self {
            presenter: Mutex::new(TerminalPresenter::default()),
        }
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        let Ok(mut presenter) = self.presenter.lock() else {
            return;
        };

        match event {
            Event::RunStarted { identifier, work_dir, .. } => {
                presenter.render_header(identifier, work_dir);
            }

            Event::InputMissing { .. } => {
                println!("file does not exist");
            }

            Event::Probed { dimensions } => {
                println!("  {:<12} {}", "Dimensions:", dimensions);
            }

            Event::StageStarted {
                stage: Stage::Transcode(step),
            } => {
                presenter.start_spinner(&format!("{}...", step));
            }

            Event::TranscodeProgress { step, frame, speed, .. } => {
                presenter.update_spinner(&format!("{}... frame {} ({:.1}x)", step, frame, speed));
            }

            Event::ArtifactProduced { path, bytes, .. } => {
                presenter.finish_spinner();
                println!(
                    "  {} {} ({} bytes)",
                    style("✓").green().bold(),
                    file_name(path),
                    bytes
                );
            }

            Event::StageStarted {
                stage: Stage::Compare,
            } => {
                presenter.finish_spinner();
                println!("  {}", style("comparing").dim());
                println!();
            }

            Event::ComparisonLine { line } => {
                println!("{}", line);
            }

            Event::Warning { message, .. } => {
                presenter.with_spinner_suspended(|| {
                    println!("  {} {}", style("⚠").bold().yellow(), style(message).yellow());
                });
            }

            Event::StageFailed { stage, message } => {
                presenter.finish_spinner();
                println!(
                    "  {} {} {}",
                    style("✗").bold().red(),
                    style(format!("{}:", stage)).bold().red(),
                    message
                );
            }

            // Removals are logged by the core; the rest needs no output
            Event::ArtifactRemoved { .. }
            | Event::StageStarted { .. }
            | Event::RunComplete { .. } => {}
        }
    }
}

#[derive(Default)]
struct TerminalPresenter {
    spinner: Option<ProgressBar>,
}

impl TerminalPresenter {
    fn render_header(&self, identifier: &str, work_dir: &Path) {
        println!(
            "{} {} {}",
            style("LHE comparison:").bold(),
            style(identifier).cyan().bold(),
            style(format!("({})", work_dir.display())).dim()
        );
    }

    fn start_spinner(&mut self, message: &str) {
        self.finish_spinner();
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
            pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(pb);
    }

    // With --parallel two steps share one spinner; the latest message wins
    fn update_spinner(&self, message: &str) {
        if let Some(pb) = &self.spinner {
            pb.set_message(message.to_string());
        }
    }

    fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn with_spinner_suspended<F: FnOnce()>(&self, f: F) {
        match &self.spinner {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_name_falls_back_to_full_path() {
        assert_eq!(file_name(Path::new("files/clip_orig.yuv")), "clip_orig.yuv");
        assert_eq!(file_name(&PathBuf::from("/")), "/");
    }
}
