//! Terminal presenter
//!
//! Renders poller notifications on stdout: a coloured status line,
//! timestamped log lines and the final result text.

use colored::*;
use jobwatch_poller::Presenter;
use std::sync::Mutex;

/// How the followed job ended, as seen by the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Completed,
    Failed,
    Stopped,
}

/// Presenter that prints to the terminal
pub struct ConsolePresenter {
    job_id: Mutex<Option<String>>,
    outcome: Mutex<Outcome>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            job_id: Mutex::new(None),
            outcome: Mutex::new(Outcome::Running),
        }
    }

    /// Starts with `job_id` as the entered job id
    pub fn with_job_id(job_id: impl Into<String>) -> Self {
        let presenter = Self::new();
        *presenter.job_id.lock().unwrap() = Some(job_id.into());
        presenter
    }

    pub fn outcome(&self) -> Outcome {
        *self.outcome.lock().unwrap()
    }

    fn set_outcome(&self, outcome: Outcome) {
        *self.outcome.lock().unwrap() = outcome;
    }
}

impl Presenter for ConsolePresenter {
    fn on_status_changed(&self, status: &str, meta: &str) {
        if meta.is_empty() {
            println!("{} {}", "●".color(status_color(status)), colorize_status(status));
        } else {
            println!(
                "{} {}  {}",
                "●".color(status_color(status)),
                colorize_status(status),
                meta.dimmed()
            );
        }
    }

    fn on_log_line(&self, message: &str) {
        println!(
            "{} {}",
            format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed(),
            message
        );
    }

    fn on_result(&self, description: &str) {
        self.set_outcome(Outcome::Completed);
        println!();
        println!("{}", "Result:".bold());
        println!("{}", description);
    }

    fn on_failed(&self, message: &str) {
        self.set_outcome(Outcome::Failed);
        println!("{}", message.red());
    }

    fn on_pending(&self, message: &str) {
        println!("{}", message.dimmed());
    }

    fn on_job_submitted(&self, job_id: &str) {
        *self.job_id.lock().unwrap() = Some(job_id.to_string());
    }

    fn on_error(&self, _message: &str) {
        self.set_outcome(Outcome::Failed);
    }

    fn on_stopped(&self) {
        self.set_outcome(Outcome::Stopped);
    }

    fn current_job_id(&self) -> Option<String> {
        self.job_id.lock().unwrap().clone()
    }
}

/// Colour associated with a status
pub fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "done" => Color::Green,
        "failed" => Color::Red,
        "processing" => Color::Yellow,
        "queued" => Color::Magenta,
        _ => Color::BrightBlack,
    }
}

/// Colorize a status for display
pub fn colorize_status(status: &str) -> ColoredString {
    let label = if status.is_empty() { "unknown" } else { status };
    label.color(status_color(status)).bold()
}
