//! Terminal output: spinners and coloured messages.
//!
//! Uses `indicatif` for the spinner shown while a preview action runs and
//! `console` for colours. Rendered resumes go to stdout; logs go to stderr.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use crate::validation::ValidationErrors;
use crate::wizard::{Stage, SubmissionRecord};

/// Spinner for a running preview action, with coloured completion messages.
pub struct ActionProgress {
    // indicatif spinner, cleared before the result line is printed.
    pb: ProgressBar,
    // Bold green for the success mark.
    green: Style,
    // Bold red for the failure mark.
    red: Style,
}

impl ActionProgress {
    /// Starts spinning with `message` until `succeed` or `fail`.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Clears the spinner and prints a green check with `message`.
    pub fn succeed(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.green.apply_to("✓"));
    }

    /// Clears the spinner and prints a red cross with `message`.
    pub fn fail(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }
}

/// Green check line.
pub fn success(message: &str) {
    println!("  {} {message}", Style::new().green().bold().apply_to("✓"));
}

/// Yellow bang line for recoverable problems.
pub fn warning(message: &str) {
    println!("  {} {message}", Style::new().yellow().apply_to("!"));
}

/// Validation problems grouped by the stage that owns them.
pub fn print_validation(errors: &ValidationErrors) {
    let red = Style::new().red();
    let bold = Style::new().bold();
    for stage in errors.stages() {
        println!("{}", bold.apply_to(stage.title()));
        for (path, message) in errors.iter().filter(|(p, _)| Stage::owning(p) == stage) {
            println!("  {} {path}: {message}", red.apply_to("✗"));
        }
    }
}

/// Prints the submission record as pretty JSON.
pub fn print_submission(record: &SubmissionRecord) {
    println!();
    println!("{}", Style::new().green().apply_to("─── Resume saved ───"));
    match serde_json::to_string_pretty(record) {
        Ok(json) => println!("{json}"),
        Err(err) => error!(error = %err, "failed to serialise submission record"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::render::TemplateId;

    #[test]
    fn submission_record_serialises_for_display() {
        let record = SubmissionRecord {
            full_name: "Jane Doe".into(),
            template: TemplateId::Tech,
            stages_visited: Stage::ALL.to_vec(),
            submitted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&record).unwrap()).unwrap();
        assert_eq!(json["full_name"], "Jane Doe");
        assert_eq!(json["template"], "tech");
        assert_eq!(json["stages_visited"].as_array().unwrap().len(), Stage::ALL.len());
        print_submission(&record);
    }
}
