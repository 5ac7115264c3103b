//! Terminal output for the CLI.
//!
//! Every line goes through [`emit`]: in `--json` mode it becomes one JSON
//! object per line on stdout, otherwise the human rendering runs unless
//! `--quiet` suppresses it. Warnings and errors survive `--quiet`.

use std::fmt::Display;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static SETTINGS: RwLock<OutputConfig> = RwLock::new(OutputConfig::new(false, false, 0));

/// Whether a line is dropped by `--quiet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    Regular,
    Always,
}

fn settings() -> OutputConfig {
    *SETTINGS.read()
}

fn json_line(kind: &str, payload: Value) -> Value {
    json!({ "type": kind, "payload": payload })
}

fn emit(kind: &str, payload: Value, reach: Reach, human: impl FnOnce()) {
    let settings = settings();
    if settings.json {
        println!("{}", json_line(kind, payload));
    } else if reach == Reach::Always || !settings.quiet {
        human();
    }
}

fn message(text: &str) -> Value {
    json!({ "message": text })
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *SETTINGS.write() = config;
}

/// True in `--json` mode; handlers then print one structured result.
#[must_use]
pub fn is_json() -> bool {
    settings().json
}

/// Number of `-v` flags given.
#[must_use]
pub fn verbosity() -> u8 {
    settings().verbose
}

/// Print the tool name and version.
pub fn header(version: &str) {
    emit(
        "header",
        json!({ "app": "deployctl", "version": version }),
        Reach::Regular,
        || println!("{} {}\n", "deployctl".bold(), version.dimmed()),
    );
}

/// Print a bold section title preceded by a blank line.
pub fn section(title: &str) {
    emit("section", json!({ "title": title }), Reach::Regular, || {
        println!("\n{}", title.bold());
    });
}

/// Print a dimmed label followed by its value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        "field",
        json!({ "label": label, "value": value }),
        Reach::Regular,
        || println!("  {:<14} {}", label.dimmed(), value),
    );
}

/// Print a line with a green check mark.
pub fn success(text: &str) {
    emit("success", message(text), Reach::Regular, || {
        println!("  {} {}", "✓".green(), text);
    });
}

/// Print a warning line. Shown in quiet mode too.
pub fn warning(text: &str) {
    emit("warning", message(text), Reach::Always, || {
        println!("  {} {}", "⚠".yellow(), text);
    });
}

/// Print an error line to stderr, JSON-encoded in `--json` mode.
pub fn error(text: &str) {
    if settings().json {
        eprintln!("{}", json_line("error", message(text)));
    } else {
        eprintln!("  {} {}", "×".red(), text);
    }
}

/// Print a rich diagnostic to stderr; JSON mode falls back to [`error`].
pub fn diagnostic(report: miette::Report) {
    if settings().json {
        error(&report.to_string());
    } else {
        eprintln!("{report:?}");
    }
}

/// Print secondary information, dimmed.
pub fn note(text: &str) {
    emit("note", message(text), Reach::Regular, || {
        println!("  {}", text.dimmed());
    });
}

/// Print a suggested next command.
pub fn hint(text: &str) {
    emit("hint", message(text), Reach::Regular, || {
        println!("  {}: {}", "hint".cyan().dimmed(), text.dimmed());
    });
}

/// Print a finished step such as "Applied k8s/backend.yaml".
pub fn action_done(verb: &str, target: &str) {
    emit(
        "action",
        json!({ "verb": verb, "target": target, "status": "done" }),
        Reach::Regular,
        || println!("  {} {} {}", "✓".green(), verb.bold().green(), target),
    );
}

fn styled(value: impl Display, paint: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        paint(&value)
    }
}

/// `value` in cyan; plain in JSON mode.
pub fn highlight(value: impl Display) -> String {
    styled(value, |text| text.cyan().to_string())
}

/// `value` dimmed; plain in JSON mode.
pub fn muted(value: impl Display) -> String {
    styled(value, |text| text.dimmed().to_string())
}

/// Print a command's structured result as a single JSON document.
pub fn json_output(value: Value) {
    println!("{value}");
}

const BRAILLE_SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn settled_style() -> ProgressStyle {
    ProgressStyle::with_template("  {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Start a spinner for a long-running step. Hidden in JSON or quiet mode.
pub fn spinner(text: &str) -> ProgressBar {
    let settings = settings();
    let pb = if settings.json || settings.quiet {
        ProgressBar::hidden()
    } else {
        let style = ProgressStyle::default_spinner()
            .tick_strings(BRAILLE_SPINNER)
            .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let pb = ProgressBar::new_spinner().with_style(style);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(text.to_string());
    pb
}

fn settle(pb: &ProgressBar, kind: &str, line: String, text: &str, reach: Reach) {
    if pb.is_hidden() {
        // No terminal to redraw on: print the outcome as an ordinary line.
        pb.finish_and_clear();
        emit(kind, message(text), reach, || println!("  {line}"));
    } else {
        pb.set_style(settled_style());
        pb.finish_with_message(line);
    }
}

/// Replace a spinner with a check mark and `text`.
pub fn spinner_success(pb: &ProgressBar, text: &str) {
    settle(pb, "spinner_success", format!("{} {}", "✓".green(), text), text, Reach::Regular);
}

/// Replace a spinner with a failure mark and `text`. Shown in quiet mode too.
pub fn spinner_fail(pb: &ProgressBar, text: &str) {
    settle(pb, "spinner_fail", format!("{} {}", "×".red(), text), text, Reach::Always);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lines_carry_kind_and_payload() {
        let line = json_line("field", json!({ "label": "Tag", "value": "v2" }));
        assert_eq!(line["type"], "field");
        assert_eq!(line["payload"]["value"], "v2");
    }
}
