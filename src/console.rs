//! Colored console output and the interactive stop-on-find prompt.

use crate::engine::{FoundDecision, Verdict};
use crate::types::{DiscoveryResult, Finding};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;

/// Console output handler with colors and formatting.
#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
}

impl ConsoleOutput {
    pub fn new(verbose: bool, json_mode: bool) -> Self {
        Self { verbose, json_mode }
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, target: &str) {
        if self.json_mode {
            return;
        }

        println!(
            "{} Scanning: {}",
            "[*]".bright_blue(),
            target.bright_white()
        );
    }

    /// Print scan progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.json_mode || !self.verbose {
            return;
        }

        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print a reachable candidate.
    pub fn print_finding(&self, finding: &Finding) {
        if self.json_mode {
            return;
        }

        println!(
            "{} {} [{}]",
            "[+]".green().bold(),
            finding.url.bright_white(),
            finding.status.to_string().green()
        );
    }

    /// Print run summary; in JSON mode this is the whole machine output.
    pub fn print_summary(&self, result: &DiscoveryResult) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
            return;
        }

        println!();
        if result.found.is_empty() {
            println!("{} No admin panels found", "[-]".yellow());
        } else {
            println!(
                "{} {} reachable path(s) in {:.2}s:",
                "[*]".bright_blue(),
                result.found.len().to_string().bright_white().bold(),
                result.duration_secs
            );
            for finding in &result.found {
                println!("    {} ({})", finding.url, finding.status);
            }
        }

        for error in &result.errors {
            println!("{} {}", "[!]".yellow(), error.dimmed());
        }
    }

    /// Spinner shown while a pass streams its wordlist. Suppressed in JSON
    /// mode so stdout stays machine-readable.
    pub fn create_spinner(&self) -> Option<ProgressBar> {
        if self.json_mode {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Some(spinner)
    }
}

/// Stdin-backed stop-on-find prompt. A literal `n` answer halts the run; any
/// other answer resumes enumeration.
pub struct ConsolePrompt;

impl FoundDecision for ConsolePrompt {
    fn on_found(&self, finding: &Finding) -> Verdict {
        println!(
            "{} Found {} with status {}",
            "[+]".green().bold(),
            finding.url.bright_white(),
            finding.status
        );
        print!("Do you want to continue? [y/n] ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return Verdict::Continue;
        }

        if answer.trim().eq_ignore_ascii_case("n") {
            Verdict::Halt
        } else {
            Verdict::Continue
        }
    }
}
