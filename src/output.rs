//! CLI output formatting for wizard runs.
//!
//! `simulate` prints one block per dispatched action: the action and its
//! outcome, then where the wizard ended up.
//!
//! ```text
//! 001 next → rejected
//!     Step 1 of 3 · Your details
//!     Error: Email is required
//! 002 next → moved 1 → 2
//!     Step 2 of 3 · Project
//! 003 next → submitted
//!     Step 3 of 3 · Review
//!
//! Collected
//!     email = ada@example.com
//! ```
//!
//! Each `format_*` function returns lines and does no I/O; the `print_*`
//! wrappers write them to stdout.

use crate::form::FormData;
use crate::locale::Locale;
use crate::progress::Progress;
use crate::wizard::{NavAction, NavOutcome, WizardState};

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn describe_action(action: NavAction) -> String {
    match action {
        NavAction::Next => "next".to_string(),
        NavAction::Previous => "previous".to_string(),
        NavAction::GoTo(i) => format!("goto {}", i + 1),
    }
}

fn describe_outcome(outcome: NavOutcome) -> String {
    match outcome {
        // Steps are shown 1-based everywhere a person reads them.
        NavOutcome::Moved { from, to } => format!("moved {} → {}", from + 1, to + 1),
        NavOutcome::Rejected => "rejected".to_string(),
        NavOutcome::Submitted => "submitted".to_string(),
        NavOutcome::SubmitFailed => "submission failed".to_string(),
        NavOutcome::Ignored => "ignored".to_string(),
    }
}

/// Where the wizard is: progress label, step title, and any pending error.
pub fn format_state(state: &WizardState, step_title: &str, locale: Locale) -> Vec<String> {
    let progress = Progress::of(state, locale);
    let mut lines = vec![format!("{} · {}", progress.label, step_title)];
    if state.has_error() {
        lines.push(format!("Error: {}", state.error_message));
    }
    lines
}

/// One dispatched action, numbered from 1.
pub fn format_transition(
    position: usize,
    action: NavAction,
    outcome: NavOutcome,
    state_lines: &[String],
) -> Vec<String> {
    let mut lines = vec![format!(
        "{:0>3} {} → {}",
        position,
        describe_action(action),
        describe_outcome(outcome)
    )];
    lines.extend(state_lines.iter().map(|l| format!("{}{}", indent(1), l)));
    lines
}

pub fn format_collected(data: &FormData) -> Vec<String> {
    let mut lines = vec!["Collected".to_string()];
    if data.is_empty() {
        lines.push(format!("{}(nothing)", indent(1)));
    }
    lines.extend(
        data.iter()
            .map(|(name, value)| format!("{}{} = {}", indent(1), name, value)),
    );
    lines
}

pub fn print_transition(
    position: usize,
    action: NavAction,
    outcome: NavOutcome,
    state_lines: &[String],
) {
    for line in format_transition(position, action, outcome, state_lines) {
        println!("{}", line);
    }
}

pub fn print_collected(data: &FormData) {
    println!();
    for line in format_collected(data) {
        println!("{}", line);
    }
}
