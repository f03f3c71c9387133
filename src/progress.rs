//! Progress indicator: completion percentage and "Step X of Y" label.
//!
//! A pure projection of [`WizardState`]. The percentage counts the current
//! step as reached, so the first of four steps reads 25% and the last reads
//! 100%.

use crate::locale::{self, Locale};
use crate::wizard::WizardState;
use maud::{Markup, html};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// `round(100 * (index + 1) / total)`, halves rounded up.
    pub percentage: u8,
    pub label: String,
}

impl Progress {
    pub fn of(state: &WizardState, locale: Locale) -> Self {
        let step = state.current_step_index + 1;
        let total = state.total_steps.max(1);
        Self {
            percentage: percentage(step, total),
            label: locale::step_counter(locale, step, total),
        }
    }

    /// Accessible progress bar plus the step counter.
    pub fn render(&self) -> Markup {
        let width = format!("width: {}%;", self.percentage);
        html! {
            div.wizard-progress {
                div.wizard-progress-track
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=(self.percentage)
                    aria-valuetext=(self.label) {
                    div.wizard-progress-bar style=(width) {}
                }
                p.wizard-progress-label { (self.label) }
            }
        }
    }
}

fn percentage(step: usize, total: usize) -> u8 {
    let step = step.min(total);
    ((200 * step + total) / (2 * total)) as u8
}
