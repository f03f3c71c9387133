//! Transition presenter: shows exactly one step, keyed by its index.
//!
//! Each step renders inside its own keyed container (`id="wizard-step-N"`,
//! `data-step-key="N"`), so moving to another index replaces the whole panel
//! rather than patching it. Focus and other per-step client state cannot
//! carry over between steps.
//!
//! When motion is enabled the panel gets an enter-animation class and a CSS
//! duration variable. With [`Motion::Instant`] (motion disabled in config, or
//! the visitor prefers reduced motion) the same markup is emitted minus the
//! animation hooks. Nothing else differs between the two modes.

use maud::{Markup, html};

/// Whether step changes animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Animated { duration_ms: u32 },
    Instant,
}

impl Motion {
    pub fn from_config(animate: bool, duration_ms: u32) -> Self {
        if animate && duration_ms > 0 {
            Motion::Animated { duration_ms }
        } else {
            Motion::Instant
        }
    }
}

/// Wrap the active step's markup in its keyed container.
pub fn render_transition(index: usize, motion: Motion, body: Markup) -> Markup {
    let (class, style) = match motion {
        Motion::Animated { duration_ms } => (
            "wizard-step wizard-step-enter",
            Some(format!("--wizard-transition: {duration_ms}ms;")),
        ),
        Motion::Instant => ("wizard-step", None),
    };
    html! {
        section id={ "wizard-step-" (index) } class=(class) data-step-key=(index) style=[style] {
            (body)
        }
    }
}
