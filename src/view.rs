//! Server-rendered wizard markup.
//!
//! [`render_wizard`] turns a controller snapshot into one `<form>`:
//!
//! ```text
//! form.wizard
//! ├── div.wizard-progress          (when show_progress)
//! ├── section.wizard-step          (keyed by step index, see transition)
//! │   ├── header: title + markdown description
//! │   └── step content             (StepView::render with a StepContext)
//! ├── div.wizard-error[role=alert] (when error_message is non-empty)
//! └── div.wizard-nav
//!     ├── button[value=previous]   (only when allow_back)
//!     └── button[value=next]       ("Submit" on the last step)
//! ```
//!
//! Every control is a submit button named `wizard_action`; the posted value
//! parses into a [`NavAction`](crate::wizard::NavAction) which the embedding
//! handler passes to [`WizardController::dispatch`]. Nothing in the markup
//! changes state by itself.
//!
//! Step content never reaches into the wizard implicitly. It receives a
//! [`StepContext`] describing where it sits and how to link to other steps.

use crate::config::ColorConfig;
use crate::form::FormData;
use crate::locale::{Locale, Message};
use crate::progress::Progress;
use crate::transition::{Motion, render_transition};
use crate::wizard::{NavAction, WizardController};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/wizard.css");

/// Name of the form field carrying the navigation action.
pub const ACTION_FIELD: &str = "wizard_action";

/// What step content knows about its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext<'a> {
    pub index: usize,
    pub total: usize,
    pub locale: Locale,
    pub allow_back: bool,
    pub is_submitting: bool,
    /// Values collected so far, for pre-filling inputs.
    pub form: &'a FormData,
}

impl StepContext<'_> {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }

    /// A "jump to step" control, e.g. the "Edit" links on a summary step.
    /// Renders nothing for an out-of-range target.
    pub fn goto_button(&self, target: usize, label: &str) -> Markup {
        html! {
            @if target < self.total {
                button.wizard-goto type="submit" name=(ACTION_FIELD)
                    value=(NavAction::GoTo(target).as_value())
                    formnovalidate
                    disabled[self.is_submitting] { (label) }
            }
        }
    }
}

/// Renders a step's content payload.
pub trait StepView {
    fn render(&self, ctx: &StepContext<'_>) -> Markup;
}

impl StepView for Markup {
    fn render(&self, _ctx: &StepContext<'_>) -> Markup {
        self.clone()
    }
}

impl<T: StepView + ?Sized> StepView for Box<T> {
    fn render(&self, ctx: &StepContext<'_>) -> Markup {
        (**self).render(ctx)
    }
}

impl StepView for () {
    fn render(&self, _ctx: &StepContext<'_>) -> Markup {
        html! {}
    }
}

/// Content rendered by a closure. See [`view_fn`].
pub struct ViewFn<F>(F);

pub fn view_fn<F>(f: F) -> ViewFn<F>
where
    F: Fn(&StepContext<'_>) -> Markup,
{
    ViewFn(f)
}

impl<F> StepView for ViewFn<F>
where
    F: Fn(&StepContext<'_>) -> Markup,
{
    fn render(&self, ctx: &StepContext<'_>) -> Markup {
        (self.0)(ctx)
    }
}

/// Render the wizard's current state as a form.
pub fn render_wizard<C: StepView>(wizard: &WizardController<C>, motion: Motion) -> Markup {
    let state = wizard.state();
    let options = wizard.options();
    let locale = options.locale;
    let form = wizard.form();
    let ctx = StepContext {
        index: state.current_step_index,
        total: state.total_steps,
        locale,
        allow_back: options.allow_back,
        is_submitting: state.is_submitting,
        form: &form,
    };

    let step_body = match wizard.registry().get(state.current_step_index) {
        Some(step) => html! {
            header.wizard-step-header {
                h2 { (step.title.resolve(locale)) }
                @if let Some(desc) = &step.description {
                    div.wizard-step-description {
                        (render_markdown(desc.resolve(locale)))
                    }
                }
            }
            (step.content.render(&ctx))
        },
        None => html! {},
    };

    let next_label = if state.is_submitting {
        Message::Submitting
    } else if state.is_last() {
        Message::Submit
    } else {
        Message::Next
    };

    html! {
        form.wizard method="post" lang=(locale.code()) aria-busy=(state.is_submitting) {
            @if options.show_progress {
                (Progress::of(&state, locale).render())
            }
            (render_transition(state.current_step_index, motion, step_body))
            @if state.has_error() {
                div.wizard-error role="alert" { (state.error_message) }
            }
            div.wizard-nav {
                @if options.allow_back {
                    button.wizard-previous type="submit" name=(ACTION_FIELD)
                        value=(NavAction::Previous.as_value())
                        formnovalidate
                        disabled[state.is_first() || state.is_submitting] {
                        (Message::Previous.text(locale))
                    }
                }
                button.wizard-next type="submit" name=(ACTION_FIELD)
                    value=(NavAction::Next.as_value())
                    disabled[state.is_submitting] {
                    (next_label.text(locale))
                }
            }
        }
    }
}

fn render_markdown(source: &str) -> Markup {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// Full HTML document around a rendered wizard.
pub fn render_page(title: &str, locale: Locale, css: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                main.wizard-page {
                    (body)
                }
            }
        }
    }
}

/// Stylesheet for the wizard: color variables from config plus the static rules.
pub fn wizard_css(colors: &ColorConfig, padding: &str) -> String {
    format!(
        "{}\n\n:root {{\n    --wizard-padding: {};\n}}\n\n{}",
        crate::config::generate_color_css(colors),
        padding,
        CSS_STATIC
    )
}
