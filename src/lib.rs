//! # Simple Site
//!
//! Multi-step form wizards for small bilingual (English/French) marketing
//! sites. A wizard splits one long form into a sequence of steps, checks each
//! step before letting the visitor move on, and hands everything collected to
//! a completion callback when the last step is submitted.
//!
//! # Architecture: Controller, Presenters, Markup
//!
//! ```text
//! StepRegistry ──► WizardController ──► WizardState ──► render_wizard ──► <form>
//!   (steps)         go_to_next            snapshot        progress
//!                   go_to_previous                        transition
//!                   go_to_step                            nav buttons
//!                   dispatch(NavAction) ◄── posted wizard_action ──┘
//! ```
//!
//! The controller owns all navigation state. Presenters ([`progress`],
//! [`transition`]) are pure functions of a state snapshot, and [`view`] turns
//! a snapshot into markup. Buttons in the markup post a
//! [`NavAction`](wizard::NavAction) back; nothing in the HTML changes state
//! by itself.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`wizard`] | Controller: current step, validation gate, guarded submission |
//! | [`step`] | Step definitions, the ordered registry, validators |
//! | [`progress`] | "Step X of Y" label and rounded completion percentage |
//! | [`transition`] | Keyed step wrapper with an optional enter animation |
//! | [`view`] | Maud rendering of the wizard, nav controls, and the page shell |
//! | [`definition`] | TOML wizard definitions for plain field-based wizards |
//! | [`config`] | `wizard.toml` loading, stock defaults, merging, CSS generation |
//! | [`locale`] | Supported locales, localized strings, built-in UI messages |
//! | [`form`] | Values collected across steps |
//! | [`output`] | CLI output formatting for simulated runs |
//!
//! # Design Decisions
//!
//! ## Single-Threaded Controller
//!
//! Validators and completion callbacks are async, but a wizard belongs to one
//! visitor session. [`WizardController`](wizard::WizardController) keeps its
//! state in `RefCell`s and every operation takes `&self`, so two overlapping
//! `go_to_next` calls (a double click) are expressible, and the second one
//! observes `is_submitting` and is ignored. No borrow is held across an
//! `.await`.
//!
//! Futures returned by the controller run on any executor, except that a
//! configured submission timeout uses tokio's timer. Polled outside a tokio
//! runtime, such a submission fails with
//! [`CompletionError::NoRuntime`](wizard::CompletionError::NoRuntime).
//!
//! ## Results Are Dropped When the Wizard Moved On
//!
//! A validation that resolves after the visitor navigated or edited a field
//! does not move or reject anything, even if the visitor has since come back
//! to the same step. The controller keeps a revision counter, bumped on every
//! index change and field edit, and reports
//! [`NavOutcome::Ignored`](wizard::NavOutcome::Ignored) when it moved.
//!
//! ## Explicit Step Context
//!
//! Step content is any [`StepView`](view::StepView). It receives a
//! [`StepContext`](view::StepContext) with its position, the locale, and the
//! collected values, and nothing else. There is no ambient wizard to reach
//! into.
//!
//! ## Maud for Markup
//!
//! As with the rest of the site, HTML is built with
//! [Maud](https://maud.lambda.xyz/): checked at compile time and escaped by
//! default. Step descriptions are markdown rendered with `pulldown-cmark`.

pub mod config;
pub mod definition;
pub mod form;
pub mod locale;
pub mod output;
pub mod progress;
pub mod step;
pub mod transition;
pub mod view;
pub mod wizard;
