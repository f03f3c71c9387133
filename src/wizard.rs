//! The wizard controller: single owner of step navigation state.
//!
//! [`WizardController`] holds the [`WizardState`] of one mounted wizard and is
//! the only thing that mutates it. The presenters in [`crate::progress`],
//! [`crate::transition`] and [`crate::view`] read snapshots of it.
//!
//! ## Navigation contract
//!
//! - [`go_to_next`](WizardController::go_to_next) awaits the current step's
//!   validator before touching the index. On the last step it runs the
//!   completion callback instead of advancing.
//! - [`go_to_previous`](WizardController::go_to_previous) steps back, clamped
//!   at the first step. Only available when `allow_back` is set.
//! - [`go_to_step`](WizardController::go_to_step) jumps without validation.
//!   Out-of-range indices are ignored.
//!
//! Every operation is ignored while a submission is in flight. No operation
//! returns an error: validation and submission failures land in
//! [`WizardState::error_message`], which the view renders next to the
//! navigation controls.
//!
//! ## Concurrency
//!
//! The controller is single-threaded (`!Send`). Operations take `&self` so
//! that a second click can arrive while the first `go_to_next` is suspended
//! on a validator or the completion callback; the `is_submitting` flag and
//! the post-validation recheck keep such overlaps from submitting twice or
//! advancing from a step that was never validated. State borrows are never
//! held across an await.

use crate::form::FormData;
use crate::locale::{Locale, Message};
use crate::step::{StepRegistry, Validation};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const TARGET: &str = "simple_site::wizard";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,
    #[error("unknown navigation action '{0}'")]
    UnknownAction(String),
}

/// Failure reported by a [`Completion`] callback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("{0}")]
    Failed(String),
    #[error("submission timed out after {0:?}")]
    TimedOut(Duration),
    #[error("a submission timeout needs a tokio runtime")]
    NoRuntime,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        CompletionError::Failed(message.into())
    }

    /// Text shown in the error banner.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            CompletionError::Failed(m) if !m.trim().is_empty() => m.clone(),
            CompletionError::Failed(_) | CompletionError::NoRuntime => {
                Message::SubmitFailed.text(locale).to_string()
            }
            CompletionError::TimedOut(_) => Message::SubmitTimedOut.text(locale).to_string(),
        }
    }
}

/// Called once the final step passes validation.
pub trait Completion {
    fn complete(&self, data: FormData) -> LocalBoxFuture<'_, Result<(), CompletionError>>;
}

/// Completion backed by an async closure. See [`completion_fn`].
pub struct CompletionFn<F>(F);

pub fn completion_fn<F, Fut>(f: F) -> CompletionFn<F>
where
    F: Fn(FormData) -> Fut,
    Fut: Future<Output = Result<(), CompletionError>> + 'static,
{
    CompletionFn(f)
}

impl<F, Fut> Completion for CompletionFn<F>
where
    F: Fn(FormData) -> Fut,
    Fut: Future<Output = Result<(), CompletionError>> + 'static,
{
    fn complete(&self, data: FormData) -> LocalBoxFuture<'_, Result<(), CompletionError>> {
        Box::pin((self.0)(data))
    }
}

/// Construction-time behavior of one wizard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOptions {
    /// Offer a "Previous" control.
    pub allow_back: bool,
    /// Render the progress bar and step counter.
    pub show_progress: bool,
    /// Give up on the completion callback after this long.
    /// Requires a tokio runtime with the time driver when set; outside any
    /// runtime the submission fails with [`CompletionError::NoRuntime`].
    pub submit_timeout: Option<Duration>,
    pub locale: Locale,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            allow_back: true,
            show_progress: true,
            submit_timeout: None,
            locale: Locale::En,
        }
    }
}

/// Snapshot of where a wizard is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    /// Always in `0..total_steps`.
    pub current_step_index: usize,
    pub total_steps: usize,
    pub is_submitting: bool,
    /// Empty when there is nothing to report.
    pub error_message: String,
}

impl WizardState {
    pub fn initial(total_steps: usize) -> Self {
        Self {
            current_step_index: 0,
            total_steps,
            is_submitting: false,
            error_message: String::new(),
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_step_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_step_index + 1 == self.total_steps
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// What a navigation call did. Informational only; the state is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    Moved { from: usize, to: usize },
    /// The current step's validator said no.
    Rejected,
    Submitted,
    SubmitFailed,
    /// Not applicable right now (submitting, out of range, back disabled, stale).
    Ignored,
}

/// A navigation request coming from a rendered control.
///
/// The view renders buttons named `wizard_action` whose values parse into
/// this type: `next`, `previous`, `goto:N` (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    GoTo(usize),
}

impl NavAction {
    pub fn as_value(self) -> String {
        match self {
            NavAction::Next => "next".to_string(),
            NavAction::Previous => "previous".to_string(),
            NavAction::GoTo(i) => format!("goto:{i}"),
        }
    }
}

impl FromStr for NavAction {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "next" => Ok(NavAction::Next),
            "previous" | "prev" | "back" => Ok(NavAction::Previous),
            _ => s
                .strip_prefix("goto:")
                .and_then(|n| n.parse().ok())
                .map(NavAction::GoTo)
                .ok_or_else(|| WizardError::UnknownAction(s.to_string())),
        }
    }
}

/// Owner of one wizard's navigation state.
pub struct WizardController<C> {
    registry: StepRegistry<C>,
    options: WizardOptions,
    completion: Option<Box<dyn Completion>>,
    state: RefCell<WizardState>,
    form: RefCell<FormData>,
    /// Bumped on every index change and every field edit. A validator
    /// verdict only applies if this is unchanged when it resolves.
    revision: Cell<u64>,
}

impl<C> WizardController<C> {
    pub fn new(registry: StepRegistry<C>, options: WizardOptions) -> Self {
        let state = WizardState::initial(registry.len());
        Self {
            registry,
            options,
            completion: None,
            state: RefCell::new(state),
            form: RefCell::new(FormData::new()),
            revision: Cell::new(0),
        }
    }

    pub fn with_completion(mut self, completion: impl Completion + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    pub fn state(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn form(&self) -> FormData {
        self.form.borrow().clone()
    }

    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.form.borrow_mut().set(name, value);
        self.bump_revision();
    }

    fn bump_revision(&self) {
        self.revision.set(self.revision.get().wrapping_add(1));
    }

    pub fn registry(&self) -> &StepRegistry<C> {
        &self.registry
    }

    pub fn options(&self) -> &WizardOptions {
        &self.options
    }

    /// Validate the current step, then advance or submit.
    pub async fn go_to_next(&self) -> NavOutcome {
        let index = {
            let state = self.state.borrow();
            if state.is_submitting {
                tracing::trace!(target: TARGET, "next ignored while submitting");
                return NavOutcome::Ignored;
            }
            state.current_step_index
        };
        let locale = self.options.locale;

        if let Some(validator) = self.registry.get(index).and_then(|s| s.validator()) {
            let revision = self.revision.get();
            let snapshot = self.form();
            let verdict = validator.validate(&snapshot, locale).await;

            let mut state = self.state.borrow_mut();
            if state.is_submitting || self.revision.get() != revision {
                tracing::debug!(target: TARGET, step = index, "wizard changed during validation, dropping result");
                return NavOutcome::Ignored;
            }
            match verdict {
                Validation::Invalid(message) => {
                    state.error_message = if message.trim().is_empty() {
                        Message::InvalidStep.text(locale).to_string()
                    } else {
                        message
                    };
                    tracing::debug!(target: TARGET, step = index, error = %state.error_message, "validation rejected");
                    return NavOutcome::Rejected;
                }
                Validation::Valid => state.error_message.clear(),
            }
        }

        let total = self.registry.len();
        if index + 1 < total {
            let mut state = self.state.borrow_mut();
            let to = (index + 1).min(total - 1);
            state.current_step_index = to;
            state.error_message.clear();
            self.bump_revision();
            tracing::debug!(target: TARGET, from = index, to, "advanced");
            return NavOutcome::Moved { from: index, to };
        }

        self.submit().await
    }

    async fn submit(&self) -> NavOutcome {
        let locale = self.options.locale;
        self.state.borrow_mut().is_submitting = true;
        tracing::debug!(target: TARGET, "submitting");

        let result = match (&self.completion, self.options.submit_timeout) {
            (None, _) => Ok(()),
            (Some(completion), None) => completion.complete(self.form()).await,
            // The timer lives in the tokio runtime; without one, fail the
            // submission instead of panicking inside `timeout`.
            (Some(_), Some(_)) if tokio::runtime::Handle::try_current().is_err() => {
                Err(CompletionError::NoRuntime)
            }
            (Some(completion), Some(limit)) => {
                tokio::time::timeout(limit, completion.complete(self.form()))
                    .await
                    .unwrap_or(Err(CompletionError::TimedOut(limit)))
            }
        };

        let mut state = self.state.borrow_mut();
        state.is_submitting = false;
        match result {
            Ok(()) => {
                state.error_message.clear();
                tracing::debug!(target: TARGET, "submitted");
                NavOutcome::Submitted
            }
            Err(err) => {
                tracing::warn!(target: TARGET, error = %err, "submission failed");
                state.error_message = err.user_message(locale);
                NavOutcome::SubmitFailed
            }
        }
    }

    /// Step back one, clamped at the first step. Clears any error.
    pub fn go_to_previous(&self) -> NavOutcome {
        if !self.options.allow_back {
            tracing::trace!(target: TARGET, "previous ignored: back navigation disabled");
            return NavOutcome::Ignored;
        }
        let mut state = self.state.borrow_mut();
        if state.is_submitting {
            return NavOutcome::Ignored;
        }
        let from = state.current_step_index;
        let to = from.saturating_sub(1);
        state.current_step_index = to;
        state.error_message.clear();
        self.bump_revision();
        tracing::debug!(target: TARGET, from, to, "went back");
        NavOutcome::Moved { from, to }
    }

    /// Jump straight to `index` without validating anything in between.
    pub fn go_to_step(&self, index: usize) -> NavOutcome {
        let mut state = self.state.borrow_mut();
        if index >= state.total_steps || state.is_submitting {
            tracing::trace!(target: TARGET, index, "jump ignored");
            return NavOutcome::Ignored;
        }
        let from = state.current_step_index;
        state.current_step_index = index;
        state.error_message.clear();
        self.bump_revision();
        tracing::debug!(target: TARGET, from, to = index, "jumped");
        NavOutcome::Moved { from, to: index }
    }

    pub async fn dispatch(&self, action: NavAction) -> NavOutcome {
        match action {
            NavAction::Next => self.go_to_next().await,
            NavAction::Previous => self.go_to_previous(),
            NavAction::GoTo(index) => self.go_to_step(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{StepDefinition, check_fn, validator_fn};
    use futures_util::{FutureExt, join};
    use std::cell::Cell;
    use std::rc::Rc;

    fn plain_steps(n: usize) -> StepRegistry<()> {
        StepRegistry::new(
            (0..n)
                .map(|i| StepDefinition::new(format!("Step {i}"), ()))
                .collect(),
        )
        .unwrap()
    }

    fn wizard(n: usize) -> WizardController<()> {
        WizardController::new(plain_steps(n), WizardOptions::default())
    }

    /// Completion that yields a few times and counts its invocations.
    fn counting_completion(calls: Rc<Cell<usize>>) -> impl Completion {
        completion_fn(move |_| {
            let calls = calls.clone();
            async move {
                calls.set(calls.get() + 1);
                for _ in 0..3 {
                    tokio::task::yield_now().await;
                }
                Ok::<(), CompletionError>(())
            }
        })
    }

    #[test]
    fn initial_state() {
        let w = wizard(3);
        assert_eq!(w.state(), WizardState::initial(3));
        assert!(w.state().is_first());
        assert!(!w.state().is_last());
    }

    #[tokio::test]
    async fn index_stays_in_bounds_for_any_sequence() {
        let w = wizard(4);
        // Small LCG so the sequence is long but deterministic.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match (seed >> 16) % 3 {
                0 => {
                    w.go_to_next().await;
                }
                1 => {
                    w.go_to_previous();
                }
                _ => {
                    w.go_to_step(((seed >> 8) % 7) as usize);
                }
            }
            let s = w.state();
            assert!(s.current_step_index < s.total_steps);
        }
    }

    #[tokio::test]
    async fn invalid_step_blocks_advancement() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Gate", ())
                .with_validator(check_fn(|_| Validation::invalid("Nope"))),
            StepDefinition::new("After", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());

        assert_eq!(w.go_to_next().await, NavOutcome::Rejected);
        let s = w.state();
        assert_eq!(s.current_step_index, 0);
        assert_eq!(s.error_message, "Nope");
    }

    #[tokio::test]
    async fn bare_false_uses_localized_fallback() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Gate", ()).with_validator(check_fn(|_| false.into())),
            StepDefinition::new("After", ()),
        ])
        .unwrap();
        let options = WizardOptions {
            locale: Locale::Fr,
            ..WizardOptions::default()
        };
        let w = WizardController::new(steps, options);

        w.go_to_next().await;
        assert_eq!(w.state().error_message, Message::InvalidStep.text(Locale::Fr));
    }

    #[tokio::test]
    async fn previous_at_first_step_stays_and_clears_error() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Gate", ()).with_validator(check_fn(|_| false.into())),
            StepDefinition::new("After", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());
        w.go_to_next().await;
        assert!(w.state().has_error());

        assert_eq!(w.go_to_previous(), NavOutcome::Moved { from: 0, to: 0 });
        let s = w.state();
        assert_eq!(s.current_step_index, 0);
        assert!(s.error_message.is_empty());
    }

    #[tokio::test]
    async fn previous_is_ignored_when_back_disabled() {
        let options = WizardOptions {
            allow_back: false,
            ..WizardOptions::default()
        };
        let w = WizardController::new(plain_steps(3), options);
        w.go_to_next().await;
        assert_eq!(w.go_to_previous(), NavOutcome::Ignored);
        assert_eq!(w.dispatch(NavAction::Previous).await, NavOutcome::Ignored);
        assert_eq!(w.state().current_step_index, 1);
    }

    #[tokio::test]
    async fn overlapping_submit_invokes_completion_once() {
        let calls = Rc::new(Cell::new(0));
        let w = wizard(1).with_completion(counting_completion(calls.clone()));

        let (first, second) = join!(w.go_to_next(), w.go_to_next());
        assert_eq!(first, NavOutcome::Submitted);
        assert_eq!(second, NavOutcome::Ignored);
        assert_eq!(calls.get(), 1);
        assert!(!w.state().is_submitting);

        // Settled: a fresh attempt goes through again.
        assert_eq!(w.go_to_next().await, NavOutcome::Submitted);
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn navigation_is_frozen_while_submitting() {
        let calls = Rc::new(Cell::new(0));
        let w = wizard(2).with_completion(counting_completion(calls.clone()));
        w.go_to_next().await;

        let observe = async {
            let s = w.state();
            assert!(s.is_submitting);
            assert_eq!(w.go_to_previous(), NavOutcome::Ignored);
            assert_eq!(w.go_to_step(0), NavOutcome::Ignored);
        };
        let (outcome, ()) = join!(w.go_to_next(), observe);
        assert_eq!(outcome, NavOutcome::Submitted);
        assert_eq!(w.state().current_step_index, 1);
    }

    #[tokio::test]
    async fn happy_path_three_steps() {
        let calls = Rc::new(Cell::new(0));
        let w = wizard(3).with_completion(counting_completion(calls.clone()));

        assert_eq!(w.go_to_next().await, NavOutcome::Moved { from: 0, to: 1 });
        assert!(w.state().error_message.is_empty());
        assert_eq!(w.go_to_next().await, NavOutcome::Moved { from: 1, to: 2 });
        assert!(w.state().error_message.is_empty());

        let saw_submitting = async {
            assert!(w.state().is_submitting);
        };
        let (outcome, ()) = join!(w.go_to_next(), saw_submitting);
        assert_eq!(outcome, NavOutcome::Submitted);
        assert_eq!(calls.get(), 1);

        let s = w.state();
        assert_eq!(s.current_step_index, 2);
        assert!(!s.is_submitting);
        assert!(s.error_message.is_empty());
    }

    #[tokio::test]
    async fn validation_rejection_then_correction() {
        let attempts = Rc::new(Cell::new(0));
        let counter = attempts.clone();
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Contact", ()).with_validator(validator_fn(move |_| {
                let counter = counter.clone();
                async move {
                    counter.set(counter.get() + 1);
                    if counter.get() == 1 {
                        Validation::invalid("Email required")
                    } else {
                        Validation::Valid
                    }
                }
            })),
            StepDefinition::new("Done", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());

        assert_eq!(w.go_to_next().await, NavOutcome::Rejected);
        assert_eq!(w.state().current_step_index, 0);
        assert_eq!(w.state().error_message, "Email required");

        assert_eq!(w.go_to_next().await, NavOutcome::Moved { from: 0, to: 1 });
        assert!(w.state().error_message.is_empty());
        assert_eq!(attempts.get(), 2);
    }

    #[tokio::test]
    async fn submission_failure_then_retry() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let w = wizard(2).with_completion(completion_fn(move |_| {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                if counter.get() == 1 {
                    Err(CompletionError::new("Network error"))
                } else {
                    Ok(())
                }
            }
        }));
        w.go_to_next().await;

        assert_eq!(w.go_to_next().await, NavOutcome::SubmitFailed);
        let s = w.state();
        assert_eq!(s.error_message, "Network error");
        assert!(!s.is_submitting);
        assert_eq!(s.current_step_index, 1);

        assert_eq!(w.go_to_next().await, NavOutcome::Submitted);
        assert!(w.state().error_message.is_empty());
    }

    #[tokio::test]
    async fn empty_completion_error_uses_fallback() {
        let w = wizard(1)
            .with_completion(completion_fn(|_| async { Err::<(), _>(CompletionError::new("")) }));
        w.go_to_next().await;
        assert_eq!(w.state().error_message, Message::SubmitFailed.text(Locale::En));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_completion_times_out() {
        let options = WizardOptions {
            submit_timeout: Some(Duration::from_secs(10)),
            ..WizardOptions::default()
        };
        let w = WizardController::new(plain_steps(1), options)
            .with_completion(completion_fn(|_| std::future::pending()));

        assert_eq!(w.go_to_next().await, NavOutcome::SubmitFailed);
        let s = w.state();
        assert!(!s.is_submitting);
        assert_eq!(s.error_message, Message::SubmitTimedOut.text(Locale::En));
    }

    #[test]
    fn timeout_without_runtime_fails_instead_of_panicking() {
        let calls = Rc::new(Cell::new(0));
        let options = WizardOptions {
            submit_timeout: Some(Duration::from_secs(10)),
            ..WizardOptions::default()
        };
        let w = WizardController::new(plain_steps(1), options)
            .with_completion(counting_completion(calls.clone()));

        assert_eq!(w.go_to_next().now_or_never(), Some(NavOutcome::SubmitFailed));
        let s = w.state();
        assert!(!s.is_submitting);
        assert_eq!(s.error_message, Message::SubmitFailed.text(Locale::En));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn completion_receives_collected_fields() {
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let w = wizard(1).with_completion(completion_fn(move |data| {
            sink.replace(Some(data));
            async { Ok::<(), CompletionError>(()) }
        }));
        w.set_field("email", "ada@example.com");
        w.go_to_next().await;
        let data = seen.borrow_mut().take().unwrap();
        assert_eq!(data.get("email"), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn go_to_step_skips_validation_and_ignores_out_of_range() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Gate", ()).with_validator(check_fn(|_| false.into())),
            StepDefinition::new("Middle", ()),
            StepDefinition::new("Summary", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());
        w.go_to_next().await;
        assert!(w.state().has_error());

        assert_eq!(w.go_to_step(7), NavOutcome::Ignored);
        assert_eq!(w.state().current_step_index, 0);
        assert!(w.state().has_error());

        assert_eq!(w.go_to_step(2), NavOutcome::Moved { from: 0, to: 2 });
        assert!(!w.state().has_error());
    }

    #[tokio::test]
    async fn jump_during_validation_drops_stale_result() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Slow", ()).with_validator(validator_fn(|_| async {
                tokio::task::yield_now().await;
                Validation::Valid
            })),
            StepDefinition::new("Two", ()),
            StepDefinition::new("Three", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());

        let jump = async {
            w.go_to_step(2);
        };
        let (outcome, ()) = join!(w.go_to_next(), jump);
        assert_eq!(outcome, NavOutcome::Ignored);
        assert_eq!(w.state().current_step_index, 2);
    }

    #[tokio::test]
    async fn leaving_and_returning_during_validation_drops_stale_result() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Intro", ()),
            StepDefinition::new("Contact", ()).with_validator(validator_fn(|data| async move {
                tokio::task::yield_now().await;
                if data.is_blank("email") {
                    Validation::invalid("Email required")
                } else {
                    Validation::Valid
                }
            })),
            StepDefinition::new("Done", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());
        w.set_field("email", "ada@example.com");
        w.go_to_step(1);

        let detour = async {
            w.go_to_previous();
            w.set_field("email", "");
            w.go_to_step(1);
        };
        let (outcome, ()) = join!(w.go_to_next(), detour);
        assert_eq!(outcome, NavOutcome::Ignored);
        assert_eq!(w.state().current_step_index, 1);

        // The current data is what gets judged on the next attempt.
        assert_eq!(w.go_to_next().await, NavOutcome::Rejected);
        assert_eq!(w.state().current_step_index, 1);
        assert_eq!(w.state().error_message, "Email required");
    }

    #[tokio::test]
    async fn field_edit_during_validation_drops_stale_result() {
        let steps = StepRegistry::new(vec![
            StepDefinition::new("Contact", ()).with_validator(validator_fn(|_| async {
                tokio::task::yield_now().await;
                Validation::Valid
            })),
            StepDefinition::new("Done", ()),
        ])
        .unwrap();
        let w = WizardController::new(steps, WizardOptions::default());

        let edit = async {
            w.set_field("email", "");
        };
        let (outcome, ()) = join!(w.go_to_next(), edit);
        assert_eq!(outcome, NavOutcome::Ignored);
        assert_eq!(w.state().current_step_index, 0);
    }

    #[test]
    fn nav_action_parses_button_values() {
        assert_eq!("next".parse::<NavAction>().unwrap(), NavAction::Next);
        assert_eq!("back".parse::<NavAction>().unwrap(), NavAction::Previous);
        assert_eq!("goto:3".parse::<NavAction>().unwrap(), NavAction::GoTo(3));
        assert_eq!(NavAction::GoTo(3).as_value(), "goto:3");
        assert_eq!(
            "goto:x".parse::<NavAction>(),
            Err(WizardError::UnknownAction("goto:x".to_string()))
        );
    }
}
