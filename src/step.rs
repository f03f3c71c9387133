//! Step definitions and the ordered registry a wizard is built from.
//!
//! A [`StepDefinition`] describes one panel of a multi-step form: its title,
//! an optional description, an optional [`Validator`] gating forward
//! navigation, and a content payload the wizard never looks inside.
//!
//! Validators are asynchronous so a step can check something remote (an
//! address lookup, a slot still being free) before the user moves on.
//! Synchronous checks wrap their answer in a ready future; the controller
//! awaits both the same way.

use crate::form::FormData;
use crate::locale::{Locale, LocalizedText, Message};
use crate::wizard::WizardError;
use futures_util::future::{self, LocalBoxFuture};
use std::fmt;
use std::future::Future;

/// Outcome of a step validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Rejected. An empty message means "no reason given".
    Invalid(String),
}

impl Validation {
    pub fn invalid(message: impl Into<String>) -> Self {
        Validation::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

impl From<bool> for Validation {
    fn from(ok: bool) -> Self {
        if ok {
            Validation::Valid
        } else {
            Validation::Invalid(String::new())
        }
    }
}

/// Gate evaluated before the wizard leaves a step going forward.
///
/// Implementations must give the same answer for the same `data`.
pub trait Validator {
    fn validate<'a>(&'a self, data: &'a FormData, locale: Locale)
    -> LocalBoxFuture<'a, Validation>;
}

/// Rejects the step while any listed field is blank.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredFields {
    fields: Vec<(String, LocalizedText)>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Require `name`, reporting it as `label` when missing.
    pub fn field(mut self, name: impl Into<String>, label: impl Into<LocalizedText>) -> Self {
        self.fields.push((name.into(), label.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First missing field's message, if any.
    pub fn check(&self, data: &FormData, locale: Locale) -> Validation {
        match self.fields.iter().find(|(name, _)| data.is_blank(name)) {
            Some((_, label)) => Validation::Invalid(format!(
                "{} {}",
                label.resolve(locale),
                Message::RequiredField.text(locale)
            )),
            None => Validation::Valid,
        }
    }
}

impl Default for RequiredFields {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredFields {
    fn validate<'a>(
        &'a self,
        data: &'a FormData,
        locale: Locale,
    ) -> LocalBoxFuture<'a, Validation> {
        Box::pin(future::ready(self.check(data, locale)))
    }
}

/// Validator backed by a synchronous closure. See [`check_fn`].
pub struct CheckFn<F>(F);

/// Wrap a synchronous check as a [`Validator`].
pub fn check_fn<F>(f: F) -> CheckFn<F>
where
    F: Fn(&FormData) -> Validation,
{
    CheckFn(f)
}

impl<F> Validator for CheckFn<F>
where
    F: Fn(&FormData) -> Validation,
{
    fn validate<'a>(
        &'a self,
        data: &'a FormData,
        _locale: Locale,
    ) -> LocalBoxFuture<'a, Validation> {
        Box::pin(future::ready((self.0)(data)))
    }
}

/// Validator backed by an async closure. See [`validator_fn`].
pub struct AsyncFn<F>(F);

/// Wrap an async closure as a [`Validator`]. The closure receives its own
/// copy of the form values.
pub fn validator_fn<F, Fut>(f: F) -> AsyncFn<F>
where
    F: Fn(FormData) -> Fut,
    Fut: Future<Output = Validation> + 'static,
{
    AsyncFn(f)
}

impl<F, Fut> Validator for AsyncFn<F>
where
    F: Fn(FormData) -> Fut,
    Fut: Future<Output = Validation> + 'static,
{
    fn validate<'a>(
        &'a self,
        data: &'a FormData,
        _locale: Locale,
    ) -> LocalBoxFuture<'a, Validation> {
        Box::pin((self.0)(data.clone()))
    }
}

/// One panel of a multi-step form.
pub struct StepDefinition<C> {
    pub title: LocalizedText,
    pub description: Option<LocalizedText>,
    validator: Option<Box<dyn Validator>>,
    pub content: C,
}

impl<C> StepDefinition<C> {
    pub fn new(title: impl Into<LocalizedText>, content: C) -> Self {
        Self {
            title: title.into(),
            description: None,
            validator: None,
            content,
        }
    }

    pub fn with_description(mut self, description: impl Into<LocalizedText>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn validator(&self) -> Option<&dyn Validator> {
        self.validator.as_deref()
    }
}

impl<C: fmt::Debug> fmt::Debug for StepDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("has_validator", &self.validator.is_some())
            .field("content", &self.content)
            .finish()
    }
}

/// Ordered, fixed list of steps. Never empty.
#[derive(Debug)]
pub struct StepRegistry<C> {
    steps: Vec<StepDefinition<C>>,
}

impl<C> StepRegistry<C> {
    pub fn new(steps: Vec<StepDefinition<C>>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: a registry has at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition<C>> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition<C>> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().copied().collect()
    }

    #[test]
    fn required_fields_compare_with_localized_labels() {
        let a = RequiredFields::new().field("email", LocalizedText::bilingual("Email", "Courriel"));
        let b = RequiredFields::new().field("email", LocalizedText::bilingual("Email", "Courriel"));
        assert_eq!(a, b);
        assert_ne!(a, RequiredFields::new().field("email", "Email"));
        assert!(RequiredFields::default().is_empty());
    }

    #[test]
    fn empty_registry_is_rejected() {
        let result = StepRegistry::<()>::new(vec![]);
        assert!(matches!(result, Err(WizardError::NoSteps)));
    }

    #[test]
    fn registry_preserves_order() {
        let registry = StepRegistry::new(vec![
            StepDefinition::new("One", 1),
            StepDefinition::new("Two", 2),
            StepDefinition::new("Three", 3),
        ])
        .unwrap();
        assert_eq!(registry.len(), 3);
        let titles: Vec<_> = registry.iter().map(|s| s.title.resolve(Locale::En)).collect();
        assert_eq!(titles, ["One", "Two", "Three"]);
        assert!(registry.get(3).is_none());
    }

    #[test]
    fn false_maps_to_invalid_without_message() {
        assert_eq!(Validation::from(false), Validation::Invalid(String::new()));
        assert!(Validation::from(true).is_valid());
    }

    #[test]
    fn required_fields_reports_first_missing_field() {
        let rule = RequiredFields::new()
            .field("name", LocalizedText::bilingual("Name", "Nom"))
            .field("email", "Email");
        let result = rule.check(&data(&[("name", "Ada")]), Locale::En);
        assert_eq!(result, Validation::invalid("Email is required"));

        let result = rule.check(&data(&[]), Locale::Fr);
        assert_eq!(result, Validation::invalid("Nom est obligatoire"));
    }

    #[test]
    fn required_fields_passes_when_all_present() {
        let rule = RequiredFields::new().field("email", "Email");
        let result = rule
            .validate(&data(&[("email", "ada@example.com")]), Locale::En)
            .now_or_never()
            .unwrap();
        assert!(result.is_valid());
    }

    #[test]
    fn check_fn_is_ready_immediately() {
        let v = check_fn(|d: &FormData| Validation::from(d.get("agree") == Some("yes")));
        let result = v
            .validate(&data(&[("agree", "no")]), Locale::En)
            .now_or_never()
            .unwrap();
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn async_validator_sees_form_values() {
        let v = validator_fn(|d: FormData| async move {
            tokio::task::yield_now().await;
            if d.is_blank("postal_code") {
                Validation::invalid("Postal code required")
            } else {
                Validation::Valid
            }
        });
        let step = StepDefinition::new("Address", ()).with_validator(v);
        let validator = step.validator().unwrap();
        assert_eq!(
            validator.validate(&data(&[]), Locale::En).await,
            Validation::invalid("Postal code required")
        );
        assert!(
            validator
                .validate(&data(&[("postal_code", "H2X 1Y4")]), Locale::En)
                .await
                .is_valid()
        );
    }
}
