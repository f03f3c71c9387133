//! Declarative wizard definitions.
//!
//! Most site wizards are plain forms: a few steps, each with a handful of
//! labelled inputs, some of them required. Those can be described in TOML
//! instead of code:
//!
//! ```toml
//! title = { en = "Start a project", fr = "Démarrer un projet" }
//!
//! [[steps]]
//! title = { en = "Your details", fr = "Vos coordonnées" }
//! description = "We reply within one business day."
//!
//! [[steps.fields]]
//! name = "email"
//! label = { en = "Email", fr = "Courriel" }
//! kind = "email"
//! required = true
//! ```
//!
//! [`WizardDefinition::registry`] turns the document into a
//! [`StepRegistry`] whose steps render their fields and validate the
//! required ones with [`RequiredFields`].

use crate::locale::{Locale, LocalizedText};
use crate::step::{RequiredFields, StepDefinition, StepRegistry};
use crate::view::{StepContext, StepView};
use crate::wizard::WizardError;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
}

/// A whole wizard as written in a definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WizardDefinition {
    /// Page title; falls back to the first step's title.
    #[serde(default)]
    pub title: Option<LocalizedText>,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    pub title: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub label: LocalizedText,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Textarea,
}

impl FieldKind {
    fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Textarea => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
        }
    }
}

/// Renders a step's declared fields, pre-filled from the collected values.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldsView {
    fields: Vec<FieldSpec>,
}

impl StepView for FieldsView {
    fn render(&self, ctx: &StepContext<'_>) -> Markup {
        html! {
            @for field in &self.fields {
                @let id = format!("wizard-field-{}", field.name);
                @let value = ctx.form.get(&field.name).unwrap_or("");
                div.wizard-field {
                    label for=(id) { (field.label.resolve(ctx.locale)) }
                    @if field.kind == FieldKind::Textarea {
                        textarea id=(id) name=(field.name) required[field.required] { (value) }
                    } @else {
                        input id=(id) type=(field.kind.input_type()) name=(field.name)
                            value=(value) required[field.required];
                    }
                }
            }
        }
    }
}

impl WizardDefinition {
    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let content = fs::read_to_string(path)?;
        let definition = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), steps = definition.steps.len(), "loaded wizard definition");
        Ok(definition)
    }

    pub fn parse(content: &str) -> Result<Self, DefinitionError> {
        let definition: WizardDefinition = toml::from_str(content)?;
        definition.validate()?;
        Ok(definition)
    }

    /// At least one step; field names unique across the whole wizard.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.steps.is_empty() {
            return Err(WizardError::NoSteps.into());
        }
        let mut seen = HashSet::new();
        for field in self.steps.iter().flat_map(|s| &s.fields) {
            if !seen.insert(field.name.as_str()) {
                return Err(DefinitionError::DuplicateField(field.name.clone()));
            }
        }
        Ok(())
    }

    pub fn page_title(&self, locale: Locale) -> &str {
        self.title
            .as_ref()
            .or_else(|| self.steps.first().map(|s| &s.title))
            .map(|t| t.resolve(locale))
            .unwrap_or("")
    }

    /// Build the step registry for a controller.
    pub fn registry(&self) -> Result<StepRegistry<FieldsView>, DefinitionError> {
        self.validate()?;
        let steps = self
            .steps
            .iter()
            .map(|spec| {
                let required = spec
                    .fields
                    .iter()
                    .filter(|f| f.required)
                    .fold(RequiredFields::new(), |rule, f| {
                        rule.field(f.name.clone(), f.label.clone())
                    });
                let mut step = StepDefinition::new(
                    spec.title.clone(),
                    FieldsView {
                        fields: spec.fields.clone(),
                    },
                );
                if let Some(desc) = &spec.description {
                    step = step.with_description(desc.clone());
                }
                if !required.is_empty() {
                    step = step.with_validator(required);
                }
                step
            })
            .collect();
        Ok(StepRegistry::new(steps)?)
    }
}
