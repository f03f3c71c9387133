//! Bilingual text for wizard chrome and step metadata.
//!
//! Sites built on Simple Site ship in English and French. Any user-facing
//! string in a step definition can be written either as a plain string (used
//! for every locale) or as a per-locale table:
//!
//! ```toml
//! title = "Contact"
//! title = { en = "Your details", fr = "Vos coordonnées" }
//! ```
//!
//! Lookup falls back to English, then to whichever translation exists, so a
//! half-translated definition still renders something readable.
//!
//! The wizard's own chrome (button labels, progress label, generic error
//! messages) lives in [`Message`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported site locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// BCP 47 language tag, used for the `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported locale '{0}' (expected 'en' or 'fr')")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-ca" | "en-us" => Ok(Locale::En),
            "fr" | "fr-ca" | "fr-fr" => Ok(Locale::Fr),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// Display text that is either shared across locales or translated per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized(Translations),
}

/// Per-locale forms of one string. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Translations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
}

impl Translations {
    fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => self.en.as_deref(),
            Locale::Fr => self.fr.as_deref(),
        }
    }
}

impl LocalizedText {
    /// Build a translated text from its English and French forms.
    pub fn bilingual(en: impl Into<String>, fr: impl Into<String>) -> Self {
        LocalizedText::Localized(Translations {
            en: Some(en.into()),
            fr: Some(fr.into()),
        })
    }

    /// Resolve for `locale`, falling back to English, then to any translation.
    pub fn resolve(&self, locale: Locale) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Localized(t) => t
                .get(locale)
                .or(t.en.as_deref())
                .or(t.fr.as_deref())
                .unwrap_or(""),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::Plain(s.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(s: String) -> Self {
        LocalizedText::Plain(s)
    }
}

/// Built-in strings rendered by the wizard itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Previous,
    Next,
    Submit,
    Submitting,
    /// Shown when a validator rejects a step without saying why.
    InvalidStep,
    /// Shown when the completion callback fails without a message.
    SubmitFailed,
    SubmitTimedOut,
    RequiredField,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Message::Previous, Locale::En) => "Previous",
            (Message::Previous, Locale::Fr) => "Précédent",
            (Message::Next, Locale::En) => "Next",
            (Message::Next, Locale::Fr) => "Suivant",
            (Message::Submit, Locale::En) => "Submit",
            (Message::Submit, Locale::Fr) => "Envoyer",
            (Message::Submitting, Locale::En) => "Submitting…",
            (Message::Submitting, Locale::Fr) => "Envoi en cours…",
            (Message::InvalidStep, Locale::En) => "Please check this step before continuing.",
            (Message::InvalidStep, Locale::Fr) => {
                "Veuillez vérifier cette étape avant de continuer."
            }
            (Message::SubmitFailed, Locale::En) => "Something went wrong. Please try again.",
            (Message::SubmitFailed, Locale::Fr) => "Une erreur est survenue. Veuillez réessayer.",
            (Message::SubmitTimedOut, Locale::En) => "The submission timed out. Please try again.",
            (Message::SubmitTimedOut, Locale::Fr) => "L'envoi a expiré. Veuillez réessayer.",
            (Message::RequiredField, Locale::En) => "is required",
            (Message::RequiredField, Locale::Fr) => "est obligatoire",
        }
    }
}

/// "Step X of Y" for a 1-based step number.
pub fn step_counter(locale: Locale, step: usize, total: usize) -> String {
    match locale {
        Locale::En => format!("Step {step} of {total}"),
        Locale::Fr => format!("Étape {step} sur {total}"),
    }
}
