//! Locale implementations: the identity and display metadata of a language.
//!
//! A [`Locale`] is what a caller hands to the validator for each language it
//! wants to support. The crate ships constants for the locales that have
//! built-in rule templates, and any other code can be described with
//! [`Locale::new`].

use serde::Serialize;

/// A language supported by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Locale {
    /// Locale code used for lookups (e.g., "en", "pt", "pt_BR")
    code: String,

    /// English name of the language (e.g., "English", "Portuguese")
    name: String,

    /// Native name of the language (e.g., "English", "Português")
    native_name: String,
}

/// Built-in locale metadata: (code, name, native name)
const BUILTIN_LOCALES: &[(&str, &str, &str)] = &[
    ("en", "English", "English"),
    ("pt", "Portuguese", "Português"),
    ("es", "Spanish", "Español"),
];

impl Locale {
    /// Describe a locale.
    ///
    /// # Arguments
    /// * `code` - The locale code requests will use (e.g., "en")
    /// * `name` - English name of the language
    /// * `native_name` - Name of the language in the language itself
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        native_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            native_name: native_name.into(),
        }
    }

    /// English locale
    pub fn english() -> Self {
        Self::new("en", "English", "English")
    }

    /// Portuguese locale
    pub fn portuguese() -> Self {
        Self::new("pt", "Portuguese", "Português")
    }

    /// Spanish locale
    pub fn spanish() -> Self {
        Self::new("es", "Spanish", "Español")
    }

    /// Look up one of the built-in locales by code.
    ///
    /// # Returns
    /// * `Some(Locale)` for "en", "pt" and "es"
    /// * `None` for any other code
    pub fn builtin(code: &str) -> Option<Self> {
        BUILTIN_LOCALES
            .iter()
            .find(|(builtin, _, _)| *builtin == code)
            .map(|(code, name, native_name)| Self::new(*code, *name, *native_name))
    }

    /// Get the locale code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &str {
        &self.native_name
    }
}
