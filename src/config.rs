use crate::rules;
use crate::validator::Validator;
use anyhow::{bail, Context, Result};

/// Environment-driven validator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Locale used when a request names none or an unconfigured one
    pub default_locale: String,

    /// Locales to configure, in order
    pub locales: Vec<String>,
}

impl ValidatorConfig {
    pub fn from_env() -> Result<Self> {
        let default_locale = std::env::var("I18N_DEFAULT_LOCALE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "en".to_string());

        let locales = std::env::var("I18N_LOCALES")
            .map(|v| parse_locale_list(&v))
            .unwrap_or_else(|_| vec!["en".to_string(), "pt".to_string(), "es".to_string()]);

        if locales.is_empty() {
            bail!("I18N_LOCALES must list at least one locale");
        }

        Ok(Self {
            default_locale,
            locales,
        })
    }

    /// Build a validator with the built-in rule templates of every configured locale.
    ///
    /// # Errors
    /// Fails if a locale has no built-in templates or if construction fails
    /// (e.g., the default locale is not in the list).
    pub fn build(&self) -> Result<Validator> {
        let entries = self
            .locales
            .iter()
            .map(|code| {
                rules::builtin_entry(code)
                    .with_context(|| format!("No built-in rule templates for locale '{}'", code))
            })
            .collect::<Result<Vec<_>>>()?;

        Validator::new(&self.default_locale, entries).context("Failed to build validator")
    }
}

/// Split a comma-separated locale list, dropping blanks.
fn parse_locale_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
