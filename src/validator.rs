//! Validator: the entry point tying registration, locale resolution, rule
//! evaluation and message merging together.
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_validate::{rules, Locale, LocaleEntry, Validator};
//!
//! let validator = Validator::new(
//!     "en",
//!     vec![
//!         LocaleEntry::new(Locale::english(), rules::en::register_defaults),
//!         LocaleEntry::new(Locale::portuguese(), rules::pt::register_defaults),
//!     ],
//! )?;
//!
//! match validator.validate(Some(&user), Some("pt")) {
//!     Ok(()) => {}
//!     Err(ValidateError::Invalid(outcome)) => println!("{}", outcome),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use crate::bundle::{BundleSet, TranslationContext};
use crate::error::{ConfigError, TranslationError, ValidateError};
use crate::locale::Locale;
use crate::metadata::Record;
use crate::metrics::ValidatorMetrics;
use crate::outcome::ValidationOutcome;
use crate::registry::{message_id, Registration, TranslationRegistry};
use crate::resolver::{resolve, resolve_code};
use crate::rules::{RuleEngine, TagEngine};
use std::collections::HashMap;
use tracing::{debug, info};

type RegisterCallback = Box<dyn FnOnce(&TranslationContext) -> Result<(), TranslationError> + Send>;

/// A locale to support, with the callback registering its rule templates.
pub struct LocaleEntry {
    locale: Locale,
    register: RegisterCallback,
}

impl LocaleEntry {
    /// Pair a locale with its rule-template registration callback.
    ///
    /// The callback runs once, during validator construction, against the
    /// locale's own catalog.
    pub fn new<F>(locale: Locale, register: F) -> Self
    where
        F: FnOnce(&TranslationContext) -> Result<(), TranslationError> + Send + 'static,
    {
        Self {
            locale,
            register: Box::new(register),
        }
    }

    /// Get the locale of this entry.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }
}

impl std::fmt::Debug for LocaleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleEntry")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Validates records and reports violations with localized messages.
///
/// Safe to share between threads. Each instance owns its catalogs, its
/// registration memo and its metrics; two validators never share state.
pub struct Validator<E = TagEngine> {
    engine: E,
    bundles: BundleSet,
    registry: TranslationRegistry,
    default_locale: String,
    metrics: ValidatorMetrics,
}

impl Validator<TagEngine> {
    /// Build a validator using the built-in [`TagEngine`].
    ///
    /// # Arguments
    /// * `default_locale` - Code of the locale used when a request names none
    ///   or names one that is not configured
    /// * `entries` - Every supported locale with its rule-template callback
    ///
    /// # Errors
    /// * `NoLocalesSupplied` if `entries` is empty
    /// * `DefaultLocaleNotFound` if no entry has the `default_locale` code
    /// * `RuleRegistration` if any callback fails
    pub fn new(default_locale: &str, entries: Vec<LocaleEntry>) -> Result<Self, ConfigError> {
        Self::with_engine(default_locale, entries, TagEngine::new())
    }
}

impl<E: RuleEngine> Validator<E> {
    /// Build a validator around any rule engine.
    ///
    /// Construction is fail-fast: the first callback error is returned and
    /// no validator is built.
    pub fn with_engine(
        default_locale: &str,
        entries: Vec<LocaleEntry>,
        engine: E,
    ) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::NoLocalesSupplied);
        }

        let fallback = entries
            .iter()
            .find(|entry| entry.locale.code() == default_locale)
            .map(|entry| entry.locale.clone())
            .ok_or_else(|| ConfigError::DefaultLocaleNotFound(default_locale.to_string()))?;

        let bundles = BundleSet::new(&fallback, entries.iter().map(|entry| &entry.locale));

        for LocaleEntry { locale, register } in entries {
            let Some(ctx) = bundles.get(locale.code()) else {
                continue;
            };
            register(ctx).map_err(|source| ConfigError::RuleRegistration {
                locale: locale.code().to_string(),
                source,
            })?;
            debug!("Registered rule templates for locale {}", locale.code());
        }

        info!(
            "Validator ready with {} locale(s), default '{}'",
            bundles.len(),
            default_locale
        );

        Ok(Self {
            engine,
            bundles,
            registry: TranslationRegistry::new(),
            default_locale: default_locale.to_string(),
            metrics: ValidatorMetrics::new(),
        })
    }

    /// Validate optional data in the requested locale.
    ///
    /// # Arguments
    /// * `data` - The record to validate; `None` is always valid
    /// * `locale` - Requested locale code; `None`, `""` or an unconfigured
    ///   code use the default locale
    ///
    /// # Returns
    /// * `Ok(())` if there is no data or it broke no rule
    /// * `Err(ValidateError::Invalid)` with translated messages per field
    /// * `Err(ValidateError::Registration | ValidateError::Engine)` on malfunction
    pub fn validate<T: Record>(&self, data: Option<&T>, locale: Option<&str>) -> Result<(), ValidateError> {
        match data {
            Some(data) => self.validate_value(data, locale),
            None => Ok(()),
        }
    }

    /// Validate a record in the requested locale.
    ///
    /// Same as [`validate`](Self::validate) with data present.
    pub fn validate_value<T: Record>(&self, data: &T, locale: Option<&str>) -> Result<(), ValidateError> {
        self.metrics.record_validation();
        self.register::<T>().map_err(ValidateError::Registration)?;

        let ctx = self.context_for(locale);
        let violations = self
            .engine
            .evaluate(data, T::descriptor())
            .map_err(ValidateError::Engine)?;

        if violations.is_empty() {
            return Ok(());
        }

        let mut translated = HashMap::with_capacity(violations.len());
        for violation in &violations {
            let message = self.engine.render(violation, ctx);
            let message = match ctx.lookup(&message_id(&violation.owner, &violation.field)) {
                Some(display_name) if !display_name.is_empty() => {
                    message.replacen(&violation.field, &display_name, 1)
                }
                _ => message,
            };
            // A later violation on the same namespace replaces an earlier one
            translated.insert(violation.namespace.clone(), message);
        }

        self.metrics.record_invalid();
        Err(ValidateError::Invalid(ValidationOutcome::new(violations, translated)))
    }

    /// Register the field display names declared on `T`, if not done yet.
    ///
    /// Validation does this automatically; calling it up front moves the
    /// one-time walk out of the first request.
    pub fn register<T: Record>(&self) -> Result<(), TranslationError> {
        match self.registry.ensure_registered(T::descriptor(), &self.bundles) {
            Ok(Registration::Walked) => {
                self.metrics.record_registration_walk();
                Ok(())
            }
            Ok(Registration::AlreadyRegistered) => {
                self.metrics.record_registration_hit();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_registration_walk();
                self.metrics.record_registration_failure();
                Err(e)
            }
        }
    }

    /// Get the registered display name of a field in the requested locale.
    ///
    /// # Arguments
    /// * `owner` - Record type name (e.g., "User")
    /// * `field` - Field name (e.g., "FirstName")
    /// * `locale` - Requested locale code, with the usual fallback
    pub fn translate_field(&self, owner: &str, field: &str, locale: Option<&str>) -> Option<String> {
        resolve(locale, &self.default_locale, &self.bundles)
            .lookup(&message_id(owner, field))
            .filter(|name| !name.is_empty())
    }

    /// Resolve the context for a request, counting fallbacks.
    fn context_for(&self, locale: Option<&str>) -> &TranslationContext {
        let code = resolve_code(locale, &self.default_locale, &self.bundles);
        if let Some(requested) = locale.filter(|requested| !requested.is_empty()) {
            if requested != code {
                self.metrics.record_locale_fallback();
                debug!(
                    "Locale '{}' is not configured, falling back to '{}'",
                    requested, code
                );
            }
        }
        resolve(locale, &self.default_locale, &self.bundles)
    }

    /// Get the catalog of a configured locale.
    pub fn context(&self, code: &str) -> Option<&TranslationContext> {
        self.bundles.get(code)
    }

    /// Get the default locale code.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// All configured locale codes, sorted.
    pub fn locales(&self) -> Vec<&str> {
        self.bundles.codes()
    }

    /// Get the rule engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get this validator's metrics.
    pub fn metrics(&self) -> &ValidatorMetrics {
        &self.metrics
    }
}

impl<E> std::fmt::Debug for Validator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("default_locale", &self.default_locale)
            .field("locales", &self.bundles.codes())
            .field("registered_types", &self.registry.len())
            .finish_non_exhaustive()
    }
}
