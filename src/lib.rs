//! Localized validation error messages for structured records.
//!
//! A [`Validator`] owns one message catalog per configured locale. Rule
//! templates are registered into the catalogs at construction; field display
//! names declared on record types (`"en:First Name;pt:Primeiro Nome"`) are
//! registered the first time each type is validated. Violations reported by
//! the [`RuleEngine`] are rendered in the requested locale, falling back to
//! the default locale, with the field's display name substituted in.
//!
//! # Architecture
//!
//! - `locale`: Locale identity and display metadata
//! - `bundle`: Per-locale message catalogs and their coordinator
//! - `metadata`: The `Record` trait and static field descriptors
//! - `registry`: One-time registration of field display names per type
//! - `resolver`: Locale resolution with silent fallback
//! - `rules`: Rule engine seam, built-in tag engine and templates
//! - `validator`: The entry point
//! - `outcome`: Violations plus translated messages
//! - `metrics`: Per-validator counters
//! - `config`: Environment-driven construction

pub mod bundle;
pub mod config;
pub mod error;
pub mod locale;
pub mod metadata;
pub mod metrics;
pub mod outcome;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod validator;

pub use bundle::{BundleSet, TranslationContext};
pub use config::ValidatorConfig;
pub use error::{ConfigError, EngineError, TranslationError, ValidateError};
pub use locale::Locale;
pub use metadata::{parse_translation_spec, FieldDescriptor, FieldValue, Record, TypeDescriptor};
pub use metrics::{MetricsReport, ValidatorMetrics};
pub use outcome::ValidationOutcome;
pub use rules::{RuleEngine, TagEngine, ValueKind, Violation};
pub use validator::{LocaleEntry, Validator};
