//! Validator metrics.
//!
//! Counters are owned by each validator instance, so independently
//! configured validators never share numbers.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one validator.
#[derive(Debug, Default)]
pub struct ValidatorMetrics {
    /// Number of validate calls that received data
    validations: AtomicUsize,

    /// Number of validate calls that returned rule violations
    invalid: AtomicUsize,

    /// Number of field-translation walks performed
    registration_walks: AtomicUsize,

    /// Number of calls that found their type already registered
    registration_hits: AtomicUsize,

    /// Number of field-translation walks that failed
    registration_failures: AtomicUsize,

    /// Number of calls whose requested locale fell back to the default
    locale_fallbacks: AtomicUsize,
}

impl ValidatorMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validate call that received data.
    pub fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a validate call that returned rule violations.
    pub fn record_invalid(&self) {
        self.invalid.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a field-translation walk.
    pub fn record_registration_walk(&self) {
        self.registration_walks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a call that skipped the walk because the type was registered.
    pub fn record_registration_hit(&self) {
        self.registration_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed field-translation walk.
    pub fn record_registration_failure(&self) {
        self.registration_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a requested locale that fell back to the default.
    pub fn record_locale_fallback(&self) {
        self.locale_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the number of validate calls that received data.
    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::Relaxed)
    }

    /// Get the number of validate calls that returned violations.
    pub fn invalid(&self) -> usize {
        self.invalid.load(Ordering::Relaxed)
    }

    /// Get the number of field-translation walks.
    pub fn registration_walks(&self) -> usize {
        self.registration_walks.load(Ordering::Relaxed)
    }

    /// Get the number of calls that found the type already registered.
    pub fn registration_hits(&self) -> usize {
        self.registration_hits.load(Ordering::Relaxed)
    }

    /// Get the number of failed field-translation walks.
    pub fn registration_failures(&self) -> usize {
        self.registration_failures.load(Ordering::Relaxed)
    }

    /// Get the number of requests that fell back to the default locale.
    pub fn locale_fallbacks(&self) -> usize {
        self.locale_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let validations = self.validations();
        let invalid = self.invalid();
        let invalid_rate = if validations > 0 {
            (invalid as f64 / validations as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            validations,
            invalid,
            invalid_rate,
            registration_walks: self.registration_walks(),
            registration_hits: self.registration_hits(),
            registration_failures: self.registration_failures(),
            locale_fallbacks: self.locale_fallbacks(),
        }
    }
}

/// Snapshot of a validator's counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of validate calls that received data
    pub validations: usize,

    /// Number of validate calls that returned rule violations
    pub invalid: usize,

    /// Share of validations that returned violations, as a percentage (0-100)
    pub invalid_rate: f64,

    /// Number of field-translation walks performed
    pub registration_walks: usize,

    /// Number of calls that found their type already registered
    pub registration_hits: usize,

    /// Number of field-translation walks that failed
    pub registration_failures: usize,

    /// Number of requested locales that fell back to the default
    pub locale_fallbacks: usize,
}
