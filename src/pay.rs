//! Monthly pay calculation.
//!
//! The working calendar and the daily working hours are resolved once per month,
//! attendance is aggregated once per employee, and the rate calculator turns the three
//! into a [`rate::PayCalculationResult`]. [`batch::run`] wires it together.

use serde::Serialize;
use thiserror::Error;

pub mod attendance;
pub mod batch;
pub mod calendar;
pub mod export;
pub mod hours;
pub mod rate;
pub mod schedule;

#[derive(Debug, Error)]
pub enum PayError {
    #[error("working days for the month resolved to zero")]
    ZeroWorkingDays,

    #[error("working hours per day must be positive")]
    NonPositiveWorkingHours,

    #[error("`{0}` is not a month in `YYYY-MM` format")]
    InvalidMonth(String),

    #[error("malformed working days: {0}")]
    MalformedWorkingDays(String),
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    Persisted,
    ManualFallback,
    HardcodedDefault,
}

/// A value tagged with the path that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Persisted(T),
    ManualFallback(T),
    HardcodedDefault(T),
}

impl<T> Resolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolution::Persisted(v) | Resolution::ManualFallback(v) | Resolution::HardcodedDefault(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Resolution::Persisted(v) | Resolution::ManualFallback(v) | Resolution::HardcodedDefault(v) => v,
        }
    }

    pub fn source(&self) -> ResolutionSource {
        match self {
            Resolution::Persisted(_) => ResolutionSource::Persisted,
            Resolution::ManualFallback(_) => ResolutionSource::ManualFallback,
            Resolution::HardcodedDefault(_) => ResolutionSource::HardcodedDefault,
        }
    }

    pub fn as_ref(&self) -> Resolution<&T> {
        match self {
            Resolution::Persisted(v) => Resolution::Persisted(v),
            Resolution::ManualFallback(v) => Resolution::ManualFallback(v),
            Resolution::HardcodedDefault(v) => Resolution::HardcodedDefault(v),
        }
    }

    /// Same source, different value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Persisted(v) => Resolution::Persisted(f(v)),
            Resolution::ManualFallback(v) => Resolution::ManualFallback(f(v)),
            Resolution::HardcodedDefault(v) => Resolution::HardcodedDefault(f(v)),
        }
    }
}
