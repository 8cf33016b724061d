//! Working-hours resolver: how long a working day is.

use rust_decimal::Decimal;
use tracing::warn;

use crate::{consts::DEFAULT_WORKING_HOURS_PER_DAY, utils::hours_between};

use super::{schedule::WorkingHours, Resolution};

/// Length of the configured break, never negative.
pub fn break_hours(hours: &WorkingHours) -> Decimal {
    let length = hours_between(hours.break_start, hours.break_end);

    if length.is_sign_negative() {
        warn!(
            break_start = %hours.break_start,
            break_end = %hours.break_end,
            "break ends before it starts, treating it as zero length"
        );
        return Decimal::ZERO;
    }

    length
}

/// Hours in one working day, `start..end` minus the break unless `include_break` is set.
pub fn daily_hours(hours: &WorkingHours, include_break: bool) -> Decimal {
    let total = hours_between(hours.start_time, hours.end_time);

    if include_break {
        total
    } else {
        total - break_hours(hours)
    }
}

/// Resolves the per-day hours used as the hourly rate divisor.
///
/// The source tag of `hours` carries through; `None` or a non-positive day yields the
/// hardcoded default.
pub fn working_hours_per_day(hours: Option<Resolution<&WorkingHours>>, include_break: bool) -> Resolution<Decimal> {
    let default = || Resolution::HardcodedDefault(Decimal::from(DEFAULT_WORKING_HOURS_PER_DAY));

    let Some(hours) = hours else {
        return default();
    };

    let resolved = hours.map(|hours| daily_hours(hours, include_break));
    if *resolved.value() <= Decimal::ZERO {
        warn!(hours = %resolved.value(), "working day has no positive length, using the default hours");
        return default();
    }

    resolved
}
