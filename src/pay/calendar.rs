//! Working-calendar resolver: how many working days a month has.

use chrono::Datelike as _;
use sea_orm::{ColumnTrait as _, ConnectionTrait, DbErr, EntityTrait as _, QueryFilter as _, QueryOrder as _};
use tracing::{debug, warn};

use crate::{
    consts::{DEFAULT_WORKING_DAYS_PER_MONTH, WORKING_CONFIGURATION_NAME},
    entity::{calendar_day, prelude::*, sea_orm_active_enums::DayType},
    utils::PayMonth,
};

use super::{schedule::WorkingSchedule, Resolution};

pub async fn fetch_calendar_days(db: &impl ConnectionTrait, month: PayMonth) -> Result<Vec<calendar_day::Model>, DbErr> {
    CalendarDay::find()
        .filter(calendar_day::Column::Date.gte(month.first_day()))
        .filter(calendar_day::Column::Date.lt(month.next_first_day()))
        .order_by_asc(calendar_day::Column::Date)
        .all(db).await
}

/// Persisted days that are neither holidays nor configuration marker rows
pub fn count_persisted_working_days(days: &[calendar_day::Model]) -> u32 {
    days.iter()
        .filter(|day| day.day_type != DayType::Holiday)
        .filter(|day| day.holiday_name.as_deref() != Some(WORKING_CONFIGURATION_NAME))
        .count() as u32
}

/// Counts the month's dates whose weekday the schedule marks as working.
pub fn count_configured_working_days(month: PayMonth, schedule: Option<&WorkingSchedule>) -> Resolution<u32> {
    let Some(schedule) = schedule else {
        return Resolution::HardcodedDefault(DEFAULT_WORKING_DAYS_PER_MONTH);
    };

    let working_days = month.days()
        .filter(|day| schedule.working_days.is_working(day.weekday()))
        .count() as u32;

    if working_days == 0 {
        warn!(%month, "working configuration marks no weekday as working, using the default day count");
        return Resolution::HardcodedDefault(DEFAULT_WORKING_DAYS_PER_MONTH);
    }

    Resolution::ManualFallback(working_days)
}

/// Persisted calendar first, the weekday configuration when the month has no usable rows.
pub fn resolve_from_days(month: PayMonth, days: &[calendar_day::Model], schedule: Option<&WorkingSchedule>) -> Resolution<u32> {
    match count_persisted_working_days(days) {
        0 => {
            debug!(%month, "no persisted calendar days, counting configured weekdays");
            count_configured_working_days(month, schedule)
        },
        working_days => Resolution::Persisted(working_days),
    }
}

pub async fn resolve_working_days(
    db: &impl ConnectionTrait,
    month: PayMonth,
    schedule: Option<&WorkingSchedule>,
) -> Result<Resolution<u32>, DbErr> {
    let days = fetch_calendar_days(db, month).await?;

    Ok(resolve_from_days(month, &days, schedule))
}
