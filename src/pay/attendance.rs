//! Attendance aggregator.

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait as _, ConnectionTrait, DbErr, EntityTrait as _, QueryFilter as _, QueryOrder as _};
use serde::Serialize;
use uuid::Uuid;

use crate::{entity::{attendance_record, prelude::*}, utils::PayMonth};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub actual_working_days: u32,
    pub actual_working_hours: Decimal,
}

/// Present days are counted only where `is_present` is set, but hours are summed over
/// every record, absent ones included.
pub fn summarize(records: &[attendance_record::Model]) -> AttendanceSummary {
    AttendanceSummary {
        actual_working_days: records.iter().filter(|r| r.is_present).count() as u32,
        actual_working_hours: records.iter().filter_map(|r| r.total_hours).sum(),
    }
}

pub async fn fetch_attendance(
    db: &impl ConnectionTrait,
    employee_id: Uuid,
    month: PayMonth,
) -> Result<Vec<attendance_record::Model>, DbErr> {
    AttendanceRecord::find()
        .filter(attendance_record::Column::EmployeeId.eq(employee_id))
        .filter(attendance_record::Column::Date.gte(month.first_day()))
        .filter(attendance_record::Column::Date.lt(month.next_first_day()))
        .order_by_asc(attendance_record::Column::Date)
        .all(db).await
}

pub async fn fetch_attendance_summary(
    db: &impl ConnectionTrait,
    employee_id: Uuid,
    month: PayMonth,
) -> Result<AttendanceSummary, DbErr> {
    let records = fetch_attendance(db, employee_id, month).await?;

    Ok(summarize(&records))
}
