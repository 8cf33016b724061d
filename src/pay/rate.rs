//! Pay rate calculator.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::entity::employee;

use super::{attendance::AttendanceSummary, PayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PayStatus {
    #[serde(rename = "Calculated")]
    Calculated,
    #[serde(rename = "No attendance")]
    NoAttendance,
    #[serde(rename = "No payroll data found")]
    NoPayrollData,
}

impl PayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayStatus::Calculated => "Calculated",
            PayStatus::NoAttendance => "No attendance",
            PayStatus::NoPayrollData => "No payroll data found",
        }
    }
}

/// One employee's pay for one month. Recomputed on every run, never rounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayCalculationResult {
    pub employee_id: Uuid,
    pub employee_code: String,
    pub employee_name: String,
    pub monthly_salary: Decimal,
    pub working_days: u32,
    pub working_hours_per_day: Decimal,
    pub per_day_pay: Decimal,
    pub per_hour_pay: Decimal,
    pub actual_working_days: u32,
    pub actual_working_hours: Decimal,
    pub calculated_pay: Decimal,
    pub status: PayStatus,
}

pub fn calculate_pay(
    employee: &employee::Model,
    working_days: u32,
    working_hours_per_day: Decimal,
    attendance: &AttendanceSummary,
) -> Result<PayCalculationResult, PayError> {
    let mut result = PayCalculationResult {
        employee_id: employee.id,
        employee_code: employee.employee_id.clone(),
        employee_name: employee.name.clone(),
        monthly_salary: Decimal::ZERO,
        working_days,
        working_hours_per_day,
        per_day_pay: Decimal::ZERO,
        per_hour_pay: Decimal::ZERO,
        actual_working_days: attendance.actual_working_days,
        actual_working_hours: attendance.actual_working_hours,
        calculated_pay: Decimal::ZERO,
        status: PayStatus::NoPayrollData,
    };

    let Some(monthly_salary) = employee.monthly_pay.filter(|pay| !pay.is_zero()) else {
        return Ok(result);
    };

    if working_days == 0 {
        return Err(PayError::ZeroWorkingDays);
    }
    if working_hours_per_day <= Decimal::ZERO {
        return Err(PayError::NonPositiveWorkingHours);
    }

    let per_day_pay = monthly_salary / Decimal::from(working_days);
    let per_hour_pay = per_day_pay / working_hours_per_day;

    result.monthly_salary = monthly_salary;
    result.per_day_pay = per_day_pay;
    result.per_hour_pay = per_hour_pay;
    result.calculated_pay = attendance.actual_working_hours * per_hour_pay;
    result.status = if attendance.actual_working_days > 0 {
        PayStatus::Calculated
    } else {
        PayStatus::NoAttendance
    };

    Ok(result)
}
