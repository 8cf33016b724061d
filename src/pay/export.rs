//! CSV export of a pay run. Amounts are rounded to two decimals here and nowhere else.

use rust_decimal::Decimal;

use super::rate::PayCalculationResult;

const HEADER: [&str; 12] = [
    "Employee ID",
    "Employee Code",
    "Name",
    "Monthly Salary",
    "Working Days",
    "Working Hours/Day",
    "Per Day Pay",
    "Per Hour Pay",
    "Actual Working Days",
    "Actual Working Hours",
    "Calculated Pay",
    "Status",
];

fn display(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

pub fn to_csv(results: &[PayCalculationResult]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADER)?;

    for result in results {
        writer.write_record([
            result.employee_id.to_string(),
            result.employee_code.clone(),
            result.employee_name.clone(),
            display(result.monthly_salary),
            result.working_days.to_string(),
            display(result.working_hours_per_day),
            display(result.per_day_pay),
            display(result.per_hour_pay),
            result.actual_working_days.to_string(),
            display(result.actual_working_hours),
            display(result.calculated_pay),
            result.status.as_str().to_owned(),
        ])?;
    }

    writer.into_inner().map_err(|err| err.into_error().into())
}

#[cfg(test)]
mod tests {
    use crate::pay::{attendance::AttendanceSummary, rate::{calculate_pay, tests::employee}};

    use super::*;

    #[test]
    fn test_to_csv() {
        let employee = employee("EMP-0001", Some(Decimal::from(10_000)));
        let summary = AttendanceSummary { actual_working_days: 1, actual_working_hours: Decimal::from(8) };
        let result = calculate_pay(&employee, 3, Decimal::from(8), &summary).unwrap();

        let csv = String::from_utf8(to_csv(&[result]).unwrap()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next().unwrap(), HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            format!("{},EMP-0001,Employee EMP-0001,10000.00,3,8.00,3333.33,416.67,1,8.00,3333.33,Calculated", employee.id),
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_empty_export_has_header() {
        let csv = String::from_utf8(to_csv(&[]).unwrap()).unwrap();

        assert_eq!(csv.trim_end(), HEADER.join(","));
    }
}
