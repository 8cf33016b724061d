//! Batch orchestration of a monthly pay run.
//!
//! A run walks `LoadingEmployees → LoadingConfig → ResolvingCalendar → PerEmployee → Done`
//! and always starts from scratch. A failed read never aborts the run: it is logged,
//! reported in [`PayCalculationReport::notices`] and replaced by a fallback value. Without
//! an employee list the report simply has no results.

use futures_util::{stream, StreamExt as _};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait as _, ConnectionTrait, EntityTrait as _, QueryFilter as _, QueryOrder as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    entity::{employee, prelude::*, sea_orm_active_enums::RoleType},
    error::AppError,
    utils::PayMonth,
};

use super::{
    attendance::{self, AttendanceSummary},
    calendar, hours,
    rate::{self, PayCalculationResult},
    schedule::{self, WorkingSchedule},
    Resolution, ResolutionSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PayCalculationRequest {
    pub month: PayMonth,
    #[serde(default)]
    pub include_break_hours: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayCalculationReport {
    pub month: PayMonth,
    pub include_break_hours: bool,
    pub configuration_source: ResolutionSource,
    pub calendar_source: ResolutionSource,
    pub hours_source: ResolutionSource,
    pub working_days: u32,
    pub working_hours_per_day: Decimal,
    /// Ordered by employee code
    pub results: Vec<PayCalculationResult>,
    /// Reads that failed and were replaced by fallbacks
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    LoadingEmployees,
    LoadingConfig,
    ResolvingCalendar,
    PerEmployee,
    Done,
}

pub async fn fetch_employees(db: &impl ConnectionTrait) -> Result<Vec<employee::Model>, sea_orm::DbErr> {
    Employee::find()
        .filter(employee::Column::Role.eq(RoleType::Employee))
        .order_by_asc(employee::Column::EmployeeId)
        .all(db).await
}

/// Runs a full pay calculation for `request.month`.
///
/// At most `concurrency` attendance reads are in flight at once; results keep the
/// employee order regardless.
pub async fn run(
    db: &impl ConnectionTrait,
    request: PayCalculationRequest,
    concurrency: usize,
) -> Result<PayCalculationReport, AppError> {
    let PayCalculationRequest { month, include_break_hours } = request;
    let mut notices = Vec::new();

    debug!(%month, stage = ?Stage::LoadingEmployees);
    let employees = fetch_employees(db).await
        .unwrap_or_else(|err| {
            error!(%err, "unable to load employees");
            notices.push("Employees could not be loaded".to_owned());
            Vec::new()
        });

    debug!(%month, stage = ?Stage::LoadingConfig);
    let configuration = schedule::resolve_configuration(db).await
        .unwrap_or_else(|err| {
            error!(%err, "unable to load working configuration");
            notices.push("Working configuration could not be loaded, the default schedule was used".to_owned());
            Resolution::HardcodedDefault(WorkingSchedule::default())
        });

    debug!(%month, stage = ?Stage::ResolvingCalendar);
    let working_days = match calendar::resolve_working_days(db, month, Some(configuration.value())).await {
        Ok(working_days) => working_days,
        Err(err) => {
            error!(%err, %month, "unable to load calendar days");
            notices.push(format!("Calendar for {month} could not be loaded, working days were counted from the schedule"));
            calendar::count_configured_working_days(month, Some(configuration.value()))
        },
    };

    let working_hours = hours::working_hours_per_day(
        Some(configuration.as_ref().map(|schedule| &schedule.working_hours)),
        include_break_hours,
    );

    debug!(%month, stage = ?Stage::PerEmployee, employees = employees.len());
    let summaries = stream::iter(&employees)
        .map(|employee| async move {
            (employee, attendance::fetch_attendance_summary(db, employee.id, month).await)
        })
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>().await;

    let mut results = Vec::with_capacity(summaries.len());
    for (employee, summary) in summaries {
        let summary = summary.unwrap_or_else(|err| {
            error!(%err, employee = %employee.employee_id, %month, "unable to load attendance");
            notices.push(format!("Attendance for {} could not be loaded", employee.employee_id));
            AttendanceSummary::default()
        });

        results.push(rate::calculate_pay(employee, *working_days.value(), *working_hours.value(), &summary)?);
    }

    debug!(%month, stage = ?Stage::Done);
    info!(
        %month,
        employees = results.len(),
        working_days = working_days.value(),
        working_hours = %working_hours.value(),
        notices = notices.len(),
        "pay calculation finished"
    );

    Ok(PayCalculationReport {
        month,
        include_break_hours,
        configuration_source: configuration.source(),
        calendar_source: working_days.source(),
        hours_source: working_hours.source(),
        working_days: *working_days.value(),
        working_hours_per_day: *working_hours.value(),
        results,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
    use serde_json::json;

    use crate::{
        entity::{attendance_record, calendar_day, sea_orm_active_enums::DayType, working_configuration},
        pay::{
            attendance::tests::attendance_records,
            calendar::tests::calendar_day,
            rate::{tests::employee, PayStatus},
            schedule::tests::configuration_model,
        },
    };

    use super::*;

    fn june() -> PayMonth {
        "2024-06".parse().unwrap()
    }

    fn request(include_break_hours: bool) -> PayCalculationRequest {
        PayCalculationRequest { month: june(), include_break_hours }
    }

    struct Fixture {
        employees: Vec<employee::Model>,
        attendance: Vec<Vec<attendance_record::Model>>,
    }

    impl Fixture {
        fn new() -> Self {
            let employees = vec![
                employee("EMP-0001", Some(Decimal::from(30_000))),
                employee("EMP-0002", None),
                employee("EMP-0003", Some(Decimal::from(30_000))),
            ];

            let attendance = vec![
                attendance_records(employees[0].id, june(), 20, Some(Decimal::from(8)), true),
                attendance_records(employees[1].id, june(), 5, Some(Decimal::from(8)), true),
                vec![ ],
            ];

            Self { employees, attendance }
        }

        /// No configuration and no calendar rows persisted
        fn database(&self) -> DatabaseConnection {
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([ self.employees.clone() ])
                .append_query_results([ Vec::<working_configuration::Model>::new() ])
                .append_query_results([ Vec::<calendar_day::Model>::new() ])
                .append_query_results(self.attendance.clone())
                .into_connection()
        }
    }

    #[actix_web::test]
    async fn test_run_with_fallbacks() {
        let fixture = Fixture::new();
        let db = fixture.database();

        let report = run(&db, request(false), 1).await.unwrap();

        assert_eq!(report.configuration_source, ResolutionSource::HardcodedDefault);
        assert_eq!(report.calendar_source, ResolutionSource::ManualFallback);
        assert_eq!(report.hours_source, ResolutionSource::HardcodedDefault);
        assert_eq!(report.working_days, 25);
        assert_eq!(report.working_hours_per_day, Decimal::from(8));
        assert!(report.notices.is_empty());

        let codes = report.results.iter().map(|r| r.employee_code.as_str()).collect::<Vec<_>>();
        assert_eq!(codes, vec!["EMP-0001", "EMP-0002", "EMP-0003"]);

        let first = &report.results[0];
        assert_eq!(first.per_day_pay, Decimal::from(1_200));
        assert_eq!(first.per_hour_pay, Decimal::from(150));
        assert_eq!(first.actual_working_hours, Decimal::from(160));
        assert_eq!(first.calculated_pay, Decimal::from(24_000));
        assert_eq!(first.status, PayStatus::Calculated);

        assert_eq!(report.results[1].calculated_pay, Decimal::ZERO);
        assert_eq!(report.results[1].status, PayStatus::NoPayrollData);

        assert_eq!(report.results[2].calculated_pay, Decimal::ZERO);
        assert_eq!(report.results[2].status, PayStatus::NoAttendance);
    }

    #[actix_web::test]
    async fn test_run_with_persisted_data() {
        let employees = vec![ employee("EMP-0001", Some(Decimal::from(22_000))) ];
        let calendar = (3..=24)
            .map(|day| calendar_day(NaiveDate::from_ymd_opt(2024, 6, day).unwrap(), DayType::Working, None))
            .collect::<Vec<_>>();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ employees.clone() ])
            // 08:00-17:00 with a 30 minute break
            .append_query_results([ vec![ configuration_model(json!({ "monday": true })) ] ])
            .append_query_results([ calendar ])
            .append_query_results([ attendance_records(employees[0].id, june(), 2, Some(Decimal::new(85, 1)), true) ])
            .into_connection();

        let report = run(&db, request(false), 4).await.unwrap();

        assert_eq!(report.configuration_source, ResolutionSource::Persisted);
        assert_eq!(report.calendar_source, ResolutionSource::Persisted);
        assert_eq!(report.hours_source, ResolutionSource::Persisted);
        assert_eq!(report.working_days, 22);
        assert_eq!(report.working_hours_per_day, Decimal::new(85, 1));

        let result = &report.results[0];
        assert_eq!(result.per_day_pay, Decimal::from(1_000));
        assert!((result.calculated_pay - Decimal::from(2_000)).abs() < Decimal::new(1, 10));
    }

    #[actix_web::test]
    async fn test_failed_reads_degrade() {
        let employees = vec![
            employee("EMP-0001", Some(Decimal::from(30_000))),
            employee("EMP-0002", Some(Decimal::from(30_000))),
        ];

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ employees.clone() ])
            .append_query_errors([
                DbErr::Custom("configuration unavailable".to_owned()),
                DbErr::Custom("calendar unavailable".to_owned()),
            ])
            .append_query_results([ attendance_records(employees[0].id, june(), 10, Some(Decimal::from(4)), true) ])
            .append_query_errors([ DbErr::Custom("attendance unavailable".to_owned()) ])
            .into_connection();

        let report = run(&db, request(false), 1).await.unwrap();

        assert_eq!(report.configuration_source, ResolutionSource::HardcodedDefault);
        assert_eq!(report.calendar_source, ResolutionSource::ManualFallback);
        assert_eq!(report.notices, vec![
            "Working configuration could not be loaded, the default schedule was used".to_owned(),
            "Calendar for 2024-06 could not be loaded, working days were counted from the schedule".to_owned(),
            "Attendance for EMP-0002 could not be loaded".to_owned(),
        ]);

        assert_eq!(report.results[0].calculated_pay, Decimal::from(6_000));
        assert_eq!(report.results[1].calculated_pay, Decimal::ZERO);
        assert_eq!(report.results[1].status, PayStatus::NoAttendance);
    }

    #[actix_web::test]
    async fn test_employee_read_failure_yields_empty_report() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([ DbErr::Custom("employees unavailable".to_owned()) ])
            .append_query_results([ Vec::<working_configuration::Model>::new() ])
            .append_query_results([ Vec::<calendar_day::Model>::new() ])
            .into_connection();

        let report = run(&db, request(false), 1).await.unwrap();

        assert!(report.results.is_empty());
        assert_eq!(report.notices, vec![ "Employees could not be loaded".to_owned() ]);
        assert_eq!(report.working_days, 25);
    }

    #[actix_web::test]
    async fn test_break_toggle() {
        let fixture = Fixture::new();

        let excluded = run(&fixture.database(), request(false), 1).await.unwrap();
        let included = run(&fixture.database(), request(true), 1).await.unwrap();

        assert_eq!(excluded.working_hours_per_day, Decimal::from(8));
        assert_eq!(included.working_hours_per_day, Decimal::from(9));
        assert!(included.results[0].calculated_pay < excluded.results[0].calculated_pay);
    }

    #[actix_web::test]
    async fn test_run_is_idempotent() {
        let fixture = Fixture::new();

        let first = run(&fixture.database(), request(false), 2).await.unwrap();
        let second = run(&fixture.database(), request(false), 2).await.unwrap();

        assert_eq!(serde_json::to_vec(&first).unwrap(), serde_json::to_vec(&second).unwrap());
    }
}
