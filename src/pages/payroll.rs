use actix_web::{get, post, web, Responder};
use chrono::{FixedOffset, DateTime, Local};
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{Hr, Session},
    config::PayRunSettings,
    entity::{payroll, prelude::*},
    error::AppError,
    pay::{batch, rate::{PayCalculationResult, PayStatus}},
    utils::PayMonth,
};

use super::pay_calculation::PayRunQuery;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(commit_payroll)
        .service(get_month)
        .service(get_own_payroll);
}

#[derive(Debug, Serialize)]
struct CommittedPayroll {
    month: PayMonth,
    saved: Vec<payroll::Model>,
    /// Employee codes without a salary on record
    skipped: Vec<String>,
    notices: Vec<String>,
}

/// Writes one payroll row per `(employee, period)`, replacing the previous run
async fn upsert_payroll(
    db: &impl ConnectionTrait,
    month: PayMonth,
    result: &PayCalculationResult,
    by: Uuid,
    now: DateTime<FixedOffset>,
) -> Result<payroll::Model, DbErr> {
    let existing = Payroll::find()
        .filter(payroll::Column::EmployeeId.eq(result.employee_id))
        .filter(payroll::Column::Period.eq(month.first_day()))
        .one(db).await?;

    let mut model = payroll::ActiveModel {
        updated_at: Set(now),
        updated_by: Set(Some(by)),
        monthly_salary: Set(result.monthly_salary),
        working_days: Set(result.working_days as i32),
        working_hours_per_day: Set(result.working_hours_per_day),
        per_day_pay: Set(result.per_day_pay),
        per_hour_pay: Set(result.per_hour_pay),
        actual_working_days: Set(result.actual_working_days as i32),
        actual_working_hours: Set(result.actual_working_hours),
        calculated_pay: Set(result.calculated_pay),
        status: Set(result.status.as_str().to_owned()),
        ..Default::default()
    };

    match existing {
        Some(existing) => {
            model.id = Unchanged(existing.id);
            Payroll::update(model).exec(db).await
        },
        None => {
            model.id = Set(Uuid::new_v4());
            model.created_at = Set(now);
            model.created_by = Set(Some(by));
            model.employee_id = Set(result.employee_id);
            model.period = Set(month.first_day());
            Payroll::insert(model).exec_with_returning(db).await
        },
    }
}

#[post("/{month}")]
async fn commit_payroll(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<PayRunSettings>,
    hr: Hr,
    month: PayMonth,
    query: web::Query<PayRunQuery>,
) -> Result<impl Responder, AppError> {
    let report = batch::run(db.get_ref(), query.request(month), settings.attendance_fetch_concurrency).await?;

    // Fallback values must not overwrite a stored payroll
    if !report.notices.is_empty() {
        warn!(%month, notices = ?report.notices, "payroll not committed, the run was incomplete");
        return Err(AppError::BadRequest(format!("payroll for {month} not committed: {}", report.notices.join("; "))));
    }

    let now = Local::now().fixed_offset();
    let txn = db.begin().await?;
    let mut saved = Vec::new();
    let mut skipped = Vec::new();

    for result in &report.results {
        if result.status == PayStatus::NoPayrollData {
            skipped.push(result.employee_code.clone());
            continue;
        }

        saved.push(upsert_payroll(&txn, month, result, hr.id, now).await?);
    }

    txn.commit().await?;

    info!(%month, saved = saved.len(), skipped = skipped.len(), committed_by = %hr.employee_id, "payroll committed");

    Ok(web::Json(CommittedPayroll {
        month,
        saved,
        skipped,
        notices: report.notices,
    }))
}

#[get("/{month}")]
async fn get_month(db: web::Data<DatabaseConnection>, _hr: Hr, month: PayMonth) -> Result<impl Responder, AppError> {
    let payrolls = Payroll::find()
        .filter(payroll::Column::Period.eq(month.first_day()))
        .order_by_asc(payroll::Column::EmployeeId)
        .all(db.get_ref()).await?;

    Ok(web::Json(payrolls))
}

#[get("/{month}/me")]
async fn get_own_payroll(db: web::Data<DatabaseConnection>, session: Session, month: PayMonth) -> Result<impl Responder, AppError> {
    let payroll = Payroll::find()
        .filter(payroll::Column::EmployeeId.eq(session.id))
        .filter(payroll::Column::Period.eq(month.first_day()))
        .one(db.get_ref()).await?
        .ok_or_else(|| AppError::NotFound(format!("payroll for {month}")))?;

    Ok(web::Json(payroll))
}
