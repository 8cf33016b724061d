use actix_web::{get, post, put, web, HttpResponse, Responder};
use chrono::{Local, NaiveDate, NaiveTime, Timelike as _};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{Hr, Session},
    entity::{attendance_record, prelude::*},
    error::AppError,
    pay::attendance::{fetch_attendance, summarize, AttendanceSummary},
    utils::{hours_between, PayMonth},
};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(check_in)
        .service(check_out)
        .service(bulk_edit)
        .service(get_own_month);
}

async fn find_record(
    db: &impl ConnectionTrait,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Option<attendance_record::Model>, sea_orm::DbErr> {
    AttendanceRecord::find()
        .filter(attendance_record::Column::EmployeeId.eq(employee_id))
        .filter(attendance_record::Column::Date.eq(date))
        .one(db).await
}

/// Wall clock to the minute
fn now_time() -> NaiveTime {
    let now = Local::now().time();
    now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now)
}

#[post("/check-in")]
async fn check_in(db: web::Data<DatabaseConnection>, session: Session) -> Result<impl Responder, AppError> {
    let now = Local::now();
    let today = now.date_naive();

    if let Some(record) = find_record(db.get_ref(), session.id, today).await? {
        if record.check_in.is_some() {
            return Ok(HttpResponse::Ok().json(record));
        }

        let model = AttendanceRecord::update(attendance_record::ActiveModel {
            id: Unchanged(record.id),
            updated_at: Set(now.fixed_offset()),
            updated_by: Set(Some(session.id)),
            check_in: Set(Some(now_time())),
            is_present: Set(true),
            ..Default::default()
        }).exec(db.get_ref()).await?;

        return Ok(HttpResponse::Ok().json(model));
    }

    let model = AttendanceRecord::insert(attendance_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        created_at: Set(now.fixed_offset()),
        updated_at: Set(now.fixed_offset()),
        created_by: Set(Some(session.id)),
        updated_by: Set(Some(session.id)),
        employee_id: Set(session.id),
        date: Set(today),
        check_in: Set(Some(now_time())),
        check_out: Set(None),
        is_present: Set(true),
        total_hours: Set(None),
    }).exec_with_returning(db.get_ref()).await?;

    info!(employee = %session.employee_id, %today, "checked in");

    Ok(HttpResponse::Created().json(model))
}

#[post("/check-out")]
async fn check_out(db: web::Data<DatabaseConnection>, session: Session) -> Result<impl Responder, AppError> {
    let now = Local::now();
    let today = now.date_naive();

    let Some(record) = find_record(db.get_ref(), session.id, today).await? else {
        return Err(AppError::BadRequest("you have not checked-in today".to_owned()));
    };

    let Some(checked_in) = record.check_in else {
        return Err(AppError::BadRequest("you have not checked-in today".to_owned()));
    };

    let checked_out = now_time();
    if checked_out < checked_in {
        return Err(AppError::BadRequest("check-out cannot be earlier than check-in".to_owned()));
    }

    let model = AttendanceRecord::update(attendance_record::ActiveModel {
        id: Unchanged(record.id),
        updated_at: Set(now.fixed_offset()),
        updated_by: Set(Some(session.id)),
        check_out: Set(Some(checked_out)),
        total_hours: Set(Some(hours_between(checked_in, checked_out).round_dp(2))),
        ..Default::default()
    }).exec(db.get_ref()).await?;

    info!(employee = %session.employee_id, %today, "checked out");

    Ok(HttpResponse::Ok().json(model))
}

#[derive(Debug, Serialize, Deserialize)]
struct AttendanceEdit {
    employee_id: Uuid,
    date: NaiveDate,
    is_present: bool,
    total_hours: Option<Decimal>,
}

/// Upserts one record per `(employee_id, date)`, all or nothing.
#[put("")]
async fn bulk_edit(db: web::Data<DatabaseConnection>, hr: Hr, payload: web::Json<Vec<AttendanceEdit>>) -> Result<impl Responder, AppError> {
    if let Some(edit) = payload.iter().find(|edit| edit.total_hours.is_some_and(|h| h.is_sign_negative() || h > Decimal::from(24))) {
        return Err(AppError::BadRequest(format!("total_hours for {} on {} must be within 0..=24", edit.employee_id, edit.date)));
    }

    let now = Local::now().fixed_offset();
    let txn = db.begin().await?;
    let mut models = Vec::with_capacity(payload.len());

    for edit in payload.into_inner() {
        let model = match find_record(&txn, edit.employee_id, edit.date).await? {
            Some(record) => {
                AttendanceRecord::update(attendance_record::ActiveModel {
                    id: Unchanged(record.id),
                    updated_at: Set(now),
                    updated_by: Set(Some(hr.id)),
                    is_present: Set(edit.is_present),
                    total_hours: Set(edit.total_hours),
                    ..Default::default()
                }).exec(&txn).await?
            },
            None => {
                AttendanceRecord::insert(attendance_record::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    created_by: Set(Some(hr.id)),
                    updated_by: Set(Some(hr.id)),
                    employee_id: Set(edit.employee_id),
                    date: Set(edit.date),
                    check_in: Set(None),
                    check_out: Set(None),
                    is_present: Set(edit.is_present),
                    total_hours: Set(edit.total_hours),
                }).exec_with_returning(&txn).await?
            },
        };

        models.push(model);
    }

    txn.commit().await?;

    info!(edited_by = %hr.employee_id, records = models.len(), "attendance edited");

    Ok(web::Json(models))
}

#[derive(Debug, Serialize)]
struct MonthlyAttendance {
    month: PayMonth,
    summary: AttendanceSummary,
    records: Vec<attendance_record::Model>,
}

#[get("/{month}")]
async fn get_own_month(db: web::Data<DatabaseConnection>, session: Session, month: PayMonth) -> Result<impl Responder, AppError> {
    let records = fetch_attendance(db.get_ref(), session.id, month).await?;

    Ok(web::Json(MonthlyAttendance {
        month,
        summary: summarize(&records),
        records,
    }))
}
