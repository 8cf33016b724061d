use actix_web::{delete, get, put, web, HttpResponse, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::{Set, Unchanged}, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::Hr,
    entity::{calendar_day, prelude::*, sea_orm_active_enums::DayType},
    error::AppError,
    pay::calendar,
    utils::PayMonth,
};

use super::extractor::PathDate;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(get_month)
        .service(put_day)
        .service(delete_day);
}

#[derive(Debug, Serialize)]
struct CalendarMonth {
    month: PayMonth,
    /// Rows that count as working days, zero means the weekday configuration is used
    working_days: u32,
    days: Vec<calendar_day::Model>,
}

#[get("/{month}")]
async fn get_month(db: web::Data<DatabaseConnection>, _hr: Hr, month: PayMonth) -> Result<impl Responder, AppError> {
    let days = calendar::fetch_calendar_days(db.get_ref(), month).await?;

    Ok(web::Json(CalendarMonth {
        month,
        working_days: calendar::count_persisted_working_days(&days),
        days,
    }))
}

#[derive(Debug, Serialize, Deserialize)]
struct UpsertDay {
    day_type: DayType,
    holiday_name: Option<String>,
}

#[put("/day/{date}")]
async fn put_day(db: web::Data<DatabaseConnection>, hr: Hr, date: PathDate, payload: web::Json<UpsertDay>) -> Result<impl Responder, AppError> {
    let PathDate(date) = date;
    let UpsertDay { day_type, holiday_name } = payload.into_inner();
    let now = Local::now().fixed_offset();

    let existing = CalendarDay::find()
        .filter(calendar_day::Column::Date.eq(date))
        .one(db.get_ref()).await?;

    match existing {
        Some(day) => {
            let model = CalendarDay::update(calendar_day::ActiveModel {
                id: Unchanged(day.id),
                updated_at: Set(now),
                updated_by: Set(Some(hr.id)),
                day_type: Set(day_type),
                holiday_name: Set(holiday_name),
                ..Default::default()
            }).exec(db.get_ref()).await?;

            Ok(HttpResponse::Ok().json(model))
        },
        None => {
            let model = CalendarDay::insert(calendar_day::ActiveModel {
                id: Set(Uuid::new_v4()),
                created_at: Set(now),
                updated_at: Set(now),
                created_by: Set(Some(hr.id)),
                updated_by: Set(Some(hr.id)),
                date: Set(date),
                day_type: Set(day_type),
                holiday_name: Set(holiday_name),
            }).exec_with_returning(db.get_ref()).await?;

            Ok(HttpResponse::Created().json(model))
        },
    }
}

#[delete("/day/{date}")]
async fn delete_day(db: web::Data<DatabaseConnection>, _hr: Hr, date: PathDate) -> Result<impl Responder, AppError> {
    let result = CalendarDay::delete_many()
        .filter(calendar_day::Column::Date.eq(date.0))
        .exec(db.get_ref()).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("calendar day {}", date.0)));
    }

    Ok(HttpResponse::NoContent().finish())
}
