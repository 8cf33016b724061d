use actix_web::{get, http::header::{self, ContentDisposition, DispositionParam, DispositionType}, web, HttpResponse, Responder};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::{
    auth::Hr,
    config::PayRunSettings,
    error::AppError,
    pay::{batch::{self, PayCalculationRequest}, export},
    utils::PayMonth,
};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(calculate)
        .service(export_csv);
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PayRunQuery {
    #[serde(default)]
    pub(super) include_break_hours: bool,
}

impl PayRunQuery {
    pub(super) fn request(&self, month: PayMonth) -> PayCalculationRequest {
        PayCalculationRequest { month, include_break_hours: self.include_break_hours }
    }
}

#[get("/{month}")]
async fn calculate(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<PayRunSettings>,
    _hr: Hr,
    month: PayMonth,
    query: web::Query<PayRunQuery>,
) -> Result<impl Responder, AppError> {
    let report = batch::run(db.get_ref(), query.request(month), settings.attendance_fetch_concurrency).await?;

    Ok(web::Json(report))
}

#[get("/{month}/export")]
async fn export_csv(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<PayRunSettings>,
    _hr: Hr,
    month: PayMonth,
    query: web::Query<PayRunQuery>,
) -> Result<impl Responder, AppError> {
    let report = batch::run(db.get_ref(), query.request(month), settings.attendance_fetch_concurrency).await?;
    let body = export::to_csv(&report.results)?;

    Ok(
        HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "text/csv; charset=utf-8"))
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(format!("pay-calculation-{month}.csv"))],
            })
            .body(body)
    )
}
