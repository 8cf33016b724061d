use actix_web::{get, put, web, Responder};
use chrono::Local;
use sea_orm::{ActiveValue::{Set, Unchanged}, DatabaseConnection, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::Hr,
    consts::WORKING_CONFIGURATION_NAME,
    entity::{prelude::*, working_configuration},
    error::AppError,
    pay::{schedule::{self, WorkingDays, WorkingHours, WorkingSchedule}, ResolutionSource},
};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(get_configuration)
        .service(put_configuration);
}

#[derive(Debug, Serialize)]
struct ResolvedConfiguration {
    source: ResolutionSource,
    configuration: WorkingSchedule,
}

#[get("")]
async fn get_configuration(db: web::Data<DatabaseConnection>, _hr: Hr) -> Result<impl Responder, AppError> {
    let resolution = schedule::resolve_configuration(db.get_ref()).await?;

    Ok(web::Json(ResolvedConfiguration {
        source: resolution.source(),
        configuration: resolution.into_inner(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
struct UpdateConfiguration {
    working_days: WorkingDays,
    working_hours: WorkingHours,
    timezone: String,
}

#[put("")]
async fn put_configuration(db: web::Data<DatabaseConnection>, hr: Hr, payload: web::Json<UpdateConfiguration>) -> Result<impl Responder, AppError> {
    payload.working_hours.validate().map_err(AppError::InvalidConfiguration)?;

    let UpdateConfiguration { working_days, working_hours, timezone } = payload.into_inner();
    let now = Local::now().fixed_offset();

    let model = match schedule::find_configuration(db.get_ref()).await? {
        Some(existing) => {
            WorkingConfiguration::update(working_configuration::ActiveModel {
                id: Unchanged(existing.id),
                updated_at: Set(now),
                updated_by: Set(Some(hr.id)),
                working_days: Set(working_days.to_json()),
                start_time: Set(working_hours.start_time),
                end_time: Set(working_hours.end_time),
                break_start: Set(working_hours.break_start),
                break_end: Set(working_hours.break_end),
                timezone: Set(timezone),
                ..Default::default()
            }).exec(db.get_ref()).await?
        },
        None => {
            WorkingConfiguration::insert(working_configuration::ActiveModel {
                id: Set(Uuid::new_v4()),
                created_at: Set(now),
                updated_at: Set(now),
                created_by: Set(Some(hr.id)),
                updated_by: Set(Some(hr.id)),
                name: Set(WORKING_CONFIGURATION_NAME.to_owned()),
                working_days: Set(working_days.to_json()),
                start_time: Set(working_hours.start_time),
                end_time: Set(working_hours.end_time),
                break_start: Set(working_hours.break_start),
                break_end: Set(working_hours.break_end),
                timezone: Set(timezone),
            }).exec_with_returning(db.get_ref()).await?
        },
    };

    info!(updated_by = %hr.employee_id, "working configuration saved");

    Ok(web::Json(model))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::{Method, StatusCode}, test, App};
    use chrono::NaiveTime;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    use crate::{
        auth::{tests::{bearer, hr_employee, SECRET}, Authority},
        pay::schedule::tests::configuration_model,
    };

    use super::*;

    fn payload() -> serde_json::Value {
        json!({
            "working_days": { "monday": true, "tuesday": true, "wednesday": true, "thursday": true, "friday": true },
            "working_hours": {
                "start_time": "08:00:00",
                "end_time": "17:00:00",
                "break_start": "12:00:00",
                "break_end": "12:30:00",
            },
            "timezone": "Asia/Kolkata",
        })
    }

    #[actix_web::test]
    async fn test_get_default_configuration() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([ Vec::<working_configuration::Model>::new() ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/working-configuration").configure(config))
        ).await;

        let req = test::TestRequest::default()
            .uri("/working-configuration")
            .insert_header(bearer(&hr_employee()))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["source"], "hardcoded_default");
        assert_eq!(body["configuration"]["working_days"]["saturday"], true);
        assert_eq!(body["configuration"]["working_days"]["sunday"], false);
        assert_eq!(body["configuration"]["working_hours"]["start_time"], "09:00:00");
    }

    #[actix_web::test]
    async fn test_put_configuration_updates_existing() {
        let existing = configuration_model(json!({ "monday": true }));
        let updated = working_configuration::Model {
            working_days: payload()["working_days"].clone(),
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ existing.clone() ],
                vec![ updated.clone() ],
            ]);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(db.into_connection()))
                .service(web::scope("/working-configuration").configure(config))
        ).await;

        let req = test::TestRequest::default()
            .uri("/working-configuration")
            .method(Method::PUT)
            .insert_header(bearer(&hr_employee()))
            .set_json(payload())
            .to_request();

        let returned: working_configuration::Model = test::call_and_read_body_json(&app, req).await;
        assert_eq!(returned, updated);
        assert_eq!(returned.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }

    #[actix_web::test]
    async fn test_put_configuration_rejects_unknown_weekdays() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()))
                .service(web::scope("/working-configuration").configure(config))
        ).await;

        for working_days in [json!({ "funday": true }), json!({ "Monday": false, "monday": true })] {
            let mut payload = payload();
            payload["working_days"] = working_days;

            let req = test::TestRequest::default()
                .uri("/working-configuration")
                .method(Method::PUT)
                .insert_header(bearer(&hr_employee()))
                .set_json(payload)
                .to_request();

            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_put_configuration_rejects_inverted_break() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Authority::new(SECRET)))
                .app_data(web::Data::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()))
                .service(web::scope("/working-configuration").configure(config))
        ).await;

        let mut payload = payload();
        payload["working_hours"]["break_start"] = json!("13:00:00");
        payload["working_hours"]["break_end"] = json!("12:00:00");

        let req = test::TestRequest::default()
            .uri("/working-configuration")
            .method(Method::PUT)
            .insert_header(bearer(&hr_employee()))
            .set_json(payload)
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
