use std::str::FromStr as _;

use actix_web::{dev, FromRequest, HttpRequest};
use chrono::NaiveDate;
use futures_util::future::{ready, Ready};

use crate::utils::PayMonth;

impl FromRequest for PayMonth {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let month = req.match_info().get("month").expect("This extractor must be used under `month` path");

        ready(
            PayMonth::from_str(month)
                .map_err(|err| actix_web::error::ErrorBadRequest(err.to_string()))
        )
    }
}

/// The `{date}` path segment, `YYYY-MM-DD`
pub(super) struct PathDate(pub(super) NaiveDate);

impl FromRequest for PathDate {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let date = req.match_info().get("date").expect("This extractor must be used under `date` path");

        ready(
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(PathDate)
                .map_err(|_| actix_web::error::ErrorBadRequest("invalid `date`, expected YYYY-MM-DD"))
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{get, http::StatusCode, test, App, Responder};

    use super::*;

    #[actix_web::test]
    async fn test_pay_month_extractor() {
        #[get("/{month}")]
        async fn test_handler(month: PayMonth) -> impl Responder {
            month.to_string()
        }

        let app = test::init_service(App::new().service(test_handler)).await;

        let req = test::TestRequest::default().uri("/2024-06").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "2024-06");

        let req = test::TestRequest::default().uri("/2024-13").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_path_date_extractor() {
        #[get("/{date}")]
        async fn test_handler(date: PathDate) -> impl Responder {
            date.0.to_string()
        }

        let app = test::init_service(App::new().service(test_handler)).await;

        let req = test::TestRequest::default().uri("/2024-06-17").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "2024-06-17");

        let req = test::TestRequest::default().uri("/17-06-2024").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
