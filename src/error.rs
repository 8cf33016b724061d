use actix_web::{body, http::{header::ContentType, StatusCode}, HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use crate::{auth::AuthError, pay::PayError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error")]
    Database(#[from] DbErr),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("invalid working configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Pay(#[from] PayError),

    #[error("export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        if let AppError::Database(err) = self {
            error!(%err, "request failed on a database call");
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Auth(err) => err.status_code(),
            AppError::InvalidConfiguration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Pay(PayError::InvalidMonth(_)) => StatusCode::BAD_REQUEST,
            AppError::Pay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
