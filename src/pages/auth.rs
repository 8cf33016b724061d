use actix_web::{get, post, web, Responder};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{auth::{Authority, Session}, entity::{employee, prelude::*}, error::AppError};

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(login)
        .service(whoami);
}

#[derive(Debug, Serialize, Deserialize)]
struct Login {
    email: String,
    password: String,
}

pub(crate) fn hash_password(password: &str, email: &str) -> Vec<u8> {
    Sha256::digest(format!("{password}:{email}")).to_vec()
}

#[post("/login")]
async fn login(db: web::Data<DatabaseConnection>, authority: web::Data<Authority>, credentials: web::Json<Login>) -> Result<impl Responder, AppError> {
    let hashed_password = hash_password(&credentials.password, &credentials.email);

    let Some(employee) = Employee::find()
        .filter(employee::Column::Email.eq(&credentials.email))
        .filter(employee::Column::Password.eq(hashed_password))
        .one(db.get_ref()).await?
    else {
        return Err(AppError::Forbidden);
    };

    Ok(authority.issue_for(&employee)?)
}

#[get("")]
async fn whoami(db: web::Data<DatabaseConnection>, session: Session) -> Result<impl Responder, AppError> {
    let employee = Employee::find_by_id(session.id)
        .one(db.get_ref()).await?
        .ok_or_else(|| AppError::NotFound("employee".to_owned()))?;

    Ok(web::Json(employee))
}
