use sea_orm_migration::prelude::*;
use sha2::Digest as _;

use crate::m20250613_083042_init::{Employee, WorkingConfiguration};

const EMPLOYEE_COUNT: u32 = 100;
const HR_ID: u128 = 12345;
const CONFIGURATION_ID: u128 = 54321;

fn uuid(id: u128) -> SimpleExpr {
    Expr::val(format!("{id:032x}")).cast_as("uuid")
}

fn hashed_password(password: &str, email: &str) -> Vec<u8> {
    sha2::Sha256::digest(format!("{password}:{email}")).to_vec()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let time = Expr::val("2025-06-15T06:58:41.474Z").cast_as("timestamptz");

        // Creates 100 employees, every tenth one without a salary on record
        for i in 1..=EMPLOYEE_COUNT {
            let code = format!("EMP-{i:04}");
            let email = format!("emp-{i:04}@example.com");
            let monthly_pay: SimpleExpr = match i % 10 {
                0 => Expr::val(Option::<String>::None).cast_as("numeric"),
                _ => Expr::val(rand::random_range(20_000..=90_000).to_string()).cast_as("numeric"),
            };

            manager
                .exec_stmt(Query::insert()
                    .into_table(Employee::Table)
                    .columns(["id", "created_at", "updated_at", "employee_id", "name", "email", "password", "role", "monthly_pay"])
                    .values_panic([uuid(i as u128), time.clone(), time.clone(), code.clone().into(), format!("Employee {code}").into(), email.clone().into(), hashed_password(&code, &email).into(), Expr::val("employee").cast_as("role_type"), monthly_pay])
                    .to_owned()
            ).await?;
        }

        // Create an HR account

        manager
            .exec_stmt(Query::insert()
                .into_table(Employee::Table)
                .columns(["id", "created_at", "updated_at", "employee_id", "name", "email", "password", "role", "monthly_pay"])
                .values_panic([uuid(HR_ID), time.clone(), time.clone(), "HR-0001".into(), "HR Admin".into(), "hr@example.com".into(), hashed_password("hr", "hr@example.com").into(), Expr::val("hr").cast_as("role_type"), Expr::val(Option::<String>::None).cast_as("numeric")])
                .to_owned()
        ).await?;

        // Monday to Saturday, 09:00-18:00 with an hour of break

        let working_days = r#"{"monday":true,"tuesday":true,"wednesday":true,"thursday":true,"friday":true,"saturday":true,"sunday":false}"#;

        manager
            .exec_stmt(Query::insert()
                .into_table(WorkingConfiguration::Table)
                .columns(["id", "created_at", "updated_at", "created_by", "updated_by", "name", "working_days", "start_time", "end_time", "break_start", "break_end", "timezone"])
                .values_panic([uuid(CONFIGURATION_ID), time.clone(), time.clone(), uuid(HR_ID), uuid(HR_ID), "Working Configuration".into(), Expr::val(working_days).cast_as("jsonb"), Expr::val("09:00").cast_as("time"), Expr::val("18:00").cast_as("time"), Expr::val("12:00").cast_as("time"), Expr::val("13:00").cast_as("time"), "UTC".into()])
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete()
                .from_table(WorkingConfiguration::Table)
                .and_where(Expr::col("id").eq(uuid(CONFIGURATION_ID)))
                .to_owned()
        ).await?;

        for id in (1..=EMPLOYEE_COUNT as u128).chain([HR_ID]) {
            manager
                .exec_stmt(Query::delete()
                    .from_table(Employee::Table)
                    .and_where(Expr::col("id").eq(uuid(id)))
                    .to_owned()
            ).await?;
        }

        Ok(())
    }
}
