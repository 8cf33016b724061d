use sea_orm_migration::{prelude::{extension::postgres::TypeDropStatement, *}, sea_orm::{ActiveEnum, DbBackend, DeriveActiveEnum, EnumIter, Schema}};

use crate::{setup_employee_table_fk, util::{default_audited_table_statement, default_table_statement, DefaultColumn}};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(DbBackend::Postgres);

        manager
            .create_type(
                schema.create_enum_from_active_enum::<RoleType>()
            ).await?;

        manager
            .create_type(
                schema.create_enum_from_active_enum::<DayType>()
            ).await?;

        manager
            .create_table(default_table_statement()
                .table(Employee::Table)
                .col(ColumnDef::new(Employee::EmployeeId)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Employee::Email)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(Employee::Password)
                    .binary()
                    .not_null()) // sha256("<password>:<email>")
                .col(ColumnDef::new(Employee::Role)
                    .custom(RoleType::name())
                    .not_null())
                .col(ColumnDef::new(Employee::MonthlyPay)
                    .decimal_len(14, 2)) // NULL means no payroll data
                .take()
            ).await?;

        manager
            .create_table(default_audited_table_statement()
                .table(WorkingConfiguration::Table)
                .col(ColumnDef::new(WorkingConfiguration::Name)
                    .text()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::WorkingDays)
                    .json_binary()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::StartTime)
                    .time()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::EndTime)
                    .time()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::BreakStart)
                    .time()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::BreakEnd)
                    .time()
                    .not_null())
                .col(ColumnDef::new(WorkingConfiguration::Timezone)
                    .text()
                    .not_null())
                .take()
            ).await?;
        setup_employee_table_fk!(manager, WorkingConfiguration::Table);

        manager
            .create_table(default_audited_table_statement()
                .table(CalendarDay::Table)
                .col(ColumnDef::new(CalendarDay::Date)
                    .date()
                    .unique_key()
                    .not_null())
                .col(ColumnDef::new(CalendarDay::DayType)
                    .custom(DayType::name())
                    .not_null())
                .col(ColumnDef::new(CalendarDay::HolidayName)
                    .text())
                .take()
            ).await?;
        setup_employee_table_fk!(manager, CalendarDay::Table);

        manager
            .create_table(default_audited_table_statement()
                .table(AttendanceRecord::Table)
                .col(ColumnDef::new(AttendanceRecord::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::Date)
                    .date()
                    .not_null())
                .col(ColumnDef::new(AttendanceRecord::CheckIn)
                    .time())
                .col(ColumnDef::new(AttendanceRecord::CheckOut)
                    .time())
                .col(ColumnDef::new(AttendanceRecord::IsPresent)
                    .boolean()
                    .not_null()
                    .default(false))
                .col(ColumnDef::new(AttendanceRecord::TotalHours)
                    .decimal_len(6, 2))
                .index(Index::create()
                    .name("attendance_record_employee_date")
                    .col(AttendanceRecord::EmployeeId)
                    .col(AttendanceRecord::Date)
                    .unique())
                .take()
            ).await?;
        setup_employee_table_fk!(manager, AttendanceRecord::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(AttendanceRecord::Table, AttendanceRecord::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        manager
            .create_table(default_audited_table_statement()
                .table(Payroll::Table)
                .col(ColumnDef::new(Payroll::EmployeeId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Payroll::Period)
                    .date()
                    .not_null())
                .col(ColumnDef::new(Payroll::MonthlySalary)
                    .decimal_len(14, 2)
                    .not_null())
                .col(ColumnDef::new(Payroll::WorkingDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Payroll::WorkingHoursPerDay)
                    .decimal()
                    .not_null())
                .col(ColumnDef::new(Payroll::PerDayPay)
                    .decimal()
                    .not_null())
                .col(ColumnDef::new(Payroll::PerHourPay)
                    .decimal()
                    .not_null())
                .col(ColumnDef::new(Payroll::ActualWorkingDays)
                    .integer()
                    .not_null())
                .col(ColumnDef::new(Payroll::ActualWorkingHours)
                    .decimal()
                    .not_null())
                .col(ColumnDef::new(Payroll::CalculatedPay)
                    .decimal()
                    .not_null()) // Unrounded, rounding happens on export
                .col(ColumnDef::new(Payroll::Status)
                    .text()
                    .not_null())
                .index(Index::create()
                    .name("payroll_employee_period")
                    .col(Payroll::EmployeeId)
                    .col(Payroll::Period)
                    .unique())
                .take()
            ).await?;
        setup_employee_table_fk!(manager, Payroll::Table);

        manager.create_foreign_key(ForeignKeyCreateStatement::new()
            .from(Payroll::Table, Payroll::EmployeeId)
            .to(Employee::Table, DefaultColumn::Id)
            .on_delete(ForeignKeyAction::Cascade)
            .on_update(ForeignKeyAction::Cascade)
            .take()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(
            TableDropStatement::new()
                .table(Payroll::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(AttendanceRecord::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(CalendarDay::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(WorkingConfiguration::Table)
                .take()
        ).await?;

        manager.drop_table(
            TableDropStatement::new()
                .table(Employee::Table)
                .take()
        ).await?;

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(DayType::name())
                    .to_owned()
            ).await?;

        manager
            .drop_type(
                TypeDropStatement::new()
                    .name(RoleType::name())
                    .to_owned()
            ).await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Employee {
    Table,
    EmployeeId,
    Name,
    Email,
    Password,
    Role,
    MonthlyPay,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_type")]
enum RoleType {
    #[sea_orm(string_value = "employee")]
    Employee,
    #[sea_orm(string_value = "hr")]
    Hr,
}

#[derive(EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "day_type")]
enum DayType {
    #[sea_orm(string_value = "working")]
    Working,
    #[sea_orm(string_value = "holiday")]
    Holiday,
}

#[derive(Iden)]
pub(crate) enum WorkingConfiguration {
    Table,
    Name,
    WorkingDays,
    StartTime,
    EndTime,
    BreakStart,
    BreakEnd,
    Timezone,
}

#[derive(Iden)]
enum CalendarDay {
    Table,
    Date,
    DayType,
    HolidayName,
}

#[derive(Iden)]
enum AttendanceRecord {
    Table,
    EmployeeId,
    Date,
    CheckIn,
    CheckOut,
    IsPresent,
    TotalHours,
}

#[derive(Iden)]
enum Payroll {
    Table,
    EmployeeId,
    Period,
    MonthlySalary,
    WorkingDays,
    WorkingHoursPerDay,
    PerDayPay,
    PerHourPay,
    ActualWorkingDays,
    ActualWorkingHours,
    CalculatedPay,
    Status,
}
