use actix_web::web;

mod auth;
mod attendance;
mod calendar;
mod extractor;
mod pay_calculation;
mod payroll;
mod working_configuration;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/auth")
            .configure(auth::config))
        .service(web::scope("/attendance")
            .configure(attendance::config))
        .service(web::scope("/calendar")
            .configure(calendar::config))
        .service(web::scope("/pay-calculation")
            .configure(pay_calculation::config))
        .service(web::scope("/payroll")
            .configure(payroll::config))
        .service(web::scope("/working-configuration")
            .configure(working_configuration::config));
}
