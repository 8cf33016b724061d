use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use sea_orm::ConnectOptions;
use tracing::{info, warn};

use crate::consts::DEFAULT_ATTENDANCE_FETCH_CONCURRENCY;

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub jwt_key: String,

    pub pay_run: PayRunSettings,
}

/// Shared with the handlers that start a pay run
#[derive(Debug, Clone, Copy)]
pub struct PayRunSettings {
    /// Upper bound of attendance reads in flight during one run
    pub attendance_fetch_concurrency: usize,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: ConnectOptions::new(required("DATABASE_URL")),
        jwt_key: required("JWT_SECRET"),
        pay_run: PayRunSettings {
            attendance_fetch_concurrency: parse_concurrency(optional("ATTENDANCE_FETCH_CONCURRENCY").as_deref()),
        },
    }
}

fn optional(name: &str) -> Option<String> {
    info!("Loading environment `{name}`");

    env::var(name).ok()
}

fn required(name: &str) -> String {
    optional(name).unwrap_or_else(|| panic!("Environment `{name}` is required to be set"))
}

fn load_host_address() -> SocketAddr {
    let var = optional("HOST_ADDRESS").unwrap_or_else(|| "127.0.0.1:0".to_owned());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").next()
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn parse_concurrency(var: Option<&str>) -> usize {
    let Some(var) = var else {
        return DEFAULT_ATTENDANCE_FETCH_CONCURRENCY;
    };

    match var.trim().parse::<usize>() {
        Ok(0) => {
            warn!("`ATTENDANCE_FETCH_CONCURRENCY` must be at least 1, using 1");
            1
        },
        Ok(n) => n,
        Err(_) => {
            warn!(value = var, "`ATTENDANCE_FETCH_CONCURRENCY` is not a number, using the default");
            DEFAULT_ATTENDANCE_FETCH_CONCURRENCY
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concurrency() {
        assert_eq!(parse_concurrency(None), DEFAULT_ATTENDANCE_FETCH_CONCURRENCY);
        assert_eq!(parse_concurrency(Some("8")), 8);
        assert_eq!(parse_concurrency(Some(" 2 ")), 2);
        assert_eq!(parse_concurrency(Some("0")), 1);
        assert_eq!(parse_concurrency(Some("many")), DEFAULT_ATTENDANCE_FETCH_CONCURRENCY);
    }

    #[test]
    #[should_panic(expected = "Environment `HR_PAYROLL_UNSET_VARIABLE` is required to be set")]
    fn test_required_variable_missing() {
        required("HR_PAYROLL_UNSET_VARIABLE");
    }
}
