use chrono::NaiveTime;

/// Name of the singleton `working_configuration` row. Legacy calendar rows carrying
/// this name as `holiday_name` are markers, not days.
pub const WORKING_CONFIGURATION_NAME: &str = "Working Configuration";

/// Used when no working configuration can be consulted at all
pub const DEFAULT_WORKING_DAYS_PER_MONTH: u32 = 25;

/// Used when no working configuration can be consulted at all
pub const DEFAULT_WORKING_HOURS_PER_DAY: u32 = 8;

/// Monday to Saturday
pub const DEFAULT_WORKING_WEEKDAYS: [&str; 6] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];

pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const DEFAULT_START_TIME: NaiveTime = hm(9, 0);
pub const DEFAULT_END_TIME: NaiveTime = hm(18, 0);
pub const DEFAULT_BREAK_START: NaiveTime = hm(12, 0);
pub const DEFAULT_BREAK_END: NaiveTime = hm(13, 0);

pub const DEFAULT_ATTENDANCE_FETCH_CONCURRENCY: usize = 4;

const fn hm(hour: u32, min: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, min, 0) {
        Some(time) => time,
        None => panic!("invalid constant time"),
    }
}
