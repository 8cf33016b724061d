//! The organisation-wide working configuration.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Weekday};
use sea_orm::{ColumnTrait as _, ConnectionTrait, DbErr, EntityTrait as _, QueryFilter as _};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::{
    consts::{
        DEFAULT_BREAK_END, DEFAULT_BREAK_START, DEFAULT_END_TIME, DEFAULT_START_TIME, DEFAULT_TIMEZONE,
        DEFAULT_WORKING_WEEKDAYS, WORKING_CONFIGURATION_NAME,
    },
    entity::{prelude::*, working_configuration},
    utils::weekday_name,
};

use super::{PayError, Resolution};

const WEEKDAYS: [Weekday; 7] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun];

/// Weekday name (lowercase) to "is a working day". Absent names are not working days.
///
/// Names are matched case-insensitively on input; anything other than the seven English
/// weekday names, or a day listed twice, is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkingDays(BTreeMap<String, bool>);

impl WorkingDays {
    pub fn is_working(&self, weekday: Weekday) -> bool {
        self.0.get(weekday_name(weekday)).copied().unwrap_or(false)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self, PayError> {
        serde_json::from_value(value.clone())
            .map_err(|err| PayError::MalformedWorkingDays(err.to_string()))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0.iter()
                .map(|(day, working)| (day.clone(), serde_json::Value::Bool(*working)))
                .collect()
        )
    }
}

impl TryFrom<BTreeMap<String, bool>> for WorkingDays {
    type Error = String;

    fn try_from(days: BTreeMap<String, bool>) -> Result<Self, Self::Error> {
        let mut normalized = BTreeMap::new();

        for (day, working) in days {
            let name = day.to_lowercase();

            if !WEEKDAYS.iter().any(|weekday| weekday_name(*weekday) == name) {
                return Err(format!("`{day}` is not a weekday"));
            }
            if normalized.insert(name, working).is_some() {
                return Err(format!("`{day}` is listed more than once"));
            }
        }

        Ok(Self(normalized))
    }
}

impl<'de> Deserialize<'de> for WorkingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = BTreeMap::<String, bool>::deserialize(deserializer)?;

        Self::try_from(days).map_err(serde::de::Error::custom)
    }
}

impl<const N: usize> From<[(&str, bool); N]> for WorkingDays {
    fn from(days: [(&str, bool); N]) -> Self {
        Self(days.into_iter().map(|(day, working)| (day.to_lowercase(), working)).collect())
    }
}

impl Default for WorkingDays {
    fn default() -> Self {
        Self(
            WEEKDAYS.iter()
                .map(|weekday| weekday_name(*weekday))
                .map(|name| (name.to_owned(), DEFAULT_WORKING_WEEKDAYS.contains(&name)))
                .collect()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_start: NaiveTime,
    pub break_end: NaiveTime,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_time: DEFAULT_START_TIME,
            end_time: DEFAULT_END_TIME,
            break_start: DEFAULT_BREAK_START,
            break_end: DEFAULT_BREAK_END,
        }
    }
}

impl WorkingHours {
    /// Checks the hours an HR user is about to persist.
    ///
    /// Already persisted rows are not re-validated here, the hours resolver copes with them.
    pub fn validate(&self) -> Result<(), String> {
        if self.end_time <= self.start_time {
            return Err("end_time must be after start_time".to_owned());
        }

        if self.break_end < self.break_start {
            return Err("break_end must not be before break_start".to_owned());
        }

        if self.break_start < self.start_time || self.break_end > self.end_time {
            return Err("break must lie within working hours".to_owned());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSchedule {
    pub working_days: WorkingDays,
    pub working_hours: WorkingHours,
    pub timezone: String,
}

impl Default for WorkingSchedule {
    fn default() -> Self {
        Self {
            working_days: WorkingDays::default(),
            working_hours: WorkingHours::default(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
        }
    }
}

impl TryFrom<working_configuration::Model> for WorkingSchedule {
    type Error = PayError;

    fn try_from(model: working_configuration::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            working_days: WorkingDays::from_json(&model.working_days)?,
            working_hours: WorkingHours {
                start_time: model.start_time,
                end_time: model.end_time,
                break_start: model.break_start,
                break_end: model.break_end,
            },
            timezone: model.timezone,
        })
    }
}

pub async fn find_configuration(db: &impl ConnectionTrait) -> Result<Option<working_configuration::Model>, DbErr> {
    WorkingConfiguration::find()
        .filter(working_configuration::Column::Name.eq(WORKING_CONFIGURATION_NAME))
        .one(db).await
}

/// Loads the singleton configuration, substituting the hardcoded default when it is
/// missing or unreadable.
pub async fn resolve_configuration(db: &impl ConnectionTrait) -> Result<Resolution<WorkingSchedule>, DbErr> {
    let Some(model) = find_configuration(db).await? else {
        info!("no working configuration persisted, using the default schedule");
        return Ok(Resolution::HardcodedDefault(WorkingSchedule::default()));
    };

    match WorkingSchedule::try_from(model) {
        Ok(schedule) => Ok(Resolution::Persisted(schedule)),
        Err(err) => {
            warn!(%err, "persisted working configuration is unreadable, using the default schedule");
            Ok(Resolution::HardcodedDefault(WorkingSchedule::default()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Local;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    pub(crate) fn configuration_model(working_days: serde_json::Value) -> working_configuration::Model {
        working_configuration::Model {
            id: Uuid::new_v4(),
            created_at: Local::now().into(),
            updated_at: Local::now().into(),
            created_by: None,
            updated_by: None,
            name: WORKING_CONFIGURATION_NAME.to_owned(),
            working_days,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            break_start: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            break_end: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            timezone: "Asia/Kolkata".to_owned(),
        }
    }

    #[test]
    fn test_default_schedule() {
        let schedule = WorkingSchedule::default();

        assert!(schedule.working_days.is_working(Weekday::Mon));
        assert!(schedule.working_days.is_working(Weekday::Sat));
        assert!(!schedule.working_days.is_working(Weekday::Sun));
        assert_eq!(schedule.working_hours.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(schedule.working_hours.end_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_working_days_from_json() {
        let days = WorkingDays::from_json(&json!({ "Monday": true, "tuesday": false })).unwrap();

        assert!(days.is_working(Weekday::Mon));
        assert!(!days.is_working(Weekday::Tue));
        assert!(!days.is_working(Weekday::Wed));

        assert!(WorkingDays::from_json(&json!(["monday"])).is_err());
        assert!(WorkingDays::from_json(&json!({ "monday": "yes" })).is_err());
        assert!(WorkingDays::from_json(&json!({ "funday": true })).is_err());
        assert!(WorkingDays::from_json(&json!({ "Monday": false, "monday": true })).is_err());
    }

    #[test]
    fn test_validate_working_hours() {
        assert!(WorkingHours::default().validate().is_ok());

        let inverted_break = WorkingHours {
            break_start: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            break_end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(inverted_break.validate().is_err());

        let inverted_day = WorkingHours {
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(inverted_day.validate().is_err());

        let break_outside = WorkingHours {
            break_start: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
            break_end: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            ..Default::default()
        };
        assert!(break_outside.validate().is_err());
    }

    #[actix_web::test]
    async fn test_resolve_configuration() {
        let persisted = configuration_model(json!({ "monday": true, "friday": true }));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![ persisted.clone() ],
                vec![ ],
                vec![ configuration_model(json!("monday")) ],
            ])
            .into_connection();

        let resolution = resolve_configuration(&db).await.unwrap();
        assert!(matches!(resolution, Resolution::Persisted(_)));
        assert_eq!(resolution.value().timezone, "Asia/Kolkata");
        assert!(resolution.value().working_days.is_working(Weekday::Fri));
        assert!(!resolution.value().working_days.is_working(Weekday::Sat));

        let resolution = resolve_configuration(&db).await.unwrap();
        assert_eq!(resolution, Resolution::HardcodedDefault(WorkingSchedule::default()));

        let resolution = resolve_configuration(&db).await.unwrap();
        assert_eq!(resolution, Resolution::HardcodedDefault(WorkingSchedule::default()));
    }
}
