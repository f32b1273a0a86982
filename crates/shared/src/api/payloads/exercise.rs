use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, NoneAsEmptyString};

use crate::{
    model::{Exercise, LogEntry, UserProfile},
    types::{CalendarDate, Uuid},
};

/// `duration` as it arrived. Form posts send it as text and JSON bodies may
/// send anything, so the value is only checked once the user is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationInput {
    Minutes(i64),
    Text(String),
    #[serde(skip_serializing)]
    Unsupported(IgnoredAny),
}

impl DurationInput {
    /// Whole minutes, `Ok(None)` when the value is blank
    pub fn minutes(&self) -> Result<Option<i64>, String> {
        let invalid = || "duration must be a whole number of minutes".to_owned();
        match self {
            Self::Minutes(minutes) => Ok(Some(*minutes)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text.trim().parse().map(Some).map_err(|_| invalid()),
            Self::Unsupported(_) => Err(invalid()),
        }
    }
}

/// Body of `POST /api/users/:id/exercises`. Every field is optional here,
/// `NewExercise::from_request` decides what is missing. An empty `date`
/// reads as no date
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogExerciseRequest {
    #[serde(default)]
    pub duration: Option<DurationInput>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    pub date: Option<String>,
}

impl LogExerciseRequest {
    pub fn new<T: Into<String>>(duration: i64, description: T, date: Option<&str>) -> Self {
        Self {
            duration: Some(DurationInput::Minutes(duration)),
            description: Some(description.into()),
            date: date.map(str::to_owned),
        }
    }
}

/// Query of `GET /api/users/:id/logs`. Kept as raw strings, a limit that
/// doesn't parse falls back to the default rather than failing the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// The user merged with the fields of the exercise that was just logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: Uuid,
    pub username: String,
    pub date: CalendarDate,
    pub duration: i64,
    pub description: String,
}

impl From<(UserProfile, Exercise)> for ExerciseResponse {
    fn from((user, exercise): (UserProfile, Exercise)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            date: exercise.date,
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLogResponse {
    pub id: Uuid,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl ExerciseLogResponse {
    pub fn new(user: UserProfile, log: Vec<LogEntry>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            count: log.len(),
            log,
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{DurationInput, ExerciseLogResponse, LogExerciseRequest};
    use crate::{
        model::{LogEntry, UserProfile},
        types::{CalendarDate, Uuid},
    };

    #[test]
    fn test_duration_keeps_what_was_sent() {
        let from_number: LogExerciseRequest =
            serde_json::from_value(json!({ "duration": 30, "description": "run" })).unwrap();
        let from_string: LogExerciseRequest =
            serde_json::from_value(json!({ "duration": "30", "description": "run" })).unwrap();

        assert_eq!(from_number.duration, Some(DurationInput::Minutes(30)));
        assert_eq!(from_string.duration, Some(DurationInput::Text("30".to_owned())));
        assert_eq!(from_number.date, None);
    }

    #[test]
    fn test_any_duration_value_is_read() {
        for duration in [json!("half an hour"), json!(2.5), json!(true), json!([1])] {
            let req: LogExerciseRequest =
                serde_json::from_value(json!({ "duration": duration, "description": "run" }))
                    .unwrap();
            assert!(req.duration.unwrap().minutes().is_err(), "{duration}");
        }
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(DurationInput::Minutes(5).minutes(), Ok(Some(5)));
        assert_eq!(DurationInput::Text(" 45 ".to_owned()).minutes(), Ok(Some(45)));
        assert_eq!(DurationInput::Text("".to_owned()).minutes(), Ok(None));
        assert!(DurationInput::Text("ten".to_owned()).minutes().is_err());
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let req: LogExerciseRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req, LogExerciseRequest::default());

        let req: LogExerciseRequest =
            serde_json::from_value(json!({ "date": "", "description": null })).unwrap();
        assert_eq!(req, LogExerciseRequest::default());
    }

    #[test]
    fn test_log_response_shape() {
        let id = Uuid::new_v4();
        let user = UserProfile {
            username: "fcc_test".to_owned(),
            id,
        };
        let entry = LogEntry {
            description: "run".to_owned(),
            duration: 30,
            date: CalendarDate::parse("2023-01-01").unwrap(),
        };

        let value = serde_json::to_value(ExerciseLogResponse::new(user, vec![entry])).unwrap();
        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "username": "fcc_test",
                "count": 1,
                "log": [{ "description": "run", "duration": 30, "date": "Sun Jan 01 2023" }],
            })
        );
    }
}
