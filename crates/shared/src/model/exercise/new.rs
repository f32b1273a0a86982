use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use exemplar::Model;

use crate::{
    api::{
        error::ValidationError,
        payloads::{DurationInput, LogExerciseRequest},
    },
    types::{CalendarDate, Uuid},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: CalendarDate,
    pub duration: i64,
    pub description: String,
}

impl NewExercise {
    pub fn new<T: Into<String>>(
        user_id: Uuid,
        date: CalendarDate,
        duration: i64,
        description: T,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            duration,
            description: description.into(),
        }
    }

    /// Resolves a request body into a row for `user_id`. A missing or empty
    /// date becomes `today`. Every problem with the body is reported at once
    pub fn from_request(
        user_id: Uuid,
        req: LogExerciseRequest,
        today: CalendarDate,
    ) -> Result<Self, ValidationError> {
        let mut error_messages = Vec::new();

        let duration = match req.duration.as_ref().map(DurationInput::minutes) {
            Some(Ok(Some(duration))) => Some(duration),
            None | Some(Ok(None)) => {
                error_messages.push("duration is required".to_owned());
                None
            },
            Some(Err(message)) => {
                error_messages.push(message);
                None
            },
        };
        if req.description.is_none() {
            error_messages.push("description is required".to_owned());
        }
        let date = match req.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => Some(today),
            Some(date) => match CalendarDate::parse(date) {
                Ok(date) => Some(date),
                Err(e) => {
                    error_messages.push(e.to_string());
                    None
                },
            },
        };

        match (duration, req.description, date) {
            (Some(duration), Some(description), Some(date)) if error_messages.is_empty() => {
                Ok(Self::new(user_id, date, duration, description))
            },
            _ => Err(ValidationError { error_messages }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::NewExercise;
    use crate::{
        api::payloads::{DurationInput, LogExerciseRequest},
        types::{CalendarDate, Uuid},
    };

    fn today() -> CalendarDate {
        CalendarDate::parse("2024-06-15").unwrap()
    }

    #[test]
    fn test_from_request_keeps_fields() {
        let user_id = Uuid::new_v4();
        let req = LogExerciseRequest::new(30, "run", Some("2023-01-01"));
        let new = NewExercise::from_request(user_id, req, today()).unwrap();

        assert_eq!(new.user_id, user_id);
        assert_eq!(new.duration, 30);
        assert_eq!(new.description, "run");
        assert_eq!(new.date, CalendarDate::parse("2023-01-01").unwrap());
    }

    #[test]
    fn test_missing_or_empty_date_is_today() {
        let missing = LogExerciseRequest::new(10, "walk", None);
        let empty = LogExerciseRequest::new(10, "walk", Some(""));

        let user_id = Uuid::new_v4();
        assert_eq!(NewExercise::from_request(user_id, missing, today()).unwrap().date, today());
        assert_eq!(NewExercise::from_request(user_id, empty, today()).unwrap().date, today());
    }

    #[test]
    fn test_reports_every_problem() {
        let req = LogExerciseRequest {
            duration: None,
            description: None,
            date: Some("someday".to_owned()),
        };
        let err = NewExercise::from_request(Uuid::new_v4(), req, today()).unwrap_err();
        assert_eq!(err.error_messages.len(), 3);
        assert_eq!(err.error_messages[0], "duration is required");
    }

    #[test]
    fn test_duration_text_is_parsed() {
        let mut req = LogExerciseRequest::new(0, "run", None);

        req.duration = Some(DurationInput::Text("25".to_owned()));
        let new = NewExercise::from_request(Uuid::new_v4(), req.clone(), today()).unwrap();
        assert_eq!(new.duration, 25);

        req.duration = Some(DurationInput::Text("ten".to_owned()));
        let err = NewExercise::from_request(Uuid::new_v4(), req.clone(), today()).unwrap_err();
        assert_eq!(
            err.error_messages,
            ["duration must be a whole number of minutes"]
        );

        req.duration = Some(DurationInput::Text(" ".to_owned()));
        let err = NewExercise::from_request(Uuid::new_v4(), req, today()).unwrap_err();
        assert_eq!(err.error_messages, ["duration is required"]);
    }
}
