use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::CalendarDateError;

#[cfg(feature = "backend")]
pub use backend::*;

/// Implemented by the route specific error enums declared with
/// `response_error!`
pub trait ResponseError {
    fn code(&self) -> StatusCode;
    fn kind(&self) -> &'static str;
}

/// Route error for routes that have no failure modes of their own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

impl ResponseError for Nothing {
    fn code(&self) -> StatusCode {
        match *self {}
    }

    fn kind(&self) -> &'static str {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{}", .error_messages.join("; "))]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error_messages: vec![message.into()],
        }
    }
}

/// Error returned by every handler. `T` carries the route's own failure
/// modes, the other variants are shared by all routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerError<T> {
    Inner {
        #[serde(with = "http_serde::status_code")]
        code: StatusCode,
        inner: T,
    },
    Validation { inner: ValidationError },
    Store { message: String },
    Other { message: String },
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { inner, .. } => write!(f, "{inner}"),
            Self::Validation { inner } => write!(f, "validation failed: {inner}"),
            Self::Store { message } => write!(f, "store error: {message}"),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

impl<T: ResponseError> ServerError<T> {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Store { .. } | Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine readable name placed in the error body
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inner { inner, .. } => inner.kind(),
            Self::Validation { .. } => "ValidationError",
            Self::Store { .. } => "StoreError",
            Self::Other { .. } => "ServerError",
        }
    }
}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

impl<T> From<CalendarDateError> for ServerError<T> {
    fn from(err: CalendarDateError) -> Self {
        Self::Validation {
            inner: ValidationError::new(err.to_string()),
        }
    }
}

/// Builds a `ServerError::Other` from format args
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other {
            message: format!($($arg)*),
        }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{HookError, InteractError, PoolError};
    use rusqlite::ErrorCode;
    use serde::Serialize;
    use tracing::{debug, error};

    use super::{ResponseError, ServerError, ValidationError};

    #[derive(Debug, Serialize)]
    pub struct ErrorBody {
        pub error: String,
        pub message: String,
    }

    // Constraint violations are the store rejecting a missing or empty
    // required field, or a reference to a user that doesn't exist
    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            match &err {
                rusqlite::Error::SqliteFailure(e, message)
                    if e.code == ErrorCode::ConstraintViolation =>
                {
                    Self::Validation {
                        inner: ValidationError::new(
                            message.clone().unwrap_or_else(|| e.to_string()),
                        ),
                    }
                },
                _ => Self::Store {
                    message: err.to_string(),
                },
            }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Other {
                message: format!("database interaction failed: {err}"),
            }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Other {
                message: format!("failed to get a database connection: {err}"),
            }
        }
    }

    impl<T: fmt::Display> From<ServerError<T>> for HookError {
        fn from(err: ServerError<T>) -> Self {
            Self::Message(err.to_string().into())
        }
    }

    impl<T> IntoResponse for ServerError<T>
    where
        T: ResponseError + fmt::Display + fmt::Debug,
    {
        fn into_response(self) -> Response {
            let code = self.status_code();
            if code.is_server_error() {
                error!(%code, error = ?self, "request failed");
            } else {
                debug!(%code, error = %self, "request rejected");
            }

            let body = ErrorBody {
                error: self.kind().to_owned(),
                message: self.to_string(),
            };
            (code, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod test {
    use http::StatusCode;

    use super::{Nothing, ServerError, ValidationError};
    use crate::{api::response_errors::UserLookupError, types::CalendarDate};

    #[test]
    fn test_route_error_keeps_its_code() {
        let err: ServerError<UserLookupError> = UserLookupError::UserNotFound {
            id: "abc".to_owned(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "UserNotFound");
    }

    #[test]
    fn test_shared_variants_map_to_status() {
        let validation: ServerError<Nothing> = ValidationError::new("username is required").into();
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "validation failed: username is required");

        let store: ServerError<Nothing> = ServerError::Store {
            message: "disk I/O error".to_owned(),
        };
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.kind(), "StoreError");
    }

    #[test]
    fn test_bad_date_is_a_validation_error() {
        let err: ServerError<Nothing> = CalendarDate::parse("soon").unwrap_err().into();
        assert!(matches!(err, ServerError::Validation { .. }));
    }
}
