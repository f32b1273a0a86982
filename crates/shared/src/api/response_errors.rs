use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{Nothing, ResponseError, ServerError};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error("{}::{}: {:?}", stringify!($name), stringify!($variant), self)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl ResponseError for $name {
            fn code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }

            fn kind(&self) -> &'static str {
                match self {
                    $( $name::$variant { .. } => stringify!($variant), )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = inner.code();
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(UserLookupError {
    #[code(StatusCode::NOT_FOUND)]
    UserNotFound { id: String },
});

// Aliases used to allow future expansion of the errors without having to go
// back and update all routes that use them
pub type CreateUserError = Nothing;
pub type ListUsersError = Nothing;
pub type LogExerciseError = UserLookupError;
pub type ExerciseLogError = UserLookupError;
