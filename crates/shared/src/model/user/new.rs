use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use exemplar::Model;

use crate::types::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
}

impl NewUser {
    /// Generates the id the user will be stored under
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}
