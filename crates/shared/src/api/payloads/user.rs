use serde::{Deserialize, Serialize};

use crate::model::UserProfile;

/// Body of `POST /api/users`. A missing username is left for the store to
/// reject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
}

pub type CreateUserResponse = UserProfile;
