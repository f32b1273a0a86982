use serde::{Deserialize, Serialize};

use crate::{model::User, types::Uuid};

#[cfg(feature = "backend")]
use {
    crate::{api::error::ServerError, model::UserIden},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// The public projection of a user, without the revision metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct UserProfile {
    pub username: String,
    pub id: Uuid,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}

#[cfg(feature = "backend")]
impl UserProfile {
    pub fn fetch_by_id<T>(conn: &Connection, id: &Uuid) -> Result<Option<UserProfile>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns([UserIden::Username, UserIden::Id])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt
            .query_row(&*values.as_params(), UserProfile::from_row)
            .optional()?;
        Ok(user)
    }
}
