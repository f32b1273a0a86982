use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    crate::{api::error::ServerError, model::NewUser},
    exemplar::Model,
    rusqlite::Connection,
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

/// A user record as stored, including the revision metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", check("../../../../server/migrations/001-user/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub username: String,
    pub id: Uuid,
    pub version: i64,
}

#[cfg(feature = "backend")]
impl User {
    pub fn fetch_by_id<T>(conn: &Connection, id: &Uuid) -> Result<User, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns([UserIden::Username, UserIden::Id, UserIden::Version])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row)?;
        Ok(user)
    }

    /// Every user in the order the store returns them
    pub fn fetch_all<T>(conn: &Connection) -> Result<Vec<User>, ServerError<T>> {
        let (sql, values) = Query::select()
            .columns([UserIden::Username, UserIden::Id, UserIden::Version])
            .from(UserIden::Table)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Usernames are not unique, creating the same name twice gives two users
    pub fn create<T>(conn: &mut Connection, new_user: NewUser) -> Result<User, ServerError<T>> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx)?;
            User::fetch_by_id(&tx, &new_user.id)?
        };
        tx.commit()?;

        Ok(user)
    }
}
