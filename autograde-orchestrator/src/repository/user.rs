//! User directory backed by Postgres

use async_trait::async_trait;
use sqlx::PgPool;

use autograde_core::domain::user::UserProfile;
use autograde_core::error::Result;

use crate::repository::{UserDirectory, store_error};

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn get(&self, username: &str) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, csid, snum, first_name, last_name, profile_url
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|r| r.into()))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    csid: String,
    snum: String,
    first_name: String,
    last_name: String,
    profile_url: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        UserProfile {
            username: row.username,
            csid: row.csid,
            snum: row.snum,
            first_name: row.first_name,
            last_name: row.last_name,
            profile_url: row.profile_url,
        }
    }
}
