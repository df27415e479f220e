use crate::record::UserRecord;
use daabi_common::model::{
    DaabiSnowflakeGenerator, ModelValidationError,
    user::{NewUser, User},
};
use daabi_common::snowflake::{ProcessId, WorkerId};
use sqlx::{PgPool, migrate::MigrateError, query_as};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
}

/// The users table.
#[derive(Debug)]
pub struct DbClient {
    pool: PgPool,
    snowflake_generator: Mutex<DaabiSnowflakeGenerator>,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool, worker_id: WorkerId, process_id: ProcessId) -> Self {
        let snowflake_generator = Mutex::new(DaabiSnowflakeGenerator::new(worker_id, process_id));

        Self {
            pool,
            snowflake_generator,
        }
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let records = query_as::<_, UserRecord>(
            "
            SELECT
                users.user_snowflake,
                users.name,
                users.email,
                users.created_at,
                users.updated_at
            FROM
                users.users
            ORDER BY
                users.created_at, users.user_snowflake
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        let users = records
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user_snowflake = self
            .snowflake_generator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generate();

        let record = query_as::<_, UserRecord>(
            "
            INSERT INTO users.users (user_snowflake, name, email)
            VALUES ($1, $2, $3)
            RETURNING
                users.user_snowflake,
                users.name,
                users.email,
                users.created_at,
                users.updated_at
            ",
        )
        .bind(user_snowflake.get().cast_signed())
        .bind(user.name.as_deref())
        .bind(user.email.get())
        .fetch_one(&self.pool)
        .await?;

        let user = User::try_from(record)?;
        debug!(user = %user.id, "Created user");
        Ok(user)
    }
}
