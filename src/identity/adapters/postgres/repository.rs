//! `PostgreSQL` user directory implementation.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::identity::{
    domain::{EmailAddress, Role, User, UserId, UserName},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by identity adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: UserPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn store(&self, user: &User) -> UserDirectoryResult<()> {
        let email = user.email().clone();
        let new_row = NewUserRow {
            id: user.id().into_inner(),
            name: user.name().as_str().to_owned(),
            email: email.as_str().to_owned(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserDirectoryError::DuplicateEmail(email.clone())
                    }
                    _ => UserDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn count(&self) -> UserDirectoryResult<u64> {
        self.run_blocking(|connection| {
            let total = users::table
                .count()
                .get_result::<i64>(connection)
                .map_err(UserDirectoryError::persistence)?;
            u64::try_from(total).map_err(UserDirectoryError::persistence)
        })
        .await
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow {
        id,
        name: persisted_name,
        email: persisted_email,
        role: persisted_role,
        created_at,
    } = row;

    let name = UserName::new(persisted_name).map_err(UserDirectoryError::persistence)?;
    let email = EmailAddress::new(persisted_email).map_err(UserDirectoryError::persistence)?;
    let role = Role::try_from(persisted_role.as_str()).map_err(UserDirectoryError::persistence)?;
    Ok(User::from_persisted(
        UserId::from_uuid(id),
        name,
        email,
        role,
        created_at,
    ))
}
