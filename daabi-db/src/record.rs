use daabi_common::model::{
    ModelValidationError,
    user::{Email, User},
};
use sqlx::FromRow;
use time::PrimitiveDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct UserRecord {
    pub user_snowflake: i64,
    pub name: Option<String>,
    pub email: String,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl TryFrom<UserRecord> for User {
    type Error = ModelValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.user_snowflake.cast_unsigned().into(),
            name: value.name,
            email: Email::new(&value.email)?,
            created_at: value.created_at.assume_utc(),
            updated_at: value.updated_at.assume_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::UserRecord;
    use daabi_common::model::{ModelValidationError, user::User};
    use time::macros::datetime;

    fn record(email: &str) -> UserRecord {
        UserRecord {
            user_snowflake: 42,
            name: None,
            email: email.to_owned(),
            created_at: datetime!(2025-10-01 12:00),
            updated_at: datetime!(2025-10-02 12:00),
        }
    }

    #[test]
    fn converts_record() {
        let user = User::try_from(record("ada@example.com")).unwrap();

        assert_eq!(u64::from(user.id), 42);
        assert_eq!(user.email.get(), "ada@example.com");
        assert_eq!(user.created_at, datetime!(2025-10-01 12:00 UTC));
    }

    #[test]
    fn rejects_blank_email() {
        assert!(matches!(
            User::try_from(record("")),
            Err(ModelValidationError::Email(_))
        ));
    }
}
