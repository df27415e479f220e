use crate::model::{Id, non_blank};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: Option<String>,
    pub email: Email,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A user as submitted. Only the presence of an email is checked.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CreateUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Email,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Email is required")]
pub struct MissingEmailError;

impl Email {
    pub fn new(email: &str) -> Result<Self, MissingEmailError> {
        non_blank(email)
            .map(|email| Self(email.to_owned()))
            .ok_or(MissingEmailError)
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Email::new(&inner).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<CreateUser> for NewUser {
    type Error = MissingEmailError;

    fn try_from(value: CreateUser) -> Result<Self, Self::Error> {
        let email = Email::new(value.email.as_deref().unwrap_or_default())?;
        let name = value
            .name
            .as_deref()
            .and_then(non_blank)
            .map(str::to_owned);

        Ok(Self { name, email })
    }
}
