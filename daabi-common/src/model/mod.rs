pub mod author;
pub mod issue;
pub mod post;
pub mod tally;
pub mod user;

use crate::{
    model::user::MissingEmailError,
    snowflake::{Epoch, Snowflake, SnowflakeGenerator},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Unexpected, Visitor},
};
use std::{
    fmt::{Display, Formatter},
    marker::PhantomData,
};
use thiserror::Error;
use time::{UtcDateTime, macros::utc_datetime};

/// Display timestamp given to everything created during the current session.
pub const JUST_NOW: &str = "Just now";

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Email(#[from] MissingEmailError),
    #[error("The {0} must not be blank")]
    BlankField(&'static str),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct DaabiEpoch;
impl Epoch for DaabiEpoch {
    const EPOCH_TIME: UtcDateTime = utc_datetime!(2025-01-01 00:00);
}

pub type DaabiSnowflake = Snowflake<DaabiEpoch>;
pub type DaabiSnowflakeGenerator = SnowflakeGenerator<DaabiEpoch>;

/// Typed record id. Serialized as a decimal string; strings and integers deserialize.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Id<Marker>(DaabiSnowflake, PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(snowflake: DaabiSnowflake) -> Self {
        Self(snowflake, PhantomData)
    }

    #[must_use]
    pub fn snowflake(self) -> DaabiSnowflake {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> Serialize for Id<Marker> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

struct IdVisitor<Marker>(PhantomData<Marker>);

impl<Marker> Visitor<'_> for IdVisitor<Marker> {
    type Value = Id<Marker>;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a decimal id")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(v.into())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse::<u64>()
            .map(Id::from)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

impl<'de, Marker> Deserialize<'de> for Id<Marker> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IdVisitor(PhantomData))
    }
}

impl<Marker> From<DaabiSnowflake> for Id<Marker> {
    fn from(value: DaabiSnowflake) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Id::new(DaabiSnowflake::new(value))
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.snowflake().get()
    }
}

/// Trims `text` and returns it, unless nothing is left.
#[must_use]
pub fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::Id;
    use serde_json::json;

    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
    struct TestMarker;

    #[test]
    fn ids_are_decimal_strings() {
        let id: Id<TestMarker> = 237_923_173_654_331_393.into();

        assert_eq!(
            serde_json::to_value(id).unwrap(),
            json!("237923173654331393")
        );
        assert_eq!(
            serde_json::from_value::<Id<TestMarker>>(json!("237923173654331393")).unwrap(),
            id
        );
        assert_eq!(
            serde_json::from_value::<Id<TestMarker>>(json!(7)).unwrap(),
            Id::from(7)
        );
        assert!(serde_json::from_value::<Id<TestMarker>>(json!("12a")).is_err());
        assert!(serde_json::from_value::<Id<TestMarker>>(json!(-1)).is_err());
    }
}
