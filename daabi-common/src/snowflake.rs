//! Module for generating unique 64-bit ids.
//!
//! Layout, most significant bit first: 42 bits of milliseconds since the epoch,
//! 5 bits worker id, 5 bits process id, 12 bits per-millisecond increment.
//!
//! See <https://discord.com/developers/docs/reference#snowflakes>

use derive_where::derive_where;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::{
    fmt::{Debug, Display, Formatter},
    marker::PhantomData,
};
use thiserror::Error;
use time::{Duration, UtcDateTime};

pub const TIMESTAMP_OFFSET: u64 = 22;
pub const TIMESTAMP_LENGTH: u64 = 42;
pub const WORKER_ID_OFFSET: u64 = 17;
pub const WORKER_ID_LENGTH: u64 = 5;
pub const PROCESS_ID_OFFSET: u64 = 12;
pub const PROCESS_ID_LENGTH: u64 = 5;
pub const INCREMENT_LENGTH: u64 = 12;

const TIMESTAMP_MAX: u64 = (1 << TIMESTAMP_LENGTH) - 1;
const INCREMENT_MAX: u16 = (1 << INCREMENT_LENGTH) - 1;

pub trait Epoch {
    const EPOCH_TIME: UtcDateTime;
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum SnowflakeTimestampError {
    #[error("Specified time was before the snowflake epoch.")]
    TimeBeforeEpoch,
    #[error("Resulting timestamp uses too many bits.")]
    TimestampTooLarge,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Snowflake part was out of range: {0}")]
pub struct SnowflakePartOutOfRangeError(u8);

macro_rules! machine_id {
    ($name:ident, $length:ident) => {
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u8);

        impl $name {
            #[must_use]
            pub fn new(id: u8) -> Option<Self> {
                (u64::from(id) < 1 << $length).then_some(Self(id))
            }

            #[must_use]
            pub fn get(self) -> u8 {
                self.0
            }
        }

        impl TryFrom<u8> for $name {
            type Error = SnowflakePartOutOfRangeError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::new(value).ok_or(SnowflakePartOutOfRangeError(value))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let inner = u8::deserialize(deserializer)?;
                Self::new(inner).ok_or_else(|| {
                    Error::invalid_value(Unexpected::Unsigned(inner.into()), &stringify!($name))
                })
            }
        }
    };
}

machine_id!(WorkerId, WORKER_ID_LENGTH);
machine_id!(ProcessId, PROCESS_ID_LENGTH);

#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Snowflake<SnowflakeEpoch>(u64, #[serde(skip)] PhantomData<SnowflakeEpoch>);

impl<SnowflakeEpoch> Snowflake<SnowflakeEpoch> {
    #[must_use]
    pub fn new(inner: u64) -> Self {
        Self(inner, PhantomData)
    }

    /// Timestamp bits beyond 42 and increment bits beyond 12 are discarded.
    #[must_use]
    pub fn from_parts(
        millis: u64,
        worker_id: WorkerId,
        process_id: ProcessId,
        increment: u16,
    ) -> Self {
        let snowflake = (millis & TIMESTAMP_MAX) << TIMESTAMP_OFFSET
            | u64::from(worker_id.get()) << WORKER_ID_OFFSET
            | u64::from(process_id.get()) << PROCESS_ID_OFFSET
            | u64::from(increment & INCREMENT_MAX);

        Self::new(snowflake)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Milliseconds since the epoch.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0 >> TIMESTAMP_OFFSET
    }

    #[must_use]
    pub fn worker_id(self) -> WorkerId {
        #[allow(clippy::cast_possible_truncation)]
        let id = (self.0 >> WORKER_ID_OFFSET) as u8;
        WorkerId(id & 0b1_1111)
    }

    #[must_use]
    pub fn process_id(self) -> ProcessId {
        #[allow(clippy::cast_possible_truncation)]
        let id = (self.0 >> PROCESS_ID_OFFSET) as u8;
        ProcessId(id & 0b1_1111)
    }

    #[must_use]
    pub fn increment(self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        let increment = self.0 as u16;
        increment & INCREMENT_MAX
    }

    #[must_use]
    pub fn created_at(self) -> UtcDateTime
    where
        SnowflakeEpoch: Epoch,
    {
        SnowflakeEpoch::EPOCH_TIME + Duration::milliseconds(self.millis().cast_signed())
    }
}

impl<SnowflakeEpoch> Display for Snowflake<SnowflakeEpoch> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<SnowflakeEpoch> From<u64> for Snowflake<SnowflakeEpoch> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<SnowflakeEpoch> From<Snowflake<SnowflakeEpoch>> for u64 {
    fn from(value: Snowflake<SnowflakeEpoch>) -> Self {
        value.get()
    }
}

pub fn millis_since_epoch<SnowflakeEpoch: Epoch>(
    time: UtcDateTime,
) -> Result<u64, SnowflakeTimestampError> {
    let millis = (time - SnowflakeEpoch::EPOCH_TIME).whole_milliseconds();
    if millis < 0 {
        return Err(SnowflakeTimestampError::TimeBeforeEpoch);
    }
    u64::try_from(millis)
        .ok()
        .filter(|millis| *millis <= TIMESTAMP_MAX)
        .ok_or(SnowflakeTimestampError::TimestampTooLarge)
}

/// Hands out strictly increasing snowflakes, even when called many times within one
/// millisecond or when the clock steps backwards.
#[derive_where(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct SnowflakeGenerator<SnowflakeEpoch> {
    worker_id: WorkerId,
    process_id: ProcessId,
    last: Option<(u64, u16)>,
    phantom_data: PhantomData<SnowflakeEpoch>,
}

impl<SnowflakeEpoch> SnowflakeGenerator<SnowflakeEpoch> {
    #[must_use]
    pub fn new(worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self {
            worker_id,
            process_id,
            last: None,
            phantom_data: PhantomData,
        }
    }

    #[must_use]
    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    #[must_use]
    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    pub fn generate_at(&mut self, time: UtcDateTime) -> Snowflake<SnowflakeEpoch>
    where
        SnowflakeEpoch: Epoch,
    {
        let now = match millis_since_epoch::<SnowflakeEpoch>(time) {
            Ok(millis) => millis,
            Err(SnowflakeTimestampError::TimeBeforeEpoch) => 0,
            Err(SnowflakeTimestampError::TimestampTooLarge) => TIMESTAMP_MAX,
        };

        let (millis, increment) = match self.last {
            Some((last_millis, last_increment)) if now <= last_millis => {
                if last_increment == INCREMENT_MAX {
                    (last_millis + 1, 0)
                } else {
                    (last_millis, last_increment + 1)
                }
            }
            _ => (now, 0),
        };
        self.last = Some((millis, increment));

        Snowflake::from_parts(millis, self.worker_id, self.process_id, increment)
    }

    pub fn generate(&mut self) -> Snowflake<SnowflakeEpoch>
    where
        SnowflakeEpoch: Epoch,
    {
        self.generate_at(UtcDateTime::now())
    }
}
