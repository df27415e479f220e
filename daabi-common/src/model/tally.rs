//! Counters with a single active choice per viewer.
//!
//! Reactions, demand votes, issue votes and event responses all follow the same rule:
//! picking the active choice again withdraws it, picking another one moves the viewer's
//! count from the old choice to the new one.

use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub trait Tally {
    type Choice: Copy + Eq;

    fn count(&self, choice: Self::Choice) -> u32;

    fn count_mut(&mut self, choice: Self::Choice) -> &mut u32;
}

/// Applies `requested` against the viewer's `active` choice.
///
/// Counters saturate at zero, so a record whose active flag disagrees with its counts never
/// underflows.
pub fn toggle<T: Tally>(tally: &mut T, active: &mut Option<T::Choice>, requested: T::Choice) {
    if let Some(previous) = *active {
        let count = tally.count_mut(previous);
        *count = count.saturating_sub(1);
    }

    if *active == Some(requested) {
        *active = None;
    } else {
        let count = tally.count_mut(requested);
        *count = count.saturating_add(1);
        *active = Some(requested);
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Unknown {kind}: {label:?}")]
pub struct UnknownChoiceError {
    kind: &'static str,
    label: String,
}

macro_rules! tally {
    (
        $(#[$tally_meta:meta])*
        $tally:ident counts $(#[$choice_meta:meta])* $choice:ident {
            $($field:ident => $variant:ident = $label:literal),+ $(,)?
        }
    ) => {
        $(#[$choice_meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
        pub enum $choice {
            $(#[serde(rename = $label)] $variant),+
        }

        $(#[$tally_meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $tally {
            $(pub $field: u32),+
        }

        impl $choice {
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl Display for $choice {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $choice {
            type Err = UnknownChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(UnknownChoiceError {
                        kind: stringify!($choice),
                        label: s.to_owned(),
                    }),
                }
            }
        }

        impl Tally for $tally {
            type Choice = $choice;

            fn count(&self, choice: $choice) -> u32 {
                match choice {
                    $($choice::$variant => self.$field),+
                }
            }

            fn count_mut(&mut self, choice: $choice) -> &mut u32 {
                match choice {
                    $($choice::$variant => &mut self.$field),+
                }
            }
        }
    };
}

tally! {
    /// Reaction counters shown under every post.
    Reactions counts Reaction {
        like => Like = "like",
        love => Love = "love",
        support => Support = "support",
        angry => Angry = "angry",
    }
}

tally! {
    DemandVotes counts DemandVote {
        agree => Agree = "agree",
        disagree => Disagree = "disagree",
    }
}

tally! {
    /// Up/down votes on issues and on their contributions.
    Votes counts Vote {
        upvote => Upvote = "upvote",
        downvote => Downvote = "downvote",
    }
}

tally! {
    /// Attendance counters of an event post.
    ResponseCount counts
    /// An event response. The wire label of [`EventResponse::NotGoing`] is `not-going`,
    /// while its counter is serialized as `notGoing`.
    EventResponse {
        going => Going = "going",
        interested => Interested = "interested",
        not_going => NotGoing = "not-going",
    }
}

impl Votes {
    /// Net score used to rank issues.
    #[must_use]
    pub fn score(&self) -> i64 {
        i64::from(self.upvote) - i64::from(self.downvote)
    }
}
