use crate::model::{
    Id, JUST_NOW,
    author::{Author, CommentAuthor},
    issue::{IssuePriority, IssueStatus},
    non_blank,
    tally::{DemandVote, DemandVotes, EventResponse, Reaction, Reactions, ResponseCount, toggle},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

time::serde::format_description!(event_date, Date, "[year]-[month]-[day]");

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: Author,
    pub timestamp: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub reactions: Reactions,
    pub comments: Vec<Comment>,
    pub user_reaction: Option<Reaction>,
    #[serde(flatten)]
    pub kind: PostKind,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PostKind {
    General,
    Demand(Demand),
    Issue(IssueReport),
    Event(Event),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandCategory {
    Department,
    Club,
    Hall,
    Environment,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    pub demand_title: String,
    pub category: DemandCategory,
    pub target_authority: String,
    pub votes: DemandVotes,
    pub user_vote: Option<DemandVote>,
}

/// An issue announced in the feed. The issue board keeps its own, richer records.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub issue_title: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub location: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_title: String,
    #[serde(with = "event_date")]
    pub event_date: Date,
    pub location: String,
    pub response_count: ResponseCount,
    pub user_response: Option<EventResponse>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub author: CommentAuthor,
    pub content: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CreatePost {
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CreateComment {
    pub content: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKindName {
    General,
    Demand,
    Issue,
    Event,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
#[error("Expected a {expected:?} post, but the post is a {actual:?} post")]
pub struct WrongPostKindError {
    pub expected: PostKindName,
    pub actual: PostKindName,
}

impl PostKind {
    #[must_use]
    pub fn name(&self) -> PostKindName {
        match self {
            PostKind::General => PostKindName::General,
            PostKind::Demand(_) => PostKindName::Demand,
            PostKind::Issue(_) => PostKindName::Issue,
            PostKind::Event(_) => PostKindName::Event,
        }
    }
}

impl Post {
    pub fn react(&mut self, reaction: Reaction) {
        toggle(&mut self.reactions, &mut self.user_reaction, reaction);
    }

    pub fn vote(&mut self, vote: DemandVote) -> Result<(), WrongPostKindError> {
        let actual = self.kind.name();
        match &mut self.kind {
            PostKind::Demand(demand) => {
                toggle(&mut demand.votes, &mut demand.user_vote, vote);
                Ok(())
            }
            PostKind::General | PostKind::Issue(_) | PostKind::Event(_) => Err(WrongPostKindError {
                expected: PostKindName::Demand,
                actual,
            }),
        }
    }

    pub fn respond(&mut self, response: EventResponse) -> Result<(), WrongPostKindError> {
        let actual = self.kind.name();
        match &mut self.kind {
            PostKind::Event(event) => {
                toggle(&mut event.response_count, &mut event.user_response, response);
                Ok(())
            }
            PostKind::General | PostKind::Demand(_) | PostKind::Issue(_) => Err(WrongPostKindError {
                expected: PostKindName::Event,
                actual,
            }),
        }
    }

    /// Appends a comment by `author`, unless `content` is blank.
    /// Appends a comment unless `content` is blank. `id` is only called for an appended comment.
    pub fn add_comment(
        &mut self,
        id: impl FnOnce() -> Id<CommentMarker>,
        author: CommentAuthor,
        content: &str,
    ) -> Option<&Comment> {
        let content = non_blank(content)?;

        self.comments.push(Comment {
            id: id(),
            author,
            content: content.to_owned(),
            timestamp: JUST_NOW.to_owned(),
            replies: Vec::new(),
        });
        self.comments.last()
    }
}
