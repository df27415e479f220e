use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub avatar: String,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// The reduced author shown next to feed comments.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CommentAuthor {
    pub name: String,
    pub avatar: String,
}

impl Author {
    #[must_use]
    pub fn new(name: &str, avatar: &str, department: Option<&str>) -> Self {
        Self {
            name: name.to_owned(),
            avatar: avatar.to_owned(),
            is_verified: true,
            department: department.map(str::to_owned),
        }
    }

    /// Placeholder for whoever is using the issue board.
    #[must_use]
    pub fn current_user() -> Self {
        Self::new(
            "Current User",
            "/api/placeholder/40/40",
            Some("Computer Science"),
        )
    }
}

impl CommentAuthor {
    #[must_use]
    pub fn new(name: &str, avatar: &str) -> Self {
        Self {
            name: name.to_owned(),
            avatar: avatar.to_owned(),
        }
    }

    /// Placeholder for whoever is commenting on the feed.
    #[must_use]
    pub fn you() -> Self {
        Self::new("You", "👤")
    }
}
