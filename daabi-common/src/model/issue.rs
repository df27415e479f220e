use crate::model::{
    Id, JUST_NOW, ModelValidationError,
    author::Author,
    non_blank,
    tally::{Vote, Votes, toggle},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct IssueMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct ContributionMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Wifi,
    Food,
    Infrastructure,
    Academic,
    Hostel,
    Transport,
    #[default]
    Other,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    Reported,
    Assigned,
    Discussed,
    ActionTaken,
    Resolved,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    Low,
    #[default]
    Medium,
    High,
}

impl IssuePriority {
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            IssuePriority::Low => 1,
            IssuePriority::Medium => 2,
            IssuePriority::High => 3,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: Id<IssueMarker>,
    pub author: Author,
    pub timestamp: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub votes: Votes,
    pub user_vote: Option<Vote>,
    pub contributions: Vec<Contribution>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: Id<ContributionMarker>,
    pub author: Author,
    pub timestamp: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<String>,
    pub votes: Votes,
    pub user_vote: Option<Vote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tagged_persons: Vec<String>,
}

/// The fields of both issue forms. Omitted category and priority fall back to their defaults.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateIssue {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: IssuePriority,
    pub location: Option<String>,
    /// Comma separated.
    pub tags: String,
    pub images: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateContribution {
    pub content: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub tagged_persons: Vec<String>,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    Solved,
    Unsolved,
    UnderProcess,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueSort {
    #[default]
    Recent,
    Votes,
    Priority,
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, status: IssueStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Solved => status == IssueStatus::Resolved,
            StatusFilter::Unsolved => status == IssueStatus::Reported,
            StatusFilter::UnderProcess => matches!(
                status,
                IssueStatus::Assigned | IssueStatus::Discussed | IssueStatus::ActionTaken
            ),
        }
    }
}

impl IssueSort {
    /// Orders best first. `Recent` keeps the board order.
    #[must_use]
    pub fn compare(self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            IssueSort::Recent => Ordering::Equal,
            IssueSort::Votes => b.votes.score().cmp(&a.votes.score()),
            IssueSort::Priority => b.priority.rank().cmp(&a.priority.rank()),
        }
    }
}

/// Filters and sorts `issues` without touching the underlying order.
pub fn arrange<'a>(
    issues: impl IntoIterator<Item = &'a Issue>,
    filter: StatusFilter,
    sort: IssueSort,
) -> Vec<&'a Issue> {
    let mut arranged: Vec<_> = issues
        .into_iter()
        .filter(|issue| filter.matches(issue.status))
        .collect();
    // Stable, so ties stay in board order.
    arranged.sort_by(|a, b| sort.compare(a, b));
    arranged
}

/// Splits a comma separated tag list, dropping blank entries.
#[must_use]
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',').filter_map(non_blank).map(str::to_owned).collect()
}

/// Trims tagged persons, dropping blanks and repeated names.
#[must_use]
pub fn normalize_tagged_persons(persons: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(persons.len());
    for person in &persons {
        if let Some(person) = non_blank(person)
            && !normalized.iter().any(|tagged| tagged == person)
        {
            normalized.push(person.to_owned());
        }
    }
    normalized
}

impl CreateIssue {
    /// Validates the form. `id` is only called once the issue is known to be valid.
    pub fn into_issue(
        self,
        id: impl FnOnce() -> Id<IssueMarker>,
        author: Author,
    ) -> Result<Issue, ModelValidationError> {
        let title = non_blank(&self.title).ok_or(ModelValidationError::BlankField("title"))?;
        let description = non_blank(&self.description)
            .ok_or(ModelValidationError::BlankField("description"))?;

        Ok(Issue {
            id: id(),
            author,
            timestamp: JUST_NOW.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            images: self.images,
            category: self.category,
            status: IssueStatus::Reported,
            priority: self.priority,
            votes: Votes::default(),
            user_vote: None,
            contributions: Vec::new(),
            tags: parse_tags(&self.tags),
            location: self
                .location
                .as_deref()
                .and_then(non_blank)
                .map(str::to_owned),
        })
    }
}

impl Issue {
    pub fn vote(&mut self, vote: Vote) {
        toggle(&mut self.votes, &mut self.user_vote, vote);
    }

    #[must_use]
    pub fn contribution_mut(&mut self, id: Id<ContributionMarker>) -> Option<&mut Contribution> {
        self.contributions
            .iter_mut()
            .find(|contribution| contribution.id == id)
    }

    /// Appends a contribution by `author`, unless its content is blank.
    pub fn add_contribution(
        &mut self,
        id: impl FnOnce() -> Id<ContributionMarker>,
        author: Author,
        contribution: CreateContribution,
    ) -> Option<&Contribution> {
        let content = non_blank(&contribution.content)?;

        self.contributions.push(Contribution {
            id: id(),
            author,
            timestamp: JUST_NOW.to_owned(),
            content: content.to_owned(),
            images: contribution.images,
            videos: contribution.videos,
            votes: Votes::default(),
            user_vote: None,
            tagged_persons: normalize_tagged_persons(contribution.tagged_persons),
        });
        self.contributions.last()
    }
}

impl Contribution {
    pub fn vote(&mut self, vote: Vote) {
        toggle(&mut self.votes, &mut self.user_vote, vote);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CreateContribution, CreateIssue, Issue, IssueCategory, IssuePriority, IssueSort,
        IssueStatus, StatusFilter, arrange, normalize_tagged_persons, parse_tags,
    };
    use crate::model::{
        ModelValidationError,
        author::Author,
        tally::{Vote, Votes},
    };

    fn issue(id: u64, status: IssueStatus, priority: IssuePriority, votes: (u32, u32)) -> Issue {
        Issue {
            id: id.into(),
            author: Author::current_user(),
            timestamp: "1 day ago".to_owned(),
            title: format!("Issue {id}"),
            description: "Something is broken".to_owned(),
            images: Vec::new(),
            category: IssueCategory::Infrastructure,
            status,
            priority,
            votes: Votes {
                upvote: votes.0,
                downvote: votes.1,
            },
            user_vote: None,
            contributions: Vec::new(),
            tags: Vec::new(),
            location: None,
        }
    }

    fn board() -> Vec<Issue> {
        vec![
            issue(1, IssueStatus::Reported, IssuePriority::Low, (3, 0)),
            issue(2, IssueStatus::Resolved, IssuePriority::High, (1, 4)),
            issue(3, IssueStatus::Assigned, IssuePriority::Medium, (10, 2)),
        ]
    }

    fn ids(issues: &[&Issue]) -> Vec<u64> {
        issues.iter().map(|issue| issue.id.into()).collect()
    }

    #[test]
    fn filter_by_status_bucket() {
        let board = board();

        let arrange_ids = |filter| ids(&arrange(&board, filter, IssueSort::Recent));
        assert_eq!(arrange_ids(StatusFilter::All), [1, 2, 3]);
        assert_eq!(arrange_ids(StatusFilter::Solved), [2]);
        assert_eq!(arrange_ids(StatusFilter::Unsolved), [1]);
        assert_eq!(arrange_ids(StatusFilter::UnderProcess), [3]);
    }

    #[test]
    fn under_process_covers_three_statuses() {
        for status in [
            IssueStatus::Assigned,
            IssueStatus::Discussed,
            IssueStatus::ActionTaken,
        ] {
            assert!(StatusFilter::UnderProcess.matches(status));
        }
        assert!(!StatusFilter::UnderProcess.matches(IssueStatus::Reported));
        assert!(!StatusFilter::UnderProcess.matches(IssueStatus::Resolved));
    }

    #[test]
    fn sort_by_priority_and_votes() {
        let board = board();

        assert_eq!(
            ids(&arrange(&board, StatusFilter::All, IssueSort::Priority)),
            [2, 3, 1]
        );
        assert_eq!(
            ids(&arrange(&board, StatusFilter::All, IssueSort::Votes)),
            [3, 1, 2]
        );
    }

    #[test]
    fn sort_ties_keep_board_order() {
        let board = vec![
            issue(7, IssueStatus::Reported, IssuePriority::Medium, (1, 0)),
            issue(5, IssueStatus::Reported, IssuePriority::High, (0, 0)),
            issue(6, IssueStatus::Reported, IssuePriority::Medium, (2, 1)),
        ];

        assert_eq!(
            ids(&arrange(&board, StatusFilter::All, IssueSort::Priority)),
            [5, 7, 6]
        );
        assert_eq!(
            ids(&arrange(&board, StatusFilter::All, IssueSort::Votes)),
            [7, 6, 5]
        );
    }

    #[test]
    fn issue_vote_toggles() {
        let mut issue = issue(1, IssueStatus::Assigned, IssuePriority::High, (24, 1));
        issue.user_vote = Some(Vote::Upvote);

        issue.vote(Vote::Downvote);
        assert_eq!((issue.votes.upvote, issue.votes.downvote), (23, 2));
        issue.vote(Vote::Downvote);
        assert_eq!((issue.votes.upvote, issue.votes.downvote), (23, 1));
        assert_eq!(issue.user_vote, None);
    }

    #[test]
    fn tags_are_split_and_trimmed() {
        assert_eq!(
            parse_tags(" urgent, hall-a,, ,connectivity "),
            ["urgent", "hall-a", "connectivity"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn tagged_persons_are_deduplicated() {
        let persons = vec![
            " IT Head ".to_owned(),
            String::new(),
            "Cafeteria Manager".to_owned(),
            "IT Head".to_owned(),
        ];
        assert_eq!(
            normalize_tagged_persons(persons),
            ["IT Head", "Cafeteria Manager"]
        );
    }

    #[test]
    fn create_issue_defaults() {
        let create: CreateIssue = serde_json::from_value(serde_json::json!({
            "title": "Broken projector",
            "description": "Room 301",
            "location": "  ",
            "tags": "equipment, classroom",
        }))
        .unwrap();

        let issue = create.into_issue(|| 9.into(), Author::current_user()).unwrap();

        assert_eq!(issue.status, IssueStatus::Reported);
        assert_eq!(issue.priority, IssuePriority::Medium);
        assert_eq!(issue.category, IssueCategory::Other);
        assert_eq!(issue.location, None);
        assert_eq!(issue.tags, ["equipment", "classroom"]);
        assert_eq!(issue.votes, Votes::default());
        assert_eq!(issue.timestamp, "Just now");
    }

    #[test]
    fn create_issue_requires_title() {
        let create = CreateIssue {
            title: " ".to_owned(),
            description: "Room 301".to_owned(),
            ..CreateIssue::default()
        };

        assert_eq!(
            create.into_issue(|| 1.into(), Author::current_user()),
            Err(ModelValidationError::BlankField("title"))
        );
    }

    #[test]
    fn contributions_append_and_vote_independently() {
        let mut issue = issue(1, IssueStatus::Assigned, IssuePriority::High, (0, 0));

        let blank = CreateContribution {
            content: "   ".to_owned(),
            ..CreateContribution::default()
        };
        assert!(
            issue
                .add_contribution(|| 1.into(), Author::current_user(), blank)
                .is_none()
        );
        assert!(issue.contributions.is_empty());

        let contribution = CreateContribution {
            content: "IT is on it".to_owned(),
            tagged_persons: vec!["IT Head".to_owned()],
            ..CreateContribution::default()
        };
        issue.add_contribution(|| 2.into(), Author::current_user(), contribution);
        assert_eq!(issue.contributions.len(), 1);

        issue
            .contribution_mut(2.into())
            .unwrap()
            .vote(Vote::Upvote);
        assert_eq!(issue.contributions[0].votes.upvote, 1);
        assert_eq!(issue.contributions[0].user_vote, Some(Vote::Upvote));
        assert_eq!(issue.votes, Votes::default());
        assert_eq!(issue.user_vote, None);

        assert!(issue.contribution_mut(3.into()).is_none());
    }

    #[test]
    fn status_uses_kebab_case() {
        assert_eq!(
            serde_json::to_value(IssueStatus::ActionTaken).unwrap(),
            serde_json::json!("action-taken")
        );
        assert_eq!(
            serde_json::from_value::<StatusFilter>(serde_json::json!("under-process")).unwrap(),
            StatusFilter::UnderProcess
        );
    }
}
