use crate::{StoreError, StoreResult, seed};
use daabi_common::{
    model::{
        DaabiSnowflakeGenerator, Id,
        author::Author,
        issue::{
            ContributionMarker, CreateContribution, CreateIssue, Issue, IssueMarker, IssueSort,
            StatusFilter, arrange,
        },
        tally::Vote,
    },
    snowflake::{ProcessId, WorkerId},
};
use tracing::debug;

/// Reported campus issues, newest first.
#[derive(Clone, Debug)]
pub struct IssueBoard {
    issues: Vec<Issue>,
    snowflake_generator: DaabiSnowflakeGenerator,
}

impl IssueBoard {
    #[must_use]
    pub fn new(issues: Vec<Issue>, worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self {
            issues,
            snowflake_generator: DaabiSnowflakeGenerator::new(worker_id, process_id),
        }
    }

    #[must_use]
    pub fn seeded(worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self::new(seed::issues(), worker_id, process_id)
    }

    #[must_use]
    pub fn list(&self, filter: StatusFilter, sort: IssueSort) -> Vec<&Issue> {
        arrange(&self.issues, filter, sort)
    }

    #[must_use]
    pub fn issue(&self, id: Id<IssueMarker>) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    fn issue_mut(issues: &mut [Issue], id: Id<IssueMarker>) -> StoreResult<&mut Issue> {
        issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or(StoreError::IssueNotFound(id))
    }

    pub fn create_issue(&mut self, issue: CreateIssue) -> StoreResult<&Issue> {
        let issue = issue.into_issue(
            || self.snowflake_generator.generate().into(),
            Author::current_user(),
        )?;

        debug!(issue = %issue.id, "Reported issue");
        self.issues.insert(0, issue);

        Ok(&self.issues[0])
    }

    pub fn vote(&mut self, id: Id<IssueMarker>, vote: Vote) -> StoreResult<&Issue> {
        let issue = Self::issue_mut(&mut self.issues, id)?;
        issue.vote(vote);
        debug!(issue = %id, %vote, active = ?issue.user_vote, "Toggled issue vote");

        Ok(issue)
    }

    /// Appends a contribution by the current user. Blank contributions leave the issue untouched.
    pub fn contribute(
        &mut self,
        id: Id<IssueMarker>,
        contribution: CreateContribution,
    ) -> StoreResult<&Issue> {
        let author = Author {
            department: None,
            ..Author::current_user()
        };
        let issue = Self::issue_mut(&mut self.issues, id)?;

        if let Some(contribution) = issue.add_contribution(
            || self.snowflake_generator.generate().into(),
            author,
            contribution,
        ) {
            debug!(issue = %id, contribution = %contribution.id, "Added contribution");
        }

        Ok(issue)
    }

    pub fn vote_contribution(
        &mut self,
        id: Id<IssueMarker>,
        contribution_id: Id<ContributionMarker>,
        vote: Vote,
    ) -> StoreResult<&Issue> {
        let issue = Self::issue_mut(&mut self.issues, id)?;
        issue
            .contribution_mut(contribution_id)
            .ok_or(StoreError::ContributionNotFound {
                issue: id,
                contribution: contribution_id,
            })?
            .vote(vote);
        debug!(issue = %id, contribution = %contribution_id, %vote, "Toggled contribution vote");

        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::IssueBoard;
    use crate::StoreError;
    use daabi_common::{
        model::{
            ModelValidationError,
            issue::{
                CreateContribution, CreateIssue, IssuePriority, IssueSort, IssueStatus,
                StatusFilter,
            },
            tally::{Vote, Votes},
        },
        snowflake::{ProcessId, WorkerId},
    };

    fn board() -> IssueBoard {
        IssueBoard::seeded(WorkerId::new(0).unwrap(), ProcessId::new(1).unwrap())
    }

    fn listed_ids(board: &IssueBoard, filter: StatusFilter, sort: IssueSort) -> Vec<u64> {
        board
            .list(filter, sort)
            .into_iter()
            .map(|issue| issue.id.into())
            .collect()
    }

    #[test]
    fn list_filters_and_sorts() {
        let board = board();

        assert_eq!(
            listed_ids(&board, StatusFilter::All, IssueSort::Recent),
            [1, 2, 3]
        );
        assert_eq!(
            listed_ids(&board, StatusFilter::Solved, IssueSort::Recent),
            [3]
        );
        assert!(listed_ids(&board, StatusFilter::Unsolved, IssueSort::Recent).is_empty());
        assert_eq!(
            listed_ids(&board, StatusFilter::UnderProcess, IssueSort::Votes),
            [1, 2]
        );
        assert_eq!(
            listed_ids(&board, StatusFilter::All, IssueSort::Priority),
            [1, 2, 3]
        );
    }

    #[test]
    fn created_issue_is_listed_first_as_unsolved() {
        let mut board = board();

        let issue = board
            .create_issue(CreateIssue {
                title: "Bus late".to_owned(),
                description: "The 8 AM bus is always late".to_owned(),
                priority: IssuePriority::Low,
                tags: "transport, morning".to_owned(),
                ..CreateIssue::default()
            })
            .unwrap();
        let id: u64 = issue.id.into();
        assert_eq!(issue.status, IssueStatus::Reported);
        assert_eq!(issue.tags, ["transport", "morning"]);

        assert_eq!(
            listed_ids(&board, StatusFilter::All, IssueSort::Recent)[0],
            id
        );
        assert_eq!(
            listed_ids(&board, StatusFilter::Unsolved, IssueSort::Recent),
            [id]
        );
        assert_eq!(
            *listed_ids(&board, StatusFilter::All, IssueSort::Priority)
                .last()
                .unwrap(),
            id
        );
    }

    #[test]
    fn blank_issue_is_rejected() {
        let mut board = board();

        assert_eq!(
            board.create_issue(CreateIssue::default()).unwrap_err(),
            StoreError::Validation(ModelValidationError::BlankField("title"))
        );
        assert_eq!(board.list(StatusFilter::All, IssueSort::Recent).len(), 3);
    }

    #[test]
    fn issue_vote_toggles_off() {
        let mut board = board();

        let issue = board.vote(1.into(), Vote::Upvote).unwrap();
        assert_eq!(
            issue.votes,
            Votes {
                upvote: 23,
                downvote: 1
            }
        );
        assert_eq!(issue.user_vote, None);
    }

    #[test]
    fn contribution_vote_leaves_issue_vote_alone() {
        let mut board = board();

        let issue = board
            .vote_contribution(1.into(), 2.into(), Vote::Downvote)
            .unwrap();
        assert_eq!(
            issue.contributions[1].votes,
            Votes {
                upvote: 20,
                downvote: 1
            }
        );
        assert_eq!(
            issue.votes,
            Votes {
                upvote: 24,
                downvote: 1
            }
        );

        assert_eq!(
            board
                .vote_contribution(2.into(), 1.into(), Vote::Upvote)
                .unwrap_err(),
            StoreError::ContributionNotFound {
                issue: 2.into(),
                contribution: 1.into(),
            }
        );
    }

    #[test]
    fn rejected_submissions_use_no_ids() {
        let mut board = board();
        let generator = board.snowflake_generator;

        board.create_issue(CreateIssue::default()).unwrap_err();
        board
            .contribute(1.into(), CreateContribution::default())
            .unwrap();
        board
            .contribute(
                42.into(),
                CreateContribution {
                    content: "Anyone?".to_owned(),
                    ..CreateContribution::default()
                },
            )
            .unwrap_err();

        assert_eq!(board.snowflake_generator, generator);
    }

    #[test]
    fn contributions_append() {
        let mut board = board();

        let issue = board
            .contribute(
                3.into(),
                CreateContribution {
                    content: "Confirmed working again".to_owned(),
                    tagged_persons: vec!["Maintenance Team".to_owned(), " ".to_owned()],
                    ..CreateContribution::default()
                },
            )
            .unwrap();

        assert_eq!(issue.contributions.len(), 2);
        let contribution = &issue.contributions[1];
        assert_eq!(contribution.author.name, "Current User");
        assert_eq!(contribution.tagged_persons, ["Maintenance Team"]);
        assert_eq!(contribution.votes, Votes::default());

        let issue = board
            .contribute(3.into(), CreateContribution::default())
            .unwrap();
        assert_eq!(issue.contributions.len(), 2);

        assert_eq!(
            board
                .contribute(42.into(), CreateContribution::default())
                .unwrap_err(),
            StoreError::IssueNotFound(42.into())
        );
    }
}
