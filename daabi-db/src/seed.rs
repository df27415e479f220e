//! The sample feed and issue board every process starts with.

use daabi_common::model::{
    author::{Author, CommentAuthor},
    issue::{Contribution, Issue, IssueCategory, IssuePriority, IssueStatus},
    post::{Comment, Demand, DemandCategory, Event, IssueReport, Post, PostKind},
    tally::{
        DemandVote, DemandVotes, EventResponse, Reaction, Reactions, ResponseCount, Vote, Votes,
    },
};
use time::macros::date;

const PLACEHOLDER_AVATAR: &str = "/api/placeholder/40/40";

fn comment(id: u64, name: &str, avatar: &str, content: &str, timestamp: &str) -> Comment {
    Comment {
        id: id.into(),
        author: CommentAuthor::new(name, avatar),
        content: content.to_owned(),
        timestamp: timestamp.to_owned(),
        replies: Vec::new(),
    }
}

fn reactions(like: u32, love: u32, support: u32, angry: u32) -> Reactions {
    Reactions {
        like,
        love,
        support,
        angry,
    }
}

fn votes(upvote: u32, downvote: u32) -> Votes {
    Votes { upvote, downvote }
}

#[must_use]
pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1.into(),
            author: Author::new("Ahmed Rahman", "👨‍🎓", Some("CSE")),
            timestamp: "2 hours ago".to_owned(),
            content: "The WiFi in academic buildings is extremely slow and often disconnects \
                during online classes. We need better internet infrastructure to support our \
                digital learning needs."
                .to_owned(),
            images: Vec::new(),
            reactions: reactions(89, 23, 156, 8),
            comments: vec![comment(
                1,
                "Fatima Khan",
                "👩‍🎓",
                "Totally agree! Had to miss important parts of lectures due to connection issues.",
                "1 hour ago",
            )],
            user_reaction: Some(Reaction::Support),
            kind: PostKind::Demand(Demand {
                demand_title: "Better WiFi Infrastructure in Academic Buildings".to_owned(),
                category: DemandCategory::Environment,
                target_authority: "IT Department & Administration".to_owned(),
                votes: DemandVotes {
                    agree: 147,
                    disagree: 12,
                },
                user_vote: Some(DemandVote::Agree),
            }),
        },
        Post {
            id: 2.into(),
            author: Author::new("Sadia Islam", "👩‍🎓", Some("EEE")),
            timestamp: "4 hours ago".to_owned(),
            content: "The AC in the main reading room has been broken for 3 days. Students are \
                finding it hard to study in this heat."
                .to_owned(),
            images: Vec::new(),
            reactions: reactions(45, 5, 67, 23),
            comments: vec![comment(
                2,
                "Maintenance Team",
                "🔧",
                "We have assigned a technician to fix this issue. Expected resolution by tomorrow.",
                "2 hours ago",
            )],
            user_reaction: Some(Reaction::Support),
            kind: PostKind::Issue(IssueReport {
                issue_title: "Broken AC in Library Reading Room".to_owned(),
                status: IssueStatus::Assigned,
                priority: IssuePriority::High,
                location: "Central Library - Reading Room 2".to_owned(),
            }),
        },
        Post {
            id: 3.into(),
            author: Author::new("Rahim Uddin", "👨‍🎓", Some("Physics")),
            timestamp: "6 hours ago".to_owned(),
            content: "Just had an amazing physics lab session! Our professor demonstrated \
                quantum interference patterns. Science is beautiful! 🔬✨"
                .to_owned(),
            images: vec![
                "https://www.sust.edu/public/uploads/website/deptBanner/9_671c7728e8649.jpg"
                    .to_owned(),
            ],
            reactions: reactions(78, 34, 12, 0),
            comments: vec![comment(
                3,
                "Maria Ahmed",
                "👩‍🎓",
                "Wish I could attend that lab! Physics is fascinating.",
                "5 hours ago",
            )],
            user_reaction: Some(Reaction::Love),
            kind: PostKind::General,
        },
        Post {
            id: 4.into(),
            author: Author::new("SUST Programming Club", "💻", Some("Club")),
            timestamp: "1 day ago".to_owned(),
            content: "Join us for the biggest programming contest of the year! Registration is \
                now open. Prizes worth 50,000 BDT!"
                .to_owned(),
            images: Vec::new(),
            reactions: reactions(134, 67, 203, 0),
            comments: vec![comment(
                4,
                "Karim Hassan",
                "👨‍💻",
                "Count me in! Already practicing algorithms.",
                "20 hours ago",
            )],
            user_reaction: Some(Reaction::Love),
            kind: PostKind::Event(Event {
                event_title: "Inter-University Programming Contest 2025".to_owned(),
                event_date: date!(2025 - 10 - 15),
                location: "Computer Lab, Academic Building 1".to_owned(),
                response_count: ResponseCount {
                    going: 89,
                    interested: 45,
                    not_going: 12,
                },
                user_response: Some(EventResponse::Going),
            }),
        },
    ]
}

fn contribution(
    id: u64,
    name: &str,
    timestamp: &str,
    content: &str,
    upvotes: u32,
    tagged_persons: &[&str],
) -> Contribution {
    Contribution {
        id: id.into(),
        author: Author::new(name, PLACEHOLDER_AVATAR, None),
        timestamp: timestamp.to_owned(),
        content: content.to_owned(),
        images: Vec::new(),
        videos: Vec::new(),
        votes: votes(upvotes, 0),
        user_vote: None,
        tagged_persons: tagged_persons.iter().map(|&person| person.to_owned()).collect(),
    }
}

fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|&tag| tag.to_owned()).collect()
}

#[must_use]
pub fn issues() -> Vec<Issue> {
    vec![
        Issue {
            id: 1.into(),
            author: Author::new("Ahmed Hassan", PLACEHOLDER_AVATAR, Some("Computer Science")),
            timestamp: "2 hours ago".to_owned(),
            title: "WiFi Down in Hall A - Block 3".to_owned(),
            description: "The WiFi connection has been completely down in Hall A Block 3 for \
                the past 6 hours. Students are unable to attend online classes or complete \
                assignments. This is affecting around 200+ students in the block.\n\nThe issue \
                started at around 2 PM today and IT support has been notified multiple times."
                .to_owned(),
            images: Vec::new(),
            category: IssueCategory::Wifi,
            status: IssueStatus::Assigned,
            priority: IssuePriority::High,
            votes: votes(24, 1),
            user_vote: Some(Vote::Upvote),
            contributions: vec![
                contribution(
                    1,
                    "Sarah Khan",
                    "1 hour ago",
                    "I spoke to the IT office - they are working on fixing it. Expected to be \
                    resolved by evening.",
                    15,
                    &["IT Head - Mr. Rahman"],
                ),
                contribution(
                    2,
                    "IT Support Team",
                    "45 minutes ago",
                    "We have identified the issue with the main router in Block 3. Our \
                    technician is on site and working to replace the faulty equipment.",
                    20,
                    &[],
                ),
                contribution(
                    3,
                    "Mike Chen",
                    "30 minutes ago",
                    "Great to hear from IT team directly! Thank you for the quick response.",
                    8,
                    &[],
                ),
                Contribution {
                    images: vec![
                        "/api/placeholder/300/200".to_owned(),
                        "/api/placeholder/300/200".to_owned(),
                    ],
                    ..contribution(
                        4,
                        "Residence Hall Supervisor",
                        "20 minutes ago",
                        "We have arranged temporary wifi hotspots in the common areas for \
                        urgent academic work. They are available on the ground floor lobby.",
                        12,
                        &[],
                    )
                },
            ],
            tags: tags(&["urgent", "hall-a", "connectivity"]),
            location: Some("Hall A - Block 3".to_owned()),
        },
        Issue {
            id: 2.into(),
            author: Author::new(
                "Fatima Ali",
                PLACEHOLDER_AVATAR,
                Some("Business Administration"),
            ),
            timestamp: "5 hours ago".to_owned(),
            title: "Cafeteria Food Quality Issues".to_owned(),
            description: "The food quality in the main cafeteria has been consistently poor \
                this week. Multiple students have complained about stale food and hygiene issues."
                .to_owned(),
            images: Vec::new(),
            category: IssueCategory::Food,
            status: IssueStatus::Discussed,
            priority: IssuePriority::Medium,
            votes: votes(18, 3),
            user_vote: None,
            contributions: vec![contribution(
                5,
                "Student Council",
                "3 hours ago",
                "We have scheduled a meeting with the cafeteria management for tomorrow. Will \
                update with outcomes.",
                12,
                &["Cafeteria Manager"],
            )],
            tags: tags(&["food-safety", "cafeteria", "hygiene"]),
            location: Some("Main Cafeteria".to_owned()),
        },
        Issue {
            id: 3.into(),
            author: Author::new("Michael Chen", PLACEHOLDER_AVATAR, Some("Engineering")),
            timestamp: "1 day ago".to_owned(),
            title: "Broken Projector in Room 301".to_owned(),
            description: "The projector in classroom 301 has been malfunctioning for 3 days. \
                Classes are being disrupted."
                .to_owned(),
            images: Vec::new(),
            category: IssueCategory::Infrastructure,
            status: IssueStatus::Resolved,
            priority: IssuePriority::Medium,
            votes: votes(8, 0),
            user_vote: None,
            contributions: vec![contribution(
                6,
                "Maintenance Team",
                "6 hours ago",
                "Projector has been replaced with a new unit. Issue resolved.",
                10,
                &[],
            )],
            tags: tags(&["equipment", "classroom", "fixed"]),
            location: Some("Room 301".to_owned()),
        },
    ]
}
