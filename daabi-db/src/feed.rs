use crate::{StoreError, StoreResult, seed};
use daabi_common::{
    model::{
        DaabiSnowflakeGenerator, Id, JUST_NOW, ModelValidationError,
        author::{Author, CommentAuthor},
        non_blank,
        post::{CreatePost, Post, PostKind, PostMarker},
        tally::{DemandVote, EventResponse, Reaction, Reactions},
    },
    snowflake::{ProcessId, WorkerId},
};
use tracing::debug;

/// Posts in display order, newest first.
#[derive(Clone, Debug)]
pub struct Feed {
    posts: Vec<Post>,
    snowflake_generator: DaabiSnowflakeGenerator,
}

impl Feed {
    #[must_use]
    pub fn new(posts: Vec<Post>, worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self {
            posts,
            snowflake_generator: DaabiSnowflakeGenerator::new(worker_id, process_id),
        }
    }

    #[must_use]
    pub fn seeded(worker_id: WorkerId, process_id: ProcessId) -> Self {
        Self::new(seed::posts(), worker_id, process_id)
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn post(&self, id: Id<PostMarker>) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    fn post_mut(posts: &mut [Post], id: Id<PostMarker>) -> StoreResult<&mut Post> {
        posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(StoreError::PostNotFound(id))
    }

    /// Publishes a general post by the current user at the top of the feed.
    pub fn create_post(&mut self, post: &CreatePost) -> StoreResult<&Post> {
        let content = non_blank(&post.content).ok_or(ModelValidationError::BlankField("content"))?;
        let id = self.snowflake_generator.generate().into();

        self.posts.insert(
            0,
            Post {
                id,
                author: Author::new("You", "👤", None),
                timestamp: JUST_NOW.to_owned(),
                content: content.to_owned(),
                images: Vec::new(),
                reactions: Reactions::default(),
                comments: Vec::new(),
                user_reaction: None,
                kind: PostKind::General,
            },
        );
        debug!(post = %id, "Created post");

        Ok(&self.posts[0])
    }

    pub fn react(&mut self, id: Id<PostMarker>, reaction: Reaction) -> StoreResult<&Post> {
        let post = Self::post_mut(&mut self.posts, id)?;
        post.react(reaction);
        debug!(post = %id, %reaction, active = ?post.user_reaction, "Toggled reaction");

        Ok(post)
    }

    pub fn vote(&mut self, id: Id<PostMarker>, vote: DemandVote) -> StoreResult<&Post> {
        let post = Self::post_mut(&mut self.posts, id)?;
        post.vote(vote)?;
        debug!(post = %id, %vote, "Toggled demand vote");

        Ok(post)
    }

    pub fn respond(&mut self, id: Id<PostMarker>, response: EventResponse) -> StoreResult<&Post> {
        let post = Self::post_mut(&mut self.posts, id)?;
        post.respond(response)?;
        debug!(post = %id, %response, "Toggled event response");

        Ok(post)
    }

    /// Appends a comment by the current user. Blank comments leave the post untouched.
    pub fn comment(&mut self, id: Id<PostMarker>, content: &str) -> StoreResult<&Post> {
        let post = Self::post_mut(&mut self.posts, id)?;

        if let Some(comment) = post.add_comment(
            || self.snowflake_generator.generate().into(),
            CommentAuthor::you(),
            content,
        ) {
            debug!(post = %id, comment = %comment.id, "Added comment");
        }

        Ok(post)
    }
}
