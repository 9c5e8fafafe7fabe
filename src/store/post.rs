//! Post and comment models with vote tallies.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DataStore;
use crate::{AgoraError, Result};

/// Score awarded to a content author per like (and deducted per dislike).
pub const VOTE_SCORE: i64 = 10;

/// A user's like/dislike choice on a post or comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    /// Positive vote.
    Like,
    /// Negative vote.
    Dislike,
}

impl VoteKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Like => "like",
            VoteKind::Dislike => "dislike",
        }
    }

    /// Score delta the content author gains while this vote stands.
    fn score_value(self) -> i64 {
        match self {
            VoteKind::Like => VOTE_SCORE,
            VoteKind::Dislike => -VOTE_SCORE,
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Toggle a vote in a tally map.
///
/// Voting the same way twice removes the vote; voting the other way replaces
/// it. Returns the score delta for the content author.
fn toggle_vote(votes: &mut HashMap<i64, VoteKind>, voter_id: i64, vote: VoteKind) -> i64 {
    match votes.get(&voter_id).copied() {
        Some(existing) if existing == vote => {
            votes.remove(&voter_id);
            -vote.score_value()
        }
        Some(existing) => {
            votes.insert(voter_id, vote);
            vote.score_value() - existing.score_value()
        }
        None => {
            votes.insert(voter_id, vote);
            vote.score_value()
        }
    }
}

/// A comment on a post.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment ID (global counter, not per-post).
    pub id: i64,
    /// Parent post ID.
    pub post_id: i64,
    /// Author's user ID.
    pub author_id: i64,
    /// Author's display name at the time of writing.
    pub author_name: String,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Per-user vote tally.
    pub votes: HashMap<i64, VoteKind>,
}

impl Comment {
    /// Number of likes currently standing.
    pub fn like_count(&self) -> usize {
        self.votes.values().filter(|v| **v == VoteKind::Like).count()
    }

    /// Number of dislikes currently standing.
    pub fn dislike_count(&self) -> usize {
        self.votes
            .values()
            .filter(|v| **v == VoteKind::Dislike)
            .count()
    }
}

/// A forum post with its embedded comments.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Author's user ID.
    pub author_id: i64,
    /// Author's display name at the time of writing.
    pub author_name: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Attachment path or URL, recorded verbatim.
    pub attachment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Per-user vote tally.
    pub votes: HashMap<i64, VoteKind>,
    /// Comments, kept sorted oldest-first.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Number of likes currently standing.
    pub fn like_count(&self) -> usize {
        self.votes.values().filter(|v| **v == VoteKind::Like).count()
    }

    /// Number of dislikes currently standing.
    pub fn dislike_count(&self) -> usize {
        self.votes
            .values()
            .filter(|v| **v == VoteKind::Dislike)
            .count()
    }

    /// Find a comment by ID.
    pub fn comment(&self, comment_id: i64) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Author's user ID.
    pub author_id: i64,
    /// Author's display name.
    pub author_name: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Optional attachment path or URL.
    pub attachment: Option<String>,
}

/// Data for updating an existing post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
    /// New attachment path or URL.
    pub attachment: Option<String>,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Author's user ID.
    pub author_id: i64,
    /// Author's display name.
    pub author_name: String,
    /// Comment body.
    pub content: String,
}

impl DataStore {
    /// Create a new post.
    pub fn create_post(&mut self, new: NewPost) -> Post {
        let now = Utc::now();
        let post = Post {
            id: self.allocate_post_id(),
            author_id: new.author_id,
            author_name: new.author_name,
            title: new.title,
            content: new.content,
            attachment: new.attachment,
            created_at: now,
            updated_at: now,
            votes: HashMap::new(),
            comments: Vec::new(),
        };
        self.posts.push(post.clone());
        post
    }

    /// All posts, newest first.
    pub fn posts_newest_first(&self) -> Vec<Post> {
        let mut posts = self.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Look up a post by ID.
    pub fn post(&self, id: i64) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AgoraError::NotFound("post".to_string()))
    }

    /// Posts authored by the given user, newest first.
    pub fn posts_by_author(&self, author_id: i64) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Comments authored by the given user across all posts, with the parent
    /// post title attached for context.
    pub fn comments_by_author(&self, author_id: i64) -> Vec<(Comment, String)> {
        self.posts
            .iter()
            .flat_map(|p| {
                p.comments
                    .iter()
                    .filter(|c| c.author_id == author_id)
                    .map(|c| (c.clone(), p.title.clone()))
            })
            .collect()
    }

    /// Replace a post's title, content and attachment; bumps `updated_at`.
    pub fn update_post(&mut self, id: i64, update: PostUpdate) -> Result<Post> {
        let post = self.post_mut(id)?;
        post.title = update.title;
        post.content = update.content;
        post.attachment = update.attachment;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    /// Delete a post (and its embedded comments with it).
    pub fn delete_post(&mut self, id: i64) -> Result<()> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AgoraError::NotFound("post".to_string()))?;
        self.posts.remove(index);
        Ok(())
    }

    /// Toggle a vote on a post, moving the author's score by the net delta.
    pub fn vote_post(&mut self, post_id: i64, voter_id: i64, vote: VoteKind) -> Result<Post> {
        let post = self.post_mut(post_id)?;
        let delta = toggle_vote(&mut post.votes, voter_id, vote);
        let author_id = post.author_id;
        let updated = post.clone();
        self.bump_user_score(author_id, delta);
        Ok(updated)
    }

    /// Add a comment to a post; the comment list stays sorted oldest-first.
    pub fn add_comment(&mut self, post_id: i64, new: NewComment) -> Result<Comment> {
        let comment_id = self.allocate_comment_id();
        let post = self.post_mut(post_id)?;
        let now = Utc::now();
        let comment = Comment {
            id: comment_id,
            post_id,
            author_id: new.author_id,
            author_name: new.author_name,
            content: new.content,
            created_at: now,
            updated_at: now,
            votes: HashMap::new(),
        };
        post.comments.push(comment.clone());
        post.comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comment)
    }

    /// Replace a comment's content; bumps `updated_at`.
    pub fn update_comment(&mut self, post_id: i64, comment_id: i64, content: &str) -> Result<Comment> {
        let comment = self.comment_mut(post_id, comment_id)?;
        comment.content = content.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    /// Delete a comment from a post.
    pub fn delete_comment(&mut self, post_id: i64, comment_id: i64) -> Result<()> {
        let post = self.post_mut(post_id)?;
        let index = post
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AgoraError::NotFound("comment".to_string()))?;
        post.comments.remove(index);
        Ok(())
    }

    /// Toggle a vote on a comment, moving the author's score by the net delta.
    pub fn vote_comment(
        &mut self,
        post_id: i64,
        comment_id: i64,
        voter_id: i64,
        vote: VoteKind,
    ) -> Result<Comment> {
        let comment = self.comment_mut(post_id, comment_id)?;
        let delta = toggle_vote(&mut comment.votes, voter_id, vote);
        let author_id = comment.author_id;
        let updated = comment.clone();
        self.bump_user_score(author_id, delta);
        Ok(updated)
    }

    fn post_mut(&mut self, id: i64) -> Result<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AgoraError::NotFound("post".to_string()))
    }

    fn comment_mut(&mut self, post_id: i64, comment_id: i64) -> Result<&mut Comment> {
        let post = self.post_mut(post_id)?;
        post.comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AgoraError::NotFound("comment".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::NewUser;
    use super::*;

    fn new_post(author_id: i64, title: &str) -> NewPost {
        NewPost {
            author_id,
            author_name: "Author".to_string(),
            title: title.to_string(),
            content: "content".to_string(),
            attachment: None,
        }
    }

    fn new_comment(author_id: i64, content: &str) -> NewComment {
        NewComment {
            author_id,
            author_name: "Author".to_string(),
            content: content.to_string(),
        }
    }

    /// A store with one registered author and one of their posts.
    fn store_with_post() -> (DataStore, i64, i64) {
        let mut store = DataStore::new();
        let author = store
            .create_user(NewUser::new("author", "hash", "Author"))
            .unwrap();
        let post = store.create_post(new_post(author.id, "Hello"));
        (store, author.id, post.id)
    }

    #[test]
    fn test_vote_kind_as_str() {
        assert_eq!(VoteKind::Like.as_str(), "like");
        assert_eq!(VoteKind::Dislike.as_str(), "dislike");
    }

    #[test]
    fn test_vote_kind_serde() {
        assert_eq!(serde_json::to_string(&VoteKind::Like).unwrap(), "\"like\"");
        let parsed: VoteKind = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(parsed, VoteKind::Dislike);
    }

    #[test]
    fn test_create_post() {
        let (store, author_id, post_id) = store_with_post();
        let post = store.post(post_id).unwrap();
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.title, "Hello");
        assert!(post.comments.is_empty());
        assert_eq!(post.like_count(), 0);
    }

    #[test]
    fn test_posts_newest_first() {
        let (mut store, author_id, _) = store_with_post();
        let second = store.create_post(new_post(author_id, "Second"));
        let posts = store.posts_newest_first();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, second.id);
    }

    #[test]
    fn test_update_post() {
        let (mut store, _, post_id) = store_with_post();
        let updated = store
            .update_post(
                post_id,
                PostUpdate {
                    title: "New title".to_string(),
                    content: "New content".to_string(),
                    attachment: Some("/uploads/a.png".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.attachment.as_deref(), Some("/uploads/a.png"));
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn test_delete_post() {
        let (mut store, _, post_id) = store_with_post();
        store.delete_post(post_id).unwrap();
        assert!(store.post(post_id).is_err());
        assert!(store.delete_post(post_id).is_err());
    }

    #[test]
    fn test_add_comment_sorted_oldest_first() {
        let (mut store, author_id, post_id) = store_with_post();
        let first = store.add_comment(post_id, new_comment(author_id, "first")).unwrap();
        let second = store
            .add_comment(post_id, new_comment(author_id, "second"))
            .unwrap();

        let post = store.post(post_id).unwrap();
        assert_eq!(post.comments.len(), 2);
        assert_eq!(post.comments[0].id, first.id);
        assert_eq!(post.comments[1].id, second.id);
    }

    #[test]
    fn test_add_comment_to_missing_post() {
        let (mut store, author_id, _) = store_with_post();
        assert!(store.add_comment(999, new_comment(author_id, "x")).is_err());
    }

    #[test]
    fn test_update_and_delete_comment() {
        let (mut store, author_id, post_id) = store_with_post();
        let comment = store.add_comment(post_id, new_comment(author_id, "orig")).unwrap();

        let updated = store.update_comment(post_id, comment.id, "edited").unwrap();
        assert_eq!(updated.content, "edited");

        store.delete_comment(post_id, comment.id).unwrap();
        assert!(store.post(post_id).unwrap().comment(comment.id).is_none());
        assert!(store.delete_comment(post_id, comment.id).is_err());
    }

    #[test]
    fn test_vote_post_toggle() {
        let (mut store, author_id, post_id) = store_with_post();
        let voter = store
            .create_user(NewUser::new("voter", "hash", "Voter"))
            .unwrap();

        // none -> like
        let post = store.vote_post(post_id, voter.id, VoteKind::Like).unwrap();
        assert_eq!(post.like_count(), 1);
        assert_eq!(store.user(author_id).unwrap().score, VOTE_SCORE);

        // like -> like revokes
        let post = store.vote_post(post_id, voter.id, VoteKind::Like).unwrap();
        assert_eq!(post.like_count(), 0);
        assert_eq!(store.user(author_id).unwrap().score, 0);
    }

    #[test]
    fn test_vote_post_switch() {
        let (mut store, author_id, post_id) = store_with_post();
        let voter = store
            .create_user(NewUser::new("voter", "hash", "Voter"))
            .unwrap();

        store.vote_post(post_id, voter.id, VoteKind::Like).unwrap();
        // like -> dislike swings the score by two steps
        let post = store
            .vote_post(post_id, voter.id, VoteKind::Dislike)
            .unwrap();
        assert_eq!(post.like_count(), 0);
        assert_eq!(post.dislike_count(), 1);
        assert_eq!(store.user(author_id).unwrap().score, -VOTE_SCORE);
    }

    #[test]
    fn test_vote_post_multiple_voters() {
        let (mut store, author_id, post_id) = store_with_post();
        let v1 = store.create_user(NewUser::new("v1", "hash", "V1")).unwrap();
        let v2 = store.create_user(NewUser::new("v2", "hash", "V2")).unwrap();

        store.vote_post(post_id, v1.id, VoteKind::Like).unwrap();
        let post = store.vote_post(post_id, v2.id, VoteKind::Dislike).unwrap();
        assert_eq!(post.like_count(), 1);
        assert_eq!(post.dislike_count(), 1);
        assert_eq!(store.user(author_id).unwrap().score, 0);
    }

    #[test]
    fn test_vote_comment_toggle() {
        let (mut store, author_id, post_id) = store_with_post();
        let comment = store.add_comment(post_id, new_comment(author_id, "c")).unwrap();
        let voter = store
            .create_user(NewUser::new("voter", "hash", "Voter"))
            .unwrap();

        let updated = store
            .vote_comment(post_id, comment.id, voter.id, VoteKind::Dislike)
            .unwrap();
        assert_eq!(updated.dislike_count(), 1);
        assert_eq!(store.user(author_id).unwrap().score, -VOTE_SCORE);

        let updated = store
            .vote_comment(post_id, comment.id, voter.id, VoteKind::Dislike)
            .unwrap();
        assert_eq!(updated.dislike_count(), 0);
        assert_eq!(store.user(author_id).unwrap().score, 0);
    }

    #[test]
    fn test_vote_on_content_with_missing_author() {
        let mut store = DataStore::new();
        let voter = store
            .create_user(NewUser::new("voter", "hash", "Voter"))
            .unwrap();
        // Author id 999 was never registered
        let post = store.create_post(new_post(999, "Orphan"));

        let updated = store.vote_post(post.id, voter.id, VoteKind::Like).unwrap();
        assert_eq!(updated.like_count(), 1);
    }

    #[test]
    fn test_profile_queries() {
        let (mut store, author_id, post_id) = store_with_post();
        let other = store
            .create_user(NewUser::new("other", "hash", "Other"))
            .unwrap();
        store.create_post(new_post(other.id, "Not mine"));
        store.add_comment(post_id, new_comment(other.id, "by other")).unwrap();
        store.add_comment(post_id, new_comment(author_id, "by me")).unwrap();

        let posts = store.posts_by_author(author_id);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, post_id);

        let comments = store.comments_by_author(author_id);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].0.content, "by me");
        assert_eq!(comments[0].1, "Hello");
    }
}
