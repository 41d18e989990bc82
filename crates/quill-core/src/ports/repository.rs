use async_trait::async_trait;

use crate::domain::{Post, SortOptions};
use crate::error::RepoError;
use crate::id::Id;

/// Post storage.
///
/// Mutations are scoped by author: `update` and `delete` only touch a row
/// whose `author_id` matches, and report success when nothing matched.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post. The id must already be assigned.
    async fn create(&self, post: &Post) -> Result<(), RepoError>;

    /// Fetch a post by id, `RepoError::NotFound` if absent.
    async fn get(&self, id: Id) -> Result<Post, RepoError>;

    /// Replace the text and stamp `updated_at`.
    async fn update(&self, post: &Post) -> Result<(), RepoError>;

    async fn delete(&self, id: Id, author_id: Id) -> Result<(), RepoError>;

    /// One page of an author's posts, in the requested direction.
    async fn get_posts(&self, author_id: Id, sort: &SortOptions) -> Result<Vec<Post>, RepoError>;

    async fn get_total_count(&self, author_id: Id) -> Result<u64, RepoError>;
}
