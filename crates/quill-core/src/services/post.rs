use std::sync::Arc;

use crate::domain::{Post, SortOptions};
use crate::error::{DomainError, RepoError};
use crate::id::Id;
use crate::ports::PostRepository;

/// Post use cases.
///
/// Input is validated here so that invalid requests never reach storage.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Persist a new post, assigning an id if it has none. Returns the id.
    pub async fn create(&self, mut post: Post) -> Result<Id, DomainError> {
        post.validate()?;

        if post.id.is_nil() {
            post.id = Id::new();
        }

        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Creating post");

        self.repo.create(&post).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                DomainError::Conflict(format!("Post with id {} already exists", post.id))
            }
            e => e.into(),
        })?;

        Ok(post.id)
    }

    pub async fn get(&self, id: Id) -> Result<Post, DomainError> {
        self.repo.get(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "post",
                id,
            },
            e => e.into(),
        })
    }

    /// Update a post's text. A post owned by someone else is left as is.
    pub async fn update(&self, post: Post) -> Result<(), DomainError> {
        post.validate()?;

        tracing::debug!(post_id = %post.id, author_id = %post.author_id, "Updating post");
        self.repo.update(&post).await?;

        Ok(())
    }

    /// Delete a post. Deleting a missing or foreign post is a no-op.
    pub async fn delete(&self, id: Id, author_id: Id) -> Result<(), DomainError> {
        tracing::debug!(post_id = %id, author_id = %author_id, "Deleting post");
        self.repo.delete(id, author_id).await?;

        Ok(())
    }

    pub async fn get_posts(
        &self,
        author_id: Id,
        sort: SortOptions,
    ) -> Result<Vec<Post>, DomainError> {
        // Reject bad options before touching storage.
        sort.page()?;

        let posts = self.repo.get_posts(author_id, &sort).await?;
        tracing::debug!(author_id = %author_id, count = posts.len(), "Listed posts");

        Ok(posts)
    }

    pub async fn get_total_count(&self, author_id: Id) -> Result<u64, DomainError> {
        Ok(self.repo.get_total_count(author_id).await?)
    }
}
