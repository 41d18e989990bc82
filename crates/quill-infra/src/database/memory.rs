//! In-memory post repository - used when no database is configured and as
//! the store double in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::Id;
use quill_core::domain::{Direction, Post, SortOptions};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// Posts keyed by id in a `BTreeMap`, so iteration is creation order.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<BTreeMap<Id, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<(), RepoError> {
        if post.id.is_nil() {
            return Err(RepoError::InvalidInput(
                "Post id must be assigned before insert".to_string(),
            ));
        }

        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint: id {}",
                post.id
            )));
        }
        store.insert(post.id, post.clone());

        Ok(())
    }

    async fn get(&self, id: Id) -> Result<Post, RepoError> {
        let store = self.store.read().await;
        store.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if let Some(existing) = store
            .get_mut(&post.id)
            .filter(|existing| existing.author_id == post.author_id)
        {
            existing.text = post.text.clone();
            existing.updated_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn delete(&self, id: Id, author_id: Id) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if store.get(&id).is_some_and(|p| p.author_id == author_id) {
            store.remove(&id);
        }

        Ok(())
    }

    async fn get_posts(&self, author_id: Id, sort: &SortOptions) -> Result<Vec<Post>, RepoError> {
        let page = sort.page()?;
        let store = self.store.read().await;

        let matching = store
            .values()
            .filter(|p| p.author_id == author_id && page.contains(&p.id));
        let limit = page.limit as usize;

        let posts = match page.direction {
            Direction::Forward => matching.take(limit).cloned().collect(),
            Direction::Backward => matching.rev().take(limit).cloned().collect(),
        };

        Ok(posts)
    }

    async fn get_total_count(&self, author_id: Id) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| p.author_id == author_id).count() as u64)
    }
}
