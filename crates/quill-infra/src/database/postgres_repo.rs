//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr,
};

use quill_core::Id;
use quill_core::domain::{Direction, Post, SortOptions};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_db(self) -> DbConn {
        self.db
    }
}

/// Classify a database error at the store boundary.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    let sql_err = err.sql_err();
    classify(err, sql_err)
}

/// `sql_err` is the driver-level classification of `err`, if any.
pub(crate) fn classify(err: DbErr, sql_err: Option<SqlErr>) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(msg)) = sql_err {
        return RepoError::Constraint(msg);
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        e => RepoError::Query(e.to_string()),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> Result<(), RepoError> {
        if post.id.is_nil() {
            return Err(RepoError::InvalidInput(
                "Post id must be assigned before insert".to_string(),
            ));
        }

        PostEntity::insert(post::ActiveModel::from(post))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn get(&self, id: Id) -> Result<Post, RepoError> {
        tracing::debug!(post_id = %id, "Finding post by id");

        let model = PostEntity::find_by_id(id.to_vec())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        model.try_into()
    }

    async fn update(&self, post: &Post) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Text, Expr::value(post.text.clone()))
            .col_expr(post::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(post::Column::Id.eq(post.id.to_vec()))
            .filter(post::Column::AuthorId.eq(post.author_id.to_vec()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        // Zero rows means no such post or a different author; both are
        // reported as success.
        tracing::debug!(post_id = %post.id, rows_affected = result.rows_affected, "Post updated");

        Ok(())
    }

    async fn delete(&self, id: Id, author_id: Id) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id.to_vec()))
            .filter(post::Column::AuthorId.eq(author_id.to_vec()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %id, rows_affected = result.rows_affected, "Post deleted");

        Ok(())
    }

    async fn get_posts(&self, author_id: Id, sort: &SortOptions) -> Result<Vec<Post>, RepoError> {
        let page = sort.page()?;

        let mut query = PostEntity::find().filter(post::Column::AuthorId.eq(author_id.to_vec()));

        // The id starts with its big-endian creation timestamp, so comparing
        // and ordering by id is comparing and ordering by (created_at, id).
        if let Some(before) = page.before {
            query = query.filter(post::Column::Id.lt(before.to_vec()));
        }
        if let Some(after) = page.after {
            query = query.filter(post::Column::Id.gt(after.to_vec()));
        }

        let order = match page.direction {
            Direction::Forward => Order::Asc,
            Direction::Backward => Order::Desc,
        };

        let models = query
            .order_by(post::Column::Id, order)
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(Post::try_from).collect()
    }

    async fn get_total_count(&self, author_id: Id) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id.to_vec()))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
