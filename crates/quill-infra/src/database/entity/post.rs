//! Post entity for SeaORM.
//!
//! Identifiers are stored as 20-byte `BYTEA`. Creation time lives in the id,
//! so only `updated_at` is a timestamp column.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::Id;
use quill_core::domain::Post;
use quill_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Vec<u8>,
    pub author_id: Vec<u8>,
    #[sea_orm(column_type = "String(StringLen::N(500))")]
    pub text: String,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
///
/// Fails if a stored identifier does not have the expected width.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Id::from_bytes(&model.id)
            .map_err(|e| RepoError::Query(format!("Malformed post id: {}", e)))?;
        let author_id = Id::from_bytes(&model.author_id)
            .map_err(|e| RepoError::Query(format!("Malformed author id: {}", e)))?;

        Ok(Self {
            id,
            author_id,
            text: model.text,
            updated_at: model.updated_at.map(Into::into),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<&Post> for ActiveModel {
    fn from(post: &Post) -> Self {
        Self {
            id: Set(post.id.to_vec()),
            author_id: Set(post.author_id.to_vec()),
            text: Set(post.text.clone()),
            updated_at: Set(post.updated_at.map(Into::into)),
        }
    }
}
