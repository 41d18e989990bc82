//! Data Transfer Objects - request/response types for the post RPC API.
//!
//! Identifier fields carry the raw 20-byte id, base64 encoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    #[serde(with = "crate::bytes")]
    pub id: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostRequest {
    #[serde(with = "crate::bytes")]
    pub id: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostResponse {
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Pagination options. Exactly one of `first` / `last` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last: Option<u32>,
    #[serde(
        with = "crate::bytes::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub before: Option<Vec<u8>>,
    #[serde(
        with = "crate::bytes::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub after: Option<Vec<u8>>,
}

/// Request for one page of an author's posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostsRequest {
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
    #[serde(default)]
    pub sort: SortRequest,
}

/// A post as listed for its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostItem {
    #[serde(with = "crate::bytes")]
    pub id: Vec<u8>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostsResponse {
    pub posts: Vec<PostItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTotalCountRequest {
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTotalCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostRequest {
    #[serde(with = "crate::bytes")]
    pub id: Vec<u8>,
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(with = "crate::bytes")]
    pub id: Vec<u8>,
    #[serde(with = "crate::bytes")]
    pub author_id: Vec<u8>,
    pub text: String,
}

/// Empty body returned by mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}
