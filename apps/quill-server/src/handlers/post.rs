//! Post RPC handlers.

use actix_web::{HttpResponse, web};

use quill_core::Id;
use quill_core::domain::{Post, SortOptions};
use quill_shared::dto::{
    CreatePostRequest, CreatePostResponse, DeletePostRequest, Empty, GetPostRequest,
    GetPostResponse, GetPostsRequest, GetPostsResponse, GetTotalCountRequest,
    GetTotalCountResponse, PostItem, SortRequest, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn decode_id(bytes: Vec<u8>, field: &str) -> AppResult<Id> {
    Id::try_from(bytes).map_err(|e| AppError::BadRequest(format!("Invalid '{}': {}", field, e)))
}

/// Absent, empty and nil cursors all mean "no bound".
fn decode_cursor(bytes: Option<Vec<u8>>, field: &str) -> AppResult<Option<Id>> {
    match bytes {
        None => Ok(None),
        Some(b) if b.is_empty() => Ok(None),
        Some(b) => Ok(decode_id(b, field)?.non_nil()),
    }
}

fn sort_options(sort: SortRequest) -> AppResult<SortOptions> {
    Ok(SortOptions {
        first: sort.first,
        last: sort.last,
        before: decode_cursor(sort.before, "before")?,
        after: decode_cursor(sort.after, "after")?,
    })
}

/// POST /api/v1/post/CreatePost
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let author_id = decode_id(req.author_id, "author_id")?;

    let id = state.posts.create(Post::new(author_id, req.text)).await?;

    Ok(HttpResponse::Ok().json(CreatePostResponse { id: id.to_vec() }))
}

/// POST /api/v1/post/GetPost
pub async fn get_post(
    state: web::Data<AppState>,
    body: web::Json<GetPostRequest>,
) -> AppResult<HttpResponse> {
    let id = decode_id(body.into_inner().id, "id")?;
    let post = state.posts.get(id).await?;

    Ok(HttpResponse::Ok().json(GetPostResponse {
        author_id: post.author_id.to_vec(),
        text: post.text,
        updated_at: post.updated_at,
    }))
}

/// POST /api/v1/post/GetPosts
pub async fn get_posts(
    state: web::Data<AppState>,
    body: web::Json<GetPostsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let author_id = decode_id(req.author_id, "author_id")?;
    let sort = sort_options(req.sort)?;

    let posts = state
        .posts
        .get_posts(author_id, sort)
        .await?
        .into_iter()
        .map(|p| PostItem {
            id: p.id.to_vec(),
            text: p.text,
            updated_at: p.updated_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(GetPostsResponse { posts }))
}

/// POST /api/v1/post/GetTotalCount
pub async fn get_total_count(
    state: web::Data<AppState>,
    body: web::Json<GetTotalCountRequest>,
) -> AppResult<HttpResponse> {
    let author_id = decode_id(body.into_inner().author_id, "author_id")?;
    let count = state.posts.get_total_count(author_id).await?;

    Ok(HttpResponse::Ok().json(GetTotalCountResponse { count }))
}

/// POST /api/v1/post/DeletePost
pub async fn delete_post(
    state: web::Data<AppState>,
    body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = decode_id(req.id, "id")?;
    let author_id = decode_id(req.author_id, "author_id")?;

    state.posts.delete(id, author_id).await?;

    Ok(HttpResponse::Ok().json(Empty {}))
}

/// POST /api/v1/post/UpdatePost
pub async fn update_post(
    state: web::Data<AppState>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = Post {
        id: decode_id(req.id, "id")?,
        author_id: decode_id(req.author_id, "author_id")?,
        text: req.text,
        updated_at: None,
    };

    state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(Empty {}))
}
