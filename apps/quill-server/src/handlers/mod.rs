//! HTTP handlers and route configuration.

mod health;
mod post;

use actix_web::{HttpResponse, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// Post RPCs are `POST /api/v1/post/<Method>` with JSON bodies.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/v1/post")
                    .route("/CreatePost", web::post().to(post::create_post))
                    .route("/GetPost", web::post().to(post::get_post))
                    .route("/GetPosts", web::post().to(post::get_posts))
                    .route("/GetTotalCount", web::post().to(post::get_total_count))
                    .route("/DeletePost", web::post().to(post::delete_post))
                    .route("/UpdatePost", web::post().to(post::update_post)),
            ),
    );
}

/// Undecodable bodies (bad JSON, bad base64) are client input errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::from_error(AppError::BadRequest(detail)),
        )
        .into()
    })
}
