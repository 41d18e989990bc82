//! Application services - orchestrate validation and ports.

mod post;

pub use post::PostService;
