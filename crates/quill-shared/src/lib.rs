//! # Quill Shared
//!
//! Wire types shared between the post service and its clients.

pub mod dto;
pub mod response;

mod bytes;

pub use response::ErrorResponse;
