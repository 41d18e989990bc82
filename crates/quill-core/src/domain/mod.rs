//! Domain entities - the core business objects.

mod post;
mod sort;

pub use post::{MAX_TEXT_LEN, Post};
pub use sort::{Direction, Page, SortError, SortOptions};
