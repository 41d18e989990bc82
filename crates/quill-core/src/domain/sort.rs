//! Cursor pagination options.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::Id;

/// Rejected pagination options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("One of 'first' or 'last' must be set")]
    MissingLimit,

    #[error("Only one of 'first' or 'last' may be set")]
    ConflictingLimits,

    #[error("Page size must be greater than zero")]
    ZeroLimit,
}

/// Raw pagination request.
///
/// Exactly one of `first` / `last` selects the page size and direction.
/// `before` and `after` are exclusive cursors; a nil cursor is no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub first: Option<u32>,
    pub last: Option<u32>,
    pub before: Option<Id>,
    pub after: Option<Id>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Oldest first.
    Forward,
    /// Newest first.
    Backward,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub direction: Direction,
    pub limit: u32,
    pub before: Option<Id>,
    pub after: Option<Id>,
}

impl SortOptions {
    pub fn first(n: u32) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    pub fn last(n: u32) -> Self {
        Self {
            last: Some(n),
            ..Self::default()
        }
    }

    pub fn before(mut self, cursor: Id) -> Self {
        self.before = Some(cursor);
        self
    }

    pub fn after(mut self, cursor: Id) -> Self {
        self.after = Some(cursor);
        self
    }

    /// Validate the options into a [`Page`].
    pub fn page(&self) -> Result<Page, SortError> {
        let (direction, limit) = match (self.first, self.last) {
            (Some(first), None) => (Direction::Forward, first),
            (None, Some(last)) => (Direction::Backward, last),
            (None, None) => return Err(SortError::MissingLimit),
            (Some(_), Some(_)) => return Err(SortError::ConflictingLimits),
        };

        if limit == 0 {
            return Err(SortError::ZeroLimit);
        }

        Ok(Page {
            direction,
            limit,
            before: self.before.and_then(Id::non_nil),
            after: self.after.and_then(Id::non_nil),
        })
    }
}

impl Page {
    /// Whether `id` lies strictly inside the cursor bounds.
    ///
    /// Id byte order is (creation time, payload) order.
    pub fn contains(&self, id: &Id) -> bool {
        self.before.is_none_or(|before| *id < before) && self.after.is_none_or(|after| *id > after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_is_forward() {
        let page = SortOptions::first(10).page().unwrap();
        assert_eq!(page.direction, Direction::Forward);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn test_last_is_backward() {
        let page = SortOptions::last(3).page().unwrap();
        assert_eq!(page.direction, Direction::Backward);
        assert_eq!(page.limit, 3);
    }

    #[test]
    fn test_missing_bound_is_invalid() {
        assert_eq!(SortOptions::default().page(), Err(SortError::MissingLimit));
    }

    #[test]
    fn test_both_bounds_is_invalid() {
        let sort = SortOptions {
            first: Some(1),
            last: Some(1),
            ..SortOptions::default()
        };
        assert_eq!(sort.page(), Err(SortError::ConflictingLimits));
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        assert_eq!(SortOptions::first(0).page(), Err(SortError::ZeroLimit));
        assert_eq!(SortOptions::last(0).page(), Err(SortError::ZeroLimit));
    }

    #[test]
    fn test_nil_cursor_means_no_bound() {
        let page = SortOptions::first(5)
            .before(Id::nil())
            .after(Id::nil())
            .page()
            .unwrap();

        assert_eq!(page.before, None);
        assert_eq!(page.after, None);
    }

    #[test]
    fn test_contains_is_exclusive() {
        let low = Id::from_parts(10, [0; 16]);
        let mid = Id::from_parts(20, [0; 16]);
        let high = Id::from_parts(30, [0; 16]);

        let page = SortOptions::first(5).after(low).before(high).page().unwrap();

        assert!(page.contains(&mid));
        assert!(!page.contains(&low));
        assert!(!page.contains(&high));
    }
}
