//! Error type shared by the widget state machines.
//!
//! Out-of-range indices are contract violations: they are reported to the
//! caller instead of being clamped, so a bad index never silently lands on
//! a different page than the one the caller asked for.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    /// An index argument fell outside `0..count`.
    #[error("{component}: index {index} is out of range for {count} entries")]
    IndexOutOfRange {
        component: &'static str,
        index: usize,
        count: usize,
    },

    /// Grid layouts need at least one column and one row.
    #[error("grid layout needs at least one column and one row (got {cols}x{rows})")]
    InvalidGrid { cols: usize, rows: usize },

    /// Every page (or grid section) needs exactly one tab title.
    #[error("{titles} tab titles supplied for {pages} pages")]
    TitleCountMismatch { titles: usize, pages: usize },
}

pub type Result<T> = std::result::Result<T, PagerError>;

/// Fail with [`PagerError::IndexOutOfRange`] unless `index < count`.
pub(crate) fn check_index(component: &'static str, index: usize, count: usize) -> Result<()> {
    if index < count {
        return Ok(());
    }
    tracing::error!(component, index, count, "index out of range");
    Err(PagerError::IndexOutOfRange {
        component,
        index,
        count,
    })
}
