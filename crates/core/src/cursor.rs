//! Cursor shape returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of an open cursor. Allocated from a store-wide counter
/// starting at 1.
pub type CursorId = u64;

/// One page of a query result.
///
/// JSON shape: `{cursorId, pageSize, currentPageIndex,
/// currentPageOrderedEntries, totalPages, totalEntries}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorView {
    /// Cursor id, used to page or close
    pub cursor_id: CursorId,
    /// Entries per page
    pub page_size: usize,
    /// 0-based index of the current page
    pub current_page_index: usize,
    /// Entries (or rows) of the current page, in query order
    pub current_page_ordered_entries: Vec<Value>,
    /// `ceil(total_entries / page_size)`
    pub total_pages: usize,
    /// Number of matches of the query when the page was computed
    pub total_entries: usize,
}
