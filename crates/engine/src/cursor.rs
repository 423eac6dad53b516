//! Paged cursors over query results
//!
//! A cursor keeps its query spec, not a result snapshot. Every page move
//! re-runs the query, so totals and page contents follow writes made since
//! the cursor was opened.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use soupstore_core::{CursorId, CursorView, QuerySpec, QueryType, StoreError, StoreResult};
use tracing::debug;

use crate::store::SoupStore;

/// Stored cursor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    /// Cursor id
    pub cursor_id: CursorId,
    /// Soup queried; `None` for smart queries
    pub soup_name: Option<String>,
    /// Query re-run on every page move
    pub query_spec: QuerySpec,
    /// Entries per page
    pub page_size: usize,
    /// 0-based index of the current page
    pub current_page_index: usize,
    /// Rows of the current page
    pub current_page_ordered_entries: Vec<Value>,
    /// Page count at the last evaluation
    pub total_pages: usize,
    /// Match count at the last evaluation
    pub total_entries: usize,
}

impl Cursor {
    /// Caller-facing view of the current page
    pub fn view(&self) -> CursorView {
        CursorView {
            cursor_id: self.cursor_id,
            page_size: self.page_size,
            current_page_index: self.current_page_index,
            current_page_ordered_entries: self.current_page_ordered_entries.clone(),
            total_pages: self.total_pages,
            total_entries: self.total_entries,
        }
    }

    /// Recompute totals from `rows` and slice out `page_index`.
    fn fill(&mut self, rows: Vec<Value>, page_index: usize) {
        self.total_entries = rows.len();
        self.total_pages =
            rows.len() / self.page_size + usize::from(rows.len() % self.page_size != 0);
        self.current_page_index = page_index;
        let start = page_index.saturating_mul(self.page_size);
        self.current_page_ordered_entries = rows
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect();
    }
}

impl SoupStore {
    fn page_size_of(&self, spec: &QuerySpec) -> StoreResult<usize> {
        match spec.page_size {
            Some(0) => Err(StoreError::malformed("pageSize must be at least 1")),
            Some(size) => Ok(size),
            None => Ok(self.default_page_size),
        }
    }

    fn open_cursor(&mut self, soup_name: Option<&str>, query_spec: QuerySpec) -> StoreResult<CursorView> {
        let page_size = self.page_size_of(&query_spec)?;
        let rows = self.execute_query(soup_name, &query_spec)?;

        let cursor_id = self.next_cursor_id;
        self.next_cursor_id = cursor_id
            .checked_add(1)
            .ok_or_else(|| StoreError::malformed("cursor ids are exhausted"))?;
        let mut cursor = Cursor {
            cursor_id,
            soup_name: soup_name.map(str::to_string),
            query_spec,
            page_size,
            current_page_index: 0,
            current_page_ordered_entries: Vec::new(),
            total_pages: 0,
            total_entries: 0,
        };
        cursor.fill(rows, 0);
        debug!(
            target: "soupstore::cursor",
            cursor_id,
            soup = soup_name.unwrap_or(""),
            total_entries = cursor.total_entries,
            total_pages = cursor.total_pages,
            "Cursor opened"
        );

        let view = cursor.view();
        self.cursors.insert(cursor_id, cursor);
        Ok(view)
    }

    /// Run a query and open a cursor on its first page.
    pub fn query_soup(&mut self, soup_name: &str, query_spec: QuerySpec) -> StoreResult<CursorView> {
        self.open_cursor(Some(soup_name), query_spec)
    }

    /// Run a smart query and open a cursor on its first page.
    pub fn run_smart_query(&mut self, query_spec: QuerySpec) -> StoreResult<CursorView> {
        if query_spec.query_type != QueryType::Smart {
            return Err(StoreError::malformed(format!(
                "runSmartQuery requires a smart query spec, got {:?}",
                query_spec.query_type
            )));
        }
        self.open_cursor(None, query_spec)
    }

    /// Re-run a cursor's query and move it to `page_index`.
    ///
    /// Pages past the end are empty.
    pub fn move_cursor_to_page_index(
        &mut self,
        cursor_id: CursorId,
        page_index: usize,
    ) -> StoreResult<CursorView> {
        let (soup_name, query_spec) = {
            let cursor = self
                .cursors
                .get(&cursor_id)
                .ok_or(StoreError::CursorNotFound { cursor_id })?;
            (cursor.soup_name.clone(), cursor.query_spec.clone())
        };
        let rows = self.execute_query(soup_name.as_deref(), &query_spec)?;

        let cursor = self
            .cursors
            .get_mut(&cursor_id)
            .ok_or(StoreError::CursorNotFound { cursor_id })?;
        cursor.fill(rows, page_index);
        debug!(
            target: "soupstore::cursor",
            cursor_id,
            page_index,
            rows = cursor.current_page_ordered_entries.len(),
            "Cursor moved"
        );
        Ok(cursor.view())
    }

    /// Drop a cursor. Closing an unknown cursor is a no-op.
    pub fn close_cursor(&mut self, cursor_id: CursorId) {
        if self.cursors.remove(&cursor_id).is_some() {
            debug!(target: "soupstore::cursor", cursor_id, "Cursor closed");
        }
    }

    /// Number of open cursors
    pub fn open_cursor_count(&self) -> usize {
        self.cursors.len()
    }
}
