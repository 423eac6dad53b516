//! Query and cursor command handlers.

use soupstore_core::{CursorId, QuerySpec};
use soupstore_engine::SoupStore;

use crate::bridge::validate_soup_name;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle QuerySoup command.
pub fn query_soup(store: &mut SoupStore, soup_name: String, query_spec: QuerySpec) -> Result<Output> {
    convert_result(validate_soup_name(&soup_name))?;
    let cursor = convert_result(store.query_soup(&soup_name, query_spec))?;
    Ok(Output::Cursor(cursor))
}

/// Handle RunSmartQuery command.
pub fn run_smart_query(store: &mut SoupStore, query_spec: QuerySpec) -> Result<Output> {
    let cursor = convert_result(store.run_smart_query(query_spec))?;
    Ok(Output::Cursor(cursor))
}

/// Handle MoveCursorToPageIndex command.
pub fn move_cursor_to_page_index(
    store: &mut SoupStore,
    cursor_id: CursorId,
    page_index: usize,
) -> Result<Output> {
    let cursor = convert_result(store.move_cursor_to_page_index(cursor_id, page_index))?;
    Ok(Output::Cursor(cursor))
}

/// Handle CloseCursor command.
pub fn close_cursor(store: &mut SoupStore, cursor_id: CursorId) -> Result<Output> {
    store.close_cursor(cursor_id);
    Ok(Output::Ok)
}
