//! Query evaluation
//!
//! Every query is a full scan of the soup's indexed data followed by a
//! stable sort. Rows are owned clones of the stored entries, or arrays of
//! indexed values when the query lists `selectPaths`.

mod smart;

use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use soupstore_core::{
    compare_values, sort_cmp, value_to_text, values_equal, EntryId, IndexType, Order, QuerySpec,
    QueryType, StoreError, StoreResult,
};
use soupstore_search::FullTextQuery;
use tracing::debug;

use crate::soup::Soup;
use crate::store::SoupStore;

impl SoupStore {
    /// Every row a query produces, in query order.
    ///
    /// `soup_name` is required for all kinds except `smart`, which names its
    /// soups in the SQL.
    pub fn execute_query(&self, soup_name: Option<&str>, spec: &QuerySpec) -> StoreResult<Vec<Value>> {
        if spec.query_type == QueryType::Smart {
            let sql = spec
                .smart_sql
                .as_deref()
                .ok_or_else(|| StoreError::malformed("smart query without smartSql"))?;
            return self.run_smart_sql(sql);
        }

        let soup_name =
            soup_name.ok_or_else(|| StoreError::malformed("query without a soup name"))?;
        let soup = self.soup(soup_name)?;
        let mut ids = matching_ids(soup, spec)?;
        sort_ids(soup, &mut ids, spec);

        let rows = match &spec.select_paths {
            Some(paths) => {
                for path in paths {
                    soup.check_index(path)?;
                }
                ids.iter()
                    .map(|id| {
                        Value::Array(
                            paths
                                .iter()
                                .map(|path| soup.indexed_value(*id, path).into_owned())
                                .collect(),
                        )
                    })
                    .collect()
            }
            None => ids
                .iter()
                .filter_map(|id| soup.get(*id).cloned())
                .collect::<Vec<_>>(),
        };

        debug!(
            target: "soupstore::query",
            soup = soup_name,
            query_type = ?spec.query_type,
            index_path = spec.index_path.as_deref().unwrap_or(""),
            matches = rows.len(),
            "Query executed"
        );
        Ok(rows)
    }
}

fn index_path(spec: &QuerySpec) -> StoreResult<&str> {
    spec.index_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .ok_or_else(|| StoreError::malformed("query without indexPath"))
}

fn matching_ids(soup: &Soup, spec: &QuerySpec) -> StoreResult<Vec<EntryId>> {
    match spec.query_type {
        QueryType::Exact => {
            let path = index_path(spec)?;
            soup.check_index(path)?;
            let key = soup.coerce_key(path, spec.match_key.clone().unwrap_or(Value::Null));
            Ok(soup.ids_matching(path, &key))
        }
        QueryType::Range => {
            if spec.begin_key.is_none() && spec.end_key.is_none() {
                return Ok(soup.entry_ids().collect());
            }
            let path = index_path(spec)?;
            soup.check_index(path)?;
            let begin = spec.begin_key.clone().map(|key| soup.coerce_key(path, key));
            let end = spec.end_key.clone().map(|key| soup.coerce_key(path, key));
            Ok(soup
                .entry_ids()
                .filter(|id| in_range(&soup.indexed_value(*id, path), begin.as_ref(), end.as_ref()))
                .collect())
        }
        QueryType::Like => {
            let path = index_path(spec)?;
            soup.check_index(path)?;
            let pattern = like_regex(spec.like_key.as_deref().unwrap_or(""))?;
            Ok(soup
                .entry_ids()
                .filter(|id| {
                    let value = soup.indexed_value(*id, path);
                    !value.is_null() && pattern.is_match(&value_to_text(&value))
                })
                .collect())
        }
        QueryType::Match => {
            let path = spec.index_path.as_deref().filter(|path| !path.is_empty());
            if let Some(path) = path {
                soup.check_index(path)?;
            }
            let query = FullTextQuery::parse(
                &spec
                    .match_key
                    .as_ref()
                    .map(value_to_text)
                    .unwrap_or_default(),
            );
            Ok(soup
                .entry_ids()
                .filter(|id| query.matches(&full_text_candidate(soup, *id, path)))
                .collect())
        }
        QueryType::Smart => Err(StoreError::malformed(
            "smart queries are run through runSmartQuery",
        )),
    }
}

fn in_range(value: &Value, begin: Option<&Value>, end: Option<&Value>) -> bool {
    let above = begin.map_or(true, |begin| {
        matches!(
            compare_values(value, begin),
            Some(Ordering::Greater | Ordering::Equal)
        )
    });
    let below = end.map_or(true, |end| {
        matches!(
            compare_values(value, end),
            Some(Ordering::Less | Ordering::Equal)
        )
    });
    above && below
}

/// Case-insensitive regex matching `key` from the start of the text, with
/// `%` standing for any run of characters.
pub(crate) fn like_regex(key: &str) -> StoreResult<Regex> {
    let body = key
        .split('%')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    RegexBuilder::new(&format!("^{}", body))
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| StoreError::malformed(format!("invalid like key '{}': {}", key, e)))
}

/// Text a full-text query is matched against: one field, or every
/// `full_text` index joined with spaces.
fn full_text_candidate(soup: &Soup, id: EntryId, path: Option<&str>) -> String {
    match path {
        Some(path) => value_to_text(&soup.indexed_value(id, path)),
        None => soup
            .index_specs()
            .iter()
            .filter(|spec| spec.index_type == IndexType::FullText)
            .map(|spec| value_to_text(&soup.indexed_value(id, &spec.path)))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn sort_ids(soup: &Soup, ids: &mut Vec<EntryId>, spec: &QuerySpec) {
    let Some(path) = spec.effective_order_path() else {
        return;
    };
    let mut keyed: Vec<(Value, EntryId)> = ids
        .iter()
        .map(|id| (soup.sort_key(*id, path), *id))
        .collect();
    match spec.order {
        Order::Ascending => keyed.sort_by(|a, b| sort_cmp(&a.0, &b.0)),
        Order::Descending => keyed.sort_by(|a, b| sort_cmp(&b.0, &a.0)),
    }
    *ids = keyed.into_iter().map(|(_, id)| id).collect();
}
