//! Smart SQL templates
//!
//! Smart queries are not parsed. The SQL is tried against an ordered table
//! of patterns and the first one that matches handles the query:
//!
//! | Template | Rows |
//! |----------|------|
//! | `SELECT {s:f1}, {s:f2} FROM {s} WHERE {s:f} IN ('v1', 'v2')` | `[f1, f2]` per entry |
//! | `SELECT {s:_soup} FROM {s} WHERE {s:f} LIKE 'pat' [ORDER BY LOWER({s:g})]` | `[entry]` |
//! | `SELECT count(*) FROM {s}` | `[count]` |
//! | `SELECT {s:_soup} FROM {s} WHERE {s:f} OP n [ORDER BY LOWER({s:g})]` | `[entry]` |
//!
//! Keywords are case-insensitive. Every `{soup}` reference in one statement
//! must name the same soup.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use soupstore_core::{
    compare_values, value_to_text, values_equal, EntryId, StoreError, StoreResult,
};
use tracing::{debug, warn};

use super::like_regex;
use crate::soup::Soup;
use crate::store::SoupStore;

/// Handler of one template. `None` means the statement references more than
/// one soup.
type Processor = fn(&SoupStore, &Captures<'_>) -> Option<StoreResult<Vec<Value>>>;

struct SmartTemplate {
    name: &'static str,
    pattern: Regex,
    processor: Processor,
}

static FIELD_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+):([\w.]+)\}").expect("valid regex"));

static STRING_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("valid regex"));

static TEMPLATES: Lazy<Vec<SmartTemplate>> = Lazy::new(|| {
    vec![
        SmartTemplate {
            name: "select_in",
            pattern: Regex::new(
                r"(?i)^\s*SELECT\s+(\{\w+:[\w.]+\}(?:\s*,\s*\{\w+:[\w.]+\})*)\s+FROM\s+\{(\w+)\}\s+WHERE\s+\{(\w+):([\w.]+)\}\s+IN\s+\(([^)]*)\)\s*$",
            )
            .expect("valid regex"),
            processor: select_in,
        },
        SmartTemplate {
            name: "select_like",
            pattern: Regex::new(
                r"(?i)^\s*SELECT\s+\{(\w+):_soup\}\s+FROM\s+\{(\w+)\}\s+WHERE\s+\{(\w+):([\w.]+)\}\s+LIKE\s+'([^']*)'(?:\s+ORDER\s+BY\s+LOWER\(\{(\w+):([\w.]+)\}\))?\s*$",
            )
            .expect("valid regex"),
            processor: select_like,
        },
        SmartTemplate {
            name: "count",
            pattern: Regex::new(r"(?i)^\s*SELECT\s+count\(\*\)\s+FROM\s+\{(\w+)\}\s*$")
                .expect("valid regex"),
            processor: count,
        },
        SmartTemplate {
            name: "select_compare",
            pattern: Regex::new(
                r"(?i)^\s*SELECT\s+\{(\w+):_soup\}\s+FROM\s+\{(\w+)\}\s+WHERE\s+\{(\w+):([\w.]+)\}\s*(<=|>=|!=|=|<|>)\s*(-?\d+)(?:\s+ORDER\s+BY\s+LOWER\(\{(\w+):([\w.]+)\}\))?\s*$",
            )
            .expect("valid regex"),
            processor: select_compare,
        },
    ]
});

impl SoupStore {
    /// Run a smart SQL statement against the first template it matches.
    pub(crate) fn run_smart_sql(&self, sql: &str) -> StoreResult<Vec<Value>> {
        let Some((template, captures)) = TEMPLATES
            .iter()
            .find_map(|template| template.pattern.captures(sql).map(|c| (template, c)))
        else {
            warn!(target: "soupstore::query", sql, "No smart query template matches");
            return Err(StoreError::unsupported_query(sql));
        };

        match (template.processor)(self, &captures) {
            Some(Ok(rows)) => {
                debug!(
                    target: "soupstore::query",
                    template = template.name,
                    rows = rows.len(),
                    "Smart query executed"
                );
                Ok(rows)
            }
            Some(Err(e)) => {
                warn!(target: "soupstore::query", template = template.name, sql, error = %e, "Smart query failed");
                Err(e)
            }
            None => {
                warn!(target: "soupstore::query", template = template.name, sql, "Smart query mixes soups");
                Err(StoreError::unsupported_query(sql))
            }
        }
    }
}

/// The single soup name a statement references, if all references agree.
fn same_soup<'a>(names: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    let mut found: Option<&str> = None;
    for name in names.into_iter().flatten() {
        match found {
            Some(existing) if existing != name => return None,
            _ => found = Some(name),
        }
    }
    found
}

fn group<'a>(captures: &Captures<'a>, index: usize) -> Option<&'a str> {
    captures.get(index).map(|m| m.as_str())
}

/// Ids ordered by the lowercased text of `path`, or id order without one.
fn order_by_lower(soup: &Soup, mut ids: Vec<EntryId>, path: Option<&str>) -> StoreResult<Vec<EntryId>> {
    if let Some(path) = path {
        soup.check_index(path)?;
        ids.sort_by_cached_key(|id| value_to_text(&soup.sort_key(*id, path)).to_lowercase());
    }
    Ok(ids)
}

fn document_rows(soup: &Soup, ids: &[EntryId]) -> Vec<Value> {
    ids.iter()
        .filter_map(|id| soup.get(*id).cloned())
        .map(|entry| Value::Array(vec![entry]))
        .collect()
}

fn select_in(store: &SoupStore, captures: &Captures<'_>) -> Option<StoreResult<Vec<Value>>> {
    let selected: Vec<(&str, &str)> = FIELD_REF
        .captures_iter(group(captures, 1)?)
        .filter_map(|c| Some((group(&c, 1)?, group(&c, 2)?)))
        .collect();
    let soup_name = same_soup(
        selected
            .iter()
            .map(|(soup, _)| Some(*soup))
            .chain([group(captures, 2), group(captures, 3)]),
    )?;
    let where_path = group(captures, 4)?;
    let literals = group(captures, 5)?;

    let run = || -> StoreResult<Vec<Value>> {
        let soup = store.soup(soup_name)?;
        soup.check_index(where_path)?;
        for (_, path) in &selected {
            soup.check_index(path)?;
        }

        let wanted: Vec<Value> = STRING_LITERAL
            .captures_iter(literals)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)))
            .map(|m| soup.coerce_key(where_path, Value::String(m.as_str().to_string())))
            .collect();

        Ok(soup
            .entry_ids()
            .filter(|id| {
                let value = soup.indexed_value(*id, where_path);
                wanted.iter().any(|w| values_equal(&value, w))
            })
            .map(|id| {
                Value::Array(
                    selected
                        .iter()
                        .map(|(_, path)| soup.indexed_value(id, path).into_owned())
                        .collect(),
                )
            })
            .collect())
    };
    Some(run())
}

fn select_like(store: &SoupStore, captures: &Captures<'_>) -> Option<StoreResult<Vec<Value>>> {
    let soup_name = same_soup([
        group(captures, 1),
        group(captures, 2),
        group(captures, 3),
        group(captures, 6),
    ])?;
    let where_path = group(captures, 4)?;
    let pattern = group(captures, 5)?;
    let order_path = group(captures, 7);

    let run = || -> StoreResult<Vec<Value>> {
        let soup = store.soup(soup_name)?;
        soup.check_index(where_path)?;
        let pattern = like_regex(pattern)?;
        let ids = soup
            .entry_ids()
            .filter(|id| {
                let value = soup.indexed_value(*id, where_path);
                !value.is_null() && pattern.is_match(&value_to_text(&value))
            })
            .collect();
        let ids = order_by_lower(soup, ids, order_path)?;
        Ok(document_rows(soup, &ids))
    };
    Some(run())
}

fn count(store: &SoupStore, captures: &Captures<'_>) -> Option<StoreResult<Vec<Value>>> {
    let soup_name = group(captures, 1)?;
    Some(
        store
            .soup(soup_name)
            .map(|soup| vec![Value::Array(vec![Value::from(soup.len())])]),
    )
}

fn select_compare(store: &SoupStore, captures: &Captures<'_>) -> Option<StoreResult<Vec<Value>>> {
    let soup_name = same_soup([
        group(captures, 1),
        group(captures, 2),
        group(captures, 3),
        group(captures, 7),
    ])?;
    let where_path = group(captures, 4)?;
    let op = group(captures, 5)?;
    let operand = Value::from(group(captures, 6)?.parse::<i64>().ok()?);
    let order_path = group(captures, 8);

    let run = || -> StoreResult<Vec<Value>> {
        let soup = store.soup(soup_name)?;
        soup.check_index(where_path)?;
        let ids = soup
            .entry_ids()
            .filter(|id| {
                let ordering = compare_values(&soup.indexed_value(*id, where_path), &operand);
                match (op, ordering) {
                    (_, None) => false,
                    ("=", Some(o)) => o == Ordering::Equal,
                    ("!=", Some(o)) => o != Ordering::Equal,
                    ("<", Some(o)) => o == Ordering::Less,
                    ("<=", Some(o)) => o != Ordering::Greater,
                    (">", Some(o)) => o == Ordering::Greater,
                    (">=", Some(o)) => o != Ordering::Less,
                    _ => false,
                }
            })
            .collect();
        let ids = order_by_lower(soup, ids, order_path)?;
        Ok(document_rows(soup, &ids))
    };
    Some(run())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_soup() {
        assert_eq!(same_soup([Some("a"), Some("a"), None]), Some("a"));
        assert_eq!(same_soup([Some("a"), Some("b")]), None);
    }

    #[test]
    fn test_templates_match_case_insensitively() {
        let sql = "select count(*) from {employees}";
        assert!(TEMPLATES[2].pattern.is_match(sql));

        let sql = "SELECT {e:_soup} FROM {e} WHERE {e:age} >= 30 order by lower({e:name})";
        let captures = TEMPLATES[3].pattern.captures(sql).unwrap();
        assert_eq!(&captures[5], ">=");
        assert_eq!(&captures[6], "30");
        assert_eq!(&captures[8], "name");
    }

    #[test]
    fn test_select_list_field_refs() {
        let sql = "SELECT {e:id}, {e:name} FROM {e} WHERE {e:id} IN ('1', \"2\")";
        let captures = TEMPLATES[0].pattern.captures(sql).unwrap();
        let refs: Vec<String> = FIELD_REF
            .captures_iter(&captures[1])
            .map(|c| c[2].to_string())
            .collect();
        assert_eq!(refs, vec!["id", "name"]);
        assert_eq!(STRING_LITERAL.captures_iter(&captures[5]).count(), 2);
    }

    #[test]
    fn test_soup_placeholder_is_not_a_field() {
        assert!(TEMPLATES[1]
            .pattern
            .is_match("SELECT {e:_soup} FROM {e} WHERE {e:name} LIKE 'A%'"));
        assert!(TEMPLATES[1]
            .pattern
            .captures("SELECT {e:_soup} FROM {e} WHERE {e:name} LIKE 'A%'")
            .unwrap()
            .get(7)
            .is_none());
    }
}
