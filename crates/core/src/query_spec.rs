//! Query specs
//!
//! A [`QuerySpec`] describes one of five query kinds. Its JSON shape is
//! `{queryType, indexPath, matchKey, likeKey, beginKey, endKey, smartSql,
//! orderPath, order, pageSize, selectPaths}`; fields a kind does not use are
//! null.
//!
//! | Kind | Fields |
//! |------|--------|
//! | `exact` | `indexPath`, `matchKey` |
//! | `range` | `indexPath`, `beginKey`, `endKey` (null bound = unbounded) |
//! | `like` | `indexPath`, `likeKey` (`%` wildcard) |
//! | `match` | `matchKey`, optional `indexPath` |
//! | `smart` | `smartSql` |

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Page size used when a spec does not carry one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Kind of query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Typed equality on one index
    Exact,
    /// Inclusive bounds on one index
    Range,
    /// `%` wildcard pattern on one index
    Like,
    /// Full-text term matching
    Match,
    /// Supported smart SQL shapes
    Smart,
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Description of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    /// Query kind
    pub query_type: QueryType,
    /// Indexed path the query runs against
    #[serde(default)]
    pub index_path: Option<String>,
    /// Key for `exact` and term query for `match`
    #[serde(default)]
    pub match_key: Option<Value>,
    /// Pattern for `like`
    #[serde(default)]
    pub like_key: Option<String>,
    /// Lower bound for `range`
    #[serde(default)]
    pub begin_key: Option<Value>,
    /// Upper bound for `range`
    #[serde(default)]
    pub end_key: Option<Value>,
    /// SQL text for `smart`
    #[serde(default)]
    pub smart_sql: Option<String>,
    /// Sort path; defaults to `indexPath`
    #[serde(default)]
    pub order_path: Option<String>,
    /// Sort direction
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: Order,
    /// Entries per cursor page
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Paths projected into each result row instead of the whole entry
    #[serde(default)]
    pub select_paths: Option<Vec<String>>,
}

impl QuerySpec {
    fn base(query_type: QueryType, index_path: Option<String>, page_size: usize) -> Self {
        QuerySpec {
            query_type,
            index_path,
            match_key: None,
            like_key: None,
            begin_key: None,
            end_key: None,
            smart_sql: None,
            order_path: None,
            order: Order::Ascending,
            page_size: Some(page_size),
            select_paths: None,
        }
    }

    /// Every entry of the soup, ordered by `path`.
    ///
    /// This is an unbounded `range` query, so `path` need not be indexed.
    pub fn all(path: impl Into<String>, order: Order, page_size: usize) -> Self {
        Self::base(QueryType::Range, Some(path.into()), page_size).with_order(order)
    }

    /// Entries whose value at `path` equals `match_key`.
    pub fn exact(path: impl Into<String>, match_key: impl Into<Value>, page_size: usize) -> Self {
        let mut spec = Self::base(QueryType::Exact, Some(path.into()), page_size);
        spec.match_key = Some(match_key.into());
        spec
    }

    /// Entries whose value at `path` lies within `[begin_key, end_key]`.
    pub fn range(
        path: impl Into<String>,
        begin_key: Option<Value>,
        end_key: Option<Value>,
        order: Order,
        page_size: usize,
    ) -> Self {
        let mut spec = Self::base(QueryType::Range, Some(path.into()), page_size).with_order(order);
        spec.begin_key = begin_key;
        spec.end_key = end_key;
        spec
    }

    /// Entries whose value at `path` matches the `%` pattern `like_key`.
    pub fn like(
        path: impl Into<String>,
        like_key: impl Into<String>,
        order: Order,
        page_size: usize,
    ) -> Self {
        let mut spec = Self::base(QueryType::Like, Some(path.into()), page_size).with_order(order);
        spec.like_key = Some(like_key.into());
        spec
    }

    /// Full-text match of `match_key` against `path`, or against every
    /// `full_text` index when `path` is `None`.
    pub fn full_text(
        path: Option<&str>,
        match_key: impl Into<String>,
        order: Order,
        page_size: usize,
    ) -> Self {
        let mut spec =
            Self::base(QueryType::Match, path.map(str::to_string), page_size).with_order(order);
        spec.match_key = Some(Value::String(match_key.into()));
        spec
    }

    /// Smart SQL query.
    pub fn smart(smart_sql: impl Into<String>, page_size: usize) -> Self {
        let mut spec = Self::base(QueryType::Smart, None, page_size);
        spec.smart_sql = Some(smart_sql.into());
        spec
    }

    /// Set the sort direction.
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Sort by `path` instead of the index path.
    pub fn with_order_path(mut self, path: impl Into<String>) -> Self {
        self.order_path = Some(path.into());
        self
    }

    /// Return the listed paths per row instead of whole entries.
    pub fn with_select_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Path results are sorted by.
    pub fn effective_order_path(&self) -> Option<&str> {
        self.order_path
            .as_deref()
            .or(self.index_path.as_deref())
            .filter(|p| !p.is_empty())
    }
}
