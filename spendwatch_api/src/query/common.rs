//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields,
//! [`SortDirection`] and the PostgREST filter operators in [`FilterOp`].

use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for row limits and sort direction.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Caps the number of rows the backend returns.
    fn with_limit(mut self, limit: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().limit = Some(limit);
        self
    }

    /// Sets the sort direction used by the query's `order` clause.
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first). This is the default.
    #[default]
    Asc,
    /// Descending order (newest/largest first).
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// PostgREST horizontal filter operators. Rendered as `column=<op>.<value>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    /// Formats the right-hand side of a filter pair, e.g. `gte.2025-12-01`.
    pub fn apply(&self, value: &str) -> String {
        format!("{}.{}", self, value)
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Eq => write!(f, "eq"),
            FilterOp::Gte => write!(f, "gte"),
            FilterOp::Lte => write!(f, "lte"),
        }
    }
}

/// Fields shared by all query types: row limit and sort direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryCommon {
    /// Maximum rows to return. `None` uses the backend default.
    pub limit: Option<i64>,
    /// Sort direction. Defaults to ascending.
    pub sort_direction: SortDirection,
}

impl QueryCommon {
    /// Appends the common parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(limit) = self.limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        };
        url
    }
}
