//! Filter-then-sort over a borrowed collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::{Column, find_column};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Column id → selected filter value. Empty values impose no constraint.
pub type FilterState = BTreeMap<String, String>;

/// Replaces the default search: `(item, filter, search) -> keep`.
pub type CustomFilterFn<T> = dyn Fn(&T, &FilterState, &str) -> bool + Send + Sync;

/// Returns the items that pass the search and filters, sorted.
///
/// - `custom_filter`, when given, decides the search. Otherwise an item
///   matches when any column's text contains `search`, ignoring case.
/// - Each non-empty filter value applies its column's predicate. Values
///   for unknown column ids are ignored.
/// - Sorting is stable. Without a sort, or with an unknown column, the
///   input order is kept. `Desc` reverses the column comparator.
pub fn query<'a, T>(
    items: &'a [T],
    columns: &[Column<T>],
    custom_filter: Option<&CustomFilterFn<T>>,
    filter: &FilterState,
    sort: Option<&SortState>,
    search: &str,
) -> Vec<&'a T> {
    let needle = search.trim().to_lowercase();
    let active: Vec<(&Column<T>, &str)> = filter
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(id, value)| find_column(columns, id).map(|c| (c, value.as_str())))
        .collect();

    let mut result: Vec<&'a T> = items
        .iter()
        .filter(|item| match custom_filter {
            Some(custom) => custom(*item, filter, search),
            None => default_search(*item, columns, &needle),
        })
        .filter(|item| {
            active
                .iter()
                .all(|(col, value)| col.matches_filter(*item, value))
        })
        .collect();

    if let Some(sort) = sort
        && let Some(column) = find_column(columns, &sort.column_id)
    {
        result.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    result
}

/// Case-insensitive substring match against every column's text.
/// `needle` must already be lowercase.
fn default_search<T>(item: &T, columns: &[Column<T>], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    columns.iter().any(|col| {
        col.value(item)
            .is_some_and(|cell| cell.to_string().to_lowercase().contains(needle))
    })
}

/// Case-insensitive substring match of `search` in any of `fields`.
/// An empty search matches everything.
pub fn includes_one_of(search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}
