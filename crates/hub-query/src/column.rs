//! Declarative column descriptors.
//!
//! A column names a facet of an item. Every behavior is an optional
//! function field; absent fields fall back to the defaults below rather
//! than to any inspection of the item.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::value::{CellValue, compare_cells};

pub type GetFn<T> = dyn Fn(&T) -> Option<CellValue> + Send + Sync;
pub type SortFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;
pub type MatchFn<T> = dyn Fn(&T, &str) -> bool + Send + Sync;

/// One entry of a column's discrete filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Column descriptor over items of type `T`.
pub struct Column<T> {
    pub id: &'static str,
    pub label: &'static str,
    pub hidable: bool,
    get: Option<Arc<GetFn<T>>>,
    sort: Option<Arc<SortFn<T>>>,
    filter_options: Vec<FilterOption>,
    matches: Option<Arc<MatchFn<T>>>,
}

impl<T> Column<T> {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            hidable: false,
            get: None,
            sort: None,
            filter_options: Vec::new(),
            matches: None,
        }
    }

    /// Allows the user to hide this column.
    pub fn hidable(mut self) -> Self {
        self.hidable = true;
        self
    }

    pub fn with_get(mut self, get: impl Fn(&T) -> Option<CellValue> + Send + Sync + 'static) -> Self {
        self.get = Some(Arc::new(get));
        self
    }

    pub fn with_sort(mut self, sort: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        self.sort = Some(Arc::new(sort));
        self
    }

    pub fn with_filter_options(mut self, options: impl IntoIterator<Item = FilterOption>) -> Self {
        self.filter_options = options.into_iter().collect();
        self
    }

    pub fn with_matches(mut self, matches: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.matches = Some(Arc::new(matches));
        self
    }

    /// Accessor output, `None` for columns without an accessor.
    pub fn value(&self, item: &T) -> Option<CellValue> {
        self.get.as_ref().and_then(|get| get(item))
    }

    /// Custom comparator, else the default comparator on accessor output.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match &self.sort {
            Some(sort) => sort(a, b),
            None => compare_cells(self.value(a).as_ref(), self.value(b).as_ref()),
        }
    }

    /// Custom predicate, else exact match on the accessor's filter key.
    /// Missing values never match.
    pub fn matches_filter(&self, item: &T, value: &str) -> bool {
        match &self.matches {
            Some(matches) => matches(item, value),
            None => self
                .value(item)
                .is_some_and(|cell| cell.filter_key() == value),
        }
    }

    pub fn filter_options(&self) -> &[FilterOption] {
        &self.filter_options
    }

    pub fn is_filterable(&self) -> bool {
        !self.filter_options.is_empty()
    }

    pub fn is_sortable(&self) -> bool {
        self.sort.is_some() || self.get.is_some()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label,
            hidable: self.hidable,
            get: self.get.clone(),
            sort: self.sort.clone(),
            filter_options: self.filter_options.clone(),
            matches: self.matches.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("hidable", &self.hidable)
            .field("filter_options", &self.filter_options)
            .finish_non_exhaustive()
    }
}

/// Finds a column by id.
pub fn find_column<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.id == id)
}
