//! List view state persisted through a [`PreferenceStore`].
//!
//! A view stores its sort, filter and search under its key, and its hidden
//! column ids under `<key>-hidden-columns`. A new view built with the same
//! key and store picks both up again.

use std::sync::Arc;

use gamepal_hub_settings::PreferenceStore;
use gamepal_hub_settings::preferences::{load, save};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::column::{Column, find_column};
use crate::query::{CustomFilterFn, FilterState, SortDirection, SortState, query};

/// Everything a list view persists besides hidden columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListState {
    pub sort: Option<SortState>,
    pub filter: FilterState,
    pub search: String,
}

pub struct ListView<T> {
    key: String,
    columns: Vec<Column<T>>,
    custom_filter: Option<Arc<CustomFilterFn<T>>>,
    store: Arc<dyn PreferenceStore>,
    state: ListState,
    hidden: Vec<String>,
}

impl<T> ListView<T> {
    /// Builds a view and restores any state saved under `key`.
    ///
    /// `default_hidden` applies until the user changes column visibility.
    pub fn new(
        key: impl Into<String>,
        columns: Vec<Column<T>>,
        default_hidden: &[&str],
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let key = key.into();
        let state: ListState = load(store.as_ref(), &key).unwrap_or_default();
        let hidden: Vec<String> = load(store.as_ref(), &hidden_columns_key(&key))
            .unwrap_or_else(|| default_hidden.iter().map(|s| s.to_string()).collect());
        let hidden = hidden
            .into_iter()
            .filter(|id| find_column(&columns, id).is_some_and(|c| c.hidable))
            .collect();
        debug!(key = %key, "list view restored");
        Self {
            key,
            columns,
            custom_filter: None,
            store,
            state,
            hidden,
        }
    }

    /// Replaces the default all-column search.
    pub fn with_custom_filter(
        mut self,
        filter: impl Fn(&T, &FilterState, &str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.custom_filter = Some(Arc::new(filter));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    // -----------------------------------------------------------------------
    // Sort / filter / search
    // -----------------------------------------------------------------------

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.state.sort = sort;
        self.persist_state();
    }

    /// Sorts by `column_id` ascending, or flips the direction if it is
    /// already the sort column.
    pub fn toggle_sort(&mut self, column_id: &str) {
        let sort = match &self.state.sort {
            Some(current) if current.column_id == column_id => SortState {
                column_id: current.column_id.clone(),
                direction: current.direction.flipped(),
            },
            _ => SortState {
                column_id: column_id.to_string(),
                direction: SortDirection::Asc,
            },
        };
        self.set_sort(Some(sort));
    }

    /// Merges `patch` into the filter. `None` or an empty value clears a key.
    pub fn set_filter<K, V>(&mut self, patch: impl IntoIterator<Item = (K, Option<V>)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (id, value) in patch {
            let id = id.into();
            match value.map(Into::into) {
                Some(value) if !value.is_empty() => {
                    self.state.filter.insert(id, value);
                }
                _ => {
                    self.state.filter.remove(&id);
                }
            }
        }
        self.persist_state();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search = search.into();
        self.persist_state();
    }

    /// Clears every filter value and the search.
    pub fn reset_filter(&mut self) {
        self.state.filter.clear();
        self.state.search.clear();
        self.persist_state();
    }

    pub fn is_filter_active(&self) -> bool {
        self.state.filter.values().any(|v| !v.is_empty())
    }

    // -----------------------------------------------------------------------
    // Column visibility
    // -----------------------------------------------------------------------

    pub fn hidden_columns(&self) -> &[String] {
        &self.hidden
    }

    pub fn is_hidden(&self, column_id: &str) -> bool {
        self.hidden.iter().any(|id| id == column_id)
    }

    /// Shows or hides a column. Non-hidable and unknown columns are left
    /// alone. Returns whether anything changed.
    pub fn set_column_hidden(&mut self, column_id: &str, hidden: bool) -> bool {
        if !find_column(&self.columns, column_id).is_some_and(|c| c.hidable) {
            return false;
        }
        if hidden == self.is_hidden(column_id) {
            return false;
        }
        if hidden {
            self.hidden.push(column_id.to_string());
        } else {
            self.hidden.retain(|id| id != column_id);
        }
        save(self.store.as_ref(), &hidden_columns_key(&self.key), &self.hidden);
        true
    }

    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        let hidden = !self.is_hidden(column_id);
        self.set_column_hidden(column_id, hidden)
    }

    /// Columns in declaration order, minus hidden ones.
    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns
            .iter()
            .filter(|c| !self.is_hidden(c.id))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Query
    // -----------------------------------------------------------------------

    /// Applies the current state to `items`.
    ///
    /// Search and filters see every column. Sorting by a hidden column
    /// keeps the input order.
    pub fn query<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        let sort = self
            .state
            .sort
            .as_ref()
            .filter(|s| !self.is_hidden(&s.column_id));
        query(
            items,
            &self.columns,
            self.custom_filter.as_deref(),
            &self.state.filter,
            sort,
            &self.state.search,
        )
    }

    fn persist_state(&self) {
        save(self.store.as_ref(), &self.key, &self.state);
    }
}

/// Preference key holding a view's hidden column ids.
pub fn hidden_columns_key(key: &str) -> String {
    format!("{key}-hidden-columns")
}
