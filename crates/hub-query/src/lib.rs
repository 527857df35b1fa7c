//! Generic list query engine.
//!
//! Collections of any item type are filtered, searched and sorted through
//! declarative [`Column`] descriptors. [`ListView`] keeps the user's sort,
//! filter, search and hidden columns in a preference store.

pub mod column;
pub mod query;
pub mod value;
pub mod view;

// Re-export primary types for convenience.
pub use column::{Column, FilterOption, find_column};
pub use query::{
    CustomFilterFn, FilterState, SortDirection, SortState, includes_one_of, query,
};
pub use value::{CellValue, compare_cells, compare_text, compare_values};
pub use view::{ListState, ListView, hidden_columns_key};
