//! Concrete list pages of the hub and the [`Library`] facade.
//!
//! Each page pairs a column schema with a preference key and default hidden
//! columns. [`Library`] owns the data store and builds the views.

pub mod installed;
pub mod library;
pub mod mods;
pub mod owned;
pub mod shared;

// Re-export primary types for convenience.
pub use installed::{INSTALLED_KEY, installed_columns, installed_search};
pub use library::Library;
pub use mods::{MODS_KEY, mods_columns, mods_search};
pub use owned::{OWNED_KEY, format_release_date, owned_columns, owned_search};
