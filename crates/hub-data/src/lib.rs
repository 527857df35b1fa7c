//! Backend data access: the command gateway contract and the entity caches.
//!
//! This crate has no transport of its own. The app supplies a
//! [`CommandGateway`] implementation that talks to the native backend;
//! [`DataStore`] owns the cached collections, refetches them when backend
//! events invalidate them, and turns failures into user notifications.

pub mod error;
pub mod gateway;
pub mod store;

// Re-export primary types for convenience.
pub use error::DataError;
pub use gateway::{CommandGateway, GatewayCommand, GatewayFuture};
pub use store::{ChangeHandler, DataStore, RefreshOutcome, SubscriptionId};
