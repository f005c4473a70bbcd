//! # Contact Record Store
//!
//! Data access for the `contact` table. Handlers talk to the
//! [`ContactStore`] trait; [`SqliteContactStore`] is the SQL implementation.
//!
//! All failures come back as [`StoreError`]; nothing in this module panics
//! or exits the process on a database error.

mod config;
mod errors;
mod sqlite;
mod types;

use async_trait::async_trait;

pub use config::{ConfigError, DatabaseLocation, StoreConfig};
pub use errors::{BoxedError, StoreError, StoreResult};
pub use sqlite::SqliteContactStore;
pub use types::{Contact, ContactFilter, FilterField, NewContact};

/// Persistence operations over contacts
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Create the `contact` table if it does not exist
    async fn initialize(&self) -> StoreResult<()>;

    /// Insert a contact and return it with its assigned id
    ///
    /// Fails with `DuplicateEmail` if the email is already taken.
    async fn create(&self, contact: NewContact) -> StoreResult<Contact>;

    /// Fails with `NotFound` if no row has `id`
    async fn fetch_by_id(&self, id: i64) -> StoreResult<Contact>;

    /// Exact-match lookup on one column, ordered by id
    ///
    /// When both `name` and `email` are set, only `name` is matched. An
    /// empty result is not an error; an empty filter is `InvalidArgument`.
    async fn fetch_by_filter(&self, filter: ContactFilter) -> StoreResult<Vec<Contact>>;

    /// Up to `limit` rows starting at `offset`, ordered by id
    ///
    /// `offset < 0` or `limit <= 0` is `InvalidArgument`.
    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Contact>>;

    /// Replace name and email of an existing row; the id never changes
    ///
    /// Fails with `NotFound` for an unknown id and `DuplicateEmail` if
    /// another row already has the email. A failed update leaves the row
    /// untouched.
    async fn update(&self, id: i64, contact: NewContact) -> StoreResult<Contact>;

    /// Hard delete. Deleting a missing id is `NotFound`, not a no-op.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Number of stored contacts
    async fn count(&self) -> StoreResult<i64>;
}
