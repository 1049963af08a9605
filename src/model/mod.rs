//! Entities and their static descriptors.

pub mod descriptor;
mod movie;
mod rating;
mod record;
mod tag;
mod user;

pub use descriptor::{ColumnDescriptor, ColumnType, EntityDescriptor, RelationDescriptor};
pub use movie::{Movie, MOVIES};
pub use rating::{Rating, RATINGS};
pub use record::Record;
pub use tag::{Tag, TAGS};
pub use user::{User, USERS};

/// A persisted record with a generated bigint id and a static column table.
pub trait Entity: Clone + Send + Sync + 'static {
    fn descriptor() -> &'static EntityDescriptor;

    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Build from a mapped record. Missing or null columns become `None`.
    fn from_record(record: Record) -> Self;

    /// All own columns, primary key included, in descriptor order.
    fn to_record(&self) -> Record;

    /// Receives the record mapped under a relation's prefix. Entities without relations ignore it.
    fn attach_relation(&mut self, _relation: &str, _record: Record) {}
}

/// Identity equality: both ids set and equal. An unsaved entity equals only
/// itself; `PartialEq` impls check `std::ptr::eq` before calling this.
pub fn same_identity(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

/// Every table, in dependency order (referenced tables first).
pub fn all_descriptors() -> [&'static EntityDescriptor; 4] {
    [&USERS, &MOVIES, &RATINGS, &TAGS]
}
