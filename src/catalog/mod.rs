//! Host store data: identifiers, the snapshot model, and its validated index.
//!
//! `StoreIndex` is the in-memory host used when rendering from a snapshot;
//! the model types are also the currency of the collaborator traits in
//! `crate::host`.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Capacity, CategoryId, ItemId};
pub use index::StoreIndex;
pub use model::{
    Category, HostFeatureFlags, ItemRecord, MembershipItem, StoreSnapshot, load_snapshot_from_path,
};
