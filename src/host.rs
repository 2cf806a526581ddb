//! Collaborator interfaces onto the membership platform.
//!
//! The renderer and classifier never reach for ambient host state; every read
//! goes through one of these traits so a store snapshot, a live adapter or a
//! test double can stand in. All reads are synchronous and request-scoped.

use crate::catalog::{Capacity, Category, CategoryId, ItemId, MembershipItem};
use anyhow::Result;

/// Enumerates the category taxonomy.
pub trait CategorySource {
    /// Categories that have at least one item, ordered by name ascending.
    fn categories(&self) -> Result<Vec<Category>>;
}

/// Enumerates membership items and resolves their display detail.
pub trait ItemSource {
    /// Items filed under `category`, in host-defined order.
    fn items_in(&self, category: &CategoryId) -> Result<Vec<ItemId>>;

    /// Title, text and permalink for one item; `None` when it no longer exists.
    fn item(&self, id: &ItemId) -> Result<Option<MembershipItem>>;
}

/// Per-item registration limit, when the host tracks one.
pub trait CapacitySource {
    fn declared_capacity(&self, id: &ItemId) -> Capacity;
}

/// Current count of active enrollments for an item.
pub trait EnrollmentSource {
    fn active_enrollments(&self, id: &ItemId) -> Result<u64>;
}

/// Optional platform capabilities checked before rendering.
pub trait HostFeatures {
    /// Whether the membership-product capability is installed at all.
    fn membership_products_available(&self) -> bool;

    /// Whether per-item registration limits are enforced by the host.
    fn registration_limits_enabled(&self) -> bool;
}

/// Everything a full render pass needs from the platform.
pub trait MembershipHost:
    CategorySource + ItemSource + CapacitySource + EnrollmentSource + HostFeatures
{
}

impl<T> MembershipHost for T where
    T: CategorySource + ItemSource + CapacitySource + EnrollmentSource + HostFeatures + ?Sized
{
}
