//! Membership plans rendered as a category accordion.
//!
//! The crate reads categories and membership items from a host platform
//! through the collaborator traits in [`host`], decides per item whether it is
//! sold out ([`availability`]), and emits a self-contained HTML fragment with
//! inline styling and toggle script ([`render`]). The fragment is reachable
//! from page content through the `[display_memberships_by_category]`
//! shortcode ([`shortcode`]). [`catalog::StoreIndex`] implements every host
//! trait over a validated JSON snapshot so the whole pipeline can run without
//! a live platform.

pub mod availability;
pub mod catalog;
pub mod host;
pub mod notice;
pub mod render;
mod schema_loader;
pub mod shortcode;

pub use availability::{
    Availability, AvailabilityClassifier, AvailabilityInput, SOLD_OUT_PHRASE, SoldOutReason,
    classify,
};
pub use catalog::{
    Capacity, Category, CategoryId, HostFeatureFlags, ItemId, ItemRecord, MembershipItem,
    StoreIndex, StoreSnapshot, load_snapshot_from_path,
};
pub use host::{
    CapacitySource, CategorySource, EnrollmentSource, HostFeatures, ItemSource, MembershipHost,
};
pub use notice::{AdminNotice, NoticeLevel, dependency_notice};
pub use render::{
    AccordionConfig, AccordionView, EntryView, SectionView, ViewStatus, build_view,
    render_accordion, render_view,
};
pub use shortcode::{ACCORDION_TAG, ShortcodeRegistry, register_accordion};

/// The parameterless shortcode entry point with stock labels.
pub fn display_memberships_by_category<H: MembershipHost + ?Sized>(host: &H) -> String {
    render_accordion(host, &AccordionConfig::default())
}
