//! Deserializable representation of a host store snapshot.
//!
//! A snapshot is a JSON copy of what the membership platform would answer
//! through its query APIs: the category taxonomy, the membership items with
//! their descriptive text, and the per-item registration limit and active
//! enrollment count. `StoreIndex` validates and indexes it; these structs are
//! the raw surface.

use crate::catalog::identity::{Capacity, CategoryId, ItemId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

// Automatic summaries keep this many words, like the host's default excerpt.
const AUTO_SUMMARY_WORDS: usize = 55;
const AUTO_SUMMARY_MORE: &str = " [\u{2026}]";

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Full snapshot as stored on disk.
pub struct StoreSnapshot {
    pub schema_version: String,
    #[serde(default)]
    pub features: HostFeatureFlags,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
/// Which optional host capabilities were present when the snapshot was taken.
pub struct HostFeatureFlags {
    #[serde(default = "enabled")]
    pub membership_products: bool,
    #[serde(default = "enabled")]
    pub registration_limits: bool,
}

impl Default for HostFeatureFlags {
    fn default() -> Self {
        Self {
            membership_products: true,
            registration_limits: true,
        }
    }
}

fn enabled() -> bool {
    true
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Taxonomy term used to group membership items.
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// Display-facing detail of one purchasable plan.
pub struct MembershipItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Hand-written summary; when absent the host derives one from `content`.
    #[serde(default)]
    pub excerpt: Option<String>,
    pub permalink: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Snapshot row for an item: its detail plus taxonomy and enrollment data.
pub struct ItemRecord {
    #[serde(flatten)]
    pub item: MembershipItem,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
    #[serde(default)]
    pub registrations_limit: Capacity,
    #[serde(default)]
    pub active_members: u64,
}

impl Category {
    /// Listing order: name ascending ignoring case, exact bytes breaking ties.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl MembershipItem {
    /// Short summary text: the explicit excerpt, or an automatic one.
    ///
    /// The automatic summary strips markup, collapses whitespace and keeps the
    /// first 55 words, appending ` […]` when it had to cut.
    pub fn summary(&self) -> Cow<'_, str> {
        match self.excerpt.as_deref() {
            Some(excerpt) if !excerpt.trim().is_empty() => Cow::Borrowed(excerpt),
            _ => Cow::Owned(auto_summary(&self.content)),
        }
    }
}

fn auto_summary(content: &str) -> String {
    let text = strip_tags(content);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > AUTO_SUMMARY_WORDS {
        let mut summary = words[..AUTO_SUMMARY_WORDS].join(" ");
        summary.push_str(AUTO_SUMMARY_MORE);
        summary
    } else {
        words.join(" ")
    }
}

/// Drop anything between `<` and `>`; unterminated tags swallow the rest.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Read and parse a store snapshot from disk without schema validation.
pub fn load_snapshot_from_path(path: &Path) -> Result<StoreSnapshot> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: StoreSnapshot =
        serde_json::from_str(&data).with_context(|| format!("decoding {}", path.display()))?;
    Ok(snapshot)
}
