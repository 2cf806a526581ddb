//! Indexed view of a store snapshot.
//!
//! The index enforces the snapshot schema and version, rejects duplicate ids
//! and dangling category references, and then answers every host collaborator
//! query from memory. It is the host used by `accordion-render` and by tests
//! that want realistic data without a live platform.

use crate::catalog::{
    Capacity, Category, CategoryId, ItemId, ItemRecord, MembershipItem, StoreSnapshot,
    load_snapshot_from_path,
};
use crate::host::{CapacitySource, CategorySource, EnrollmentSource, HostFeatures, ItemSource};
use crate::schema_loader::SnapshotSchema;
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug)]
/// Store snapshot plus lookups keyed by item and category id.
pub struct StoreIndex {
    snapshot: StoreSnapshot,
    items: BTreeMap<ItemId, usize>,
    members: BTreeMap<CategoryId, Vec<ItemId>>,
}

impl StoreIndex {
    /// Load and validate a snapshot from disk against the bundled schema.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_schema(path, None)
    }

    /// Load a snapshot, validating against `schema_path` when provided.
    ///
    /// The raw document is checked against the schema first; decoding then
    /// goes through `load_snapshot_from_path` like any other snapshot reader.
    pub fn load_with_schema(path: &Path, schema_path: Option<&Path>) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let raw: Value =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        let schema = match schema_path {
            Some(schema_path) => SnapshotSchema::load(schema_path)?,
            None => SnapshotSchema::bundled()?,
        };
        let label = path.display().to_string();
        schema.validate(&raw, &label)?;
        let snapshot = load_snapshot_from_path(path)?;
        Self::from_validated(snapshot, &schema, &label)
    }

    /// Validate and index an in-memory snapshot value.
    pub fn from_json(raw: Value) -> Result<Self> {
        let schema = SnapshotSchema::bundled()?;
        schema.validate(&raw, "snapshot")?;
        let snapshot: StoreSnapshot = serde_json::from_value(raw).context("decoding snapshot")?;
        Self::from_validated(snapshot, &schema, "snapshot")
    }

    fn from_validated(
        snapshot: StoreSnapshot,
        schema: &SnapshotSchema,
        label: &str,
    ) -> Result<Self> {
        if snapshot.schema_version != schema.schema_version {
            bail!(
                "{label}: schema_version '{}' does not match expected '{}'",
                snapshot.schema_version,
                schema.schema_version
            );
        }
        Self::from_snapshot(snapshot)
    }

    /// Index a snapshot that has already been decoded.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut members: BTreeMap<CategoryId, Vec<ItemId>> = BTreeMap::new();
        for category in &snapshot.categories {
            if members.insert(category.id.clone(), Vec::new()).is_some() {
                bail!("duplicate category id '{}'", category.id);
            }
        }

        let mut items = BTreeMap::new();
        for (position, record) in snapshot.items.iter().enumerate() {
            let id = &record.item.id;
            if items.insert(id.clone(), position).is_some() {
                bail!("duplicate item id '{id}'");
            }
            let mut seen = BTreeSet::new();
            for category in &record.categories {
                if !seen.insert(category) {
                    continue;
                }
                members
                    .get_mut(category)
                    .ok_or_else(|| anyhow!("item '{id}' references unknown category '{category}'"))?
                    .push(id.clone());
            }
        }

        Ok(Self {
            snapshot,
            items,
            members,
        })
    }

    fn record(&self, id: &ItemId) -> Option<&ItemRecord> {
        self.items.get(id).map(|&position| &self.snapshot.items[position])
    }
}

impl CategorySource for StoreIndex {
    fn categories(&self) -> Result<Vec<Category>> {
        if !self.snapshot.features.membership_products {
            return Ok(Vec::new());
        }
        let mut categories: Vec<Category> = self
            .snapshot
            .categories
            .iter()
            .filter(|category| {
                self.members
                    .get(&category.id)
                    .is_some_and(|items| !items.is_empty())
            })
            .cloned()
            .collect();
        categories.sort_by(Category::cmp_by_name);
        Ok(categories)
    }
}

impl ItemSource for StoreIndex {
    fn items_in(&self, category: &CategoryId) -> Result<Vec<ItemId>> {
        self.members
            .get(category)
            .cloned()
            .ok_or_else(|| anyhow!("unknown category '{category}'"))
    }

    fn item(&self, id: &ItemId) -> Result<Option<MembershipItem>> {
        Ok(self.record(id).map(|record| record.item.clone()))
    }
}

impl CapacitySource for StoreIndex {
    fn declared_capacity(&self, id: &ItemId) -> Capacity {
        self.record(id)
            .map(|record| record.registrations_limit)
            .unwrap_or_default()
    }
}

impl EnrollmentSource for StoreIndex {
    fn active_enrollments(&self, id: &ItemId) -> Result<u64> {
        self.record(id)
            .map(|record| record.active_members)
            .ok_or_else(|| anyhow!("unknown item '{id}'"))
    }
}

impl HostFeatures for StoreIndex {
    fn membership_products_available(&self) -> bool {
        self.snapshot.features.membership_products
    }

    fn registration_limits_enabled(&self) -> bool {
        self.snapshot.features.registration_limits
    }
}
