//! JSON Schema loading and instance validation for store snapshots.
//!
//! The bundled schema is compiled from the copy embedded at build time unless
//! a caller supplies an override path. Validation collects every violation so
//! a broken snapshot is reported in one pass.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const BUNDLED_SNAPSHOT_SCHEMA: &str = include_str!("../schema/store_snapshot.schema.json");

/// Compiled snapshot schema plus the version const it pins.
pub(crate) struct SnapshotSchema {
    pub schema_version: String,
    compiled: JSONSchema,
}

impl SnapshotSchema {
    /// Compile the schema embedded in the crate.
    pub fn bundled() -> Result<Self> {
        let raw: Value = serde_json::from_str(BUNDLED_SNAPSHOT_SCHEMA)
            .context("parsing bundled snapshot schema")?;
        Self::compile(raw, "bundled snapshot schema")
    }

    /// Load and compile a schema from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: Value = serde_json::from_reader(
            File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
        )
        .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(raw, &path.display().to_string())
    }

    fn compile(raw: Value, label: &str) -> Result<Self> {
        let schema_version = extract_schema_version(&raw)
            .ok_or_else(|| anyhow!("{label} missing schema_version const"))?;
        let compiled =
            JSONSchema::compile(&raw).map_err(|err| anyhow!("compiling {label}: {err}"))?;
        Ok(Self {
            schema_version,
            compiled,
        })
    }

    /// Validate `instance`, reporting all violations together.
    pub fn validate(&self, instance: &Value, label: &str) -> Result<()> {
        if let Err(errors) = self.compiled.validate(instance) {
            let details = errors
                .map(|err| format!("{}: {}", err.instance_path, err))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("{label} failed schema validation:\n{details}");
        }
        Ok(())
    }
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema
        .pointer("/properties/schema_version/const")
        .and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
