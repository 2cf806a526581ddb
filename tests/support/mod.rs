#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn render_binary() -> &'static str {
    env!("CARGO_BIN_EXE_accordion-render")
}

/// Snapshot with one sold-out-by-text, one full, one open and one empty category.
pub fn sample_snapshot() -> Value {
    json!({
        "schema_version": "store_snapshot_v1",
        "features": {"membership_products": true, "registration_limits": true},
        "categories": [
            {"id": "t-fit", "name": "Fitness"},
            {"id": "t-art", "name": "Art"},
            {"id": "t-cook", "name": "Cooking"}
        ],
        "items": [
            {
                "id": "101",
                "title": "Morning Yoga",
                "content": "Join our yoga class. Registration is full for this session.",
                "permalink": "https://studio.test/plans/morning-yoga",
                "categories": ["t-fit"],
                "registrations_limit": 20,
                "active_members": 5
            },
            {
                "id": "102",
                "title": "Evening Yoga",
                "content": "Join our yoga class.",
                "permalink": "https://studio.test/plans/evening-yoga",
                "categories": ["t-fit"],
                "registrations_limit": "20",
                "active_members": 20
            },
            {
                "id": "103",
                "title": "Pilates",
                "content": "Join our yoga class.",
                "permalink": "https://studio.test/plans/pilates",
                "categories": ["t-fit"],
                "registrations_limit": 20,
                "active_members": 19
            },
            {
                "id": "201",
                "title": "Watercolour",
                "content": "Paint with us.",
                "excerpt": "Registration is full",
                "permalink": "https://studio.test/plans/watercolour",
                "categories": ["t-art"]
            },
            {
                "id": "202",
                "title": "Sketching",
                "content": "Bring a pencil.",
                "permalink": "https://studio.test/plans/sketching",
                "categories": ["t-art"],
                "registrations_limit": ""
            }
        ]
    })
}

pub fn write_json(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate snapshot file")?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.flush()?;
    Ok(file)
}

pub fn write_text(text: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate text file")?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn render_command(snapshot: &Path) -> Command {
    let mut cmd = Command::new(render_binary());
    cmd.arg("--snapshot").arg(snapshot);
    cmd.env_remove("ACCORDION_SNAPSHOT");
    cmd.env_remove("ACCORDION_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
