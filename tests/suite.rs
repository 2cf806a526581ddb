// Integration suite for the accordion pipeline; drives snapshot loading, the
// render path, shortcode expansion and the CLI so regressions surface in one place.
mod support;

use anyhow::Result;
use memberships_accordion::{
    ACCORDION_TAG, AccordionConfig, Availability, ShortcodeRegistry, SoldOutReason, StoreIndex,
    ViewStatus, build_view, dependency_notice, display_memberships_by_category,
    register_accordion,
};
use serde_json::{Value, json};
use std::process::Command;
use support::{
    render_binary, render_command, run_command, sample_snapshot, stdout_of, write_json,
    write_text,
};

fn entry_availability(index: &StoreIndex, title: &str) -> Availability {
    build_view(index)
        .sections
        .iter()
        .flat_map(|section| section.entries.iter())
        .find(|entry| entry.title == title)
        .map(|entry| entry.availability)
        .unwrap_or_else(|| panic!("no entry titled {title}"))
}

// Covers the documented classification scenarios end to end through a snapshot.
#[test]
fn availability_scenarios_from_snapshot() -> Result<()> {
    let index = StoreIndex::from_json(sample_snapshot())?;
    assert_eq!(
        entry_availability(&index, "Morning Yoga"),
        Availability::SoldOut(SoldOutReason::TextMatch)
    );
    assert_eq!(
        entry_availability(&index, "Evening Yoga"),
        Availability::SoldOut(SoldOutReason::CapacityReached)
    );
    assert_eq!(entry_availability(&index, "Pilates"), Availability::Available);
    assert_eq!(
        entry_availability(&index, "Watercolour"),
        Availability::SoldOut(SoldOutReason::TextMatch)
    );
    assert_eq!(entry_availability(&index, "Sketching"), Availability::Available);
    Ok(())
}

#[test]
fn registration_limits_feature_gates_capacity_rule() -> Result<()> {
    let mut raw = sample_snapshot();
    raw["features"]["registration_limits"] = json!(false);
    let index = StoreIndex::from_json(raw)?;
    assert_eq!(entry_availability(&index, "Evening Yoga"), Availability::Available);
    assert_eq!(
        entry_availability(&index, "Morning Yoga"),
        Availability::SoldOut(SoldOutReason::TextMatch)
    );
    Ok(())
}

// Fitness has one item, Art has none: only Fitness is rendered.
#[test]
fn empty_category_is_not_rendered() -> Result<()> {
    let index = StoreIndex::from_json(json!({
        "schema_version": "store_snapshot_v1",
        "categories": [
            {"id": "fit", "name": "Fitness"},
            {"id": "art", "name": "Art"}
        ],
        "items": [{
            "id": "1",
            "title": "Yoga",
            "content": "Join our yoga class.",
            "permalink": "https://studio.test/yoga",
            "categories": ["fit"]
        }]
    }))?;
    let html = display_memberships_by_category(&index);
    assert!(html.contains(">Fitness</div>"));
    assert!(!html.contains(">Art</div>"));
    assert!(html.contains("accordion-header active\">Fitness"));
    Ok(())
}

#[test]
fn fragment_lists_categories_alphabetically() -> Result<()> {
    let index = StoreIndex::from_json(sample_snapshot())?;
    let html = display_memberships_by_category(&index);
    let art = html.find(">Art</div>").expect("Art section");
    let fitness = html.find(">Fitness</div>").expect("Fitness section");
    assert!(art < fitness);
    assert!(!html.contains("Cooking"));
    assert!(html.contains("<div class=\"accordion-header active\">Art</div>"));
    assert!(html.contains("<div class=\"accordion-header\">Fitness</div>"));
    assert_eq!(html.matches("accordion-content show").count(), 1);
    assert!(html.contains(
        "<a href=\"https://studio.test/plans/pilates\" class=\"book-now-button\">Book Now</a>"
    ));
    assert_eq!(html.matches("<div class=\"sold-out-message\">SOLD OUT</div>").count(), 3);
    Ok(())
}

#[test]
fn missing_capability_renders_message_and_notice() -> Result<()> {
    let mut raw = sample_snapshot();
    raw["features"]["membership_products"] = json!(false);
    let index = StoreIndex::from_json(raw)?;
    assert_eq!(build_view(&index).status, ViewStatus::NoCategories);
    let html = display_memberships_by_category(&index);
    assert!(html.contains("<p>No membership categories found.</p>"));
    assert!(dependency_notice(&index).is_some());

    let healthy = StoreIndex::from_json(sample_snapshot())?;
    assert!(dependency_notice(&healthy).is_none());
    Ok(())
}

#[test]
fn shortcode_expands_inside_page_content() -> Result<()> {
    let index = StoreIndex::from_json(sample_snapshot())?;
    let mut registry = ShortcodeRegistry::new();
    register_accordion(&mut registry, &index, AccordionConfig::default());
    let page = format!("<h1>Plans</h1>\n[{ACCORDION_TAG}]\n<p>[[{ACCORDION_TAG}]]</p>");
    let expanded = registry.expand(&page);
    assert!(expanded.starts_with("<h1>Plans</h1>\n<style>"));
    assert!(expanded.contains("class=\"membership-accordion\""));
    assert!(expanded.ends_with(&format!("<p>[{ACCORDION_TAG}]</p>")));
    Ok(())
}

#[test]
fn cli_renders_html_fragment() -> Result<()> {
    let snapshot = write_json(&sample_snapshot())?;
    let output = run_command(render_command(snapshot.path()))?;
    let html = stdout_of(&output);
    assert_eq!(html, display_memberships_by_category(&StoreIndex::load(snapshot.path())?));
    assert!(html.starts_with("<style>"));
    assert!(html.contains("<h3>Evening Yoga</h3>"));
    assert!(html.trim_end().ends_with("</script>"));
    Ok(())
}

#[test]
fn cli_json_view_carries_reasons() -> Result<()> {
    let snapshot = write_json(&sample_snapshot())?;
    let mut cmd = render_command(snapshot.path());
    cmd.arg("--format").arg("json");
    let view: Value = serde_json::from_str(&stdout_of(&run_command(cmd)?))?;
    assert_eq!(view["status"], "ready");
    assert_eq!(view["sections"][0]["name"], "Art");
    let fitness = &view["sections"][1]["entries"];
    assert_eq!(fitness[0]["reason"], "text_match");
    assert_eq!(fitness[1]["reason"], "capacity_reached");
    assert_eq!(fitness[2]["availability"], "available");
    assert!(fitness[2].get("reason").is_none());
    Ok(())
}

#[test]
fn cli_labels_and_assets_flags() -> Result<()> {
    let snapshot = write_json(&sample_snapshot())?;
    let mut cmd = render_command(snapshot.path());
    cmd.args(["--book-label", "Reserve", "--sold-out-label", "Full", "--no-assets"]);
    let html = stdout_of(&run_command(cmd)?);
    assert!(html.starts_with("<div class=\"membership-accordion\">"));
    assert!(html.contains(">Reserve</a>"));
    assert!(html.contains(">Full</div>"));
    assert!(!html.contains("<script>"));
    Ok(())
}

#[test]
fn cli_expands_page_file() -> Result<()> {
    let snapshot = write_json(&sample_snapshot())?;
    let page = write_text(&format!("Intro\n[{ACCORDION_TAG} /]\nOutro\n"))?;
    let mut cmd = render_command(snapshot.path());
    cmd.arg("--page").arg(page.path()).arg("--no-assets");
    let out = stdout_of(&run_command(cmd)?);
    assert!(out.starts_with("Intro\n<div class=\"membership-accordion\">"));
    assert!(out.ends_with("</div>\n\nOutro\n"));
    Ok(())
}

#[test]
fn cli_admin_notice_only_when_capability_missing() -> Result<()> {
    let healthy = write_json(&sample_snapshot())?;
    let mut cmd = render_command(healthy.path());
    cmd.arg("--admin-notice");
    assert_eq!(stdout_of(&run_command(cmd)?), "");

    let mut raw = sample_snapshot();
    raw["features"]["membership_products"] = json!(false);
    let missing = write_json(&raw)?;
    let mut cmd = render_command(missing.path());
    cmd.arg("--admin-notice");
    let out = stdout_of(&run_command(cmd)?);
    assert!(out.starts_with("<div class=\"notice notice-error\">"));
    Ok(())
}

#[test]
fn cli_reads_snapshot_path_from_env() -> Result<()> {
    let snapshot = write_json(&sample_snapshot())?;
    let mut cmd = Command::new(render_binary());
    cmd.env("ACCORDION_SNAPSHOT", snapshot.path());
    cmd.arg("--no-assets");
    let html = stdout_of(&run_command(cmd)?);
    assert!(html.contains("<h3>Pilates</h3>"));
    Ok(())
}

#[test]
fn cli_rejects_invalid_snapshot() -> Result<()> {
    let mut raw = sample_snapshot();
    raw["items"][0]["active_members"] = json!(-1);
    let snapshot = write_json(&raw)?;
    let output = render_command(snapshot.path()).output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed schema validation"), "{stderr}");
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn cli_honors_schema_override() -> Result<()> {
    let schema = write_json(&json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["schema_version", "items"],
        "properties": {
            "schema_version": {"const": "store_snapshot_v1"},
            "items": {"type": "array", "minItems": 10}
        }
    }))?;
    let snapshot = write_json(&sample_snapshot())?;
    let mut cmd = render_command(snapshot.path());
    cmd.arg("--schema").arg(schema.path());
    let output = cmd.output()?;
    assert!(!output.status.success());
    Ok(())
}

#[test]
fn cli_requires_a_snapshot() -> Result<()> {
    let mut cmd = Command::new(render_binary());
    cmd.env_remove("ACCORDION_SNAPSHOT");
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no snapshot given"));
    Ok(())
}
