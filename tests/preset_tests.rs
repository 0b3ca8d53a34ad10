mod common;

use common::TestResult;
use common::fixtures::{manifest_context, manifest_json};
use serde_json::json;
use tessera::{Composer, ComposerBuilder, all_presets, get_preset};

fn preset_composer(id: &str) -> Result<Composer, tessera::PipelineError> {
    ComposerBuilder::new()
        .with_preset(id)?
        .with_manifest_json(manifest_json())?
        .build()
}

#[test]
fn test_every_preset_composes() -> TestResult {
    for preset in all_presets() {
        let composer = preset_composer(preset.id)?;
        let composition = composer.compose(&manifest_context(json!(["Faster"])))?;
        assert!(
            composition.html.contains("<h1>Hello</h1>"),
            "preset '{}' lost the title",
            preset.id
        );
        assert!(composition.rule_failures.is_empty(), "preset '{}'", preset.id);
    }
    Ok(())
}

#[test]
fn test_classic_drops_empty_bullets() -> TestResult {
    let composer = preset_composer("classic")?;
    let with = composer.compose(&manifest_context(json!(["Faster"])))?;
    let without = composer.compose(&manifest_context(json!([])))?;
    assert!(with.html.contains("<ul>"));
    assert!(!without.html.contains("<ul>"));
    Ok(())
}

#[test]
fn test_image_hero_positions_image_and_wraps_logo() -> TestResult {
    let composer = preset_composer("image-hero")?;
    let html = composer.compose(&manifest_context(json!([])))?.html;
    assert!(html.contains(
        "<div data-module=\"image\" style=\"position: absolute; top: 0; right: 0; bottom: 0; left: 0; z-index: 0;\"><img src=\"hero.png\"></div>"
    ));
    assert!(html.contains("<footer class=\"hero-logo\"><span class=\"logo\">ACME</span></footer>"));
    assert!(html.contains("data-group=\"hero-copy\""));

    let composition = composer.compose(&manifest_context(json!([])))?;
    assert_eq!(composition.z_indices.get("image"), Some(&0));
    Ok(())
}

#[test]
fn test_split_columns_nests_groups() -> TestResult {
    let composer = preset_composer("split-columns")?;
    let html = composer.compose(&manifest_context(json!(["Faster"])))?.html;
    let columns = html.find("data-group=\"columns\"").unwrap();
    let left = html.find("data-group=\"left-column\"").unwrap();
    let right = html.find("data-group=\"right-column\"").unwrap();
    assert!(columns < left && left < right);
    assert!(html.contains("flex-direction: row; gap: 48px; align-items: stretch;"));
    Ok(())
}

#[test]
fn test_minimal_rule_moves_logo_above_text() -> TestResult {
    let composer = preset_composer("minimal")?;
    let html = composer.compose(&manifest_context(json!([])))?.html;
    let logo = html.find("class=\"logo\"").unwrap();
    let text = html.find("<p>One</p>").unwrap();
    assert!(logo < text);
    Ok(())
}

#[test]
fn test_preset_lookup() {
    let preset = get_preset("split-columns").unwrap();
    assert_eq!(preset.name, "Split Columns");
    assert_eq!(preset.config().preset_id.as_deref(), Some("split-columns"));
    assert!(get_preset("Classic").is_none());
}
