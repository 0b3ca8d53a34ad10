//! Built-in layout presets.
//!
//! A preset is a complete `CompositionConfig` an editor starts from. Editing a
//! preset-derived config flips `is_custom`; the preset itself never changes.

use crate::error::PipelineError;
use once_cell::sync::Lazy;
use tessera_types::{
    AlignItems, Condition, Conditional, CompositionConfig, FlexConfig, FlexDirection, GroupConfig,
    JustifyContent, PositionConfig, PositionMode, RenderOrderItem, SpatialRule, WrapperDescriptor,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    render_order: Vec<RenderOrderItem>,
    spatial_rules: Vec<SpatialRule>,
    /// Stacking values the preset pins, keyed by module id.
    z_index_overrides: &'static [(&'static str, i32)],
}

impl Preset {
    /// A fresh, unmodified config for this preset.
    pub fn config(&self) -> CompositionConfig {
        CompositionConfig {
            preset_id: Some(self.id.to_string()),
            render_order: self.render_order.clone(),
            spatial_rules: self.spatial_rules.clone(),
            z_index_overrides: (!self.z_index_overrides.is_empty()).then(|| {
                self.z_index_overrides
                    .iter()
                    .map(|(id, z)| (id.to_string(), *z))
                    .collect()
            }),
            is_custom: false,
            ..Default::default()
        }
    }
}

static PRESETS: Lazy<Vec<Preset>> = Lazy::new(|| vec![classic(), image_hero(), split_columns(), minimal()]);

pub fn all_presets() -> &'static [Preset] {
    &PRESETS
}

pub fn get_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// The config for preset `id`.
///
/// # Errors
///
/// Returns `PipelineError::UnknownPreset` if no preset has that id.
pub fn config_from_preset(id: &str) -> Result<CompositionConfig, PipelineError> {
    get_preset(id)
        .map(Preset::config)
        .ok_or_else(|| PipelineError::UnknownPreset(id.to_string()))
}

fn bullets_if_any() -> RenderOrderItem {
    RenderOrderItem::module("bullets")
        .with_conditional(Conditional::show_if(Condition::parse("bulletCount > 0")))
}

fn image_if_present() -> RenderOrderItem {
    RenderOrderItem::module("image").with_conditional(Conditional::show_if(Condition::has_image()))
}

fn grow() -> FlexConfig {
    FlexConfig {
        grow: Some(1.0),
        ..Default::default()
    }
}

fn classic() -> Preset {
    Preset {
        id: "classic",
        name: "Classic",
        description: "Title, optional image and bullets stacked top to bottom, logo at the foot.",
        render_order: vec![
            RenderOrderItem::module("title").with_margins(None, Some("24px")),
            image_if_present().with_margins(None, Some("24px")),
            bullets_if_any(),
            RenderOrderItem::module("textFields"),
            RenderOrderItem::spacer("32px"),
            RenderOrderItem::module("logo"),
        ],
        spatial_rules: Vec::new(),
        z_index_overrides: &[],
    }
}

fn image_hero() -> Preset {
    let background = RenderOrderItem::module("image")
        .with_conditional(Conditional::show_if(Condition::has_image()))
        .with_position(PositionConfig {
            mode: PositionMode::Absolute,
            top: Some("0".into()),
            right: Some("0".into()),
            bottom: Some("0".into()),
            left: Some("0".into()),
            ..Default::default()
        });
    let copy = RenderOrderItem::group(GroupConfig {
        direction: FlexDirection::Column,
        gap: Some("16px".into()),
        justify_content: Some(JustifyContent::FlexEnd),
        children: vec![
            RenderOrderItem::module("title"),
            bullets_if_any(),
            RenderOrderItem::module("textFields"),
        ],
        ..Default::default()
    })
    .with_id("hero-copy")
    .with_flex(grow());

    Preset {
        id: "image-hero",
        name: "Image Hero",
        description: "Full-bleed image behind a bottom-aligned block of copy.",
        render_order: vec![background, copy, RenderOrderItem::module("logo")],
        spatial_rules: vec![SpatialRule::wrap(
            "hero-logo-frame",
            "logo",
            WrapperDescriptor {
                class_name: Some("hero-logo".into()),
                ..WrapperDescriptor::new("footer")
            },
        )],
        z_index_overrides: &[("image", 0)],
    }
}

fn split_columns() -> Preset {
    let column = |id: &str, children: Vec<RenderOrderItem>| {
        RenderOrderItem::group(GroupConfig {
            direction: FlexDirection::Column,
            gap: Some("24px".into()),
            children,
            ..Default::default()
        })
        .with_id(id)
        .with_flex(FlexConfig {
            grow: Some(1.0),
            shrink: Some(1.0),
            basis: Some("0".into()),
        })
    };
    let columns = RenderOrderItem::group(GroupConfig {
        direction: FlexDirection::Row,
        gap: Some("48px".into()),
        align_items: Some(AlignItems::Stretch),
        children: vec![
            column("left-column", vec![bullets_if_any(), RenderOrderItem::module("textFields")]),
            column("right-column", vec![image_if_present()]),
        ],
        ..Default::default()
    })
    .with_id("columns")
    .with_flex(grow());

    Preset {
        id: "split-columns",
        name: "Split Columns",
        description: "Title across the top, copy and image side by side below it.",
        render_order: vec![
            RenderOrderItem::module("title").with_margins(None, Some("32px")),
            columns,
            RenderOrderItem::module("logo"),
        ],
        spatial_rules: Vec::new(),
        z_index_overrides: &[],
    }
}

fn minimal() -> Preset {
    Preset {
        id: "minimal",
        name: "Minimal",
        description: "Title and text fields only, with the logo kept above the text.",
        render_order: vec![
            RenderOrderItem::module("title").with_margins(Some("auto"), Some("16px")),
            RenderOrderItem::module("textFields")
                .with_conditional(Conditional::hide_if(Condition::parse("textFieldCount > 3"))),
            RenderOrderItem::module("logo"),
        ],
        spatial_rules: vec![SpatialRule::before("logo-above-text", "logo", "textFields")],
        z_index_overrides: &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_preset_ids_are_unique() {
        let ids: HashSet<_> = all_presets().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all_presets().len());
        assert_eq!(all_presets().len(), 4);
    }

    #[test]
    fn test_config_from_preset() {
        let config = config_from_preset("minimal").unwrap();
        assert_eq!(config.preset_id.as_deref(), Some("minimal"));
        assert!(!config.is_custom);
        assert_eq!(config.render_order.len(), 3);
        assert_eq!(config.spatial_rules.len(), 1);
        assert!(config.z_index_overrides.is_none());
    }

    #[test]
    fn test_preset_carries_stacking_overrides() {
        let config = config_from_preset("image-hero").unwrap();
        assert_eq!(config.overrides().get("image"), Some(&0));
        assert_eq!(config.overrides().len(), 1);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(get_preset("poster").is_none());
        assert!(matches!(
            config_from_preset("poster"),
            Err(PipelineError::UnknownPreset(id)) if id == "poster"
        ));
    }

    #[test]
    fn test_preset_rules_are_valid() {
        for preset in all_presets() {
            let report = tessera_spatial::validate_all_rules(&preset.config().spatial_rules);
            assert!(report.valid, "preset '{}' has invalid rules", preset.id);
        }
    }

    #[test]
    fn test_presets_round_trip_through_json() {
        for preset in all_presets() {
            let config = preset.config();
            let parsed = CompositionConfig::from_json(&config.to_json().unwrap()).unwrap();
            assert_eq!(parsed, config, "preset '{}'", preset.id);
        }
    }
}
