//! Enums and structs for the flexbox properties carried by groups and items.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    #[default]
    Column,
}

impl FlexDirection {
    pub fn as_css(&self) -> &'static str {
        match self {
            FlexDirection::Row => "row",
            FlexDirection::Column => "column",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    pub fn as_css(&self) -> &'static str {
        match self {
            JustifyContent::FlexStart => "flex-start",
            JustifyContent::FlexEnd => "flex-end",
            JustifyContent::Center => "center",
            JustifyContent::SpaceBetween => "space-between",
            JustifyContent::SpaceAround => "space-around",
            JustifyContent::SpaceEvenly => "space-evenly",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    Stretch,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

impl AlignItems {
    pub fn as_css(&self) -> &'static str {
        match self {
            AlignItems::Stretch => "stretch",
            AlignItems::FlexStart => "flex-start",
            AlignItems::FlexEnd => "flex-end",
            AlignItems::Center => "center",
            AlignItems::Baseline => "baseline",
        }
    }
}

/// Flex sizing for a single item. Unset fields are left to the rendering surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlexConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grow: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shrink: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<String>,
}

impl FlexConfig {
    pub fn is_empty(&self) -> bool {
        self.grow.is_none() && self.shrink.is_none() && self.basis.is_none()
    }

    /// Field-wise merge where `self` wins over `fallback`.
    pub fn or(&self, fallback: &FlexConfig) -> FlexConfig {
        FlexConfig {
            grow: self.grow.or(fallback.grow),
            shrink: self.shrink.or(fallback.shrink),
            basis: self.basis.clone().or_else(|| fallback.basis.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    /// Positioned by the surrounding flex flow.
    #[default]
    Flex,
    /// Placed at explicit offsets, outside the flow.
    Absolute,
}

/// How an item is positioned within its parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionConfig {
    #[serde(default)]
    pub mode: PositionMode,
    #[serde(flatten)]
    pub flex: FlexConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
}
