//! tessera composes independently rendered content modules into one graphic.
//!
//! Given a persisted [`CompositionConfig`], a [`ModuleRegistry`] and a
//! [`RenderContext`], a [`Composer`] decides which modules appear, in what
//! order and nesting, and at what stacking order, and emits the markup a
//! headless renderer turns into an image.

pub mod document;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod presets;

pub use error::PipelineError;
pub use modules::{ModuleDefinition, ModuleManifest, TemplateModule};
pub use pipeline::{Composer, ComposerBuilder, Composition};
pub use presets::{Preset, all_presets, config_from_preset, get_preset};

pub use tessera_compose as compose;
pub use tessera_layers as layers;
pub use tessera_spatial as spatial;
pub use tessera_traits as traits;
pub use tessera_tree as tree;
pub use tessera_types as types;

pub use tessera_compose::CompositionOrderEngine;
pub use tessera_layers::LayerController;
pub use tessera_spatial::{RuleFailure, SpatialRulesEngine};
pub use tessera_traits::{InMemoryModuleRegistry, Module, ModuleError, ModuleRegistry};
pub use tessera_types::{CompositionConfig, RenderContext, RenderOrderItem, SpatialRule};
