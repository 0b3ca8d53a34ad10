//! Composition pipeline orchestration.
//!
//! - [`ComposerBuilder`]: fluent builder assembling a config and a module registry
//! - [`Composer`]: runs the spatial rules, layer controller and composition
//!   order engine for one render context
//!
//! # Example
//!
//! ```ignore
//! use tessera::{ComposerBuilder, RenderContext};
//!
//! let composer = ComposerBuilder::new()
//!     .with_preset("classic")?
//!     .with_manifest_file("modules.json")?
//!     .build()?;
//!
//! let html = composer.render_document(&context)?;
//! ```

mod builder;
mod composer;

pub use builder::ComposerBuilder;
pub use composer::{Composer, Composition};
