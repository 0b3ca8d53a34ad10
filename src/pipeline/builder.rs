// src/pipeline/builder.rs
use super::composer::Composer;
use crate::error::PipelineError;
use crate::modules::ModuleManifest;
use crate::presets;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tessera_traits::ModuleRegistry;
use tessera_types::CompositionConfig;

/// A builder for creating a `Composer`.
#[derive(Debug, Default)]
pub struct ComposerBuilder {
    config: Option<CompositionConfig>,
    registry: Option<Arc<dyn ModuleRegistry>>,
}

impl ComposerBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: CompositionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Configures the composer from a serialized `CompositionConfig`.
    pub fn with_config_json(self, json: &str) -> Result<Self, PipelineError> {
        Ok(self.with_config(CompositionConfig::from_json(json)?))
    }

    /// Configures the composer by loading a `CompositionConfig` from a file.
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.with_config_json(&source)
    }

    /// Starts from a built-in preset.
    pub fn with_preset(self, preset_id: &str) -> Result<Self, PipelineError> {
        Ok(self.with_config(presets::config_from_preset(preset_id)?))
    }

    pub fn with_registry(mut self, registry: Arc<dyn ModuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Compiles a module manifest into the composer's registry.
    pub fn with_manifest(self, manifest: ModuleManifest) -> Result<Self, PipelineError> {
        Ok(self.with_registry(Arc::new(manifest.into_registry()?)))
    }

    pub fn with_manifest_json(self, json: &str) -> Result<Self, PipelineError> {
        self.with_manifest(ModuleManifest::from_json(json)?)
    }

    pub fn with_manifest_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        self.with_manifest(ModuleManifest::from_file(path)?)
    }

    /// Consumes the builder and returns a `Composer`.
    pub fn build(self) -> Result<Composer, PipelineError> {
        let config = self
            .config
            .ok_or_else(|| PipelineError::Incomplete("no composition config was provided".into()))?;
        let registry = self
            .registry
            .ok_or_else(|| PipelineError::Incomplete("no module registry was provided".into()))?;
        Ok(Composer::new(config, registry))
    }
}
