pub mod module;
pub mod stacking;

pub use module::{InMemoryModuleRegistry, Module, ModuleError, ModuleRegistry, SharedModule};
pub use stacking::StackingResolver;
