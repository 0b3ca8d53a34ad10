//! Stacking-order lookups used while serializing a render tree.

/// Resolves the stacking state of a module at render time.
pub trait StackingResolver {
    /// The value the module should render with.
    fn effective_z_index(&self, module_id: &str) -> i32;

    /// The registry-declared value the module emits on its own.
    fn baseline_z_index(&self, module_id: &str) -> i32;

    /// Hidden layers are left out of the output entirely.
    fn is_visible(&self, module_id: &str) -> bool {
        let _ = module_id;
        true
    }

    /// Returns the value to inject, or `None` when the module's own value stands.
    fn z_index_override(&self, module_id: &str) -> Option<i32> {
        let effective = self.effective_z_index(module_id);
        (effective != self.baseline_z_index(module_id)).then_some(effective)
    }
}
