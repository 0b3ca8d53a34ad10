//! Composition order: conditional filtering, render tree construction and
//! markup serialization.
//!
//! ```text
//! RenderOrderItem[] --build_render_tree--> RenderNode --Serializer--> HTML
//! ```

pub mod conditions;
pub mod engine;
pub mod serialize;
pub mod style;

pub use conditions::{COUNTERS, CounterSource, counter_value, evaluate_condition, is_visible};
pub use engine::{CompositionOrderEngine, build_children_nodes};
pub use serialize::{Serializer, submodule_index};
