//! Hierarchical transforms.
//!
//! - [`Transform`]: local position, rotation and scale
//! - [`Node`]: a transform plus a parent link
//! - [`TransformHierarchy`]: arena of nodes with world-space resolution

pub mod hierarchy;
pub mod node;
pub mod transform;

pub use hierarchy::TransformHierarchy;
pub use node::Node;
pub use transform::{Transform, euler_degrees_to_quat};

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`TransformHierarchy`].
    pub struct NodeHandle;
}
