use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// An entry of a [`TransformHierarchy`](crate::scene::TransformHierarchy).
///
/// Nodes only link upwards: the parent handle is the single source of truth
/// for the tree shape, and children are found by scanning.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,

    /// Local transform relative to the parent (or the world for roots).
    pub transform: Transform,

    /// Optional label, e.g. for a part selector.
    pub name: Option<String>,
}

impl Node {
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            parent: None,
            transform,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Transform::new())
    }
}
