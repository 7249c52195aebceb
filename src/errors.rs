//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Sampling never fails: empty channels and missing clips degrade to
//! caller-supplied fallbacks. The main error type [`KinemaError`] covers the
//! remaining failure modes:
//! - Hierarchy edits (stale handles, parent cycles)
//! - Keyframe and spline editing (bad indices, bad durations)
//! - Configuration loading (I/O and JSON)
//!
//! ```rust,ignore
//! use kinema::errors::{KinemaError, Result};
//!
//! fn build() -> Result<()> {
//!     let mut hierarchy = TransformHierarchy::new();
//!     let root = hierarchy.add_root(Transform::new());
//!     hierarchy.add_child(root, Transform::new())?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::animation::ChannelKind;
use crate::scene::NodeHandle;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum KinemaError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The handle does not refer to a live node in the hierarchy.
    #[error("Transform node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// Linking `child` under `parent` would close a loop in the parent chain.
    #[error("Attaching {child:?} under {parent:?} would create a parent cycle")]
    CyclicParent {
        /// The node being re-parented
        child: NodeHandle,
        /// The requested parent
        parent: NodeHandle,
    },

    // ========================================================================
    // Animation Editing Errors
    // ========================================================================
    /// Clip durations must be finite and non-negative.
    #[error("Invalid clip duration: {0}")]
    InvalidDuration(f32),

    /// A keyframe edit addressed a key that does not exist.
    #[error("Keyframe index out of bounds: {channel:?} channel has {len} keys (index: {index})")]
    KeyframeIndexOutOfBounds {
        /// The channel being edited
        channel: ChannelKind,
        /// The invalid index
        index: usize,
        /// Number of keys in the channel
        len: usize,
    },

    /// A spline edit addressed a segment that does not exist.
    #[error("Spline segment index out of bounds: {index} (segments: {len})")]
    SegmentIndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of segments in the path
        len: usize,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
