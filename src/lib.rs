#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Keyframe animation and hierarchical transforms for real-time 3D.
//!
//! - [`animation`]: easing curves, keyframe channels, clips, the playback
//!   clock and Bézier motion paths
//! - [`scene`]: transforms and a parent-linked hierarchy resolving world
//!   matrices
//! - [`frame`]: per-frame context and the [`DrawSink`] hand-off to a renderer

pub mod animation;
pub mod errors;
pub mod frame;
pub mod scene;
pub mod settings;

pub use animation::{
    AnimationClip, Animator, ChannelKind, EasingMethod, Keyframe, KeyframeChannel, PathFollower,
    SplinePath, TransformSample,
};
pub use errors::{KinemaError, Result};
pub use frame::{DrawSink, FrameClock, FrameContext, Material};
pub use scene::{NodeHandle, Transform, TransformHierarchy};
pub use settings::PlaybackSettings;
