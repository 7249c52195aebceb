//! Keyframe animation: easing curves, channels, clips, the playback clock
//! and Bézier motion paths.

pub mod animator;
pub mod channel;
pub mod clip;
pub mod easing;
pub mod spline;
pub mod values;

pub use animator::Animator;
pub use channel::{Keyframe, KeyframeChannel, KeyframeCursor, Vec3Channel};
pub use clip::{AnimationClip, ChannelKind, TransformSample};
pub use easing::EasingMethod;
pub use spline::{BezierSegment, PathFollower, SplinePath, SplinePoint, SplineSample};
pub use values::{Interpolatable, de_casteljau};
