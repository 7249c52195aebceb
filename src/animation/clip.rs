use std::path::Path;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::channel::{Keyframe, Vec3Channel};
use crate::errors::{KinemaError, Result};
use crate::scene::transform::Transform;

/// Identifies one of the three channels of a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    Position,
    /// Euler angles in degrees.
    Rotation,
    Scale,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [Self::Position, Self::Rotation, Self::Scale];

    /// Value used when the channel has no keys.
    #[must_use]
    pub fn default_value(self) -> Vec3 {
        match self {
            Self::Position | Self::Rotation => Vec3::ZERO,
            Self::Scale => Vec3::ONE,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Position => "Position Keys",
            Self::Rotation => "Rotation Keys",
            Self::Scale => "Scale Keys",
        }
    }
}

/// Position, rotation and scale sampled from a clip at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSample {
    pub position: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Default for TransformSample {
    fn default() -> Self {
        Self {
            position: ChannelKind::Position.default_value(),
            rotation_degrees: ChannelKind::Rotation.default_value(),
            scale: ChannelKind::Scale.default_value(),
        }
    }
}

impl TransformSample {
    #[must_use]
    pub fn to_transform(&self) -> Transform {
        Transform::from_euler_degrees(self.position, self.rotation_degrees, self.scale)
    }

    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.to_transform().local_matrix()
    }
}

/// Three keyframe channels plus a playback duration.
///
/// The duration is set independently of the key times: keys past it are
/// never reached by playback, and a duration past the last key holds the
/// final pose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationClip {
    pub name: String,
    duration: f32,
    pub position: Vec3Channel,
    pub rotation: Vec3Channel,
    pub scale: Vec3Channel,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Result<Self> {
        self.set_duration(duration)?;
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) -> Result<()> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(KinemaError::InvalidDuration(duration));
        }
        self.duration = duration;
        Ok(())
    }

    #[must_use]
    pub fn channel(&self, kind: ChannelKind) -> &Vec3Channel {
        match kind {
            ChannelKind::Position => &self.position,
            ChannelKind::Rotation => &self.rotation,
            ChannelKind::Scale => &self.scale,
        }
    }

    pub fn channel_mut(&mut self, kind: ChannelKind) -> &mut Vec3Channel {
        match kind {
            ChannelKind::Position => &mut self.position,
            ChannelKind::Rotation => &mut self.rotation,
            ChannelKind::Scale => &mut self.scale,
        }
    }

    /// Samples one channel, falling back to `fallback` when it has no keys.
    #[must_use]
    pub fn sample_channel(&self, kind: ChannelKind, time: f32, fallback: Vec3) -> Vec3 {
        self.channel(kind).sample(time, fallback)
    }

    /// Samples all three channels with their default fallbacks.
    #[must_use]
    pub fn sample(&self, time: f32) -> TransformSample {
        TransformSample {
            position: self.sample_channel(
                ChannelKind::Position,
                time,
                ChannelKind::Position.default_value(),
            ),
            rotation_degrees: self.sample_channel(
                ChannelKind::Rotation,
                time,
                ChannelKind::Rotation.default_value(),
            ),
            scale: self.sample_channel(ChannelKind::Scale, time, ChannelKind::Scale.default_value()),
        }
    }

    /// Editor "add key": appends a linear key at the clip's duration that
    /// repeats the channel's last value (or the channel default).
    pub fn append_key(&mut self, kind: ChannelKind) -> usize {
        let time = self.duration;
        let channel = self.channel_mut(kind);
        let value = channel.last().map_or(kind.default_value(), |k| k.value);
        channel.push(Keyframe::linear(time, value));
        log::debug!("Appended {kind:?} key at t={time}");
        channel.len() - 1
    }

    pub fn remove_last_key(&mut self, kind: ChannelKind) -> Option<Keyframe<Vec3>> {
        self.channel_mut(kind).pop()
    }

    pub fn remove_key(&mut self, kind: ChannelKind, index: usize) -> Result<Keyframe<Vec3>> {
        let channel = self.channel_mut(kind);
        let len = channel.len();
        channel
            .remove(index)
            .ok_or(KinemaError::KeyframeIndexOutOfBounds {
                channel: kind,
                index,
                len,
            })
    }

    pub fn key_mut(&mut self, kind: ChannelKind, index: usize) -> Result<&mut Keyframe<Vec3>> {
        let channel = self.channel_mut(kind);
        let len = channel.len();
        channel
            .get_mut(index)
            .ok_or(KinemaError::KeyframeIndexOutOfBounds {
                channel: kind,
                index,
                len,
            })
    }

    /// Latest key time over all channels. Informational only; playback
    /// is governed by [`duration`](Self::duration).
    #[must_use]
    pub fn key_end_time(&self) -> f32 {
        ChannelKind::ALL
            .iter()
            .map(|&kind| self.channel(kind).end_time())
            .fold(0.0_f32, f32::max)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let clip: Self = serde_json::from_str(json)?;
        if !clip.duration.is_finite() || clip.duration < 0.0 {
            return Err(KinemaError::InvalidDuration(clip.duration));
        }
        for kind in ChannelKind::ALL {
            if !clip.channel(kind).is_sorted() {
                log::warn!("Clip '{}': {kind:?} keys are not in time order", clip.name);
            }
        }
        Ok(clip)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let clip = Self::from_json_str(&json)?;
        log::debug!("Loaded clip '{}' from {}", clip.name, path.display());
        Ok(clip)
    }
}
