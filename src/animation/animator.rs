use glam::Vec3;

use crate::animation::clip::{AnimationClip, ChannelKind, TransformSample};
use crate::settings::PlaybackSettings;

/// Playback clock for a single clip.
///
/// `time` may be written directly (e.g. a scrub slider); the next
/// [`update`](Self::update) applies the end-of-clip rules to whatever value it
/// finds.
#[derive(Debug, Clone)]
pub struct Animator {
    clip: Option<AnimationClip>,

    pub time: f32,
    pub speed: f32,
    pub playing: bool,
    pub looping: bool,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    /// A stopped, non-looping animator owning an empty clip.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clip: Some(AnimationClip::default()),
            time: 0.0,
            speed: 1.0,
            playing: false,
            looping: false,
        }
    }

    #[must_use]
    pub fn with_clip(clip: AnimationClip) -> Self {
        Self {
            clip: Some(clip),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_settings(clip: AnimationClip, settings: &PlaybackSettings) -> Self {
        Self {
            clip: Some(clip),
            time: 0.0,
            speed: settings.speed,
            playing: settings.autoplay,
            looping: settings.looping,
        }
    }

    #[must_use]
    pub fn clip(&self) -> Option<&AnimationClip> {
        self.clip.as_ref()
    }

    pub fn clip_mut(&mut self) -> Option<&mut AnimationClip> {
        self.clip.as_mut()
    }

    /// Replaces the clip and rewinds. Returns the previous clip.
    pub fn attach_clip(&mut self, clip: AnimationClip) -> Option<AnimationClip> {
        self.time = 0.0;
        self.clip.replace(clip)
    }

    /// Removes the clip. Without a clip, `update` is a no-op and every
    /// sample returns its fallback.
    pub fn detach_clip(&mut self) -> Option<AnimationClip> {
        self.clip.take()
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.clip.as_ref().map_or(0.0, AnimationClip::duration)
    }

    /// Advances playback by `dt * speed`.
    ///
    /// Crossing the end (or the start, when playing backwards) either wraps
    /// to the opposite end when looping, or clamps and stops. The overshoot
    /// past the boundary is discarded rather than carried into the next
    /// cycle, so a large `dt` on a short looping clip loses time.
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let Some(clip) = &self.clip else {
            return;
        };
        let duration = clip.duration();

        self.time += dt * self.speed;

        if self.time > duration {
            if self.looping {
                log::trace!("Clip '{}' wrapped at end", clip.name);
                self.time = 0.0;
            } else {
                log::debug!("Clip '{}' finished", clip.name);
                self.time = duration;
                self.playing = false;
            }
        } else if self.time < 0.0 {
            if self.looping {
                log::trace!("Clip '{}' wrapped at start", clip.name);
                self.time = duration;
            } else {
                log::debug!("Clip '{}' finished in reverse", clip.name);
                self.time = 0.0;
                self.playing = false;
            }
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Pauses and rewinds to the start.
    pub fn stop(&mut self) {
        self.playing = false;
        self.time = 0.0;
    }

    /// Jumps to `time`, clamped to the clip's `[0, duration]`.
    pub fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration());
    }

    /// Samples one channel of the clip at the current time.
    #[must_use]
    pub fn sample_channel(&self, kind: ChannelKind, fallback: Vec3) -> Vec3 {
        self.clip
            .as_ref()
            .map_or(fallback, |clip| clip.sample_channel(kind, self.time, fallback))
    }

    /// Samples all three channels at the current time.
    #[must_use]
    pub fn sample(&self) -> TransformSample {
        self.clip
            .as_ref()
            .map_or_else(TransformSample::default, |clip| clip.sample(self.time))
    }
}
