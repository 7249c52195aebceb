//! Playback Configuration
//!
//! [`PlaybackSettings`] carries the initial state an [`Animator`] starts
//! with. It can be built in code or loaded from JSON; missing fields take
//! their defaults.
//!
//! ```rust,ignore
//! use kinema::settings::PlaybackSettings;
//!
//! let settings = PlaybackSettings::from_json_str(r#"{ "speed": -1.0 }"#)?;
//! let animator = Animator::with_settings(clip, &settings);
//! ```
//!
//! [`Animator`]: crate::animation::Animator

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Initial playback state for an animator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Time multiplier. Negative values play backwards.
    pub speed: f32,
    /// Wrap at either end of the clip instead of stopping.
    pub looping: bool,
    /// Start playing immediately.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    #[inline]
    fn default() -> Self {
        Self {
            speed: 1.0,
            looping: true,
            autoplay: true,
        }
    }
}

impl PlaybackSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
