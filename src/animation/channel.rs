use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingMethod;
use crate::animation::values::Interpolatable;

/// A single control point of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
    /// Curve used from this key to the next one.
    #[serde(default)]
    pub easing: EasingMethod,
}

impl<T> Keyframe<T> {
    #[must_use]
    pub fn new(time: f32, value: T, easing: EasingMethod) -> Self {
        Self { time, value, easing }
    }

    #[must_use]
    pub fn linear(time: f32, value: T) -> Self {
        Self::new(time, value, EasingMethod::Linear)
    }
}

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the segment used by the previous sample so that steady
/// playback resolves the next one in O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// An ordered list of keyframes animating one quantity.
///
/// Keys are expected in ascending time order. Mutators other than
/// [`insert_sorted`](Self::insert_sorted) and [`sort_by_time`](Self::sort_by_time)
/// do not enforce it; sampling an unsorted channel picks whichever segment
/// the forward scan hits first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeChannel<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeChannel<T> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

/// The common case: position, Euler rotation (degrees) or scale.
pub type Vec3Channel = KeyframeChannel<Vec3>;

impl<T: Interpolatable> KeyframeChannel<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_keys(keys: Vec<Keyframe<T>>) -> Self {
        Self { keys }
    }

    /// Samples the channel at `time`.
    ///
    /// - no keys: `fallback`
    /// - one key: that key's value, whatever the time
    /// - otherwise the segment ending at the first key after `keys[0]` that
    ///   is strictly later than `time` is blended with the easing of its
    ///   earlier key. Times at or past the last key hold the last value.
    ///   Times before the first key extrapolate backwards along the first
    ///   segment (`t < 0`).
    #[must_use]
    pub fn sample(&self, time: f32, fallback: T) -> T {
        match self.keys.as_slice() {
            [] => fallback,
            [only] => only.value,
            keys => keys
                .windows(2)
                .find(|pair| pair[1].time > time)
                .map_or(keys[keys.len() - 1].value, |pair| {
                    Self::blend(&pair[0], &pair[1], time)
                }),
        }
    }

    /// Cursor-accelerated [`sample`](Self::sample).
    ///
    /// Returns the same value as `sample` for channels in ascending time
    /// order, NaN included. Looks a few segments around the cursor first and
    /// falls back to a binary search on large jumps (scrubbing, loop wrap).
    pub fn sample_with_cursor(&self, time: f32, fallback: T, cursor: &mut KeyframeCursor) -> T {
        let len = self.keys.len();
        match len {
            0 => return fallback,
            1 => return self.keys[0].value,
            _ => {}
        }

        if time.is_nan() {
            return self.keys[len - 1].value;
        }
        if time < self.keys[0].time {
            cursor.last_index = 0;
            return Self::blend(&self.keys[0], &self.keys[1], time);
        }

        let i = cursor.last_index.min(len - 1);

        let found = if time >= self.keys[i].time {
            // Forward: playback or fast-forward.
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    res = Some(len - 1);
                    break;
                }
                if time < self.keys[idx + 1].time {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward: reverse playback. time < keys[i].time is known.
            let mut res = None;
            for offset in 1..=MAX_SCAN_OFFSET {
                let Some(idx) = i.checked_sub(offset) else {
                    break;
                };
                if time >= self.keys[idx].time {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let index = found.unwrap_or_else(|| {
            self.keys
                .partition_point(|k| k.time <= time)
                .saturating_sub(1)
        });
        cursor.last_index = index;

        if index >= len - 1 {
            return self.keys[len - 1].value;
        }
        Self::blend(&self.keys[index], &self.keys[index + 1], time)
    }

    #[allow(clippy::float_cmp)]
    fn blend(prev: &Keyframe<T>, next: &Keyframe<T>, time: f32) -> T {
        let span = next.time - prev.time;
        // Duplicate timestamps collapse to the earlier key.
        let t = if span == 0.0 { 0.0 } else { (time - prev.time) / span };
        prev.easing.ease(prev.value, next.value, t)
    }
}

impl<T> KeyframeChannel<T> {
    #[inline]
    #[must_use]
    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Keyframe<T>> {
        self.keys.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Keyframe<T>> {
        self.keys.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Keyframe<T>> {
        self.keys.get_mut(index)
    }

    /// Appends a key without checking its time.
    pub fn push(&mut self, key: Keyframe<T>) {
        self.keys.push(key);
    }

    /// Inserts a key after every key with a time less than or equal to its
    /// own, keeping a sorted channel sorted.
    pub fn insert_sorted(&mut self, key: Keyframe<T>) -> usize {
        let index = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(index, key);
        index
    }

    pub fn pop(&mut self) -> Option<Keyframe<T>> {
        self.keys.pop()
    }

    pub fn remove(&mut self, index: usize) -> Option<Keyframe<T>> {
        (index < self.keys.len()).then(|| self.keys.remove(index))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Restores ascending time order. Equal times keep their relative order.
    pub fn sort_by_time(&mut self) {
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Latest key time, or `0.0` for an empty channel.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.keys.iter().map(|k| k.time).fold(0.0_f32, f32::max)
    }
}
