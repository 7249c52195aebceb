//! Cubic Bézier motion paths.
//!
//! A [`SplinePath`] is a chain of [`BezierSegment`]s, each spanning one unit
//! of path time. Position and scale follow the Bézier curve of their control
//! points; rotation follows the same construction with slerp in place of
//! lerp.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::values::de_casteljau;
use crate::errors::{KinemaError, Result};
use crate::scene::transform::{Transform, euler_degrees_to_quat};

/// Line segments used to draw one Bézier segment.
pub const DEFAULT_POLYLINE_STEPS: usize = 50;

/// One control point: a full pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplinePoint {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for SplinePoint {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Four control points. `controls[1]` and `controls[2]` are tangent handles
/// derived from the endpoints by [`SplinePath::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BezierSegment {
    pub controls: [SplinePoint; 4],
    /// Length of the outgoing handle at `controls[0]`.
    pub start_size: f32,
    /// Length of the incoming handle at `controls[3]`.
    pub end_size: f32,
}

impl Default for BezierSegment {
    fn default() -> Self {
        Self {
            controls: [SplinePoint::default(); 4],
            start_size: 1.0,
            end_size: 1.0,
        }
    }
}

/// A pose sampled from a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl SplineSample {
    #[must_use]
    pub fn to_transform(&self) -> Transform {
        Transform::from_trs(self.position, self.rotation, self.scale)
    }
}

impl BezierSegment {
    /// Samples the segment at local `t ∈ [0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f32) -> SplineSample {
        let [a, b, c, d] = self.controls;
        SplineSample {
            position: de_casteljau([a.position, b.position, c.position, d.position], t),
            rotation: de_casteljau(
                [a.rotation, b.rotation, c.rotation, d.rotation].map(euler_degrees_to_quat),
                t,
            ),
            scale: de_casteljau([a.scale, b.scale, c.scale, d.scale], t),
        }
    }

    fn update_handles(&mut self) {
        let start = self.controls[0];
        let end = self.controls[3];

        let out_handle = euler_degrees_to_quat(start.rotation) * (Vec3::X * self.start_size);
        let in_handle = euler_degrees_to_quat(end.rotation) * (Vec3::NEG_X * self.end_size);

        self.controls[1].position = start.position + out_handle;
        self.controls[2].position = end.position + in_handle;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplinePath {
    segments: Vec<BezierSegment>,
}

impl SplinePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    pub fn segment_mut(&mut self, index: usize) -> Result<&mut BezierSegment> {
        let len = self.segments.len();
        self.segments
            .get_mut(index)
            .ok_or(KinemaError::SegmentIndexOutOfBounds { index, len })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total path time: one unit per segment.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.segments.len() as f32
    }

    /// Appends a segment that starts where the previous one ends and rises
    /// diagonally by 3 units on every axis.
    pub fn push_segment(&mut self) -> usize {
        let mut segment = BezierSegment::default();
        if let Some(prev) = self.segments.last() {
            segment.controls[0].position = prev.controls[3].position;
        }

        let start = segment.controls[0].position;
        segment.controls[1].position = start + Vec3::X;
        segment.controls[3].position = start + Vec3::splat(3.0);
        segment.controls[2].position = segment.controls[3].position - Vec3::X;

        self.segments.push(segment);
        log::debug!("Spline path now has {} segments", self.segments.len());
        self.segments.len() - 1
    }

    pub fn pop_segment(&mut self) -> Option<BezierSegment> {
        self.segments.pop()
    }

    /// Re-establishes continuity after edits: every segment starts with the
    /// previous segment's end point and end size, and tangent handles are
    /// rebuilt from endpoint rotations and handle sizes.
    pub fn refresh(&mut self) {
        for index in 0..self.segments.len() {
            if index > 0 {
                let prev = self.segments[index - 1];
                let segment = &mut self.segments[index];
                segment.controls[0] = prev.controls[3];
                segment.start_size = prev.end_size;
            }
            self.segments[index].update_handles();
        }
    }

    /// Samples the path at `path_time ∈ [0, len]`. Segment `i` covers
    /// `[i, i + 1)`; the final instant `len` maps to the end of the last
    /// segment. Returns `None` for an empty path or out-of-range time.
    #[must_use]
    pub fn sample(&self, path_time: f32) -> Option<SplineSample> {
        if self.segments.is_empty() || !(0.0..=self.duration()).contains(&path_time) {
            return None;
        }
        let index = (path_time.floor() as usize).min(self.segments.len() - 1);
        Some(self.segments[index].sample(path_time - index as f32))
    }

    /// Points along one segment for line rendering, `steps + 1` in total.
    pub fn polyline(&self, index: usize, steps: usize) -> Result<Vec<Vec3>> {
        let segment = self
            .segments
            .get(index)
            .ok_or(KinemaError::SegmentIndexOutOfBounds {
                index,
                len: self.segments.len(),
            })?;
        let steps = steps.max(1);
        Ok((0..=steps)
            .map(|i| segment.sample(i as f32 / steps as f32).position)
            .collect())
    }
}

/// Moves along a path so that the whole path takes one second regardless
/// of segment count.
#[derive(Debug, Clone, Default)]
pub struct PathFollower {
    pub time: f32,
}

impl PathFollower {
    /// Advances by `dt * segment count`, restarting at 0 past the end.
    /// Like [`Animator::update`](crate::animation::Animator::update), the
    /// overshoot is dropped.
    pub fn update(&mut self, dt: f32, path: &SplinePath) {
        let duration = path.duration();
        self.time += dt * duration;
        if self.time > duration {
            self.time = 0.0;
        }
    }

    #[must_use]
    pub fn sample(&self, path: &SplinePath) -> Option<SplineSample> {
        path.sample(self.time)
    }
}
