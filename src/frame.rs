//! Per-frame context and the draw hand-off.
//!
//! The animation core never talks to a graphics API. Each frame the caller
//! builds a [`FrameContext`], advances animators with its `dt`, and pushes
//! the resulting model matrices into a [`DrawSink`].

use std::time::{Duration, Instant};

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Longest delta a [`FrameClock`] reports by default.
pub const DEFAULT_MAX_DT: f32 = 0.25;

/// Timing for one frame, passed explicitly instead of living in globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since the loop started.
    pub elapsed: f32,
    pub frame_index: u64,
}

impl FrameContext {
    /// Deterministic context for a fixed-step loop.
    #[must_use]
    pub fn fixed(dt: f32, frame_index: u64) -> Self {
        Self {
            dt,
            elapsed: dt * frame_index as f32,
            frame_index,
        }
    }
}

/// Wall-clock source of [`FrameContext`]s.
///
/// Deltas are clamped to `max_dt`; `elapsed` accumulates the clamped deltas,
/// so it tracks animation time rather than wall time after a stall.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: Duration,
    frame_index: u64,
    pub max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: Duration::ZERO,
            frame_index: 0,
            max_dt: DEFAULT_MAX_DT,
        }
    }

    /// Samples the clock. Call once per frame, before updating animation.
    pub fn tick(&mut self) -> FrameContext {
        let now = Instant::now();
        let raw = now - self.last_tick;
        self.last_tick = now;

        let dt = raw.as_secs_f32().min(self.max_dt.max(0.0));
        if dt < raw.as_secs_f32() {
            log::debug!("Frame {} took {raw:?}, clamped to {dt}s", self.frame_index);
        }
        self.elapsed += Duration::from_secs_f32(dt);
        self.frame_index += 1;

        FrameContext {
            dt,
            elapsed: self.elapsed.as_secs_f32(),
            frame_index: self.frame_index,
        }
    }

    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

/// Phong material scalars handed to the renderer with each draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Material {
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: 1.0,
            kd: 0.5,
            ks: 0.5,
            shininess: 128.0,
        }
    }
}

/// Receives one draw per animated object.
pub trait DrawSink {
    fn draw(&mut self, model: &Mat4, material: &Material);
}

/// Collects draws in order. Handy for tests and headless runs.
impl DrawSink for Vec<(Mat4, Material)> {
    fn draw(&mut self, model: &Mat4, material: &Material) {
        self.push((*model, *material));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_context() {
        let frame = FrameContext::fixed(0.5, 4);
        assert_eq!(frame.dt, 0.5);
        assert_eq!(frame.elapsed, 2.0);
        assert_eq!(frame.frame_index, 4);
    }

    #[test]
    fn test_clock_ticks() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();

        assert_eq!(first.frame_index, 1);
        assert_eq!(second.frame_index, 2);
        assert!(second.dt >= 0.0);
        assert!(second.elapsed >= first.elapsed);
        assert_eq!(clock.frame_index(), 2);
    }

    #[test]
    fn test_clock_clamps_stalls() {
        let mut clock = FrameClock::new();
        clock.max_dt = 0.0;
        std::thread::sleep(Duration::from_millis(2));

        let frame = clock.tick();
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.elapsed, 0.0);
    }

    #[test]
    fn test_material_layout() {
        let material = Material::default();
        let raw: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&material));
        assert_eq!(raw, &[1.0, 0.5, 0.5, 128.0]);
    }
}
