use glam::{Quat, Vec3};

/// A value that can be blended between two keyframes or control points.
///
/// `t` is not clamped: easing curves such as `EaseInOutBack` deliberately
/// push it slightly outside `[0, 1]` to overshoot.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.normalize().slerp(end.normalize(), t)
    }
}

/// Evaluates a cubic Bézier curve with de Casteljau's construction.
///
/// Works for any [`Interpolatable`]; for [`Quat`] every blend is a slerp,
/// which gives the nested-slerp rotation curve used by spline paths.
pub fn de_casteljau<T: Interpolatable>(controls: [T; 4], t: f32) -> T {
    let [p0, p1, p2, p3] = controls;

    let a = T::interpolate_linear(p0, p1, t);
    let b = T::interpolate_linear(p1, p2, t);
    let c = T::interpolate_linear(p2, p3, t);

    let d = T::interpolate_linear(a, b, t);
    let e = T::interpolate_linear(b, c, t);

    T::interpolate_linear(d, e, t)
}
