//! Bézier motion path tests
//!
//! Tests for:
//! - de Casteljau evaluation for scalars, vectors and quaternions
//! - Shortest-arc quaternion blending
//! - Segment layout produced by `push_segment`
//! - Continuity and tangent handles rebuilt by `refresh`
//! - Path-time to segment mapping and the polyline used for drawing
//! - PathFollower playback

use glam::{Quat, Vec3};

use kinema::animation::spline::DEFAULT_POLYLINE_STEPS;
use kinema::animation::{Interpolatable, PathFollower, SplinePath, de_casteljau};
use kinema::errors::KinemaError;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn two_segment_path() -> SplinePath {
    let mut path = SplinePath::new();
    path.push_segment();
    path.push_segment();
    path
}

// ============================================================================
// de Casteljau
// ============================================================================

#[test]
fn de_casteljau_endpoints_and_midpoint() {
    let controls = [0.0_f32, 0.0, 1.0, 1.0];
    assert!((de_casteljau(controls, 0.0) - 0.0).abs() < EPSILON);
    assert!((de_casteljau(controls, 1.0) - 1.0).abs() < EPSILON);
    assert!((de_casteljau(controls, 0.5) - 0.5).abs() < EPSILON);
}

#[test]
fn de_casteljau_evenly_spaced_controls_is_linear() {
    let controls = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0];
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let p = de_casteljau(controls, t);
        assert!(vec3_approx(p, Vec3::X * 3.0 * t), "t={t} got {p}");
    }
}

#[test]
fn de_casteljau_quaternion_stays_unit() {
    let controls = [
        Quat::IDENTITY,
        Quat::from_rotation_y(0.4),
        Quat::from_rotation_x(1.1),
        Quat::from_rotation_z(-0.7),
    ];
    for i in 0..=8 {
        let q = de_casteljau(controls, i as f32 / 8.0);
        assert!((q.length() - 1.0).abs() < 1e-4);
    }
    assert!(de_casteljau(controls, 0.0).abs_diff_eq(Quat::IDENTITY, EPSILON));
    assert!(de_casteljau(controls, 1.0).abs_diff_eq(controls[3], 1e-4));
}

#[test]
fn quaternion_blend_takes_shorter_arc() {
    // -q is the same rotation as q; blending must not swing the long way round
    let start = Quat::IDENTITY;
    let end = -Quat::from_rotation_y(0.5);

    let mid = Quat::interpolate_linear(start, end, 0.5);
    assert!(mid.abs_diff_eq(Quat::from_rotation_y(0.25), 1e-4), "got {mid}");

    // A true slerp: constant angular speed, unlike a normalized lerp
    let wide = Quat::from_rotation_z(2.5);
    let quarter = Quat::interpolate_linear(start, wide, 0.25);
    assert!(quarter.abs_diff_eq(Quat::from_rotation_z(0.625), 1e-4), "got {quarter}");
}

// ============================================================================
// Segment Layout
// ============================================================================

#[test]
fn first_segment_starts_at_origin() {
    let mut path = SplinePath::new();
    assert_eq!(path.push_segment(), 0);

    let [a, b, c, d] = path.segments()[0].controls;
    assert_eq!(a.position, Vec3::ZERO);
    assert_eq!(b.position, Vec3::X);
    assert_eq!(c.position, Vec3::new(2.0, 3.0, 3.0));
    assert_eq!(d.position, Vec3::splat(3.0));
    assert_eq!(a.scale, Vec3::ONE);
}

#[test]
fn pushed_segment_continues_from_previous_end() {
    let path = two_segment_path();
    assert_eq!(path.len(), 2);
    assert_eq!(path.duration(), 2.0);

    let second = path.segments()[1].controls;
    assert_eq!(second[0].position, Vec3::splat(3.0));
    assert_eq!(second[3].position, Vec3::splat(6.0));
}

#[test]
fn pop_and_segment_mut() {
    let mut path = two_segment_path();
    assert!(path.pop_segment().is_some());
    assert_eq!(path.len(), 1);

    assert!(path.segment_mut(0).is_ok());
    assert!(matches!(
        path.segment_mut(1),
        Err(KinemaError::SegmentIndexOutOfBounds { index: 1, len: 1 })
    ));
}

// ============================================================================
// Refresh
// ============================================================================

#[test]
fn refresh_links_segments_and_rebuilds_handles() {
    let mut path = two_segment_path();
    {
        let first = path.segment_mut(0).unwrap();
        first.controls[3].position = Vec3::new(10.0, 0.0, 0.0);
        first.controls[3].rotation = Vec3::new(0.0, 90.0, 0.0);
        first.end_size = 2.0;
    }
    path.refresh();

    let first = path.segments()[0];
    let second = path.segments()[1];

    assert_eq!(second.controls[0], first.controls[3]);
    assert_eq!(second.start_size, 2.0);

    // Outgoing handle of the first segment: no rotation, size 1
    assert!(vec3_approx(first.controls[1].position, Vec3::X));
    // Incoming handle: -X rotated 90° about Y is +Z, scaled by 2
    assert!(vec3_approx(first.controls[2].position, Vec3::new(10.0, 0.0, 2.0)));
    // Outgoing handle of the second segment mirrors it
    assert!(vec3_approx(second.controls[1].position, Vec3::new(10.0, 0.0, -2.0)));
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn sample_maps_path_time_to_segments() {
    let path = two_segment_path();

    let start = path.sample(0.0).unwrap();
    assert!(vec3_approx(start.position, Vec3::ZERO));
    assert!(start.rotation.abs_diff_eq(Quat::IDENTITY, EPSILON));
    assert!(vec3_approx(start.scale, Vec3::ONE));

    let joint = path.sample(1.0).unwrap();
    assert!(vec3_approx(joint.position, Vec3::splat(3.0)));

    // The final instant belongs to the last segment
    let end = path.sample(2.0).unwrap();
    assert!(vec3_approx(end.position, Vec3::splat(6.0)));
}

#[test]
fn sample_outside_range_is_none() {
    let path = two_segment_path();
    assert!(path.sample(-0.01).is_none());
    assert!(path.sample(2.01).is_none());
    assert!(SplinePath::new().sample(0.0).is_none());
}

#[test]
fn sample_to_transform_keeps_pose() {
    let path = two_segment_path();
    let sample = path.sample(0.5).unwrap();
    let transform = sample.to_transform();

    assert_eq!(transform.position, sample.position);
    assert_eq!(transform.rotation, sample.rotation);
    assert_eq!(transform.scale, sample.scale);
}

#[test]
fn polyline_covers_segment() {
    let path = two_segment_path();
    let points = path.polyline(1, DEFAULT_POLYLINE_STEPS).unwrap();

    assert_eq!(points.len(), DEFAULT_POLYLINE_STEPS + 1);
    assert!(vec3_approx(points[0], Vec3::splat(3.0)));
    assert!(vec3_approx(points[DEFAULT_POLYLINE_STEPS], Vec3::splat(6.0)));

    assert_eq!(path.polyline(0, 0).unwrap().len(), 2);
    assert!(matches!(
        path.polyline(5, 10),
        Err(KinemaError::SegmentIndexOutOfBounds { index: 5, len: 2 })
    ));
}

#[test]
fn path_deserializes_with_defaults() {
    let json = r#"[{ "controls": [{}, {}, {}, { "position": [1.0, 2.0, 3.0] }] }]"#;
    let path: SplinePath = serde_json::from_str(json).unwrap();

    let segment = path.segments()[0];
    assert_eq!(segment.start_size, 1.0);
    assert_eq!(segment.end_size, 1.0);
    assert_eq!(segment.controls[0].scale, Vec3::ONE);
    assert_eq!(segment.controls[3].position, Vec3::new(1.0, 2.0, 3.0));
}

// ============================================================================
// PathFollower
// ============================================================================

#[test]
fn follower_covers_path_in_one_second() {
    let path = two_segment_path();
    let mut follower = PathFollower::default();

    follower.update(0.25, &path);
    assert!((follower.time - 0.5).abs() < EPSILON);

    follower.update(0.5, &path);
    assert!((follower.time - 1.5).abs() < EPSILON);
    assert!(follower.sample(&path).is_some());

    // Past the end: restart, overshoot dropped
    follower.update(0.3, &path);
    assert_eq!(follower.time, 0.0);
}

#[test]
fn follower_on_empty_path_samples_nothing() {
    let path = SplinePath::new();
    let mut follower = PathFollower::default();
    follower.update(1.0, &path);

    assert_eq!(follower.time, 0.0);
    assert!(follower.sample(&path).is_none());
}
