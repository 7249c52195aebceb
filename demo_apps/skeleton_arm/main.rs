//! Articulated arm: a transform hierarchy whose shoulder swings from a
//! keyframe clip while the whole rig travels along a Bézier path.
//!
//! Runs for three seconds of wall-clock time. Run with `RUST_LOG=info` to
//! follow the fingertip in world space.

use std::time::Duration;

use anyhow::Context;
use glam::{Mat4, Vec3};

use kinema::animation::{
    AnimationClip, Animator, ChannelKind, EasingMethod, Keyframe, PathFollower, SplinePath,
};
use kinema::frame::{FrameClock, Material};
use kinema::scene::{Node, NodeHandle, Transform, TransformHierarchy};
use kinema::settings::PlaybackSettings;

const FRAME_DT: f32 = 1.0 / 30.0;
const FRAME_COUNT: u64 = 90;
const LINK_SCALE: f32 = 0.8;

struct Rig {
    hierarchy: TransformHierarchy,
    shoulder: NodeHandle,
    fingertip: NodeHandle,
}

fn build_rig() -> anyhow::Result<Rig> {
    let mut hierarchy = TransformHierarchy::new();
    let link = |offset: Vec3| {
        Transform::from_euler_degrees(offset, Vec3::ZERO, Vec3::splat(LINK_SCALE))
    };

    let body = hierarchy.add_root(Transform::new());
    let shoulder = hierarchy.insert(Node::new(link(Vec3::X)).with_name("shoulder"), Some(body))?;
    let elbow = hierarchy.insert(Node::new(link(Vec3::X)).with_name("elbow"), Some(shoulder))?;
    let wrist = hierarchy.insert(Node::new(link(Vec3::X)).with_name("wrist"), Some(elbow))?;
    let fingertip = hierarchy.insert(Node::new(link(Vec3::X)).with_name("fingertip"), Some(wrist))?;

    let hip = hierarchy.insert(Node::new(link(Vec3::NEG_Y)).with_name("hip"), Some(body))?;
    hierarchy.insert(Node::new(link(Vec3::NEG_Y)).with_name("knee"), Some(hip))?;
    hierarchy.insert(Node::new(link(Vec3::NEG_Z)).with_name("tail"), Some(body))?;

    Ok(Rig {
        hierarchy,
        shoulder,
        fingertip,
    })
}

fn swing_clip() -> anyhow::Result<AnimationClip> {
    let mut clip = AnimationClip::new("swing").with_duration(1.5)?;
    let rotation = clip.channel_mut(ChannelKind::Rotation);
    rotation.push(Keyframe::new(0.0, Vec3::new(0.0, 0.0, -30.0), EasingMethod::EaseInOutSine));
    rotation.push(Keyframe::new(0.75, Vec3::new(0.0, 0.0, 45.0), EasingMethod::EaseInOutSine));
    rotation.push(Keyframe::linear(1.5, Vec3::new(0.0, 0.0, -30.0)));
    Ok(clip)
}

fn travel_path() -> SplinePath {
    let mut path = SplinePath::new();
    for _ in 0..3 {
        path.push_segment();
    }
    if let Ok(middle) = path.segment_mut(1) {
        middle.controls[3].rotation = Vec3::new(0.0, 90.0, 0.0);
        middle.end_size = 2.0;
    }
    path.refresh();
    path
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rig = build_rig()?;
    let body = rig
        .hierarchy
        .parent(rig.shoulder)?
        .context("shoulder is attached to the body")?;

    let mut swing = Animator::with_settings(swing_clip()?, &PlaybackSettings::default());
    let path = travel_path();
    let mut follower = PathFollower::default();

    let material = Material::default();
    let mut draws: Vec<(Mat4, Material)> = Vec::with_capacity(rig.hierarchy.len());

    let mut clock = FrameClock::new();
    while clock.frame_index() < FRAME_COUNT {
        std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
        let frame = clock.tick();

        // The path is traversed once every 3 seconds.
        follower.update(frame.dt / 3.0, &path);
        if let Some(pose) = follower.sample(&path)
            && let Some(node) = rig.hierarchy.get_mut(body)
        {
            node.transform.position = pose.position;
        }

        swing.update(frame.dt);
        let pose = swing.sample();
        if let Some(node) = rig.hierarchy.get_mut(rig.shoulder) {
            node.transform.set_rotation_euler_degrees(pose.rotation_degrees);
        }

        draws.clear();
        rig.hierarchy.draw(&mut draws, &material);

        if frame.frame_index % 10 == 0 {
            let tip = rig.hierarchy.world_matrix(rig.fingertip)?.w_axis.truncate();
            log::info!(
                "frame {:>3} t={:.2}s path={:.2} fingertip={tip}",
                frame.frame_index,
                frame.elapsed,
                follower.time
            );
        }
    }

    for (handle, node) in rig.hierarchy.iter() {
        let name = node.name.as_deref().unwrap_or("<unnamed>");
        log::info!("{name}: world scale {}", rig.hierarchy.world_scale(handle)?);
    }
    log::info!("Last frame issued {} draws", draws.len());
    Ok(())
}
