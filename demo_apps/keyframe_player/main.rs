//! Plays a keyframe clip in a fixed-step loop and logs the model matrix
//! handed to the draw sink each frame.
//!
//! Usage: `keyframe_player [clip.json] [settings.json]`
//!
//! Without arguments a built-in bounce clip is played with default settings.
//! Run with `RUST_LOG=debug` to see playback events.

use glam::{Mat4, Vec3};

use kinema::animation::{AnimationClip, Animator, ChannelKind, EasingMethod, Keyframe};
use kinema::frame::{DrawSink, FrameContext, Material};
use kinema::settings::PlaybackSettings;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAME_COUNT: u64 = 240;
const LOG_EVERY: u64 = 15;

/// Logs draws instead of rasterizing them.
#[derive(Default)]
struct LogSink {
    draws: usize,
}

impl DrawSink for LogSink {
    fn draw(&mut self, model: &Mat4, material: &Material) {
        self.draws += 1;
        let (scale, _, translation) = model.to_scale_rotation_translation();
        log::trace!("draw #{} at {translation} scale {scale} (kd {})", self.draws, material.kd);
    }
}

fn bounce_clip() -> anyhow::Result<AnimationClip> {
    let mut clip = AnimationClip::new("bounce").with_duration(2.0)?;

    let position = clip.channel_mut(ChannelKind::Position);
    position.push(Keyframe::new(0.0, Vec3::ZERO, EasingMethod::EaseInOutSine));
    position.push(Keyframe::new(1.0, Vec3::new(0.0, 2.0, 0.0), EasingMethod::EaseInOutQuart));
    position.push(Keyframe::linear(2.0, Vec3::ZERO));

    let rotation = clip.channel_mut(ChannelKind::Rotation);
    rotation.push(Keyframe::linear(0.0, Vec3::ZERO));
    rotation.push(Keyframe::linear(2.0, Vec3::new(0.0, 360.0, 0.0)));

    let scale = clip.channel_mut(ChannelKind::Scale);
    scale.push(Keyframe::new(0.0, Vec3::ONE, EasingMethod::EaseInOutBack));
    scale.push(Keyframe::new(1.0, Vec3::splat(1.5), EasingMethod::EaseInOutBack));
    scale.push(Keyframe::linear(2.0, Vec3::ONE));

    Ok(clip)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let clip = match args.next() {
        Some(path) => AnimationClip::load(&path)?,
        None => bounce_clip()?,
    };
    let settings = match args.next() {
        Some(path) => PlaybackSettings::load(&path)?,
        None => PlaybackSettings::default(),
    };

    log::info!(
        "Playing '{}' ({}s) at speed {} looping={}",
        clip.name,
        clip.duration(),
        settings.speed,
        settings.looping
    );

    let mut animator = Animator::with_settings(clip, &settings);
    let mut sink = LogSink::default();
    let material = Material::default();

    for frame_index in 0..FRAME_COUNT {
        let frame = FrameContext::fixed(FRAME_DT, frame_index);
        animator.update(frame.dt);

        let pose = animator.sample();
        sink.draw(&pose.model_matrix(), &material);

        if frame.frame_index % LOG_EVERY == 0 {
            log::info!(
                "t={:.3} position={} rotation={} scale={}",
                animator.time,
                pose.position,
                pose.rotation_degrees,
                pose.scale
            );
        }
        if !animator.playing {
            log::info!("Playback stopped at frame {}", frame.frame_index);
            break;
        }
    }

    log::info!("Issued {} draws", sink.draws);
    Ok(())
}
