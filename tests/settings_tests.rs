//! Settings & Import Data Tests
//!
//! Tests for:
//! - AnimatorSettings defaults and partial deserialization
//! - PaletteSwitchPolicy naming
//! - Clip data loaded from JSON and bound to a rig

use glam::{Mat4, Vec3};

use myth_rig::animation::AnimationClip;
use myth_rig::rig::RigBuilder;
use myth_rig::settings::{AnimatorSettings, MAX_BONES, PaletteSwitchPolicy};
use myth_rig::skeleton::NodeDesc;

#[test]
fn default_settings() {
    let settings = AnimatorSettings::default();
    assert_eq!(settings.palette_capacity, MAX_BONES);
    assert_eq!(settings.max_hierarchy_depth, 256);
    assert_eq!(settings.on_clip_switch, PaletteSwitchPolicy::Retain);
}

#[test]
fn missing_fields_fall_back_to_defaults() -> anyhow::Result<()> {
    let settings: AnimatorSettings = serde_json::from_str(r#"{ "palette_capacity": 64 }"#)?;
    assert_eq!(settings.palette_capacity, 64);
    assert_eq!(settings.max_hierarchy_depth, 256);
    assert_eq!(settings.on_clip_switch, PaletteSwitchPolicy::Retain);

    let empty: AnimatorSettings = serde_json::from_str("{}")?;
    assert_eq!(empty, AnimatorSettings::default());
    Ok(())
}

#[test]
fn switch_policy_uses_snake_case() -> anyhow::Result<()> {
    let settings: AnimatorSettings = serde_json::from_str(r#"{ "on_clip_switch": "bind_pose" }"#)?;
    assert_eq!(settings.on_clip_switch, PaletteSwitchPolicy::BindPose);

    let json = serde_json::to_string(&PaletteSwitchPolicy::Retain)?;
    assert_eq!(json, r#""retain""#);
    Ok(())
}

#[test]
fn unknown_policy_is_rejected() {
    let result: Result<AnimatorSettings, _> =
        serde_json::from_str(r#"{ "on_clip_switch": "blend" }"#);
    assert!(result.is_err());
}

#[test]
fn settings_survive_serialization() -> anyhow::Result<()> {
    let settings = AnimatorSettings {
        palette_capacity: 128,
        max_hierarchy_depth: 32,
        on_clip_switch: PaletteSwitchPolicy::BindPose,
    };
    let json = serde_json::to_string(&settings)?;
    let back: AnimatorSettings = serde_json::from_str(&json)?;
    assert_eq!(back, settings);
    Ok(())
}

#[test]
fn clip_loaded_from_json_binds() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let clip = AnimationClip::new("nod", 2.0, 1.0).with_channel(
        "head",
        myth_rig::BoneTrack::constant(Vec3::Y, glam::Quat::from_rotation_x(0.2), Vec3::ONE),
    );
    let json = serde_json::to_string(&clip)?;
    let loaded: AnimationClip = serde_json::from_str(&json)?;
    assert_eq!(loaded.name, "nod");
    assert_eq!(loaded.channels.len(), 1);

    let hierarchy = NodeDesc::new("root", Mat4::IDENTITY)
        .with_child(NodeDesc::new("head", Mat4::from_translation(Vec3::Y)));
    let mut builder = RigBuilder::new(hierarchy);
    builder.add_clip(loaded);
    let rig = builder.build()?;

    let mut animator = rig.animator("nod")?;
    animator.update(0.5);
    assert!(!animator.palette().is_identity());
    Ok(())
}

#[test]
fn imported_clip_without_tick_rate_uses_default() -> anyhow::Result<()> {
    let clip = AnimationClip::new("sway", 10.0, 10.0).with_channel(
        "head",
        myth_rig::BoneTrack::constant(Vec3::Y, glam::Quat::IDENTITY, Vec3::ONE),
    );
    let mut json = serde_json::to_value(&clip)?;
    json["ticks_per_second"] = serde_json::json!(0.0);
    let loaded: AnimationClip = serde_json::from_value(json)?;
    assert_eq!(loaded.ticks_per_second, 0.0);
    assert!((loaded.duration_seconds() - 0.4).abs() < 1e-6);

    let hierarchy = NodeDesc::new("root", Mat4::IDENTITY)
        .with_child(NodeDesc::new("head", Mat4::from_translation(Vec3::Y)));
    let mut builder = RigBuilder::new(hierarchy);
    builder.add_clip(loaded);
    let rig = builder.build()?;
    assert_eq!(
        rig.clip("sway").map(|c| c.ticks_per_second()),
        Some(myth_rig::animation::DEFAULT_TICKS_PER_SECOND)
    );

    let mut animator = rig.animator("sway")?;
    animator.update(0.2);
    assert!((animator.current_time() - 5.0).abs() < 1e-5);
    Ok(())
}
