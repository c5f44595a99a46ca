//! Keyframe Track Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step interpolation (f32, Vec3, Quat)
//! - Endpoint clamping and single-keyframe tracks
//! - Zero-length keyframe intervals
//! - Exact rotations at keyframe boundaries
//! - BoneTrack TRS composition and continuity

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

use myth_rig::animation::bone_track::{BoneTrack, BoneTrackCursor};
use myth_rig::animation::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use myth_rig::animation::values::Interpolatable;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mat_approx(a: &Mat4, b: &Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() < 1e-4)
}

// ============================================================================
// KeyframeTrack: Linear Interpolation (f32)
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let val = track.sample(0.5);
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframe() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    assert!(approx(track.sample(0.0), 0.0));
    assert!(approx(track.sample(1.0), 10.0));
    assert!(approx(track.sample(2.0), 20.0));
}

#[test]
fn track_linear_f32_clamp_beyond_range() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    // Sampling beyond the last keyframe should clamp to last value
    let val = track.sample(5.0);
    assert!(approx(val, 10.0), "Expected 10.0, got {val}");
}

#[test]
fn track_linear_f32_before_first() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0], InterpolationMode::Linear);

    // Before first keyframe: should clamp to first value
    assert!(approx(track.sample(0.5), 10.0));

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 10.0));
}

#[test]
fn track_single_keyframe_is_constant() {
    let track = KeyframeTrack::constant(Vec3::new(1.0, 2.0, 3.0));

    for t in [-10.0, 0.0, 0.5, 1e6] {
        assert_eq!(track.sample(t), Vec3::new(1.0, 2.0, 3.0));
    }
}

// ============================================================================
// KeyframeTrack: Zero-length intervals
// ============================================================================

#[test]
fn track_duplicate_timestamps_jump_to_post_keyframe() {
    let track = KeyframeTrack::from_keyframes(&[(0.0, 0.0_f32), (1.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);
    assert!(track.validate().is_ok());

    let at_key = track.sample(1.0);
    assert!(approx(at_key, 20.0), "Expected post-keyframe 20.0, got {at_key}");
    assert!(!track.sample(1.0).is_nan());
    assert!(approx(track.sample(1.5), 25.0));
    assert!(approx(track.sample(0.5), 5.0));

    let mut cursor = KeyframeCursor::default();
    for t in [0.0, 0.5, 0.999, 1.0, 1.5, 2.0] {
        let a = track.sample_with_cursor(t, &mut cursor);
        assert!(!a.is_nan());
        assert!(approx(a, track.sample(t)), "t={t}");
    }
}

#[test]
fn track_all_keyframes_at_same_time() {
    let track = KeyframeTrack::from_keyframes(&[(2.0, 1.0_f32), (2.0, 7.0)]);
    assert!(approx(track.sample(0.0), 1.0));
    assert!(approx(track.sample(2.0), 7.0));
    assert!(approx(track.sample(3.0), 7.0));
}

// ============================================================================
// KeyframeTrack: Step Interpolation
// ============================================================================

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(0.99, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 100.0));
    assert!(approx(track.sample_with_cursor(1.5, &mut cursor), 100.0));
}

// ============================================================================
// KeyframeTrack: Linear Interpolation (Vec3)
// ============================================================================

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5);
    assert!(approx(val.x, 5.0));
    assert!(approx(val.y, 10.0));
    assert!(approx(val.z, 15.0));
}

// ============================================================================
// KeyframeTrack: Rotation (Quat - slerp)
// ============================================================================

#[test]
fn track_quat_slerp_midpoint() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(FRAC_PI_2);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = track.sample(0.5);
    let expected = Quat::from_rotation_y(FRAC_PI_2 * 0.5);
    let angle = val.angle_between(expected);
    assert!(angle < 1e-3, "Quaternion slerp mismatch: angle={angle}");
}

#[test]
fn track_quat_boundaries_are_exact() {
    let q0 = Quat::from_rotation_x(0.3);
    // Opposite hemisphere: slerp would flip the sign internally
    let q1 = -Quat::from_rotation_z(2.5);

    let track = KeyframeTrack::new(vec![0.0, 4.0], vec![q0, q1], InterpolationMode::Linear);

    assert_eq!(track.sample(0.0), q0);
    assert_eq!(track.sample(4.0), q1);

    let mut cursor = KeyframeCursor::default();
    assert_eq!(track.sample_with_cursor(0.0, &mut cursor), q0);
    assert_eq!(track.sample_with_cursor(4.0, &mut cursor), q1);
}

#[test]
fn quat_interpolation_takes_shortest_arc() {
    let q0 = Quat::from_rotation_y(0.1);
    // Same orientation as from_rotation_y(0.3), other hemisphere
    let q1 = -Quat::from_rotation_y(0.3);

    let mid = Quat::interpolate_linear(q0, q1, 0.5);
    let expected = Quat::from_rotation_y(0.2);
    assert!(mid.angle_between(expected) < 1e-3);
}

#[test]
fn quat_half_turn_keeps_unit_length() {
    let track = KeyframeTrack::from_keyframes(&[(0.0, Quat::IDENTITY), (1.0, Quat::from_rotation_y(PI))]);
    for i in 0..=10 {
        let q = track.sample(i as f32 / 10.0);
        assert!(approx(q.length(), 1.0));
    }
}

// ============================================================================
// BoneTrack: TRS composition
// ============================================================================

fn walk_track() -> BoneTrack {
    BoneTrack::new(
        KeyframeTrack::from_keyframes(&[(0.0, Vec3::ZERO), (10.0, Vec3::new(10.0, 0.0, 0.0))]),
        KeyframeTrack::from_keyframes(&[
            (0.0, Quat::IDENTITY),
            (5.0, Quat::from_rotation_y(FRAC_PI_2)),
            (10.0, Quat::from_rotation_y(PI)),
        ]),
        KeyframeTrack::constant(Vec3::splat(2.0)),
    )
}

#[test]
fn bone_track_composes_translate_rotate_scale() {
    let track = walk_track();
    let m = track.sample(5.0);

    let expected = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0))
        * Mat4::from_quat(Quat::from_rotation_y(FRAC_PI_2))
        * Mat4::from_scale(Vec3::splat(2.0));
    assert!(mat_approx(&m, &expected));

    // A point on +X is scaled, then rotated onto -Z, then moved
    let p = m.transform_point3(Vec3::X);
    assert!(p.distance(Vec3::new(5.0, 0.0, -2.0)) < 1e-4);
}

#[test]
fn bone_track_cursor_sampling_matches_search() {
    let track = walk_track();
    let mut cursor = BoneTrackCursor::default();
    let mut t = 0.0;
    while t <= 12.0 {
        assert!(mat_approx(&track.sample_with_cursors(t, &mut cursor), &track.sample(t)), "t={t}");
        t += 0.7;
    }
    // Loop wrap
    assert!(mat_approx(&track.sample_with_cursors(1.0, &mut cursor), &track.sample(1.0)));
}

#[test]
fn bone_track_is_continuous() {
    let track = walk_track();
    let eps = 1e-3;
    // Max rate of change: translation 1 unit/tick, rotation ~0.31 rad/tick,
    // scaled points of radius <= 2
    let bound = 4.0 * eps;

    let mut t = 0.0;
    while t < 10.0 {
        let a = track.sample(t);
        let b = track.sample(t + eps);
        let diff = a
            .to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0_f32, f32::max);
        assert!(diff <= bound, "jump of {diff} at t={t}");
        t += 0.37;
    }
}

#[test]
fn bone_track_end_time_spans_all_channels() {
    let track = BoneTrack::new(
        KeyframeTrack::from_keyframes(&[(0.0, Vec3::ZERO), (3.0, Vec3::X)]),
        KeyframeTrack::from_keyframes(&[(0.0, Quat::IDENTITY), (8.0, Quat::IDENTITY)]),
        KeyframeTrack::constant(Vec3::ONE),
    );
    assert!(approx(track.end_time(), 8.0));
}

#[test]
fn bone_track_validation_names_channel() {
    let track = BoneTrack::new(
        KeyframeTrack::constant(Vec3::ZERO),
        KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear),
        KeyframeTrack::constant(Vec3::ONE),
    );
    let err = track.validate("spine").unwrap_err();
    assert!(err.to_string().contains("rotation"), "{err}");
    assert!(err.to_string().contains("spine"), "{err}");
}
