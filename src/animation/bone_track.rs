use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::animation::tracks::{KeyframeCursor, KeyframeTrack, TrackDefect};
use crate::errors::{Result, RigError};

/// Keyframes for one animated node.
///
/// The three channels are time-stamped independently; an importer is free to
/// key rotation more densely than translation, for example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneTrack {
    pub positions: KeyframeTrack<Vec3>,
    pub rotations: KeyframeTrack<Quat>,
    pub scales: KeyframeTrack<Vec3>,
}

/// Per-channel cursors for [`BoneTrack::sample_with_cursors`].
#[derive(Debug, Clone, Default)]
pub struct BoneTrackCursor {
    pub position: KeyframeCursor,
    pub rotation: KeyframeCursor,
    pub scale: KeyframeCursor,
}

impl BoneTrack {
    #[must_use]
    pub fn new(
        positions: KeyframeTrack<Vec3>,
        rotations: KeyframeTrack<Quat>,
        scales: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            positions,
            rotations,
            scales,
        }
    }

    /// A track that always yields the given pose.
    #[must_use]
    pub fn constant(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::new(
            KeyframeTrack::constant(position),
            KeyframeTrack::constant(rotation),
            KeyframeTrack::constant(scale),
        )
    }

    /// Last keyframe time over all channels.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.positions
            .end_time()
            .max(self.rotations.end_time())
            .max(self.scales.end_time())
    }

    /// Validates all three channels; `node` is only used for the error.
    pub fn validate(&self, node: &str) -> Result<()> {
        let wrap = |channel: &'static str, defect: TrackDefect| RigError::InvalidTrack {
            node: node.to_string(),
            channel,
            reason: defect.to_string(),
        };
        self.positions.validate().map_err(|d| wrap("position", d))?;
        self.rotations.validate().map_err(|d| wrap("rotation", d))?;
        self.scales.validate().map_err(|d| wrap("scale", d))?;
        Ok(())
    }

    /// Rescales every rotation keyframe to unit length.
    ///
    /// Zero or non-finite keyframes become identity.
    pub fn normalize_rotations(&mut self) {
        for q in &mut self.rotations.values {
            *q = Vec4::from(*q)
                .try_normalize()
                .map_or(Quat::IDENTITY, Quat::from_vec4);
        }
    }

    /// Local transform at `time` (in ticks): `translate · rotate · scale`.
    ///
    /// Rotation keyframes are used as stored, so a keyframe time yields that
    /// exact rotation. They are expected to be unit length; clips are
    /// normalized when bound (see [`normalize_rotations`](Self::normalize_rotations)).
    #[must_use]
    pub fn sample(&self, time: f32) -> Mat4 {
        let position = self.positions.sample(time);
        let rotation = self.rotations.sample(time);
        let scale = self.scales.sample(time);
        Mat4::from_scale_rotation_translation(scale, rotation, position)
    }

    /// Same as [`sample`](Self::sample) with cached keyframe lookups.
    pub fn sample_with_cursors(&self, time: f32, cursor: &mut BoneTrackCursor) -> Mat4 {
        let position = self.positions.sample_with_cursor(time, &mut cursor.position);
        let rotation = self.rotations.sample_with_cursor(time, &mut cursor.rotation);
        let scale = self.scales.sample_with_cursor(time, &mut cursor.scale);
        Mat4::from_scale_rotation_translation(scale, rotation, position)
    }
}
