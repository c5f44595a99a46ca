use std::sync::Arc;

use crate::animation::binder::BoundClip;
use crate::animation::bone_track::BoneTrackCursor;
use crate::animation::evaluator;
use crate::animation::palette::SkinningPalette;
use crate::errors::{Result, RigError};
use crate::settings::{AnimatorSettings, PaletteSwitchPolicy};
use crate::skeleton::Skeleton;

/// Plays one skeletal clip in a loop and keeps its skinning palette current.
///
/// The palette is identity (neutral pose) from construction until the first
/// [`update`](Self::update), so rendering before the first frame is safe.
#[derive(Debug, Clone)]
pub struct SkeletalAnimator {
    clip: Arc<BoundClip>,
    /// Playback position in ticks, always within `[0, duration)`.
    current_time: f32,
    palette: SkinningPalette,
    track_cursors: Vec<BoneTrackCursor>,
    on_clip_switch: PaletteSwitchPolicy,
}

impl SkeletalAnimator {
    /// Creates an animator for `clip`.
    ///
    /// Fails if the skeleton has a bone id that does not fit into
    /// `settings.palette_capacity`.
    pub fn new(clip: Arc<BoundClip>, settings: &AnimatorSettings) -> Result<Self> {
        check_capacity(clip.skeleton(), settings.palette_capacity)?;
        let track_cursors = vec![BoneTrackCursor::default(); clip.channel_count()];
        Ok(Self {
            clip,
            current_time: 0.0,
            palette: SkinningPalette::new(settings.palette_capacity),
            track_cursors,
            on_clip_switch: settings.on_clip_switch,
        })
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &Arc<BoundClip> {
        &self.clip
    }

    /// Playback position in ticks.
    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    #[inline]
    #[must_use]
    pub fn palette(&self) -> &SkinningPalette {
        &self.palette
    }

    /// Advances the clock by `dt` seconds and re-evaluates the pose.
    ///
    /// Time wraps at the clip duration, so clips loop. A clip with no duration
    /// stays on its first frame.
    pub fn update(&mut self, dt: f32) {
        let duration = self.clip.duration();

        if duration > 0.0 {
            self.current_time += self.clip.ticks_per_second() * dt;
            self.current_time = self.current_time.rem_euclid(duration);
        } else {
            self.current_time = 0.0;
        }

        evaluator::evaluate_with_cursors(
            &self.clip,
            self.current_time,
            &mut self.palette,
            &mut self.track_cursors,
        );
    }

    /// Switches to `clip` and rewinds to its start.
    ///
    /// With [`PaletteSwitchPolicy::Retain`] the palette keeps the previous pose
    /// until the next [`update`](Self::update); with
    /// [`PaletteSwitchPolicy::BindPose`] it is reset to the new skeleton's bind
    /// pose right away.
    pub fn play(&mut self, clip: Arc<BoundClip>) -> Result<()> {
        check_capacity(clip.skeleton(), self.palette.capacity())?;

        self.track_cursors.clear();
        self.track_cursors
            .resize(clip.channel_count(), BoneTrackCursor::default());
        self.clip = clip;
        self.current_time = 0.0;

        if self.on_clip_switch == PaletteSwitchPolicy::BindPose {
            self.palette.reset();
            evaluator::evaluate_bind_pose(self.clip.skeleton(), &mut self.palette);
        }

        log::trace!("Playing clip '{}'", self.clip.name());
        Ok(())
    }

    /// Rewinds to the start and returns every palette entry to identity.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.palette.reset();
        for cursor in &mut self.track_cursors {
            *cursor = BoneTrackCursor::default();
        }
    }
}

fn check_capacity(skeleton: &Skeleton, capacity: usize) -> Result<()> {
    match skeleton.max_bone_id() {
        Some(id) if id >= capacity => Err(RigError::PaletteOverflow {
            bone: skeleton.bones().name_of(id).unwrap_or_default().to_string(),
            id,
            capacity,
        }),
        _ => Ok(()),
    }
}
