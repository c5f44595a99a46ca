use serde::{Deserialize, Serialize};

use crate::animation::bone_track::BoneTrack;
use crate::errors::Result;

/// Tick rate assumed when an importer reports none.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

fn is_usable_tick_rate(ticks_per_second: f32) -> bool {
    ticks_per_second.is_finite() && ticks_per_second > 0.0
}

/// `ticks_per_second`, or [`DEFAULT_TICKS_PER_SECOND`] when it is not a
/// positive finite number.
#[must_use]
pub fn tick_rate_or_default(ticks_per_second: f32) -> f32 {
    if is_usable_tick_rate(ticks_per_second) {
        ticks_per_second
    } else {
        DEFAULT_TICKS_PER_SECOND
    }
}

/// Keyframes for the node called `node_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub node_name: String,
    pub track: BoneTrack,
}

/// An imported skeletal animation.
///
/// Times inside the tracks are expressed in ticks; `ticks_per_second`
/// converts wall-clock seconds into ticks. Nodes without a channel keep their
/// bind pose while the clip plays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    /// Length of one loop, in ticks.
    pub duration: f32,
    pub ticks_per_second: f32,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    /// Creates a clip; a non-positive or non-finite tick rate falls back to
    /// [`DEFAULT_TICKS_PER_SECOND`].
    pub fn new(name: impl Into<String>, duration: f32, ticks_per_second: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            ticks_per_second: tick_rate_or_default(ticks_per_second),
            channels: Vec::new(),
        }
    }

    /// Creates a clip whose duration is the last keyframe of any channel.
    pub fn from_channels(
        name: impl Into<String>,
        ticks_per_second: f32,
        channels: Vec<Channel>,
    ) -> Self {
        let duration = channels
            .iter()
            .map(|c| c.track.end_time())
            .fold(0.0_f32, f32::max);
        let mut clip = Self::new(name, duration, ticks_per_second);
        clip.channels = channels;
        clip
    }

    /// Appends the keyframes for `node_name`.
    #[must_use]
    pub fn with_channel(mut self, node_name: impl Into<String>, track: BoneTrack) -> Self {
        self.channels.push(Channel {
            node_name: node_name.into(),
            track,
        });
        self
    }

    /// Duration of one loop in seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        self.duration / tick_rate_or_default(self.ticks_per_second)
    }

    #[must_use]
    pub fn channel(&self, node_name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.node_name == node_name)
    }

    /// Puts imported data into the form playback expects: a usable tick rate
    /// and unit rotation keyframes.
    ///
    /// Clips deserialized or built field by field skip the tick-rate fallback
    /// of [`new`](Self::new). [`Binder::bind`](crate::animation::Binder::bind)
    /// calls this on every clip.
    pub fn normalize(&mut self) {
        if !is_usable_tick_rate(self.ticks_per_second) {
            log::warn!(
                "Clip '{}': tick rate {} is unusable, using {DEFAULT_TICKS_PER_SECOND}",
                self.name,
                self.ticks_per_second
            );
            self.ticks_per_second = DEFAULT_TICKS_PER_SECOND;
        }
        for channel in &mut self.channels {
            channel.track.normalize_rotations();
        }
    }

    /// Validates every channel's keyframes.
    pub fn validate(&self) -> Result<()> {
        for channel in &self.channels {
            channel.track.validate(&channel.node_name)?;
        }
        Ok(())
    }
}
