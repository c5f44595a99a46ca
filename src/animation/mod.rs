//! Skeletal Animation
//!
//! Keyframe data, clips and the per-frame pose evaluation:
//! - [`KeyframeTrack`] / [`BoneTrack`]: sampled position, rotation and scale
//! - [`AnimationClip`]: named set of bone tracks with its own tick rate
//! - [`Binder`] / [`BoundClip`]: a clip resolved against one skeleton
//! - [`SkeletalAnimator`]: looping playback into a [`SkinningPalette`]

pub mod animator;
pub mod binder;
pub mod bone_track;
pub mod clip;
pub mod evaluator;
pub mod palette;
pub mod tracks;
pub mod values;

pub use animator::SkeletalAnimator;
pub use binder::{Binder, BoundClip};
pub use bone_track::{BoneTrack, BoneTrackCursor};
pub use clip::{AnimationClip, Channel, DEFAULT_TICKS_PER_SECOND};
pub use palette::SkinningPalette;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack, TrackDefect};
pub use values::Interpolatable;
