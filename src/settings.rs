//! Animator configuration.

use serde::{Deserialize, Serialize};

/// Maximum number of bones a skinning palette holds by default.
///
/// Matches the size of the bone matrix array declared by the skinning shader.
pub const MAX_BONES: usize = 300;

/// Default bound on skeleton depth.
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// What happens to the skinning palette when a new clip starts playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteSwitchPolicy {
    /// Leave the palette untouched; the next `update` overwrites it.
    #[default]
    Retain,
    /// Rewrite the whole palette with the bind pose immediately.
    BindPose,
}

/// Global configuration for skeletal animators.
///
/// Consumed by [`RigBuilder`](crate::rig::RigBuilder) to validate the bone id
/// space, and by [`SkeletalAnimator`](crate::animation::SkeletalAnimator) to
/// size its palette.
///
/// # Fields
///
/// | Field                 | Description                              | Default  |
/// |-----------------------|------------------------------------------|----------|
/// | `palette_capacity`    | Fixed palette size (max bone count)      | `300`    |
/// | `max_hierarchy_depth` | Depth bound enforced on skeletons        | `256`    |
/// | `on_clip_switch`      | Palette handling in `play`               | `Retain` |
///
/// # Example
///
/// ```rust
/// use myth_rig::settings::{AnimatorSettings, PaletteSwitchPolicy};
///
/// let settings = AnimatorSettings {
///     on_clip_switch: PaletteSwitchPolicy::BindPose,
///     ..Default::default()
/// };
/// assert_eq!(settings.palette_capacity, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorSettings {
    /// Number of matrices in the skinning palette.
    ///
    /// This is a hard upper bound: binding a skeleton with more bones fails.
    pub palette_capacity: usize,

    /// Deepest parent chain accepted when flattening a hierarchy.
    pub max_hierarchy_depth: usize,

    /// Palette handling when [`SkeletalAnimator::play`](crate::animation::SkeletalAnimator::play)
    /// swaps clips.
    pub on_clip_switch: PaletteSwitchPolicy,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            palette_capacity: MAX_BONES,
            max_hierarchy_depth: MAX_HIERARCHY_DEPTH,
            on_clip_switch: PaletteSwitchPolicy::default(),
        }
    }
}
