#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Myth Rig
//!
//! Character animation for real-time scenes:
//! - [`skeleton`]: bone hierarchies, bone registry and vertex skin weights
//! - [`animation`]: keyframe tracks, clips and the per-frame skinning palette
//! - [`rig`]: the bind step that ties meshes, skeleton and clips together
//! - [`procedural`]: sequencing of short code-driven animations
//!
//! Everything here runs on the frame loop thread; evaluation finishes before
//! the palette is handed to the renderer.

pub mod animation;
pub mod errors;
pub mod procedural;
pub mod rig;
pub mod settings;
pub mod skeleton;

pub use animation::{AnimationClip, BoneTrack, BoundClip, KeyframeTrack, SkeletalAnimator, SkinningPalette};
pub use errors::{Result, RigError};
pub use procedural::{Animation, Animator, Transform};
pub use rig::{Rig, RigBuilder};
pub use settings::{AnimatorSettings, MAX_BONES, PaletteSwitchPolicy};
pub use skeleton::{BoneInfo, BoneMap, NodeDesc, Skeleton, VertexSkinWeights};
