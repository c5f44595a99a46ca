//! Procedural animation
//!
//! Short, code-driven animations that move an object's [`Transform`]
//! directly (as opposed to skeletal clips, which only produce a skinning
//! palette):
//! - [`Animator`]: plays a list of animations back to back
//! - [`Animation`]: one step of such a list
//! - [`RotationAnimation`], [`TranslationAnimation`], [`PauseAnimation`]: stock steps
//! - [`turn_to_face`]: the character turn used by movement controls

pub mod animator;
pub mod facing;
pub mod motions;
pub mod transform;

pub use animator::{Animation, AnimationFactory, Animator};
pub use facing::{Actor, Facing, HasFacing, TURN_DURATION, signed_yaw, turn_to_face};
pub use motions::{PauseAnimation, RotationAnimation, TranslationAnimation};
pub use transform::{HasTransform, Transform};
