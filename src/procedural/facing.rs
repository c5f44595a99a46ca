//! Turn-to-face.
//!
//! A character turns towards the direction it is about to move in. The turn
//! is a short [`RotationAnimation`] about the vertical axis whose angle is
//! computed when the animation is activated, from the actor's current and
//! desired facing.

use glam::Vec3;

use crate::procedural::animator::Animation;
use crate::procedural::motions::RotationAnimation;
use crate::procedural::transform::{HasTransform, Transform};

/// Seconds a turn-to-face takes by default.
pub const TURN_DURATION: f32 = 0.15;

/// Where an actor looks and where it wants to look, both in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing {
    pub forward: Vec3,
    pub desired: Vec3,
}

impl Default for Facing {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            desired: Vec3::Z,
        }
    }
}

/// Angle (radians) that rotates `from` onto `to` about +Y.
///
/// Both directions are projected onto the XZ plane first. Returns `0.0` when
/// either projection is degenerate.
#[must_use]
pub fn signed_yaw(from: Vec3, to: Vec3) -> f32 {
    let a = Vec3::new(from.x, 0.0, from.z).normalize_or_zero();
    let b = Vec3::new(to.x, 0.0, to.z).normalize_or_zero();
    if a == Vec3::ZERO || b == Vec3::ZERO {
        return 0.0;
    }

    let angle = a.dot(b).clamp(-1.0, 1.0).acos();
    if a.cross(b).y >= 0.0 { angle } else { -angle }
}

/// A context that carries facing state.
pub trait HasFacing {
    fn facing_mut(&mut self) -> &mut Facing;
}

/// The usual context for character-level procedural animation.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub transform: Transform,
    pub facing: Facing,
}

impl HasTransform for Actor {
    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl HasFacing for Actor {
    fn facing_mut(&mut self) -> &mut Facing {
        &mut self.facing
    }
}

/// Factory for an [`Animator`](super::Animator) step that turns the actor from
/// `facing.forward` to `facing.desired` over `duration` seconds.
///
/// On activation the desired direction becomes the new forward direction. A
/// zero desired direction leaves the facing unchanged and turns by nothing.
pub fn turn_to_face<C>(duration: f32) -> impl FnMut(&mut C) -> Box<dyn Animation<C>> + 'static
where
    C: HasTransform + HasFacing + 'static,
{
    move |ctx: &mut C| {
        let facing = ctx.facing_mut();
        let angle = signed_yaw(facing.forward, facing.desired);
        if facing.desired.x != 0.0 || facing.desired.z != 0.0 {
            facing.forward = facing.desired;
        }
        Box::new(RotationAnimation::new(duration, Vec3::new(0.0, angle, 0.0))) as Box<dyn Animation<C>>
    }
}
