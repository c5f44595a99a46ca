use glam::Vec3;

use crate::procedural::animator::Animation;
use crate::procedural::transform::HasTransform;

/// Share of the remaining motion to apply for a tick of `dt` seconds.
///
/// Never returns more than what is left, so the total applied over the
/// animation's life is exactly its target even when the last tick overshoots.
fn step_fraction(duration: f32, applied: f32, dt: f32) -> f32 {
    let remaining = (1.0 - applied).max(0.0);
    if duration <= 0.0 {
        return remaining;
    }
    (dt / duration).clamp(0.0, remaining)
}

/// Rotates the target by `total` (XYZ Euler angles, radians) spread evenly
/// over `duration` seconds.
#[derive(Debug, Clone)]
pub struct RotationAnimation {
    duration: f32,
    total: Vec3,
    applied: f32,
}

impl RotationAnimation {
    #[must_use]
    pub fn new(duration: f32, total: Vec3) -> Self {
        Self {
            duration,
            total,
            applied: 0.0,
        }
    }

    /// Fraction of the rotation applied so far.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.applied
    }
}

impl<C: HasTransform> Animation<C> for RotationAnimation {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn tick(&mut self, dt: f32, ctx: &mut C) {
        let step = step_fraction(self.duration, self.applied, dt);
        if step > 0.0 {
            ctx.transform_mut().rotate_euler(self.total * step);
            self.applied += step;
        }
    }

    fn name(&self) -> &str {
        "rotation"
    }
}

/// Moves the target by `offset` spread evenly over `duration` seconds.
#[derive(Debug, Clone)]
pub struct TranslationAnimation {
    duration: f32,
    offset: Vec3,
    applied: f32,
}

impl TranslationAnimation {
    #[must_use]
    pub fn new(duration: f32, offset: Vec3) -> Self {
        Self {
            duration,
            offset,
            applied: 0.0,
        }
    }
}

impl<C: HasTransform> Animation<C> for TranslationAnimation {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn tick(&mut self, dt: f32, ctx: &mut C) {
        let step = step_fraction(self.duration, self.applied, dt);
        if step > 0.0 {
            ctx.transform_mut().translate(self.offset * step);
            self.applied += step;
        }
    }

    fn name(&self) -> &str {
        "translation"
    }
}

/// Does nothing for `duration` seconds.
#[derive(Debug, Clone, Copy)]
pub struct PauseAnimation {
    duration: f32,
}

impl PauseAnimation {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self { duration }
    }
}

impl<C> Animation<C> for PauseAnimation {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn tick(&mut self, _dt: f32, _ctx: &mut C) {}

    fn name(&self) -> &str {
        "pause"
    }
}
