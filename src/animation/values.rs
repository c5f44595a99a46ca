use glam::{Quat, Vec3};

/// Values that a [`KeyframeTrack`](super::tracks::KeyframeTrack) can blend
/// between two keyframes.
pub trait Interpolatable: Copy + Clone + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Shortest-arc spherical interpolation.
    ///
    /// `glam` flips the end quaternion when the dot product is negative, so the
    /// rotation never takes the long way around.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}
