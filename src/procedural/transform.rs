use glam::{Affine3A, EulerRot, Mat4, Quat, Vec3};

/// Transform component
///
/// Position, rotation and scale (TRS) of an object driven by procedural
/// animations, with a cached local matrix that is only rebuilt when one of the
/// three properties changed.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,

    // Shadow state for dirty checking
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    /// Rebuilds the local matrix if anything changed since the last call.
    ///
    /// Returns whether the matrix was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// Local matrix, refreshed if needed.
    pub fn local_matrix(&mut self) -> Mat4 {
        self.update_local_matrix();
        Mat4::from(self.local_matrix)
    }

    /// Moves by `offset` in the parent's frame.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Applies an additional rotation given as XYZ Euler angles (radians),
    /// on top of the current orientation.
    pub fn rotate_euler(&mut self, angles: Vec3) {
        let delta = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
        self.rotation = (delta * self.rotation).normalize();
    }

    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Current orientation as XYZ Euler angles.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Forces the next [`update_local_matrix`](Self::update_local_matrix) to rebuild.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// A context that exposes the transform procedural animations move.
pub trait HasTransform {
    fn transform_mut(&mut self) -> &mut Transform;
}

impl HasTransform for Transform {
    fn transform_mut(&mut self) -> &mut Transform {
        self
    }
}
