use glam::Mat4;

use crate::skeleton::BoneId;

/// Final bone matrices, indexed by bone id.
///
/// The length is fixed at construction and matches the bone matrix array of
/// the skinning shader, so the whole palette can be uploaded verbatim.
///
/// Entries for bones the current clip does not reach keep whatever was last
/// written to them. Every bone of a skeleton whose node is reachable from the
/// root is rewritten on each evaluation, so this only affects bones that are
/// registered without a node; clips must not rely on those slots.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinningPalette {
    matrices: Vec<Mat4>,
}

impl SkinningPalette {
    /// An all-identity (neutral pose) palette.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            matrices: vec![Mat4::IDENTITY; capacity],
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.matrices.len()
    }

    /// Resets every entry to identity.
    pub fn reset(&mut self) {
        self.matrices.fill(Mat4::IDENTITY);
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: BoneId) -> Option<&Mat4> {
        self.matrices.get(id)
    }

    /// Writes the matrix of bone `id`.
    ///
    /// # Panics
    /// If `id` is outside the palette. Capacity is validated when a skeleton is
    /// bound, so this indicates a broken invariant rather than bad input.
    #[inline]
    pub fn set(&mut self, id: BoneId, matrix: Mat4) {
        assert!(
            id < self.matrices.len(),
            "bone id {id} exceeds palette capacity {}",
            self.matrices.len()
        );
        self.matrices[id] = matrix;
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Raw bytes for a uniform/storage buffer upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }

    /// True when every entry is the identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.matrices.iter().all(|m| *m == Mat4::IDENTITY)
    }
}
