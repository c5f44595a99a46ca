use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::skeleton::bone_map::BoneId;

/// Most bones that may influence a single vertex.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Bone id stored in unused influence slots.
pub const UNUSED_BONE: i32 = -1;

/// Per-vertex skinning attributes, laid out for direct upload as a vertex
/// buffer (`ivec4` bone ids followed by `vec4` weights).
///
/// Weights are stored as authored; normalisation is up to the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VertexSkinWeights {
    pub bone_ids: [i32; MAX_BONE_INFLUENCES],
    pub weights: [f32; MAX_BONE_INFLUENCES],
}

impl Default for VertexSkinWeights {
    fn default() -> Self {
        Self {
            bone_ids: [UNUSED_BONE; MAX_BONE_INFLUENCES],
            weights: [0.0; MAX_BONE_INFLUENCES],
        }
    }
}

impl VertexSkinWeights {
    /// Stores an influence in the first free slot.
    ///
    /// Returns `false` (and stores nothing) when all slots are taken.
    pub fn add_influence(&mut self, bone: BoneId, weight: f32) -> bool {
        match self.bone_ids.iter().position(|&id| id < 0) {
            Some(slot) => {
                self.bone_ids[slot] = bone as i32;
                self.weights[slot] = weight;
                true
            }
            None => false,
        }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn influence_count(&self) -> usize {
        self.bone_ids.iter().filter(|&&id| id >= 0).count()
    }

    /// Occupied `(bone, weight)` pairs in slot order.
    pub fn influences(&self) -> impl Iterator<Item = (BoneId, f32)> + '_ {
        self.bone_ids
            .iter()
            .zip(self.weights.iter())
            .filter(|(id, _)| **id >= 0)
            .map(|(&id, &w)| (id as BoneId, w))
    }
}

/// One weight a bone contributes to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeight {
    pub vertex: u32,
    pub weight: f32,
}

/// A bone as referenced by one mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBone {
    pub name: String,
    /// Inverse bind-pose transform of the bone.
    pub offset: Mat4,
    pub weights: Vec<VertexWeight>,
}

/// Skinning input of one mesh, as produced by the importer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshSkinDesc {
    pub vertex_count: usize,
    pub bones: Vec<MeshBone>,
}

impl MeshSkinDesc {
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            bones: Vec::new(),
        }
    }

    /// Appends a bone with its `(vertex, weight)` influences.
    #[must_use]
    pub fn with_bone(
        mut self,
        name: impl Into<String>,
        offset: Mat4,
        weights: impl IntoIterator<Item = (u32, f32)>,
    ) -> Self {
        self.bones.push(MeshBone {
            name: name.into(),
            offset,
            weights: weights
                .into_iter()
                .map(|(vertex, weight)| VertexWeight { vertex, weight })
                .collect(),
        });
        self
    }
}
