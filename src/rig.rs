//! Rig binding.
//!
//! [`RigBuilder`] is the one place where bone ids are handed out. It sees
//! every mesh and every clip of a character before anything is evaluated, so
//! the id space is closed and independent of the order in which animations
//! are played later:
//!
//! 1. mesh bones, mesh by mesh, in declared order (they carry offsets)
//! 2. channels of every clip that name a bone not seen yet (identity offset)
//!
//! The result is a [`Rig`]: a shared [`Skeleton`], the clips bound to it and
//! the per-vertex skin weights of each mesh.

use std::sync::Arc;

use glam::Mat4;

use crate::animation::{AnimationClip, Binder, BoundClip, SkeletalAnimator};
use crate::errors::{Result, RigError};
use crate::settings::AnimatorSettings;
use crate::skeleton::{BoneMap, MeshSkinDesc, NodeDesc, Skeleton, VertexSkinWeights};

/// Collects the imported pieces of one character.
#[derive(Debug, Clone)]
pub struct RigBuilder {
    hierarchy: NodeDesc,
    meshes: Vec<MeshSkinDesc>,
    clips: Vec<AnimationClip>,
    settings: AnimatorSettings,
}

impl RigBuilder {
    #[must_use]
    pub fn new(hierarchy: NodeDesc) -> Self {
        Self {
            hierarchy,
            meshes: Vec::new(),
            clips: Vec::new(),
            settings: AnimatorSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: AnimatorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn add_mesh(&mut self, mesh: MeshSkinDesc) -> &mut Self {
        self.meshes.push(mesh);
        self
    }

    pub fn add_clip(&mut self, clip: AnimationClip) -> &mut Self {
        self.clips.push(clip);
        self
    }

    /// Assigns bone ids, builds the skeleton and binds every clip.
    pub fn build(self) -> Result<Rig> {
        let Self {
            hierarchy,
            meshes,
            clips,
            settings,
        } = self;

        let mut bones = BoneMap::new();
        for mesh in &meshes {
            for bone in &mesh.bones {
                bones.register(bone.name.as_str(), bone.offset);
            }
        }
        let mesh_bone_count = bones.len();

        for clip in &clips {
            clip.validate()?;
            for channel in &clip.channels {
                bones.register(channel.node_name.as_str(), Mat4::IDENTITY);
            }
        }

        if bones.len() > settings.palette_capacity {
            let id = settings.palette_capacity;
            return Err(RigError::PaletteOverflow {
                bone: bones.name_of(id).unwrap_or_default().to_string(),
                id,
                capacity: settings.palette_capacity,
            });
        }

        let skeleton = Arc::new(Skeleton::new(
            &hierarchy,
            bones,
            settings.max_hierarchy_depth,
        )?);

        for name in skeleton.unreachable_bones() {
            log::warn!("Bone '{name}' has no node in the hierarchy; its palette slot is never updated");
        }

        let skins = meshes
            .iter()
            .enumerate()
            .map(|(mesh_idx, mesh)| skin_weights(&skeleton, mesh_idx, mesh))
            .collect::<Result<Vec<_>>>()?;

        let clips = clips
            .into_iter()
            .map(|clip| Binder::bind(&skeleton, clip).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Rig bound: {} nodes, {} bones ({} from meshes), {} meshes, {} clips",
            skeleton.node_count(),
            skeleton.bones().len(),
            mesh_bone_count,
            skins.len(),
            clips.len()
        );

        Ok(Rig {
            skeleton,
            clips,
            skins,
            settings,
        })
    }
}

fn skin_weights(
    skeleton: &Skeleton,
    mesh_idx: usize,
    mesh: &MeshSkinDesc,
) -> Result<Vec<VertexSkinWeights>> {
    let mut vertices = vec![VertexSkinWeights::default(); mesh.vertex_count];
    let mut dropped = 0usize;

    for bone in &mesh.bones {
        let Some(info) = skeleton.bones().get(&bone.name) else {
            // Every mesh bone was registered before the skeleton was built
            return Err(RigError::InvalidSkin {
                mesh: mesh_idx,
                reason: format!("bone '{}' is not registered", bone.name),
            });
        };

        for w in &bone.weights {
            let Some(vertex) = vertices.get_mut(w.vertex as usize) else {
                return Err(RigError::InvalidSkin {
                    mesh: mesh_idx,
                    reason: format!(
                        "bone '{}' weights vertex {} but the mesh has {} vertices",
                        bone.name, w.vertex, mesh.vertex_count
                    ),
                });
            };
            if !vertex.add_influence(info.id, w.weight) {
                log::trace!(
                    "Mesh {mesh_idx}: vertex {} already has four influences, dropping '{}'",
                    w.vertex,
                    bone.name
                );
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        log::warn!("Mesh {mesh_idx}: dropped {dropped} bone influences beyond the per-vertex limit");
    }

    Ok(vertices)
}

/// A bound character: skeleton, clips and skin weights.
#[derive(Debug, Clone)]
pub struct Rig {
    skeleton: Arc<Skeleton>,
    clips: Vec<Arc<BoundClip>>,
    skins: Vec<Vec<VertexSkinWeights>>,
    settings: AnimatorSettings,
}

impl Rig {
    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Bound clips, in the order they were added.
    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[Arc<BoundClip>] {
        &self.clips
    }

    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&Arc<BoundClip>> {
        self.clips.iter().find(|c| c.name() == name)
    }

    /// Per-vertex weights of each mesh, in the order the meshes were added.
    #[inline]
    #[must_use]
    pub fn skins(&self) -> &[Vec<VertexSkinWeights>] {
        &self.skins
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    /// Creates an animator playing the clip called `name`.
    pub fn animator(&self, name: &str) -> Result<SkeletalAnimator> {
        let clip = self
            .clip(name)
            .ok_or_else(|| RigError::ClipNotFound(name.to_string()))?;
        SkeletalAnimator::new(Arc::clone(clip), &self.settings)
    }
}
