use glam::Mat4;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::skeleton::NodeKey;
use crate::skeleton::bone_map::{BoneInfo, BoneMap};

/// A node of an imported hierarchy.
///
/// This is the tree handed over by the importer. [`Skeleton`](super::Skeleton)
/// flattens it into an arena of [`SkeletonNode`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDesc {
    pub name: String,
    /// Bind-pose transform relative to the parent.
    pub local_bind_transform: Mat4,
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    #[must_use]
    pub fn new(name: impl Into<String>, local_bind_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            local_bind_transform,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDesc>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A flattened skeleton node.
///
/// # Hierarchy
///
/// - `parent`: handle to the parent node (None for the root)
/// - `children`: child handles in declared order
/// - `depth`: number of ancestors (0 for the root)
#[derive(Debug, Clone)]
pub struct SkeletonNode {
    pub(crate) name: String,
    pub(crate) bind_transform: Mat4,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: SmallVec<[NodeKey; 4]>,
    pub(crate) depth: usize,
    /// Set when the node is a registered bone.
    pub(crate) bone: Option<BoneInfo>,
}

impl SkeletonNode {
    pub(crate) fn from_desc(
        desc: &NodeDesc,
        parent: Option<NodeKey>,
        depth: usize,
        bones: &BoneMap,
    ) -> Self {
        Self {
            name: desc.name.clone(),
            bind_transform: desc.local_bind_transform,
            parent,
            children: SmallVec::new(),
            depth,
            bone: bones.get(&desc.name).copied(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind-pose transform relative to the parent.
    #[inline]
    #[must_use]
    pub fn bind_transform(&self) -> &Mat4 {
        &self.bind_transform
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn bone(&self) -> Option<&BoneInfo> {
        self.bone.as_ref()
    }
}
