//! Skeleton
//!
//! Static rig data shared by every animation of a character:
//! - [`NodeDesc`]: the hierarchy as handed over by the importer
//! - [`Skeleton`]: the flattened hierarchy, bind pose and bone registry
//! - [`BoneMap`]: bone name -> palette id and offset matrix
//! - [`VertexSkinWeights`]: per-vertex bone influences

pub mod bone_map;
pub mod node;
pub mod skin;

pub use bone_map::{BoneId, BoneInfo, BoneMap};
pub use node::{NodeDesc, SkeletonNode};
pub use skin::{MAX_BONE_INFLUENCES, MeshBone, MeshSkinDesc, UNUSED_BONE, VertexSkinWeights, VertexWeight};

use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::errors::{Result, RigError};

new_key_type! {
    pub struct NodeKey;
}

/// A bone hierarchy with its bind pose.
///
/// Immutable once built; animators and clips share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Skeleton {
    nodes: SlotMap<NodeKey, SkeletonNode>,
    root: NodeKey,
    by_name: FxHashMap<String, NodeKey>,
    bones: BoneMap,
    // Inverse of the root's bind transform
    global_inverse: Mat4,
    max_depth: usize,
}

impl Skeleton {
    /// Flattens `hierarchy` and attaches the bones of `bones` to the nodes of
    /// the same name.
    ///
    /// Flattening walks the tree with an explicit stack and rejects anything
    /// deeper than `depth_limit`. The resulting skeleton is flat, so later
    /// traversals do not recurse either. Building and dropping the `NodeDesc`
    /// tree itself is still recursive.
    pub fn new(hierarchy: &NodeDesc, bones: BoneMap, depth_limit: usize) -> Result<Self> {
        let mut nodes: SlotMap<NodeKey, SkeletonNode> = SlotMap::with_key();
        let mut by_name = FxHashMap::default();
        let mut max_depth = 0;

        let root = nodes.insert(SkeletonNode::from_desc(hierarchy, None, 0, &bones));
        by_name.insert(hierarchy.name.clone(), root);

        // (description, parent, depth); reversed so children are visited
        // (and appended) in declared order
        let mut stack: Vec<(&NodeDesc, NodeKey, usize)> =
            hierarchy.children.iter().rev().map(|c| (c, root, 1)).collect();

        while let Some((desc, parent, depth)) = stack.pop() {
            if depth > depth_limit {
                return Err(RigError::HierarchyTooDeep {
                    node: desc.name.clone(),
                    limit: depth_limit,
                });
            }
            if by_name.contains_key(&desc.name) {
                return Err(RigError::DuplicateNode(desc.name.clone()));
            }

            let key = nodes.insert(SkeletonNode::from_desc(desc, Some(parent), depth, &bones));
            by_name.insert(desc.name.clone(), key);
            nodes[parent].children.push(key);
            max_depth = max_depth.max(depth);

            for child in desc.children.iter().rev() {
                stack.push((child, key, depth + 1));
            }
        }

        let global_inverse = nodes[root].bind_transform.inverse();

        Ok(Self {
            nodes,
            root,
            by_name,
            bones,
            global_inverse,
            max_depth,
        })
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&SkeletonNode> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeKey> {
        self.by_name.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges on the longest root-to-leaf path.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &BoneMap {
        &self.bones
    }

    /// Inverse of the root's bind transform.
    #[inline]
    #[must_use]
    pub fn global_inverse_transform(&self) -> &Mat4 {
        &self.global_inverse
    }

    /// Highest registered bone id, if any bone exists.
    #[must_use]
    pub fn max_bone_id(&self) -> Option<BoneId> {
        self.bones.len().checked_sub(1)
    }

    /// Registered bones that have no node in the hierarchy.
    ///
    /// Their palette slots are never written by an evaluation.
    pub fn unreachable_bones(&self) -> impl Iterator<Item = &str> + '_ {
        self.bones
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !self.by_name.contains_key(*name))
    }

    /// Nodes in pre-order: every parent before its children, siblings in
    /// declared order.
    pub fn iter_preorder(&self) -> impl Iterator<Item = (NodeKey, &SkeletonNode)> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let key = stack.pop()?;
            let node = &self.nodes[key];
            stack.extend(node.children.iter().rev().copied());
            Some((key, node))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn chain(len: usize) -> NodeDesc {
        let mut node = NodeDesc::new(format!("n{}", len - 1), Mat4::IDENTITY);
        for i in (0..len - 1).rev() {
            node = NodeDesc::new(format!("n{i}"), Mat4::IDENTITY).with_child(node);
        }
        node
    }

    #[test]
    fn flatten_preserves_order_and_parents() {
        let desc = NodeDesc::new("root", Mat4::from_translation(Vec3::X))
            .with_child(NodeDesc::new("a", Mat4::IDENTITY).with_child(NodeDesc::new("a1", Mat4::IDENTITY)))
            .with_child(NodeDesc::new("b", Mat4::IDENTITY));

        let skeleton = Skeleton::new(&desc, BoneMap::new(), 8).unwrap();
        let order: Vec<&str> = skeleton.iter_preorder().map(|(_, n)| n.name()).collect();
        assert_eq!(order, ["root", "a", "a1", "b"]);

        let a1 = skeleton.find_node("a1").unwrap();
        let a = skeleton.find_node("a").unwrap();
        assert_eq!(skeleton.node(a1).unwrap().parent(), Some(a));
        assert_eq!(skeleton.node(a1).unwrap().depth(), 2);
        assert_eq!(skeleton.depth(), 2);
        assert_eq!(
            *skeleton.global_inverse_transform(),
            Mat4::from_translation(Vec3::NEG_X)
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        assert!(Skeleton::new(&chain(5), BoneMap::new(), 4).is_ok());
        let err = Skeleton::new(&chain(6), BoneMap::new(), 4).unwrap_err();
        assert_eq!(
            err,
            RigError::HierarchyTooDeep {
                node: "n5".to_string(),
                limit: 4
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let desc = NodeDesc::new("root", Mat4::IDENTITY)
            .with_child(NodeDesc::new("arm", Mat4::IDENTITY))
            .with_child(NodeDesc::new("arm", Mat4::IDENTITY));
        assert_eq!(
            Skeleton::new(&desc, BoneMap::new(), 8).unwrap_err(),
            RigError::DuplicateNode("arm".to_string())
        );
    }

    #[test]
    fn bones_attach_by_name() {
        let desc = NodeDesc::new("root", Mat4::IDENTITY).with_child(NodeDesc::new("hip", Mat4::IDENTITY));
        let bones = BoneMap::from_bones([("hip", Mat4::IDENTITY), ("ghost", Mat4::IDENTITY)]);
        let skeleton = Skeleton::new(&desc, bones, 8).unwrap();

        let hip = skeleton.find_node("hip").unwrap();
        assert_eq!(skeleton.node(hip).unwrap().bone().map(|b| b.id), Some(0));
        assert!(skeleton.node(skeleton.root()).unwrap().bone().is_none());
        assert_eq!(skeleton.unreachable_bones().collect::<Vec<_>>(), ["ghost"]);
        assert_eq!(skeleton.max_bone_id(), Some(1));
    }
}
