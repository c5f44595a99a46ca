//! Hierarchical pose evaluation.
//!
//! Walks a skeleton from its root, composing each node's local transform with
//! the accumulated transform of its ancestors, and writes the skinning matrix
//! of every bone it meets:
//!
//! ```text
//! palette[bone.id] = global_inverse * node_global * bone.offset
//! ```
//!
//! Traversal uses an explicit stack in pre-order (a parent is always finished
//! before any of its children), so skeleton depth never turns into call-stack
//! depth. Depth itself was bounded when the skeleton was built.

use glam::Mat4;

use crate::animation::binder::BoundClip;
use crate::animation::bone_track::BoneTrackCursor;
use crate::animation::palette::SkinningPalette;
use crate::skeleton::{NodeKey, Skeleton, SkeletonNode};

/// Evaluates `clip` at `time` (ticks) into `palette`.
///
/// Nodes without a channel use their bind transform. Returns the number of
/// palette entries written.
pub fn evaluate(clip: &BoundClip, time: f32, palette: &mut SkinningPalette) -> usize {
    walk(clip.skeleton(), palette, |key, node| match clip.track_for(key) {
        Some((_, track)) => track.sample(time),
        None => node.bind_transform,
    })
}

/// Same as [`evaluate`], reusing one keyframe cursor per clip channel.
///
/// `cursors` is indexed by channel; channels beyond its length are sampled
/// without a cursor.
pub fn evaluate_with_cursors(
    clip: &BoundClip,
    time: f32,
    palette: &mut SkinningPalette,
    cursors: &mut [BoneTrackCursor],
) -> usize {
    walk(clip.skeleton(), palette, |key, node| match clip.track_for(key) {
        Some((index, track)) => match cursors.get_mut(index) {
            Some(cursor) => track.sample_with_cursors(time, cursor),
            None => track.sample(time),
        },
        None => node.bind_transform,
    })
}

/// Writes the bind pose of `skeleton` into `palette`.
pub fn evaluate_bind_pose(skeleton: &Skeleton, palette: &mut SkinningPalette) -> usize {
    walk(skeleton, palette, |_, node| node.bind_transform)
}

fn walk<F>(skeleton: &Skeleton, palette: &mut SkinningPalette, mut local_transform: F) -> usize
where
    F: FnMut(NodeKey, &SkeletonNode) -> Mat4,
{
    let global_inverse = *skeleton.global_inverse_transform();
    let mut written = 0;

    // (node, parent global transform)
    let mut stack: Vec<(NodeKey, Mat4)> = Vec::with_capacity(skeleton.depth() + 8);
    stack.push((skeleton.root(), Mat4::IDENTITY));

    while let Some((key, parent_global)) = stack.pop() {
        let Some(node) = skeleton.node(key) else {
            continue;
        };

        let global = parent_global * local_transform(key, node);

        if let Some(bone) = node.bone() {
            palette.set(bone.id, global_inverse * global * bone.offset);
            written += 1;
        }

        // Reverse so siblings come off the stack in declared order
        for &child in node.children().iter().rev() {
            stack.push((child, global));
        }
    }

    written
}
