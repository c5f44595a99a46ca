use std::sync::Arc;

use slotmap::SecondaryMap;

use crate::animation::bone_track::BoneTrack;
use crate::animation::clip::AnimationClip;
use crate::errors::Result;
use crate::skeleton::{NodeKey, Skeleton};

/// A clip whose channels have been resolved to the nodes of one skeleton.
#[derive(Debug, Clone)]
pub struct BoundClip {
    clip: AnimationClip,
    skeleton: Arc<Skeleton>,
    // node -> channel index
    bindings: SecondaryMap<NodeKey, usize>,
}

impl BoundClip {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    /// Duration of one loop, in ticks.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.clip.duration
    }

    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self) -> f32 {
        self.clip.ticks_per_second
    }

    /// Channel index and keyframes driving `node`, if the clip animates it.
    #[inline]
    #[must_use]
    pub fn track_for(&self, node: NodeKey) -> Option<(usize, &BoneTrack)> {
        let &index = self.bindings.get(node)?;
        Some((index, &self.clip.channels[index].track))
    }

    /// Number of channels that found their node.
    #[must_use]
    pub fn bound_channel_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of channels in the underlying clip.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.clip.channels.len()
    }

    /// Names of channels that target nodes the skeleton does not have.
    pub fn unbound_channels(&self) -> impl Iterator<Item = &str> + '_ {
        self.clip
            .channels
            .iter()
            .enumerate()
            .filter(|(index, channel)| {
                self.skeleton
                    .find_node(&channel.node_name)
                    .and_then(|key| self.bindings.get(key))
                    != Some(index)
            })
            .map(|(_, channel)| channel.node_name.as_str())
    }
}

pub struct Binder;

impl Binder {
    /// Resolves the channels of `clip` against `skeleton`.
    ///
    /// Channels naming a node that is not part of the hierarchy are kept in the
    /// clip but never sampled. When two channels target the same node the
    /// first one wins. The clip is [normalized](AnimationClip::normalize)
    /// first.
    pub fn bind(skeleton: &Arc<Skeleton>, mut clip: AnimationClip) -> Result<BoundClip> {
        clip.validate()?;
        clip.normalize();

        let mut bindings = SecondaryMap::with_capacity(clip.channels.len());

        for (channel_idx, channel) in clip.channels.iter().enumerate() {
            let node_name = &channel.node_name;

            let Some(node) = skeleton.find_node(node_name) else {
                log::warn!(
                    "Clip '{}': channel '{}' has no matching node, ignoring",
                    clip.name,
                    node_name
                );
                continue;
            };

            if bindings.contains_key(node) {
                log::warn!(
                    "Clip '{}': duplicate channel for node '{}', keeping the first",
                    clip.name,
                    node_name
                );
                continue;
            }
            bindings.insert(node, channel_idx);
        }

        log::debug!(
            "Bound clip '{}': {}/{} channels, {:.1} ticks @ {} ticks/s",
            clip.name,
            bindings.len(),
            clip.channels.len(),
            clip.duration,
            clip.ticks_per_second
        );

        Ok(BoundClip {
            clip,
            skeleton: Arc::clone(skeleton),
            bindings,
        })
    }
}
