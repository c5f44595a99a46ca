use glam::Mat4;
use rustc_hash::FxHashMap;

/// Index of a bone in the skinning palette and in vertex skin weights.
pub type BoneId = usize;

/// Skinning data for one bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInfo {
    /// Slot in the skinning palette.
    pub id: BoneId,
    /// Inverse bind-pose transform: model space -> bone space.
    pub offset: Mat4,
}

/// Name-keyed registry of bones.
///
/// Ids are dense (`0..len`) and assigned in first-seen order. The map is
/// only grown while a rig is being bound; afterwards it is shared read-only
/// by the skeleton and every clip bound to it.
#[derive(Debug, Clone, Default)]
pub struct BoneMap {
    entries: FxHashMap<String, BoneInfo>,
    // names[id] is the bone with that id
    names: Vec<String>,
}

impl BoneMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(name, offset)` pairs; ids follow iteration order and
    /// repeated names keep their first id and offset.
    pub fn from_bones<I, S>(bones: I) -> Self
    where
        I: IntoIterator<Item = (S, Mat4)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (name, offset) in bones {
            map.register(name, offset);
        }
        map
    }

    /// Returns the id of `name`, assigning the next free id on first sight.
    ///
    /// The offset of an already registered bone is left unchanged.
    pub(crate) fn register(&mut self, name: impl Into<String>, offset: Mat4) -> BoneId {
        let name = name.into();
        if let Some(info) = self.entries.get(&name) {
            return info.id;
        }
        let id = self.names.len();
        self.names.push(name.clone());
        self.entries.insert(name, BoneInfo { id, offset });
        id
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BoneInfo> {
        self.entries.get(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of the bone with the given id.
    #[must_use]
    pub fn name_of(&self, id: BoneId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Bones in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoneInfo)> + '_ {
        self.names
            .iter()
            .filter_map(|name| self.entries.get(name).map(|info| (name.as_str(), info)))
    }
}
