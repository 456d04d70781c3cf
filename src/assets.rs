//! Texture metadata known to the session.
//!
//! Decoding images is the host's job. The simulation only needs each
//! texture's pixel size to shape billboard planes, and needs to know which
//! textures exist so missing art degrades to invisible entities instead of
//! failures.

use hashbrown::HashMap;
use log::warn;

/// Pixel dimensions of a loaded texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
}

/// Name-keyed registry of loaded textures.
#[derive(Debug, Clone, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, TextureInfo>,
}

impl TextureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a texture, replacing any earlier entry of the same name.
    pub fn register(&mut self, name: impl Into<String>, info: TextureInfo) {
        self.textures.insert(name.into(), info);
    }

    /// Builder-style [`TextureRegistry::register`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, info: TextureInfo) -> Self {
        self.register(name, info);
        self
    }

    /// Metadata for `name`, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TextureInfo> {
        self.textures.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    /// Like [`TextureRegistry::get`] but logs a warning for missing
    /// textures.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<TextureInfo> {
        let info = self.get(name).copied();
        if info.is_none() {
            warn!("texture '{name}' is not loaded; using an empty placeholder");
        }
        info
    }

    /// Number of registered textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

/// Registry key for an asset path: the file stem in lower camel case.
///
/// # Examples
/// ```
/// use spritefield::assets::texture_name_from_path;
/// assert_eq!(texture_name_from_path("a/b/player-walk.webp"), "playerWalk");
/// assert_eq!(texture_name_from_path("tree.webp"), "tree");
/// ```
#[must_use]
pub fn texture_name_from_path(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or_default();
    let stem = file.split('.').next().unwrap_or_default();
    let mut name = String::with_capacity(stem.len());
    for (index, word) in stem
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .enumerate()
    {
        if index == 0 {
            name.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}
