use crate::glyph::GlyphOutline;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Host-assigned stable layer identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Everything the host hands over about one text layer.
///
/// `seed` is the host's stable per-layer random seed, so jitter and
/// direction fallbacks reproduce across sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayer {
    pub id: LayerId,
    pub seed: u64,
    pub text: String,
    pub font: FontSpec,
    pub glyphs: Vec<GlyphOutline>,
}

impl TextLayer {
    /// Cache key over the inputs the decomposition depends on. Editing the
    /// text or restyling the font changes the hash and invalidates the
    /// layer's cached fragments.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.text.hash(&mut hasher);
        self.font.family.hash(&mut hasher);
        self.font.size.to_bits().hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(text: &str, size: f32) -> TextLayer {
        TextLayer {
            id: LayerId(1),
            seed: 7,
            text: text.to_owned(),
            font: FontSpec::new("Helvetica", size),
            glyphs: Vec::new(),
        }
    }

    #[test]
    fn content_hash_is_stable_for_identical_content() {
        assert_eq!(layer("Boom", 72.0).content_hash(), layer("Boom", 72.0).content_hash());
    }

    #[test]
    fn editing_the_text_changes_the_hash() {
        assert_ne!(layer("Boom", 72.0).content_hash(), layer("Shatter", 72.0).content_hash());
    }

    #[test]
    fn resizing_the_font_changes_the_hash() {
        assert_ne!(layer("Boom", 72.0).content_hash(), layer("Boom", 73.0).content_hash());
    }
}
