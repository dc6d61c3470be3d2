use serde::Serialize;

/// The closed set of block kinds the renderer knows how to draw.
///
/// Each variant owns a discriminator tag (the `__component` value the CMS
/// puts on every block), a selection rule in [`crate::query`] and a method on
/// [`crate::render::BlockRenderer`]. Adding a variant means touching all
/// three; the exhaustive matches make the compiler list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BlockVariant {
    Hero,
    SectionHeading,
    ContentItems,
    Video,
    CardQuote,
    Faq,
    CallToAction,
}

impl BlockVariant {
    /// Every known variant, in the order query branches are emitted.
    pub const ALL: [BlockVariant; 7] = [
        BlockVariant::Hero,
        BlockVariant::SectionHeading,
        BlockVariant::ContentItems,
        BlockVariant::Video,
        BlockVariant::CardQuote,
        BlockVariant::Faq,
        BlockVariant::CallToAction,
    ];

    /// Discriminator tag as sent by the content source.
    pub const fn tag(self) -> &'static str {
        match self {
            BlockVariant::Hero => "blocks.hero",
            BlockVariant::SectionHeading => "blocks.section-heading",
            BlockVariant::ContentItems => "blocks.content-items",
            BlockVariant::Video => "blocks.yt-video",
            BlockVariant::CardQuote => "blocks.card-quote",
            BlockVariant::Faq => "blocks.fa-qs",
            BlockVariant::CallToAction => "blocks.cta",
        }
    }

    /// Short human label, used by text output.
    pub const fn label(self) -> &'static str {
        match self {
            BlockVariant::Hero => "Hero",
            BlockVariant::SectionHeading => "Section heading",
            BlockVariant::ContentItems => "Content items",
            BlockVariant::Video => "Video",
            BlockVariant::CardQuote => "Card quote",
            BlockVariant::Faq => "FAQ",
            BlockVariant::CallToAction => "Call to action",
        }
    }
}

impl std::fmt::Display for BlockVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tags_are_unique() {
        let tags: HashSet<_> = BlockVariant::ALL.iter().map(|v| v.tag()).collect();
        assert_eq!(tags.len(), BlockVariant::ALL.len());
    }

    #[test]
    fn tags_use_blocks_namespace() {
        for variant in BlockVariant::ALL {
            let name = variant
                .tag()
                .strip_prefix("blocks.")
                .unwrap_or_else(|| panic!("{variant:?} tag lacks blocks. prefix"));
            assert!(!name.is_empty());
            assert!(
                name.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "{name} is not kebab-case"
            );
        }
    }

    #[test]
    fn display_is_the_tag() {
        assert_eq!(BlockVariant::Faq.to_string(), "blocks.fa-qs");
    }
}
