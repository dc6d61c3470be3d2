use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::BlockVariant;

/// Tag → variant table, built on first use and read-only afterwards.
static TAG_TABLE: LazyLock<HashMap<&'static str, BlockVariant>> = LazyLock::new(|| {
    BlockVariant::ALL
        .iter()
        .map(|variant| (variant.tag(), *variant))
        .collect()
});

/// Looks up the variant for a discriminator tag.
///
/// Matching is exact and case-sensitive. `None` means the content source sent
/// a block type this build does not know about yet; callers skip it.
pub fn variant_for_tag(tag: &str) -> Option<BlockVariant> {
    TAG_TABLE.get(tag).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn every_variant_round_trips_through_its_tag() {
        for variant in BlockVariant::ALL {
            assert_eq!(variant_for_tag(variant.tag()), Some(variant));
        }
    }

    #[rstest]
    #[case("blocks.hero", Some(BlockVariant::Hero))]
    #[case("blocks.section-heading", Some(BlockVariant::SectionHeading))]
    #[case("blocks.content-items", Some(BlockVariant::ContentItems))]
    #[case("blocks.yt-video", Some(BlockVariant::Video))]
    #[case("blocks.card-quote", Some(BlockVariant::CardQuote))]
    #[case("blocks.fa-qs", Some(BlockVariant::Faq))]
    #[case("blocks.cta", Some(BlockVariant::CallToAction))]
    #[case("blocks.Hero", None)]
    #[case("BLOCKS.HERO", None)]
    #[case(" blocks.hero", None)]
    #[case("hero", None)]
    #[case("blocks.unknown-future-type", None)]
    #[case("", None)]
    fn tags_match_exactly(#[case] tag: &str, #[case] expected: Option<BlockVariant>) {
        assert_eq!(variant_for_tag(tag), expected);
    }
}
