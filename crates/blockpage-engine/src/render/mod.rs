//! # Rendering Strategies
//!
//! A [`BlockRenderer`] supplies one strategy per block variant. The engine
//! picks the strategy from the resolved variant and hands it the raw block
//! untouched; what a strategy produces (markup, terminal lines, components)
//! is up to the host.

pub mod text;

use crate::models::{RawBlock, ResolvedBlock, ResolvedPage};

pub use text::TextRenderer;

pub trait BlockRenderer {
    type Output;

    fn hero(&self, block: &RawBlock) -> Self::Output;
    fn section_heading(&self, block: &RawBlock) -> Self::Output;
    fn content_items(&self, block: &RawBlock) -> Self::Output;
    fn video(&self, block: &RawBlock) -> Self::Output;
    fn card_quote(&self, block: &RawBlock) -> Self::Output;
    fn faq(&self, block: &RawBlock) -> Self::Output;
    fn call_to_action(&self, block: &RawBlock) -> Self::Output;
}

/// Runs the strategy matching the block's variant.
pub fn render_block<R: BlockRenderer + ?Sized>(
    renderer: &R,
    resolved: &ResolvedBlock,
) -> R::Output {
    use crate::models::BlockVariant::*;

    let block = &resolved.block;
    match resolved.variant {
        Hero => renderer.hero(block),
        SectionHeading => renderer.section_heading(block),
        ContentItems => renderer.content_items(block),
        Video => renderer.video(block),
        CardQuote => renderer.card_quote(block),
        Faq => renderer.faq(block),
        CallToAction => renderer.call_to_action(block),
    }
}

/// Renders every resolved block in page order.
///
/// `NotFound` and `EmptyContent` render nothing; telling them apart is the
/// caller's job.
pub fn render_page<R: BlockRenderer + ?Sized>(
    renderer: &R,
    page: &ResolvedPage,
) -> Vec<R::Output> {
    page.blocks()
        .iter()
        .map(|resolved| render_block(renderer, resolved))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockVariant;
    use crate::resolve::resolve_page;
    use crate::tests::{block, page_document};
    use pretty_assertions::assert_eq;

    /// Records which strategy ran, plus the block id.
    struct Probe;

    impl Probe {
        fn mark(name: &str, block: &RawBlock) -> String {
            format!("{name}#{}", block.id().map(|v| v.to_string()).unwrap_or_default())
        }
    }

    impl BlockRenderer for Probe {
        type Output = String;

        fn hero(&self, block: &RawBlock) -> String {
            Self::mark("hero", block)
        }
        fn section_heading(&self, block: &RawBlock) -> String {
            Self::mark("section_heading", block)
        }
        fn content_items(&self, block: &RawBlock) -> String {
            Self::mark("content_items", block)
        }
        fn video(&self, block: &RawBlock) -> String {
            Self::mark("video", block)
        }
        fn card_quote(&self, block: &RawBlock) -> String {
            Self::mark("card_quote", block)
        }
        fn faq(&self, block: &RawBlock) -> String {
            Self::mark("faq", block)
        }
        fn call_to_action(&self, block: &RawBlock) -> String {
            Self::mark("call_to_action", block)
        }
    }

    #[test]
    fn each_variant_reaches_its_own_strategy() {
        let blocks = BlockVariant::ALL
            .iter()
            .zip(1..)
            .map(|(v, id)| block(v.tag(), id))
            .collect();
        let page = resolve_page(&page_document(blocks));

        assert_eq!(
            render_page(&Probe, &page),
            vec![
                "hero#1",
                "section_heading#2",
                "content_items#3",
                "video#4",
                "card_quote#5",
                "faq#6",
                "call_to_action#7",
            ]
        );
    }

    #[test]
    fn not_found_and_empty_render_nothing() {
        assert!(render_page(&Probe, &ResolvedPage::NotFound).is_empty());
        assert!(render_page(&Probe, &ResolvedPage::EmptyContent).is_empty());
    }
}
