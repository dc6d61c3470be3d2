use serde_json::Value;

use crate::models::{BlockVariant, RawBlock};

use super::BlockRenderer;

/// Plain-text strategies, one line per visible piece of content.
///
/// Used by the terminal previewer. Field names follow the content model of
/// the block components; anything missing is left out rather than shown empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

const HEADLINE_FIELDS: &[&str] = &["heading", "title", "name"];
const BODY_FIELDS: &[&str] = &["text", "subHeading", "description", "content"];

impl TextRenderer {
    fn header(variant: BlockVariant, block: &RawBlock) -> String {
        match first_str(block.fields(), HEADLINE_FIELDS) {
            Some(headline) => format!("[{}] {headline}", variant.label()),
            None => format!("[{}]", variant.label()),
        }
    }

    fn body(block: &RawBlock) -> Option<String> {
        first_str(block.fields(), BODY_FIELDS).map(|s| format!("  {s}"))
    }

    fn intro(variant: BlockVariant, block: &RawBlock) -> Vec<String> {
        let mut lines = vec![Self::header(variant, block)];
        lines.extend(Self::body(block));
        lines
    }
}

impl BlockRenderer for TextRenderer {
    type Output = Vec<String>;

    fn hero(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::Hero, block);
        lines.extend(entries(block.get("cta")).filter_map(link_line));
        lines.extend(block.get("image").and_then(image_line));
        lines
    }

    fn section_heading(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::SectionHeading, block);
        if let Some(anchor) = block.str_field("anchorLink") {
            lines.push(format!("  #{anchor}"));
        }
        lines
    }

    fn content_items(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::ContentItems, block);
        for item in entries(block.get("item")) {
            if let Some(map) = item.as_object() {
                let headline = first_str(map, HEADLINE_FIELDS);
                let body = first_str(map, BODY_FIELDS);
                match (headline, body) {
                    (Some(h), Some(b)) => lines.push(format!("  • {h}: {b}")),
                    (Some(s), None) | (None, Some(s)) => lines.push(format!("  • {s}")),
                    (None, None) => {}
                }
            }
        }
        lines.extend(block.get("image").and_then(image_line));
        lines
    }

    fn video(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::Video, block);
        if let Some(id) = block.str_field("videoId") {
            lines.push(format!("  ▶ https://www.youtube.com/watch?v={id}"));
        } else if let Some(url) = block.str_field("url") {
            lines.push(format!("  ▶ {url}"));
        }
        lines
    }

    fn card_quote(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::CardQuote, block);
        for card in entries(block.get("card")).filter_map(Value::as_object) {
            if let Some(quote) = first_str(card, &["text", "quote", "content"]) {
                lines.push(format!("  “{quote}”"));
            }
            if let Some(name) = first_str(card, &["name", "heading", "author"]) {
                lines.push(format!("    — {name}"));
            }
        }
        lines
    }

    fn faq(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::Faq, block);
        for question in entries(block.get("questions")).filter_map(Value::as_object) {
            if let Some(q) = first_str(question, &["heading", "question", "title"]) {
                lines.push(format!("  Q: {q}"));
            }
            if let Some(a) = first_str(question, &["text", "answer", "content"]) {
                lines.push(format!("  A: {a}"));
            }
        }
        lines
    }

    fn call_to_action(&self, block: &RawBlock) -> Vec<String> {
        let mut lines = Self::intro(BlockVariant::CallToAction, block);
        lines.extend(entries(block.get("cta")).filter_map(link_line));
        lines
    }
}

fn first_str<'a>(map: &'a serde_json::Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| map.get(*f).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// A relation may be a single component or a repeatable list of them.
fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    let items: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v @ Value::Object(_)) => vec![v],
        _ => Vec::new(),
    };
    items.into_iter()
}

fn link_line(link: &Value) -> Option<String> {
    let map = link.as_object()?;
    let href = first_str(map, &["href", "url"])?;
    Some(match first_str(map, &["text", "label"]) {
        Some(text) => format!("  → {text} ({href})"),
        None => format!("  → {href}"),
    })
}

fn image_line(image: &Value) -> Option<String> {
    let map = image.as_object()?;
    let url = first_str(map, &["url"])?;
    Some(match first_str(map, &["alternativeText", "name"]) {
        Some(alt) => format!("  🖼 {alt} <{url}>"),
        None => format!("  🖼 <{url}>"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(value: Value) -> RawBlock {
        RawBlock::from_value(value).unwrap()
    }

    #[test]
    fn hero_shows_heading_links_and_image() {
        let block = raw(json!({
            "__component": "blocks.hero",
            "id": 1,
            "heading": "Build faster",
            "text": "Ship pages without deploys",
            "cta": [{"href": "/signup", "text": "Sign up"}, {"href": "/docs"}],
            "image": {"url": "/uploads/hero.png", "alternativeText": "Dashboard", "name": "hero.png"}
        }));

        assert_eq!(
            TextRenderer.hero(&block),
            vec![
                "[Hero] Build faster",
                "  Ship pages without deploys",
                "  → Sign up (/signup)",
                "  → /docs",
                "  🖼 Dashboard </uploads/hero.png>",
            ]
        );
    }

    #[test]
    fn faq_lists_questions_and_answers() {
        let block = raw(json!({
            "__component": "blocks.fa-qs",
            "id": 2,
            "heading": "Questions",
            "questions": [
                {"heading": "Is it free?", "text": "Yes."},
                {"heading": "Can I self-host?"}
            ]
        }));

        assert_eq!(
            TextRenderer.faq(&block),
            vec![
                "[FAQ] Questions",
                "  Q: Is it free?",
                "  A: Yes.",
                "  Q: Can I self-host?",
            ]
        );
    }

    #[test]
    fn bare_block_renders_only_its_label() {
        let block = raw(json!({"__component": "blocks.section-heading", "id": 3}));
        assert_eq!(TextRenderer.section_heading(&block), vec!["[Section heading]"]);
    }

    #[test]
    fn video_prefers_video_id() {
        let block = raw(json!({
            "__component": "blocks.yt-video",
            "id": 4,
            "videoId": "abc123",
            "url": "https://example.com/other"
        }));
        assert_eq!(
            TextRenderer.video(&block),
            vec!["[Video]", "  ▶ https://www.youtube.com/watch?v=abc123"]
        );
    }

    #[test]
    fn single_cta_object_is_accepted() {
        let block = raw(json!({
            "__component": "blocks.cta",
            "id": 5,
            "heading": "Ready?",
            "cta": {"href": "/start", "text": "Start"}
        }));
        assert_eq!(
            TextRenderer.call_to_action(&block),
            vec!["[Call to action] Ready?", "  → Start (/start)"]
        );
    }
}
