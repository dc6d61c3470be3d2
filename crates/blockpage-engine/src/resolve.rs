use serde_json::Value;

use crate::dispatch::variant_for_tag;
use crate::models::{RawBlock, ResolvedBlock, ResolvedPage};
use crate::query::BLOCKS_FIELD;

/// Turns a fetched document into an ordered list of known blocks.
///
/// The record is read from `data`, which is an array for filtered collections
/// and an object for singletons. Shape problems inside the record never fail
/// the page: a missing block list gives [`ResolvedPage::EmptyContent`], and
/// blocks with an unknown or missing tag are dropped while the rest keep
/// their source order.
pub fn resolve_page(document: &Value) -> ResolvedPage {
    let Some(record) = locate_record(document) else {
        return ResolvedPage::NotFound;
    };

    let Some(raw_blocks) = record.get(BLOCKS_FIELD).and_then(Value::as_array) else {
        return ResolvedPage::EmptyContent;
    };

    ResolvedPage::Blocks(
        raw_blocks
            .iter()
            .enumerate()
            .filter_map(|(position, value)| resolve_block(position, value))
            .collect(),
    )
}

fn locate_record(document: &Value) -> Option<&Value> {
    match document.get("data")? {
        Value::Array(records) => {
            if records.len() > 1 {
                log::debug!(
                    "{} records matched, using the first and ignoring the rest",
                    records.len()
                );
            }
            records.first().filter(|record| record.is_object())
        }
        record @ Value::Object(_) => Some(record),
        _ => None,
    }
}

fn resolve_block(position: usize, value: &Value) -> Option<ResolvedBlock> {
    let Some(block) = RawBlock::from_value(value.clone()) else {
        log::debug!("Skipping block {position}: not an object");
        return None;
    };

    let Some(tag) = block.tag() else {
        log::debug!("Skipping block {position}: no discriminator");
        return None;
    };

    match variant_for_tag(tag) {
        Some(variant) => Some(ResolvedBlock { variant, block }),
        None => {
            log::debug!("Skipping block {position}: unknown variant {tag}");
            None
        }
    }
}
