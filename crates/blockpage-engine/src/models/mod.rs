pub mod block_variant;
pub mod raw_block;
pub mod resolved_page;

pub use block_variant::BlockVariant;
pub use raw_block::{DISCRIMINATOR_KEY, RawBlock};
pub use resolved_page::{ResolvedBlock, ResolvedPage};
