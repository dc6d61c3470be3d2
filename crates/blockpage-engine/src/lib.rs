pub mod dispatch;
pub mod fetch;
pub mod models;
pub mod page;
pub mod query;
pub mod render;
pub mod resolve;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dispatch::variant_for_tag;
pub use fetch::{ContentFetcher, FetchError, HttpFetcher};
pub use models::*;
pub use page::{PageError, PageLoader};
pub use query::{Collection, Filter, QueryError, QuerySpec, build_query};
pub use render::{BlockRenderer, TextRenderer, render_block, render_page};
pub use resolve::resolve_page;
