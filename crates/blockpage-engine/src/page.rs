use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::fetch::{ContentFetcher, FetchError};
use crate::models::ResolvedPage;
use crate::query::{Collection, Filter, build_query};
use crate::resolve::resolve_page;

#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Invalid content source URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Loads and resolves pages from one content source.
///
/// Holds no mutable state, so a single loader can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct PageLoader<F> {
    base_url: Url,
    fetcher: F,
}

impl<F: ContentFetcher> PageLoader<F> {
    pub fn new(base_url: &str, fetcher: F) -> Result<Self, PageError> {
        let base_url = Url::parse(base_url).map_err(|source| PageError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { base_url, fetcher })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Full request URL for a collection lookup, selection query included.
    pub fn page_url(&self, collection: Collection, filter: Option<&Filter>) -> Url {
        let mut url = self.collection_url(collection);
        url.set_query(Some(&build_query(collection, filter)));
        url
    }

    /// Resolves the page whose slug equals `slug`.
    pub async fn load_page(&self, slug: &str) -> Result<ResolvedPage, PageError> {
        let filter = Filter::slug(slug);
        self.load(Collection::Pages, Some(&filter)).await
    }

    /// Resolves the home singleton.
    pub async fn load_home(&self) -> Result<ResolvedPage, PageError> {
        self.load(Collection::Home, None).await
    }

    async fn load(
        &self,
        collection: Collection,
        filter: Option<&Filter>,
    ) -> Result<ResolvedPage, PageError> {
        let url = self.page_url(collection, filter);
        let document = self.fetcher.fetch(&url).await?;
        let page = resolve_page(&document);

        match &page {
            ResolvedPage::NotFound => log::info!("{} not found", collection.path()),
            ResolvedPage::EmptyContent => log::info!("{} has no block list", collection.path()),
            ResolvedPage::Blocks(blocks) => {
                log::info!("{} resolved {} blocks", collection.path(), blocks.len())
            }
        }
        Ok(page)
    }

    /// Slugs of every page, in the order the content source lists them.
    ///
    /// Records without a string slug are skipped and repeats are dropped.
    pub async fn list_slugs(&self) -> Result<Vec<String>, PageError> {
        let url = self.collection_url(Collection::Pages);
        let document = self.fetcher.fetch(&url).await?;
        Ok(slugs_from(&document))
    }

    fn collection_url(&self, collection: Collection) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(collection.path());
        url.set_query(None);
        url
    }
}

fn slugs_from(document: &Value) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut slugs: Vec<String> = Vec::new();
    let records = document
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for slug in records
        .iter()
        .filter_map(|r| r.get("slug").and_then(Value::as_str))
    {
        if seen.insert(slug) {
            slugs.push(slug.to_string());
        }
    }
    slugs
}
