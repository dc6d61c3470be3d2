//! # Query Building
//!
//! Builds the field-selection query that tells the content source which
//! relations to expand for each block variant.
//!
//! ## Modules
//!
//! - **`selection`**: `Expand`, `Relation` and the per-variant `SelectionRule`
//! - **`encode`**: `QueryNode` tree and its bracket-path serialisation
//!
//! ## Key Invariants
//!
//! - Every known variant contributes exactly one rule; a missing rule would
//!   silently under-fetch that variant's relations
//! - The same `(collection, filter)` always serialises to the same string

pub mod encode;
pub mod selection;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::BlockVariant;

pub use encode::QueryNode;
pub use selection::{Expand, IMAGE_FIELDS, Relation, SelectionRule, default_rules};

/// Field holding the block list on pages and on the home singleton.
pub const BLOCKS_FIELD: &str = "blocks";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("No selection rule for block variant {0}")]
    MissingRule(BlockVariant),
    #[error("More than one selection rule for block variant {0}")]
    DuplicateRule(BlockVariant),
}

/// Content collections the renderer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Slug-addressed pages, looked up with a filter.
    Pages,
    /// The single home document.
    Home,
}

impl Collection {
    /// REST path of the collection, relative to the content source root.
    pub const fn path(self) -> &'static str {
        match self {
            Collection::Pages => "/api/pages",
            Collection::Home => "/api/home",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pages" => Some(Collection::Pages),
            "home" => Some(Collection::Home),
            _ => None,
        }
    }
}

/// Exact-match filter on one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn slug(value: impl Into<String>) -> Self {
        Self::eq("slug", value)
    }

    fn to_node(&self) -> QueryNode {
        QueryNode::map([(
            self.field.clone(),
            QueryNode::map([("$eq", QueryNode::leaf(self.value.clone()))]),
        )])
    }
}

/// One resolution request: where to look, what to match and what to expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    collection: Collection,
    filter: Option<Filter>,
    rules: Vec<SelectionRule>,
}

impl QuerySpec {
    /// A spec carrying the default rule for every known variant.
    pub fn new(collection: Collection, filter: Option<Filter>) -> Self {
        Self {
            collection,
            filter,
            rules: default_rules(),
        }
    }

    /// A spec with caller-supplied rules, rejected unless each variant has exactly one.
    ///
    /// Rules are stored in variant order, so the order they are passed in never
    /// reaches the serialised query.
    pub fn with_rules(
        collection: Collection,
        filter: Option<Filter>,
        rules: Vec<SelectionRule>,
    ) -> Result<Self, QueryError> {
        let mut spec = Self {
            collection,
            filter,
            rules,
        };
        spec.validate()?;
        spec.rules.sort_by_key(|rule| rule.variant);
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        let mut counts: BTreeMap<BlockVariant, usize> = BTreeMap::new();
        for rule in &self.rules {
            let count = counts.entry(rule.variant).or_default();
            *count += 1;
            if *count > 1 {
                return Err(QueryError::DuplicateRule(rule.variant));
            }
        }

        match BlockVariant::ALL.iter().find(|v| !counts.contains_key(*v)) {
            Some(missing) => Err(QueryError::MissingRule(*missing)),
            None => Ok(()),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    fn to_tree(&self) -> QueryNode {
        let mut root = Vec::new();
        if let Some(filter) = &self.filter {
            root.push(("filters".to_string(), filter.to_node()));
        }

        let branches = QueryNode::Map(
            self.rules
                .iter()
                .map(|rule| (rule.variant.tag().to_string(), rule.expand.to_node()))
                .collect(),
        );
        root.push((
            "populate".to_string(),
            QueryNode::map([(BLOCKS_FIELD, QueryNode::map([("on", branches)]))]),
        ));

        QueryNode::Map(root)
    }

    /// Decoded `(key path, value)` pairs in serialisation order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.to_tree().to_pairs()
    }

    pub fn to_query_string(&self) -> String {
        encode::encode_pairs(&self.to_pairs())
    }
}

/// Serialised query for `collection`, optionally narrowed by `filter`.
pub fn build_query(collection: Collection, filter: Option<&Filter>) -> String {
    QuerySpec::new(collection, filter.cloned()).to_query_string()
}
