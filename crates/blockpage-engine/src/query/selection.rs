use crate::models::BlockVariant;

use super::encode::QueryNode;

/// Media fields every image relation is narrowed to.
pub const IMAGE_FIELDS: &[&str] = &["url", "alternativeText", "name"];

/// How much of a block or relation the content source should expand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expand {
    /// Expand one level with every field (`populate=true`).
    Shallow,
    /// Expand with only the listed fields (`fields[i]=name`).
    Fields(&'static [&'static str]),
    /// Expand the listed relations, each with its own rule.
    Nested(Vec<Relation>),
}

/// A named relation on a block or on another relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub expand: Expand,
}

impl Relation {
    pub fn shallow(name: &'static str) -> Self {
        Self {
            name,
            expand: Expand::Shallow,
        }
    }

    pub fn fields(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            expand: Expand::Fields(fields),
        }
    }

    pub fn nested(name: &'static str, relations: Vec<Relation>) -> Self {
        Self {
            name,
            expand: Expand::Nested(relations),
        }
    }

    fn image() -> Self {
        Self::fields("image", IMAGE_FIELDS)
    }
}

impl Expand {
    pub(crate) fn to_node(&self) -> QueryNode {
        match self {
            Expand::Shallow => QueryNode::map([("populate", QueryNode::leaf("true"))]),
            Expand::Fields(fields) => QueryNode::map([(
                "fields",
                QueryNode::List(fields.iter().map(|f| f.to_string()).collect()),
            )]),
            Expand::Nested(relations) => QueryNode::map([(
                "populate",
                QueryNode::Map(
                    relations
                        .iter()
                        .map(|r| (r.name.to_string(), r.expand.to_node()))
                        .collect(),
                ),
            )]),
        }
    }
}

/// The selection a single block variant contributes to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRule {
    pub variant: BlockVariant,
    pub expand: Expand,
}

impl SelectionRule {
    /// The rule the renderer needs for `variant`.
    pub fn for_variant(variant: BlockVariant) -> Self {
        let expand = match variant {
            BlockVariant::Hero => Expand::Nested(vec![Relation::shallow("cta"), Relation::image()]),
            BlockVariant::SectionHeading => Expand::Shallow,
            BlockVariant::ContentItems => {
                Expand::Nested(vec![Relation::shallow("item"), Relation::image()])
            }
            BlockVariant::Video => Expand::Shallow,
            BlockVariant::CardQuote => {
                Expand::Nested(vec![Relation::nested("card", vec![Relation::image()])])
            }
            BlockVariant::Faq => Expand::Nested(vec![Relation::shallow("questions")]),
            BlockVariant::CallToAction => Expand::Nested(vec![Relation::shallow("cta")]),
        };
        Self { variant, expand }
    }
}

/// One rule per known variant, in [`BlockVariant::ALL`] order.
pub fn default_rules() -> Vec<SelectionRule> {
    BlockVariant::ALL
        .iter()
        .copied()
        .map(SelectionRule::for_variant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_rules_cover_every_variant_once() {
        let rules = default_rules();
        let variants: Vec<_> = rules.iter().map(|r| r.variant).collect();
        assert_eq!(variants, BlockVariant::ALL.to_vec());
    }

    #[test]
    fn card_quote_narrows_nested_image() {
        let rule = SelectionRule::for_variant(BlockVariant::CardQuote);
        assert_eq!(
            rule.expand,
            Expand::Nested(vec![Relation::nested(
                "card",
                vec![Relation::fields("image", IMAGE_FIELDS)]
            )])
        );
    }

    #[test]
    fn shallow_expands_to_populate_true() {
        assert_eq!(
            Expand::Shallow.to_node(),
            QueryNode::map([("populate", QueryNode::leaf("true"))])
        );
    }
}
