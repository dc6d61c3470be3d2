//! Bracket-path serialisation of a query tree.
//!
//! `{a: {b: ["x", "y"]}}` becomes `a[b][0]=x&a[b][1]=y`, with keys and values
//! percent-encoded so only RFC 3986 unreserved characters stay literal. This is
//! the dialect Strapi parses with `qs`.

/// An ordered query tree. Children keep insertion order, which is what makes
/// serialisation deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Leaf(String),
    List(Vec<String>),
    Map(Vec<(String, QueryNode)>),
}

impl QueryNode {
    pub fn leaf(value: impl Into<String>) -> Self {
        QueryNode::Leaf(value.into())
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, QueryNode)>) -> Self {
        QueryNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Flattens the tree into decoded `(key path, value)` pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        flatten("", self, &mut pairs);
        pairs
    }
}

fn flatten(prefix: &str, node: &QueryNode, out: &mut Vec<(String, String)>) {
    match node {
        QueryNode::Leaf(value) => out.push((prefix.to_string(), value.clone())),
        QueryNode::List(values) => {
            for (i, value) in values.iter().enumerate() {
                out.push((format!("{prefix}[{i}]"), value.clone()));
            }
        }
        QueryNode::Map(entries) => {
            for (key, child) in entries {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}[{key}]")
                };
                flatten(&path, child, out);
            }
        }
    }
}

/// Percent-encodes and joins pairs into a URL query component.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
