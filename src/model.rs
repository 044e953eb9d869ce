//! Categories and subcategories as the sphere sees them.
//!
//! The hierarchy is exactly two levels deep: top-level categories (no parent)
//! and subcategories whose parent is a top-level category. Positions are not
//! part of the model; they are recomputed from sibling order by the layout.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::color::Rgba;
use crate::error::{DataError, NavigationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A category (parent = None) or subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub color: Rgba,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// Row shape handed over by the data collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl TryFrom<NodeRecord> for Node {
    type Error = DataError;

    fn try_from(rec: NodeRecord) -> Result<Self, Self::Error> {
        let color = rec.color.parse::<Rgba>().map_err(|source| DataError::Color {
            id: rec.id.clone(),
            source,
        })?;
        Ok(Node {
            id: NodeId(rec.id),
            name: rec.name,
            color,
            parent: rec.parent_id.map(NodeId),
        })
    }
}

/// Ordered node list with parent lookups.
///
/// Order is creation order and is significant: the layout assigns sphere
/// positions by ordinal among siblings.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeSet {
    /// Validate and index a node list.
    pub fn new(nodes: Vec<Node>) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if index.insert(n.id.clone(), i).is_some() {
                return Err(DataError::DuplicateId(n.id.0.clone()));
            }
        }
        for n in &nodes {
            let Some(parent) = &n.parent else { continue };
            match index.get(parent).map(|&i| &nodes[i]) {
                None => {
                    return Err(DataError::MissingParent {
                        id: n.id.0.clone(),
                        parent: parent.0.clone(),
                    })
                }
                Some(p) if !p.is_top_level() => {
                    return Err(DataError::TooDeep {
                        id: n.id.0.clone(),
                        parent: parent.0.clone(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(Self { nodes, index })
    }

    pub fn from_records(records: Vec<NodeRecord>) -> Result<Self, DataError> {
        let nodes = records
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Top-level categories in creation order.
    pub fn roots(&self) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.is_top_level()).collect()
    }

    /// Subcategories of `parent` in creation order.
    pub fn children_of(&self, parent: &NodeId) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| n.parent.as_ref() == Some(parent))
            .collect()
    }

    /// Resolve `id` as a top-level category.
    pub fn category(&self, id: &NodeId) -> Result<&Node, NavigationError> {
        let node = self
            .get(id)
            .ok_or_else(|| NavigationError::UnknownNode(id.0.clone()))?;
        if !node.is_top_level() {
            return Err(NavigationError::NotACategory(id.0.clone()));
        }
        Ok(node)
    }
}

/// Load a JSON array of [`NodeRecord`]s from disk.
pub fn load_nodes(path: &Path) -> Result<NodeSet, DataError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<NodeRecord> = serde_json::from_str(&text)?;
    log::info!("loaded {} nodes from {}", records.len(), path.display());
    NodeSet::from_records(records)
}

/// Built-in sample universe used when no data file is given.
pub fn sample_nodes() -> NodeSet {
    const ROWS: &[(&str, &str, &str, Option<&str>)] = &[
        ("work", "Work", "#3b82f6", None),
        ("health", "Health", "#10b981", None),
        ("ideas", "Ideas", "#f59e0b", None),
        ("reading", "Reading", "#8b5cf6", None),
        ("travel", "Travel", "#ef4444", None),
        ("people", "People", "#ec4899", None),
        ("projects", "Projects", "#3b82f6", Some("work")),
        ("meetings", "Meetings", "#3b82f6", Some("work")),
        ("hiring", "Hiring", "#3b82f6", Some("work")),
        ("sleep", "Sleep", "#10b981", Some("health")),
        ("running", "Running", "#10b981", Some("health")),
        ("startups", "Startups", "#f59e0b", Some("ideas")),
        ("novels", "Novels", "#8b5cf6", Some("reading")),
        ("papers", "Papers", "#8b5cf6", Some("reading")),
        ("essays", "Essays", "#8b5cf6", Some("reading")),
        ("japan", "Japan", "#ef4444", Some("travel")),
    ];
    let records = ROWS
        .iter()
        .map(|&(id, name, color, parent)| NodeRecord {
            id: id.to_owned(),
            name: name.to_owned(),
            color: color.to_owned(),
            parent_id: parent.map(str::to_owned),
        })
        .collect();
    // The table above is static and valid.
    NodeSet::from_records(records).unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn node(id: &str, parent: Option<&str>) -> Node {
        Node {
            id: NodeId::from(id),
            name: id.to_uppercase(),
            color: Rgba::WHITE,
            parent: parent.map(NodeId::from),
        }
    }

    #[test]
    fn roots_and_children_keep_order() {
        let set = NodeSet::new(vec![
            node("b", None),
            node("a", None),
            node("b2", Some("b")),
            node("b1", Some("b")),
        ])
        .unwrap();
        let roots: Vec<_> = set.roots().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, ["b", "a"]);
        let kids: Vec<_> = set
            .children_of(&NodeId::from("b"))
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(kids, ["b2", "b1"]);
        assert!(set.children_of(&NodeId::from("a")).is_empty());
    }

    #[test]
    fn rejects_bad_hierarchy() {
        assert!(matches!(
            NodeSet::new(vec![node("x", Some("ghost"))]),
            Err(DataError::MissingParent { .. })
        ));
        assert!(matches!(
            NodeSet::new(vec![node("a", None), node("b", Some("a")), node("c", Some("b"))]),
            Err(DataError::TooDeep { .. })
        ));
        assert!(matches!(
            NodeSet::new(vec![node("a", None), node("a", None)]),
            Err(DataError::DuplicateId(_))
        ));
    }

    #[test]
    fn records_parse_from_json() {
        let json = r##"[
            {"id": "c1", "name": "Work", "color": "#3b82f6", "parent_id": null},
            {"id": "s1", "name": "Meetings", "color": "#3b82f6", "parent_id": "c1"},
            {"id": "c2", "name": "Home", "color": "#abc"}
        ]"##;
        let records: Vec<NodeRecord> = serde_json::from_str(json).unwrap();
        let set = NodeSet::from_records(records).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.roots().len(), 2);
        assert!(set.category(&NodeId::from("s1")).is_err());
    }

    #[test]
    fn record_with_bad_color_names_the_node() {
        let rec = NodeRecord {
            id: "c9".into(),
            name: "Broken".into(),
            color: "blue".into(),
            parent_id: None,
        };
        let err = Node::try_from(rec).unwrap_err();
        assert!(err.to_string().contains("c9"));
    }

    #[test]
    fn sample_universe_is_valid() {
        let set = sample_nodes();
        assert_eq!(set.roots().len(), 6);
        assert_eq!(set.children_of(&NodeId::from("reading")).len(), 3);
    }
}
