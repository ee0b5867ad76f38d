//! Simple in-memory tree implementation for `XdmNode` used in tests and
//! quick host adapters.
//!
//! Example:
//! ```
//! use funbind::simple_node::{elem, text};
//! use funbind::XdmNode;
//!
//! // <greeting>Hello</greeting>
//! let node = elem("greeting").child(text("Hello")).build();
//! assert_eq!(node.name().unwrap().local, "greeting");
//! assert_eq!(node.string_value(), "Hello");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::model::{NodeKind, XdmNode};
use crate::xdm::QName;

#[derive(Debug)]
struct Inner {
    kind: NodeKind,
    name: Option<QName>,
    value: Option<String>,
    children: Vec<SimpleNode>,
}

/// A simple Arc-backed node. Identity (equality, hashing) is pointer
/// identity, as usual for node models.
#[derive(Clone)]
pub struct SimpleNode(Arc<Inner>);

impl PartialEq for SimpleNode { fn eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) } }
impl Eq for SimpleNode {}
impl Hash for SimpleNode { fn hash<H: Hasher>(&self, state: &mut H) { Arc::as_ptr(&self.0).hash(state) } }

impl fmt::Debug for SimpleNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleNode")
            .field("kind", &self.0.kind)
            .field("name", &self.0.name)
            .field("value", &self.0.value)
            .finish()
    }
}

impl SimpleNode {
    fn new(kind: NodeKind, name: Option<QName>, value: Option<String>) -> Self {
        SimpleNode(Arc::new(Inner {
            kind,
            name,
            value,
            children: Vec::new(),
        }))
    }

    pub fn element(local: &str) -> SimpleNodeBuilder {
        SimpleNodeBuilder::new(NodeKind::Element, Some(QName::local_only(local)))
    }

    pub fn element_ns(ns_uri: &str, local: &str) -> SimpleNodeBuilder {
        SimpleNodeBuilder::new(NodeKind::Element, Some(QName::new(ns_uri, local)))
    }

    pub fn attribute(name: &str, value: &str) -> SimpleNode {
        SimpleNode::new(
            NodeKind::Attribute,
            Some(QName::local_only(name)),
            Some(value.to_string()),
        )
    }

    pub fn text(value: &str) -> SimpleNode {
        SimpleNode::new(NodeKind::Text, None, Some(value.to_string()))
    }

    pub fn comment(value: &str) -> SimpleNode {
        SimpleNode::new(NodeKind::Comment, None, Some(value.to_string()))
    }
}

pub struct SimpleNodeBuilder {
    kind: NodeKind,
    name: Option<QName>,
    children: Vec<SimpleNode>,
}

impl SimpleNodeBuilder {
    fn new(kind: NodeKind, name: Option<QName>) -> Self {
        Self {
            kind,
            name,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn child(mut self, child: SimpleNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> SimpleNode {
        SimpleNode(Arc::new(Inner {
            kind: self.kind,
            name: self.name,
            value: None,
            children: self.children,
        }))
    }
}

// Convenience helper functions for concise test code
pub fn elem(local: &str) -> SimpleNodeBuilder {
    SimpleNode::element(local)
}
pub fn elem_ns(ns_uri: &str, local: &str) -> SimpleNodeBuilder {
    SimpleNode::element_ns(ns_uri, local)
}
pub fn text(value: &str) -> SimpleNode {
    SimpleNode::text(value)
}
pub fn attr(name: &str, value: &str) -> SimpleNode {
    SimpleNode::attribute(name, value)
}

impl XdmNode for SimpleNode {
    fn kind(&self) -> NodeKind {
        self.0.kind.clone()
    }

    fn name(&self) -> Option<QName> {
        self.0.name.clone()
    }

    fn string_value(&self) -> String {
        match self.kind() {
            NodeKind::Element | NodeKind::Document => {
                let mut out = String::new();
                fn dfs(n: &SimpleNode, out: &mut String) {
                    if n.0.kind == NodeKind::Text
                        && let Some(v) = &n.0.value
                    {
                        out.push_str(v);
                    }
                    for c in &n.0.children {
                        dfs(c, out);
                    }
                }
                dfs(self, &mut out);
                out
            }
            _ => self.0.value.clone().unwrap_or_default(),
        }
    }
}
