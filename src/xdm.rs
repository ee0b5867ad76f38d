use core::fmt;
use std::hash::{Hash, Hasher};

/// Qualified name of a function, error code or element.
///
/// Equality and hashing consider the namespace URI and local name only; the
/// prefix is presentational and kept for diagnostics.
#[derive(Debug, Clone)]
pub struct QName {
    pub prefix: Option<String>,
    pub ns_uri: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(ns_uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            ns_uri: Some(ns_uri.into()),
            local: local.into(),
        }
    }

    pub fn with_prefix(
        prefix: impl Into<String>,
        ns_uri: impl Into<String>,
        local: impl Into<String>,
    ) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ns_uri: Some(ns_uri.into()),
            local: local.into(),
        }
    }

    /// A name without a namespace.
    pub fn local_only(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            ns_uri: None,
            local: local.into(),
        }
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.ns_uri == other.ns_uri && self.local == other.local
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ns_uri.hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, "{}:{}", prefix, self.local)
        } else if let Some(ns) = &self.ns_uri {
            write!(f, "Q{{{}}}{}", ns, self.local)
        } else {
            write!(f, "{}", self.local)
        }
    }
}

/// Closed set of atomic categories the argument binder recognizes.
///
/// Accessors pattern-match exhaustively over these variants; anything the
/// host cannot express here travels as a node or through the generic
/// sequence view.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomicValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Binary(Vec<u8>),
}

pub type XdmSequence<N> = Vec<XdmItem<N>>;

/// One item of a dynamic argument sequence: a node or an atomic value.
#[derive(Debug, Clone, PartialEq)]
pub enum XdmItem<N> {
    Node(N),
    Atomic(AtomicValue),
}

// Convenience conversion: allow passing a node directly where an item is expected.
impl<N> From<N> for XdmItem<N> {
    fn from(n: N) -> Self {
        XdmItem::Node(n)
    }
}

impl<N> XdmItem<N> {
    pub fn string(s: impl Into<String>) -> Self {
        XdmItem::Atomic(AtomicValue::String(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        XdmItem::Atomic(AtomicValue::Boolean(b))
    }

    pub fn integer(i: i64) -> Self {
        XdmItem::Atomic(AtomicValue::Integer(i))
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        XdmItem::Atomic(AtomicValue::Binary(bytes.into()))
    }
}

impl<N> fmt::Display for XdmItem<N>
where
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XdmItem::Node(_) => write!(f, "<node>"),
            XdmItem::Atomic(a) => write!(f, "{:?}", a),
        }
    }
}
