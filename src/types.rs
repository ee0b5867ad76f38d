//! Sequence-type descriptors for declared signatures.
//!
//! A [`SequenceType`] pairs an occurrence indicator with an item kind, the
//! way XPath writes `xs:string?` or `element()*`. The constant catalogue at
//! the bottom exists so signature declarations read as data:
//!
//! ```
//! use funbind::types::{OPTIONAL_BOOLEAN, SINGLE_STRING};
//!
//! assert_eq!(SINGLE_STRING.to_string(), "string");
//! assert_eq!(OPTIONAL_BOOLEAN.to_string(), "boolean?");
//! ```

use core::fmt;

/// How many items a sequence-typed value may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    /// Exactly one (no indicator in XPath).
    One,
    /// Zero or one (`?`).
    ZeroOrOne,
    /// Zero or more (`*`).
    ZeroOrMore,
    /// One or more (`+`).
    OneOrMore,
}

impl Occurrence {
    pub const fn indicator(self) -> &'static str {
        match self {
            Occurrence::One => "",
            Occurrence::ZeroOrOne => "?",
            Occurrence::ZeroOrMore => "*",
            Occurrence::OneOrMore => "+",
        }
    }
}

/// Dynamic category of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    String,
    Boolean,
    Integer,
    Binary,
    Element,
    Node,
    /// Any item at all (`item()`).
    Item,
}

impl ItemKind {
    pub const fn label(self) -> &'static str {
        match self {
            ItemKind::String => "string",
            ItemKind::Boolean => "boolean",
            ItemKind::Integer => "integer",
            ItemKind::Binary => "binary",
            ItemKind::Element => "element()",
            ItemKind::Node => "node()",
            ItemKind::Item => "item()",
        }
    }
}

/// Declared type of one parameter or result: occurrence × item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceType {
    pub occurrence: Occurrence,
    pub item: ItemKind,
}

impl SequenceType {
    pub const fn new(occurrence: Occurrence, item: ItemKind) -> Self {
        Self { occurrence, item }
    }

    pub const fn one(item: ItemKind) -> Self {
        Self::new(Occurrence::One, item)
    }

    pub const fn zero_or_one(item: ItemKind) -> Self {
        Self::new(Occurrence::ZeroOrOne, item)
    }

    pub const fn zero_or_more(item: ItemKind) -> Self {
        Self::new(Occurrence::ZeroOrMore, item)
    }

    pub const fn one_or_more(item: ItemKind) -> Self {
        Self::new(Occurrence::OneOrMore, item)
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.item.label(), self.occurrence.indicator())
    }
}

// Singles (exactly one).
pub const SINGLE_STRING: SequenceType = SequenceType::one(ItemKind::String);
pub const SINGLE_BOOLEAN: SequenceType = SequenceType::one(ItemKind::Boolean);
pub const SINGLE_INTEGER: SequenceType = SequenceType::one(ItemKind::Integer);
pub const SINGLE_BINARY: SequenceType = SequenceType::one(ItemKind::Binary);
pub const SINGLE_ELEMENT: SequenceType = SequenceType::one(ItemKind::Element);
pub const SINGLE_NODE: SequenceType = SequenceType::one(ItemKind::Node);
pub const SINGLE_ITEM: SequenceType = SequenceType::one(ItemKind::Item);

// Optionals (`?`).
pub const OPTIONAL_STRING: SequenceType = SequenceType::zero_or_one(ItemKind::String);
pub const OPTIONAL_BOOLEAN: SequenceType = SequenceType::zero_or_one(ItemKind::Boolean);
pub const OPTIONAL_INTEGER: SequenceType = SequenceType::zero_or_one(ItemKind::Integer);
pub const OPTIONAL_BINARY: SequenceType = SequenceType::zero_or_one(ItemKind::Binary);
pub const OPTIONAL_ELEMENT: SequenceType = SequenceType::zero_or_one(ItemKind::Element);
pub const OPTIONAL_NODE: SequenceType = SequenceType::zero_or_one(ItemKind::Node);
pub const OPTIONAL_ITEM: SequenceType = SequenceType::zero_or_one(ItemKind::Item);

// Anys (`*`).
pub const ANY_STRING: SequenceType = SequenceType::zero_or_more(ItemKind::String);
pub const ANY_BOOLEAN: SequenceType = SequenceType::zero_or_more(ItemKind::Boolean);
pub const ANY_INTEGER: SequenceType = SequenceType::zero_or_more(ItemKind::Integer);
pub const ANY_BINARY: SequenceType = SequenceType::zero_or_more(ItemKind::Binary);
pub const ANY_ELEMENT: SequenceType = SequenceType::zero_or_more(ItemKind::Element);
pub const ANY_NODE: SequenceType = SequenceType::zero_or_more(ItemKind::Node);
pub const ANY_ITEM: SequenceType = SequenceType::zero_or_more(ItemKind::Item);

// Severals (`+`).
pub const SEVERAL_STRING: SequenceType = SequenceType::one_or_more(ItemKind::String);
pub const SEVERAL_BOOLEAN: SequenceType = SequenceType::one_or_more(ItemKind::Boolean);
pub const SEVERAL_INTEGER: SequenceType = SequenceType::one_or_more(ItemKind::Integer);
pub const SEVERAL_BINARY: SequenceType = SequenceType::one_or_more(ItemKind::Binary);
pub const SEVERAL_ELEMENT: SequenceType = SequenceType::one_or_more(ItemKind::Element);
pub const SEVERAL_NODE: SequenceType = SequenceType::one_or_more(ItemKind::Node);
pub const SEVERAL_ITEM: SequenceType = SequenceType::one_or_more(ItemKind::Item);
