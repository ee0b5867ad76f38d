//! Typed signature registration and argument binding for XPath-style
//! extension function libraries.
//!
//! A [`Library`] owns a namespace and a map of function [`Definition`]s,
//! declared through the fluent [`DefBuilder`]. At evaluation time a
//! [`CallSite`] binds the host's actual arguments into a [`Parameters`]
//! accessor that validates arity, cardinality and dynamic item types
//! before the function body runs.

pub mod def;
pub mod errors;
pub mod function;
pub mod library;
pub mod model;
pub mod params;
pub mod simple_node;
pub mod types;
pub mod xdm;

pub use def::{DefBuilder, Definition, Param};
pub use errors::{Error, Errors, SignatureError, codes};
pub use function::{CallSite, FunctionKind};
pub use library::{FunctionTable, Library};
pub use model::{NodeKind, XdmNode};
pub use params::{CallTrace, Parameters, Sequence};
pub use types::{ItemKind, Occurrence, SequenceType};
pub use xdm::{AtomicValue, QName, XdmItem, XdmSequence};
