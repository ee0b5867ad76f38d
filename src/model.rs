use core::fmt;

use crate::xdm::QName;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
    Namespace,
}

/// The minimal view of a host node the argument binder needs.
///
/// Host engines adapt their own tree model to this trait; the binder only
/// ever asks for the node kind, the qualified name and the string value.
/// Navigation, document order and the rest of the host's node surface stay
/// on the host side.
pub trait XdmNode: Clone + Eq + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> NodeKind;
    fn name(&self) -> Option<QName>;
    fn string_value(&self) -> String;
}
