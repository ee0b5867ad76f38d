use core::slice;
use std::sync::Arc;

use base64::Engine as _;
use tracing::trace;

use crate::def::Definition;
use crate::errors::{Error, Errors, codes};
use crate::library::Library;
use crate::model::{NodeKind, XdmNode};
use crate::xdm::{AtomicValue, XdmItem, XdmSequence};

/// Typed access to the actual arguments of one extension-function call.
///
/// Constructed per evaluation by [`CallSite::bind`](crate::CallSite::bind)
/// and discarded once the function body has pulled its parameters. Every
/// accessor takes the 0-based position and an `optional` flag: an optional
/// parameter bound to the empty sequence reads as `None`, a required one
/// fails with `required-argument-empty`.
#[derive(Debug)]
pub struct Parameters<'a, N> {
    lib: &'a Library,
    def: Arc<Definition>,
    args: &'a [XdmSequence<N>],
}

impl<'a, N: XdmNode> Parameters<'a, N> {
    pub(crate) fn new(
        lib: &'a Library,
        def: Arc<Definition>,
        args: &'a [XdmSequence<N>],
    ) -> Result<Self, Error> {
        let min = def.min_arity();
        let max = def.max_arity();
        let n = args.len();
        if n < min || n > max {
            let msg = if min == max {
                format!("there are not exactly {min} arguments: {n}")
            } else {
                format!("there are not between {min} and {max} arguments: {n}")
            };
            return Err(lib.errors().make(codes::ARITY_MISMATCH, msg));
        }
        trace!(name = %def.name(), argc = n, "bound extension call arguments");
        Ok(Self { lib, def, args })
    }

    /// The number of actual arguments.
    pub fn count(&self) -> usize {
        self.args.len()
    }

    fn errors(&self) -> &Errors {
        self.lib.errors()
    }

    /// Name of the formal parameter at `pos`. The arity check bounds the
    /// argument count by the formal count, so any position that passed
    /// `initiate` resolves here.
    fn formal(&self, pos: usize) -> &str {
        self.def.param(pos).map_or("?", |p| p.name.as_str())
    }

    fn mismatch(&self, pos: usize, what: &str) -> Error {
        self.errors().make(
            codes::TYPE_MISMATCH,
            format!("the argument ${} is not {}", self.formal(pos), what),
        )
    }

    /// Check position and cardinality for `pos`, returning the restartable
    /// item view, or `None` for an optional empty argument. Slice-backed
    /// sequences make the view infallible once this returns.
    fn initiate(&self, pos: usize, optional: bool) -> Result<Option<&'a [XdmItem<N>]>, Error> {
        if pos >= self.args.len() {
            return Err(self.errors().make(
                codes::POSITION_OUT_OF_RANGE,
                format!(
                    "asked for the {} argument of {}",
                    ordinal(pos),
                    self.args.len()
                ),
            ));
        }
        let items = self.args[pos].as_slice();
        if items.is_empty() {
            if optional {
                return Ok(None);
            }
            return Err(self.errors().make(
                codes::REQUIRED_ARGUMENT_EMPTY,
                format!("the argument ${} is an empty sequence", self.formal(pos)),
            ));
        }
        Ok(Some(items))
    }

    /// Like `initiate`, but additionally requires at most one item.
    fn single(&self, pos: usize, optional: bool) -> Result<Option<&'a XdmItem<N>>, Error> {
        let Some(items) = self.initiate(pos, optional)? else {
            return Ok(None);
        };
        match items {
            [item] => Ok(Some(item)),
            _ => Err(self.errors().make(
                codes::TOO_MANY_ITEMS,
                format!(
                    "the argument ${} has more than one item",
                    self.formal(pos)
                ),
            )),
        }
    }

    /// The `pos`-th argument as a string.
    pub fn string(&self, pos: usize, optional: bool) -> Result<Option<String>, Error> {
        let Some(item) = self.single(pos, optional)? else {
            return Ok(None);
        };
        match item {
            XdmItem::Atomic(AtomicValue::String(s)) => Ok(Some(s.clone())),
            _ => Err(self.mismatch(pos, "a string")),
        }
    }

    /// The `pos`-th argument as a boolean.
    pub fn boolean(&self, pos: usize, optional: bool) -> Result<Option<bool>, Error> {
        let Some(item) = self.single(pos, optional)? else {
            return Ok(None);
        };
        match item {
            XdmItem::Atomic(AtomicValue::Boolean(b)) => Ok(Some(*b)),
            _ => Err(self.mismatch(pos, "a boolean")),
        }
    }

    /// The `pos`-th argument as an integer.
    pub fn integer(&self, pos: usize, optional: bool) -> Result<Option<i64>, Error> {
        let Some(item) = self.single(pos, optional)? else {
            return Ok(None);
        };
        match item {
            XdmItem::Atomic(AtomicValue::Integer(i)) => Ok(Some(*i)),
            _ => Err(self.mismatch(pos, "an integer")),
        }
    }

    /// The `pos`-th argument as binary data.
    pub fn binary(&self, pos: usize, optional: bool) -> Result<Option<Vec<u8>>, Error> {
        let Some(item) = self.single(pos, optional)? else {
            return Ok(None);
        };
        match item {
            XdmItem::Atomic(AtomicValue::Binary(bytes)) => Ok(Some(bytes.clone())),
            _ => Err(self.mismatch(pos, "a binary value")),
        }
    }

    /// The `pos`-th argument as an element node.
    pub fn element(&self, pos: usize, optional: bool) -> Result<Option<N>, Error> {
        let Some(item) = self.single(pos, optional)? else {
            return Ok(None);
        };
        match item {
            XdmItem::Node(node) if node.kind() == NodeKind::Element => Ok(Some(node.clone())),
            XdmItem::Node(node) => Err(self.errors().make(
                codes::TYPE_MISMATCH,
                format!(
                    "the argument ${} is not an element (kind: {:?})",
                    self.formal(pos),
                    node.kind()
                ),
            )),
            XdmItem::Atomic(_) => Err(self.mismatch(pos, "a node")),
        }
    }

    /// The `pos`-th argument as an element node with a required name: the
    /// local name must be `local` and the namespace must be the declaring
    /// library's namespace.
    pub fn named_element(
        &self,
        pos: usize,
        optional: bool,
        local: &str,
    ) -> Result<Option<N>, Error> {
        let Some(elem) = self.element(pos, optional)? else {
            return Ok(None);
        };
        let Some(name) = elem.name() else {
            return Err(self.errors().make(
                codes::NAME_MISMATCH,
                format!("the argument ${} element has no name", self.formal(pos)),
            ));
        };
        if name.local != local {
            return Err(self.errors().make(
                codes::NAME_MISMATCH,
                format!(
                    "the argument ${} element local name is: {}, instead of: {}",
                    self.formal(pos),
                    name.local,
                    local
                ),
            ));
        }
        if name.ns_uri.as_deref() != Some(self.lib.namespace()) {
            return Err(self.errors().make(
                codes::NAME_MISMATCH,
                format!(
                    "the argument ${} element namespace is: {}, instead of: {}",
                    self.formal(pos),
                    name.ns_uri.as_deref().unwrap_or(""),
                    self.lib.namespace()
                ),
            ));
        }
        Ok(Some(elem))
    }

    /// The `pos`-th argument as an ordered list of strings, draining every
    /// item of the sequence.
    pub fn string_list(&self, pos: usize, optional: bool) -> Result<Option<Vec<String>>, Error> {
        let Some(items) = self.initiate(pos, optional)? else {
            return Ok(None);
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                XdmItem::Atomic(AtomicValue::String(s)) => out.push(s.clone()),
                _ => {
                    return Err(self.errors().make(
                        codes::TYPE_MISMATCH,
                        format!(
                            "some value in the argument ${} is not a string",
                            self.formal(pos)
                        ),
                    ));
                }
            }
        }
        Ok(Some(out))
    }

    /// The `pos`-th argument as a generic view over all its items, with no
    /// item-type restriction. Cardinality still applies: a required empty
    /// argument fails, an optional empty one yields the empty view.
    pub fn sequence(&self, pos: usize, optional: bool) -> Result<Sequence<'a, N>, Error> {
        let items = self.initiate(pos, optional)?.unwrap_or(&[]);
        Ok(Sequence { items })
    }

    /// Start a diagnostic call trace for error messages and logs.
    pub fn format(&self, local: &str) -> CallTrace<'a> {
        CallTrace::new(self.lib, local, self.args.len(), self.def.max_arity())
    }
}

/// Borrowed, restartable view over the items of one argument position.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<'a, N> {
    items: &'a [XdmItem<N>],
}

impl<'a, N> Sequence<'a, N> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &'a [XdmItem<N>] {
        self.items
    }

    pub fn iter(&self) -> slice::Iter<'a, XdmItem<N>> {
        self.items.iter()
    }
}

impl<'a, N> IntoIterator for &Sequence<'a, N> {
    type Item = &'a XdmItem<N>;
    type IntoIter = slice::Iter<'a, XdmItem<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Human-readable `prefix:name(arg, …)` rendering of one call.
///
/// Purely diagnostic, for error messages and logs. Values are pushed one
/// positional slot at a time; slots past the actual argument count render
/// nothing, and pushing more slots than the declared maximum arity is an
/// error.
#[derive(Debug)]
pub struct CallTrace<'a> {
    errors: &'a Errors,
    buf: String,
    slot: usize,
    num: usize,
    max: usize,
}

impl<'a> CallTrace<'a> {
    fn new(lib: &'a Library, local: &str, num: usize, max: usize) -> Self {
        let mut buf = String::from("calling ");
        buf.push_str(lib.prefix());
        buf.push(':');
        buf.push_str(local);
        buf.push('(');
        Self {
            errors: lib.errors(),
            buf,
            slot: 0,
            num,
            max,
        }
    }

    /// Advance to the next slot; true when its value must be rendered.
    fn check_slot(&mut self) -> Result<bool, Error> {
        self.slot += 1;
        if self.slot > self.max {
            return Err(self.errors.make(
                codes::TOO_MANY_PARAMS_FOR_TRACE,
                format!(
                    "too many trace arguments: {}, max: {}",
                    ordinal(self.slot - 1),
                    self.max
                ),
            ));
        }
        let doit = self.slot <= self.num;
        if doit && self.slot > 1 {
            self.buf.push_str(", ");
        }
        Ok(doit)
    }

    fn push_quoted(&mut self, value: &str) {
        self.buf.push('\'');
        self.buf.push_str(&value.replace('\'', "''"));
        self.buf.push('\'');
    }

    pub fn string(mut self, value: Option<&str>) -> Result<Self, Error> {
        if self.check_slot()? {
            match value {
                None => self.buf.push_str("()"),
                Some(v) => self.push_quoted(v),
            }
        }
        Ok(self)
    }

    pub fn boolean(mut self, value: Option<bool>) -> Result<Self, Error> {
        if self.check_slot()? {
            match value {
                None => self.buf.push_str("()"),
                Some(b) => self.buf.push_str(if b { "true()" } else { "false()" }),
            }
        }
        Ok(self)
    }

    pub fn integer(mut self, value: Option<i64>) -> Result<Self, Error> {
        if self.check_slot()? {
            match value {
                None => self.buf.push_str("()"),
                Some(i) => self.buf.push_str(&i.to_string()),
            }
        }
        Ok(self)
    }

    pub fn binary(mut self, value: Option<&[u8]>) -> Result<Self, Error> {
        if self.check_slot()? {
            match value {
                None => self.buf.push_str("()"),
                Some(bytes) => self.push_binary(bytes),
            }
        }
        Ok(self)
    }

    fn push_binary(&mut self, bytes: &[u8]) {
        const PREVIEW: usize = 16;
        let prefix = &bytes[..bytes.len().min(PREVIEW)];
        let encoded = base64::engine::general_purpose::STANDARD.encode(prefix);
        self.buf.push_str("#<binary ");
        self.buf.push_str(&bytes.len().to_string());
        self.buf.push_str(" bytes, ");
        self.buf.push_str(&encoded);
        if bytes.len() > PREVIEW {
            self.buf.push_str("..");
        }
        self.buf.push('>');
    }

    pub fn strings(mut self, value: Option<&[String]>) -> Result<Self, Error> {
        if self.check_slot()? {
            self.buf.push('(');
            if let Some(list) = value {
                let mut first = true;
                for v in list {
                    if !first {
                        self.buf.push(',');
                    }
                    self.push_quoted(v);
                    first = false;
                }
            }
            self.buf.push(')');
        }
        Ok(self)
    }

    pub fn item<N: XdmNode>(mut self, value: Option<&XdmItem<N>>) -> Result<Self, Error> {
        if self.check_slot()? {
            match value {
                None => self.buf.push_str("()"),
                Some(XdmItem::Atomic(AtomicValue::String(s))) => self.push_quoted(s),
                Some(XdmItem::Atomic(AtomicValue::Boolean(b))) => {
                    self.buf.push_str(if *b { "true()" } else { "false()" });
                }
                Some(XdmItem::Atomic(AtomicValue::Integer(i))) => {
                    self.buf.push_str(&i.to_string());
                }
                Some(XdmItem::Atomic(AtomicValue::Binary(bytes))) => self.push_binary(bytes),
                Some(XdmItem::Node(node)) => match node.name() {
                    Some(name) => {
                        self.buf.push_str("#<element ");
                        self.buf.push_str(&name.local);
                        self.buf.push('>');
                    }
                    None => self.buf.push_str("#<node>"),
                },
            }
        }
        Ok(self)
    }

    pub fn sequence<N>(mut self, value: &Sequence<'_, N>) -> Result<Self, Error> {
        if self.check_slot()? {
            if value.is_empty() {
                self.buf.push_str("()");
            } else {
                self.buf.push_str("#<sequence of ");
                self.buf.push_str(&value.len().to_string());
                self.buf.push_str(" items>");
            }
        }
        Ok(self)
    }

    /// Close the trace and return the rendered string.
    pub fn finish(mut self) -> String {
        self.buf.push(')');
        self.buf
    }
}

fn ordinal(pos: usize) -> String {
    match pos {
        0 => "1st".to_string(),
        1 => "2nd".to_string(),
        2 => "3rd".to_string(),
        _ => format!("{}th", pos + 1),
    }
}
