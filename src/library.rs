use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::def::{DefBuilder, Definition, Param};
use crate::errors::{Error, Errors, SignatureError};
use crate::function::CallSite;
use crate::types::SequenceType;
use crate::xdm::QName;

/// The host's function-table registration API.
///
/// [`Library::publish`] hands every definition to this trait exactly once;
/// the host wires each one into its own static function table so its
/// type-checker and optimizer see the declared signature.
pub trait FunctionTable {
    fn install(&mut self, def: Arc<Definition>);
}

/// A library of extension functions sharing one namespace.
///
/// Registration happens in a one-time load phase; the definition map is
/// read-only afterwards and safe for unsynchronized concurrent reads. The
/// commit step is serialized by a write lock so concurrent registrations
/// cannot race past the duplicate check.
#[derive(Debug)]
pub struct Library {
    ns: String,
    prefix: String,
    defs: RwLock<HashMap<QName, Arc<Definition>>>,
    errors: Errors,
}

impl Library {
    pub fn new(ns: impl Into<String>, prefix: impl Into<String>) -> Self {
        let ns = ns.into();
        let prefix = prefix.into();
        let errors = Errors::new(ns.clone(), prefix.clone());
        Self {
            ns,
            prefix,
            defs: RwLock::new(HashMap::new()),
            errors,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.ns
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Make a call-time error with `code` in this library's namespace.
    pub fn error(&self, code: &str, message: impl Into<String>) -> Error {
        self.errors.make(code, message)
    }

    /// Make a call-time error with a chained cause.
    pub fn error_with_source(
        &self,
        code: &str,
        message: impl Into<String>,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    ) -> Error {
        self.errors.make_with_source(code, message, cause)
    }

    /// A qualified name in this library's namespace, with its prefix.
    pub fn qname(&self, local: impl Into<String>) -> QName {
        QName::with_prefix(self.prefix.clone(), self.ns.clone(), local)
    }

    /// Begin declaring a function under this library's namespace.
    pub fn declare(&self, local: &str) -> DefBuilder<'_> {
        self.declare_qname(self.qname(local))
    }

    /// Begin declaring a function under an explicit qualified name.
    pub fn declare_qname(&self, name: QName) -> DefBuilder<'_> {
        DefBuilder::new(self, name)
    }

    /// One-shot registration without the builder, for signatures that are
    /// simple enough to declare inline.
    pub fn define(
        &self,
        local: &str,
        result: SequenceType,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<Arc<Definition>, SignatureError> {
        let def = Arc::new(Definition::new(self.qname(local), params, result)?);
        self.commit(def.clone())?;
        Ok(def)
    }

    /// Look up a committed definition.
    pub fn definition(&self, name: &QName) -> Option<Arc<Definition>> {
        self.defs.read().unwrap().get(name).cloned()
    }

    /// All committed definitions, in no particular order.
    pub fn definitions(&self) -> Vec<Arc<Definition>> {
        self.defs.read().unwrap().values().cloned().collect()
    }

    /// Insert with duplicate check. Registering the same qualified name
    /// twice is fatal to the load phase.
    pub(crate) fn commit(&self, def: Arc<Definition>) -> Result<(), SignatureError> {
        let mut defs = self.defs.write().unwrap();
        match defs.entry(def.name().clone()) {
            Entry::Occupied(e) => Err(SignatureError::DuplicateFunction(e.key().clone())),
            Entry::Vacant(e) => {
                debug!(name = %def.name(), min = def.min_arity(), max = def.max_arity(),
                    "registered extension function");
                e.insert(def);
                Ok(())
            }
        }
    }

    /// Ask each function for its (cached) definition and hand every
    /// definition to the host's function table, one-shot. A failing
    /// definition factory aborts publication; the host is about to abort
    /// its load phase anyway.
    pub fn publish<'s, I>(
        &self,
        functions: I,
        table: &mut dyn FunctionTable,
    ) -> Result<(), SignatureError>
    where
        I: IntoIterator<Item = &'s CallSite>,
    {
        let mut count = 0usize;
        for site in functions {
            let def = site.definition()?;
            table.install(def);
            count += 1;
        }
        debug!(ns = %self.ns, functions = count, "published extension library");
        Ok(())
    }
}
