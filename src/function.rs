use std::sync::{Arc, OnceLock};

use crate::def::Definition;
use crate::errors::{Error, SignatureError, codes};
use crate::library::Library;
use crate::model::XdmNode;
use crate::params::Parameters;
use crate::xdm::XdmSequence;

/// The capability every registered function provides: building its own
/// signature. One implementation exists per distinct registered function;
/// the factory runs at most once per [`CallSite`] family (see below).
pub trait FunctionKind: Send + Sync {
    fn make_definition(&self, lib: &Library) -> Result<Arc<Definition>, SignatureError>;
}

impl<F> FunctionKind for F
where
    F: Fn(&Library) -> Result<Arc<Definition>, SignatureError> + Send + Sync,
{
    fn make_definition(&self, lib: &Library) -> Result<Arc<Definition>, SignatureError> {
        self(lib)
    }
}

/// One occurrence of a registered function in a compiled query.
///
/// The definition is materialized lazily on first use and cached with an
/// exactly-once discipline; clones share the cache, so the host's
/// call-expression factory hands out clones of the site it created at
/// registration time. A factory failure is cached too — configuration
/// faults are not retried.
#[derive(Clone)]
pub struct CallSite {
    lib: Arc<Library>,
    kind: Arc<dyn FunctionKind>,
    def: Arc<OnceLock<Result<Arc<Definition>, SignatureError>>>,
}

impl CallSite {
    pub fn new(lib: Arc<Library>, kind: Arc<dyn FunctionKind>) -> Self {
        Self {
            lib,
            kind,
            def: Arc::new(OnceLock::new()),
        }
    }

    pub fn library(&self) -> &Library {
        &self.lib
    }

    /// The function's definition, computed on first call and cached for the
    /// lifetime of this call site and its clones.
    pub fn definition(&self) -> Result<Arc<Definition>, SignatureError> {
        self.def
            .get_or_init(|| self.kind.make_definition(&self.lib))
            .clone()
    }

    /// Validate the actual argument count and return the typed binder.
    ///
    /// A failure while instantiating the function's contract surfaces as a
    /// call-time error with the `bad-definition` code, the configuration
    /// fault chained as its source.
    pub fn bind<'a, N: XdmNode>(
        &'a self,
        args: &'a [XdmSequence<N>],
    ) -> Result<Parameters<'a, N>, Error> {
        let def = self.definition().map_err(|e| {
            self.lib.errors().make_with_source(
                codes::BAD_DEFINITION,
                "error instantiating the function definition",
                Arc::new(e),
            )
        })?;
        Parameters::new(&self.lib, def, args)
    }
}
