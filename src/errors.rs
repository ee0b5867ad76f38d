use core::fmt;
use std::sync::Arc;

use crate::xdm::QName;

/// Canonical local names of the error codes the binder emits. The full error
/// identity is the code qualified by the declaring library's namespace, e.g.
/// `Q{http://example.org/ns}arity-mismatch`.
pub mod codes {
    pub const ARITY_MISMATCH: &str = "arity-mismatch";
    pub const REQUIRED_ARGUMENT_EMPTY: &str = "required-argument-empty";
    pub const TOO_MANY_ITEMS: &str = "too-many-items";
    pub const TYPE_MISMATCH: &str = "type-mismatch";
    pub const NAME_MISMATCH: &str = "name-mismatch";
    pub const POSITION_OUT_OF_RANGE: &str = "position-out-of-range";
    pub const TOO_MANY_PARAMS_FOR_TRACE: &str = "too-many-params-for-trace";
    pub const BAD_DEFINITION: &str = "bad-definition";
}

/// Configuration fault raised while declaring or registering a function.
///
/// These abort the load phase of the offending function library so a human
/// fixes the declaration. They are never retried and never reach query
/// callers as evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("library already contains function: {0}")]
    DuplicateFunction(QName),
    #[error("optional() called twice on the same builder")]
    OptionalTwice,
    #[error("mandatory parameter ${0} after an optional one")]
    MandatoryAfterOptional(String),
    #[error("result type has not been set on the builder")]
    MissingResultType,
}

/// Call-time error reported to the host as a normal evaluation failure.
///
/// Every error carries a qualified code in the declaring library's
/// namespace so downstream consumers can match categories without parsing
/// message text.
#[derive(Debug, Clone, thiserror::Error)]
pub struct Error {
    pub code: QName,
    pub message: String,
    #[source]
    pub source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(code: QName, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Compose an error with a chained cause.
    pub fn with_source(
        mut self,
        source: impl Into<Option<Arc<dyn std::error::Error + Send + Sync>>>,
    ) -> Self {
        self.source = source.into();
        self
    }

    /// The local part of the error code, for matching against [`codes`].
    pub fn code_local(&self) -> &str {
        &self.code.local
    }

    /// Human-readable code string (`prefix:local` or `Q{ns}local`).
    pub fn format_code(&self) -> String {
        self.code.to_string()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} ({})", self.message, self.format_code())
    }
}

/// Builds namespace-qualified call-time errors for one library.
///
/// Constructed with the library's namespace and prefix; every produced
/// [`Error`] is stamped with a `(prefix, namespace, code)` qualified name.
/// Projects are encouraged to wrap this in their own error type providing a
/// method per code, so codes live in one place instead of as strings all
/// over the function bodies.
#[derive(Debug, Clone)]
pub struct Errors {
    ns: String,
    prefix: String,
}

impl Errors {
    pub(crate) fn new(ns: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            ns: ns.into(),
            prefix: prefix.into(),
        }
    }

    fn qname(&self, code: &str) -> QName {
        QName::with_prefix(self.prefix.clone(), self.ns.clone(), code)
    }

    /// Make an error with `code` in the library's namespace.
    pub fn make(&self, code: &str, message: impl Into<String>) -> Error {
        Error::new(self.qname(code), message)
    }

    /// Make an error with `code` in the library's namespace and a cause.
    pub fn make_with_source(
        &self,
        code: &str,
        message: impl Into<String>,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    ) -> Error {
        Error::new(self.qname(code), message).with_source(Some(cause))
    }
}
