use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use funbind::simple_node::SimpleNode;
use funbind::types::{OPTIONAL_BOOLEAN, SINGLE_STRING};
use funbind::{CallSite, FunctionKind, Library, SignatureError, XdmItem, XdmSequence, codes};
use rstest::rstest;

const NS: &str = "http://example.org/ns/app";

fn lib() -> Arc<Library> {
    Arc::new(Library::new(NS, "app"))
}

struct CountingKind {
    runs: AtomicUsize,
}

impl FunctionKind for CountingKind {
    fn make_definition(
        &self,
        lib: &Library,
    ) -> Result<Arc<funbind::Definition>, SignatureError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        lib.declare("echo")
            .result(SINGLE_STRING)
            .param(SINGLE_STRING, "input")
            .optional()?
            .param(OPTIONAL_BOOLEAN, "upper")
            .finish()
    }
}

#[rstest]
fn definition_is_computed_exactly_once() {
    let lib = lib();
    let kind = Arc::new(CountingKind {
        runs: AtomicUsize::new(0),
    });
    let site = CallSite::new(lib, kind.clone());
    let first = site.definition().unwrap();
    let second = site.definition().unwrap();
    assert_eq!(kind.runs.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[rstest]
fn clones_share_the_definition_cache() {
    let lib = lib();
    let kind = Arc::new(CountingKind {
        runs: AtomicUsize::new(0),
    });
    let site = CallSite::new(lib, kind.clone());
    let clone = site.clone();
    site.definition().unwrap();
    clone.definition().unwrap();
    assert_eq!(kind.runs.load(Ordering::SeqCst), 1);
}

#[rstest]
fn a_failing_factory_is_cached_and_not_retried() {
    let lib = lib();
    let kind = Arc::new(|l: &Library| l.declare("broken").finish());
    let site = CallSite::new(lib, kind);
    let first = site.definition().unwrap_err();
    let second = site.definition().unwrap_err();
    assert_eq!(first, SignatureError::MissingResultType);
    assert_eq!(first, second);
    // the failed declaration never reached the registry
    assert!(site.library().definitions().is_empty());
}

#[rstest]
fn bind_wraps_a_definition_failure_as_a_call_error() {
    let lib = lib();
    let kind = Arc::new(|l: &Library| l.declare("broken").finish());
    let site = CallSite::new(lib, kind);
    let args: Vec<XdmSequence<SimpleNode>> = vec![];
    let err = site.bind(&args).unwrap_err();
    assert_eq!(err.code_local(), codes::BAD_DEFINITION);
    assert_eq!(err.code.ns_uri.as_deref(), Some(NS));
    // the configuration fault travels as the source
    let source = std::error::Error::source(&err).expect("chained cause");
    assert_eq!(
        source.to_string(),
        "result type has not been set on the builder"
    );
}

#[rstest]
fn bind_validates_the_argument_count() {
    let lib = lib();
    let kind = Arc::new(CountingKind {
        runs: AtomicUsize::new(0),
    });
    let site = CallSite::new(lib, kind);
    let one: Vec<XdmSequence<SimpleNode>> = vec![vec![XdmItem::string("hi")]];
    let params = site.bind(&one).unwrap();
    assert_eq!(params.count(), 1);
    let none: Vec<XdmSequence<SimpleNode>> = vec![];
    let err = site.bind(&none).unwrap_err();
    assert_eq!(err.code_local(), codes::ARITY_MISMATCH);
}
