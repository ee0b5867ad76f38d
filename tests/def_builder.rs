use funbind::types::{OPTIONAL_BOOLEAN, OPTIONAL_STRING, SINGLE_INTEGER, SINGLE_STRING};
use funbind::{Definition, Library, Param, SignatureError};
use rstest::rstest;

const NS: &str = "http://example.org/ns/app";

fn lib() -> Library {
    Library::new(NS, "app")
}

#[rstest]
fn builder_computes_arity_from_optional_tail() {
    let lib = lib();
    let def = lib
        .declare("put")
        .result(SINGLE_STRING)
        .param(SINGLE_STRING, "key")
        .param(SINGLE_INTEGER, "weight")
        .optional()
        .unwrap()
        .param(OPTIONAL_BOOLEAN, "replace")
        .finish()
        .unwrap();
    assert_eq!(def.min_arity(), 2);
    assert_eq!(def.max_arity(), 3);
    assert_eq!(def.name().local, "put");
    assert_eq!(def.name().ns_uri.as_deref(), Some(NS));
}

#[rstest]
fn builder_preserves_declaration_order() {
    let lib = lib();
    let def = lib
        .declare("f")
        .result(SINGLE_STRING)
        .param(SINGLE_STRING, "first")
        .param(SINGLE_INTEGER, "second")
        .finish()
        .unwrap();
    let names: Vec<&str> = def.params().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
    assert!(!def.params()[0].optional);
    assert_eq!(def.params()[1].ty, SINGLE_INTEGER);
}

#[rstest]
fn missing_result_type_is_a_configuration_fault() {
    let lib = lib();
    let err = lib
        .declare("f")
        .param(SINGLE_STRING, "a")
        .finish()
        .unwrap_err();
    assert_eq!(err, SignatureError::MissingResultType);
}

#[rstest]
fn optional_twice_is_a_configuration_fault() {
    let lib = lib();
    let builder = lib
        .declare("f")
        .result(SINGLE_STRING)
        .param(SINGLE_STRING, "a")
        .optional()
        .unwrap()
        .param(OPTIONAL_STRING, "b");
    let err = builder.optional().unwrap_err();
    assert_eq!(err, SignatureError::OptionalTwice);
}

// The optional marker only tags parameters added after the call; earlier
// parameters stay mandatory. This ordering dependency is intentional (the
// builder is a monotonic state machine), so pin it.
#[rstest]
fn optional_marker_is_not_retroactive() {
    let lib = lib();
    let def = lib
        .declare("f")
        .result(SINGLE_STRING)
        .param(SINGLE_STRING, "before")
        .optional()
        .unwrap()
        .param(OPTIONAL_STRING, "after")
        .finish()
        .unwrap();
    assert!(!def.params()[0].optional);
    assert!(def.params()[1].optional);
    assert_eq!(def.min_arity(), 1);
    assert_eq!(def.max_arity(), 2);
}

#[rstest]
fn zero_parameter_function_has_zero_arity() {
    let lib = lib();
    let def = lib.declare("now").result(SINGLE_STRING).finish().unwrap();
    assert_eq!(def.min_arity(), 0);
    assert_eq!(def.max_arity(), 0);
    assert!(def.params().is_empty());
}

#[rstest]
fn mandatory_after_optional_is_rejected_on_direct_construction() {
    let lib = lib();
    let params = [
        Param::new(SINGLE_STRING, "a"),
        Param::optional(OPTIONAL_STRING, "b"),
        Param::new(SINGLE_STRING, "c"),
    ];
    let err = Definition::new(lib.qname("f"), params, SINGLE_STRING).unwrap_err();
    assert_eq!(err, SignatureError::MandatoryAfterOptional("c".to_string()));
}

#[rstest]
fn all_optional_signature_has_zero_min_arity() {
    let lib = lib();
    let def = lib
        .declare("f")
        .result(SINGLE_STRING)
        .optional()
        .unwrap()
        .param(OPTIONAL_STRING, "a")
        .param(OPTIONAL_BOOLEAN, "b")
        .finish()
        .unwrap();
    assert_eq!(def.min_arity(), 0);
    assert_eq!(def.max_arity(), 2);
}

#[rstest]
fn finish_commits_into_the_library() {
    let lib = lib();
    let def = lib.declare("f").result(SINGLE_STRING).finish().unwrap();
    let looked_up = lib.definition(def.name()).expect("committed definition");
    assert_eq!(looked_up.name(), def.name());
}

#[rstest]
fn second_finish_under_the_same_name_fails() {
    let lib = lib();
    lib.declare("f").result(SINGLE_STRING).finish().unwrap();
    let err = lib.declare("f").result(SINGLE_STRING).finish().unwrap_err();
    assert_eq!(err, SignatureError::DuplicateFunction(lib.qname("f")));
}
