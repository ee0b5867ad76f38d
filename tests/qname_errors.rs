use std::collections::HashMap;

use funbind::{QName, SignatureError};
use rstest::rstest;

const NS: &str = "http://example.org/ns/app";

#[rstest]
fn equality_ignores_the_prefix() {
    let plain = QName::new(NS, "f");
    let prefixed = QName::with_prefix("app", NS, "f");
    assert_eq!(plain, prefixed);
    let mut map = HashMap::new();
    map.insert(plain, 1);
    assert_eq!(map.get(&QName::with_prefix("other", NS, "f")), Some(&1));
}

#[rstest]
fn equality_distinguishes_namespace_and_local() {
    assert_ne!(QName::new(NS, "f"), QName::new(NS, "g"));
    assert_ne!(
        QName::new(NS, "f"),
        QName::new("http://example.org/ns/other", "f")
    );
    assert_ne!(QName::new(NS, "f"), QName::local_only("f"));
}

#[rstest]
fn display_prefers_the_prefix() {
    assert_eq!(QName::with_prefix("app", NS, "f").to_string(), "app:f");
    assert_eq!(
        QName::new(NS, "f").to_string(),
        "Q{http://example.org/ns/app}f"
    );
    assert_eq!(QName::local_only("f").to_string(), "f");
}

#[rstest]
fn configuration_faults_render_their_cause() {
    assert_eq!(
        SignatureError::DuplicateFunction(QName::with_prefix("app", NS, "f")).to_string(),
        "library already contains function: app:f"
    );
    assert_eq!(
        SignatureError::MandatoryAfterOptional("c".to_string()).to_string(),
        "mandatory parameter $c after an optional one"
    );
}
