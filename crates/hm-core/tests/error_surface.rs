use hm_core::errors::{ErrorInfo, HmError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("id", "1")
        .with_context("reason", "example")
}

#[test]
fn transition_error_surface() {
    let err = HmError::Transition(sample_info("missing-weight", "no gamma for pair"));
    assert_eq!(err.code(), "missing-weight");
    assert!(err.info().context.contains_key("id"));
}

#[test]
fn similarity_error_surface() {
    let err = HmError::Similarity(sample_info("divergence-out-of-bounds", "jsd > 1"));
    assert_eq!(err.code(), "divergence-out-of-bounds");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn partition_error_surface() {
    let err = HmError::Partition(sample_info("label-mismatch", "different node sets"));
    assert_eq!(err.info().code, "label-mismatch");
}

#[test]
fn context_keeps_family() {
    let err = HmError::Graph(ErrorInfo::new("empty-edge", "no members"))
        .with_context("edge", 7)
        .with_hint("drop the edge before building");
    match &err {
        HmError::Graph(info) => {
            assert_eq!(info.context.get("edge"), Some(&"7".to_string()));
            assert_eq!(info.hint.as_deref(), Some("drop the edge before building"));
        }
        other => panic!("unexpected family: {other:?}"),
    }
    let rendered = err.to_string();
    assert!(rendered.starts_with("graph error: no members (code: empty-edge)"));
    assert!(rendered.contains("edge=7"));
}

#[test]
fn error_serializes_with_family_tag() {
    let err = HmError::Serde(sample_info("S001", "schema mismatch"));
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"family\":\"Serde\""));
    let restored: HmError = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, err);
}
