use ftt_lib::{ErrorCategory, FttError};

#[test]
fn config_error_display_includes_message() {
    let err = FttError::Config("missing file key".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing file key");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: FttError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn figma_api_helper_includes_status_and_message() {
    let err = FttError::figma_api(Some(reqwest::StatusCode::NOT_FOUND), "not found");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: Some(404)): not found"
    );
}

#[test]
fn figma_api_helper_handles_missing_status() {
    let err = FttError::figma_api(None, "missing token");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: None): missing token"
    );
}

#[test]
fn invalid_document_maps_to_document_category() {
    let err = FttError::InvalidDocument("expected a JSON object".to_string());
    let payload = err.to_payload();

    assert_eq!(payload.category, ErrorCategory::Document);
    assert_eq!(format!("{}", err), "Invalid document: expected a JSON object");
    assert!(payload.remediation.is_some());
}

#[test]
fn serde_errors_convert_into_serialization_variant() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: FttError = parse_err.into();

    assert!(format!("{}", err).starts_with("Serialization error: "));
    assert_eq!(err.to_payload().category, ErrorCategory::Document);
}
