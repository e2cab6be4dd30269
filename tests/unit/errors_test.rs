use lernova::types::errors::*;

// === ApiError Tests ===

#[test]
fn api_error_display_variants() {
    assert_eq!(
        ApiError::Network("connection refused".to_string()).to_string(),
        "Downloads API network error: connection refused"
    );
    assert_eq!(
        ApiError::Status {
            status: 502,
            body: "bad gateway".to_string()
        }
        .to_string(),
        "Downloads API returned status 502: bad gateway"
    );
    assert_eq!(
        ApiError::InvalidResponse("missing field `download_id`".to_string()).to_string(),
        "Invalid downloads API response: missing field `download_id`"
    );
    assert_eq!(
        ApiError::Client("tls backend".to_string()).to_string(),
        "Downloads API client error: tls backend"
    );
}

#[test]
fn api_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ApiError::Network("x".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidValue("width".to_string()).to_string(),
        "Invalid settings value: width"
    );
}

// === WindowError Tests ===

#[test]
fn window_error_display_variants() {
    assert_eq!(
        WindowError::NotFound("w-1".to_string()).to_string(),
        "Window not found: w-1"
    );
    assert_eq!(
        WindowError::CreationFailed("no display".to_string()).to_string(),
        "Window creation failed: no display"
    );
}

#[test]
fn errors_convert_into_boxed_error() {
    fn fails() -> Result<(), Box<dyn std::error::Error>> {
        Err::<(), _>(SettingsError::InvalidValue("k".to_string()))?;
        Ok(())
    }
    assert_eq!(fails().unwrap_err().to_string(), "Invalid settings value: k");
}
