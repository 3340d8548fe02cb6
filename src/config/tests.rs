use super::*;
use serde_json::json;

const DEFAULT_MASK: u64 = 0x1FFF - 2048;

#[test]
fn test_missing_config_uses_defaults() {
    let config = normalize(None);

    assert_eq!(config.get("formats"), Some(&json!(DEFAULT_MASK)));
    assert_eq!(config.get("detectorType"), Some(&Value::Null));
    assert!(config.flag("showTorchButton"));
    assert!(!config.flag("beepOnSuccess"));
    assert!(!config.flag("vibrateOnSuccess"));
    assert!(!config.flag("rotateCamera"));
    assert!(!config.flag("showFlipCameraButton"));
    assert_eq!(config.detector_type(), None);
}

#[test]
fn test_sequence_config_is_discarded() {
    let from_sequence = normalize(Some(&json!([1, 2, 3])));
    assert_eq!(from_sequence, normalize(None));
}

#[test]
fn test_scalar_config_is_discarded() {
    assert_eq!(normalize(Some(&json!("beep"))), normalize(None));
    assert_eq!(normalize(Some(&json!(42))), normalize(None));
    assert_eq!(normalize(Some(&Value::Null)), normalize(None));
}

#[test]
fn test_caller_keys_win() {
    let config = normalize(Some(&json!({
        "beepOnSuccess": true,
        "showTorchButton": false,
        "detectorType": "card",
    })));

    assert!(config.flag("beepOnSuccess"));
    assert!(!config.flag("showTorchButton"));
    assert_eq!(config.detector_type(), Some(DetectorType::Card));
    // untouched keys keep their defaults
    assert_eq!(config.formats().bits() as u64, DEFAULT_MASK);
}

#[test]
fn test_formats_replace_defaults_entirely() {
    let config = normalize(Some(&json!({ "formats": { "QRCode": true } })));

    assert_eq!(config.formats(), FormatMask::EMPTY.with(BarcodeFormat::QRCode));
    assert_eq!(config.get("formats"), Some(&json!(256)));
}

#[test]
fn test_empty_formats_encode_to_zero() {
    let config = normalize(Some(&json!({ "formats": {} })));
    assert_eq!(config.get("formats"), Some(&json!(0)));
}

#[test]
fn test_null_or_sequence_formats_fall_back_to_defaults() {
    let config = normalize(Some(&json!({ "formats": null })));
    assert_eq!(config.formats(), FormatMask::defaults());

    let config = normalize(Some(&json!({ "formats": ["QRCode"] })));
    assert_eq!(config.formats(), FormatMask::defaults());
}

#[test]
fn test_scalar_formats_enable_nothing() {
    for formats in [json!(5), json!(true), json!(false), json!(0), json!(""), json!("QRCode")] {
        let config = normalize(Some(&json!({ "formats": formats })));
        assert_eq!(config.formats(), FormatMask::EMPTY, "formats: {formats}");
        assert_eq!(config.get("formats"), Some(&json!(0)));
    }
}

#[test]
fn test_record_view_holds_encoded_formats() {
    let config = normalize(Some(&json!({ "formats": { "Aztec": true } })));
    let record = config.as_map();

    assert_eq!(record.len(), 7);
    assert_eq!(record["formats"], json!(4096));
    assert_eq!(u32::from(config.formats()), 4096);
}

#[test]
fn test_unknown_keys_are_forwarded() {
    let config = normalize(Some(&json!({ "prompt": "Place a barcode inside the frame" })));
    assert_eq!(
        config.get("prompt"),
        Some(&json!("Place a barcode inside the frame"))
    );
}

#[test]
fn test_typed_options_match_record_defaults() {
    let typed = Value::from(ScanOptions::default());
    assert_eq!(typed, Value::Object(ScanOptions::default_record()));
}

#[test]
fn test_partial_options_only_serialize_set_fields() {
    let partial = PartialScanOptions {
        vibrate_on_success: Some(true),
        ..PartialScanOptions::default()
    };
    assert_eq!(partial.to_value(), json!({ "vibrateOnSuccess": true }));

    let partial = PartialScanOptions::only([BarcodeFormat::EAN13, BarcodeFormat::UPCA]);
    let config = normalize(Some(&partial.to_value()));
    assert_eq!(config.formats().bits(), 32 | 512);
}

#[test]
fn test_truthiness() {
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!("false")));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&Value::Null));
}
