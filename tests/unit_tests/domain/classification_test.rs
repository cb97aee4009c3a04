use docintake::domain::{ClassificationResult, ClassificationRule, ParsingConfig};

#[test]
fn given_confidence_above_one_when_created_then_clamped() {
    let result = ClassificationResult::new("invoice", 1.7, "");
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn given_negative_or_nan_confidence_when_created_then_zero() {
    assert_eq!(ClassificationResult::new("invoice", -0.2, "").confidence, 0.0);
    assert_eq!(ClassificationResult::new("invoice", f64::NAN, "").confidence, 0.0);
}

#[test]
fn given_rule_when_serialized_then_uses_type_key() {
    let rule = ClassificationRule::new("receipt", "A retail receipt");
    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["type"], "receipt");
    assert_eq!(json["description"], "A retail receipt");
}

#[test]
fn given_default_parsing_config_then_english_and_five_pages() {
    let parsing = ParsingConfig::default();
    assert_eq!(parsing.language, "en");
    assert_eq!(parsing.max_pages, 5);
}
