use docintake::domain::IntakeStage;

#[test]
fn given_stages_when_displayed_then_upper_snake_case() {
    assert_eq!(IntakeStage::FileReceived.to_string(), "FILE_RECEIVED");
    assert_eq!(
        IntakeStage::ClassificationFailed.as_str(),
        "CLASSIFICATION_FAILED"
    );
}

#[test]
fn given_stages_then_only_done_and_classification_failed_are_terminal() {
    assert!(IntakeStage::Done.is_terminal());
    assert!(IntakeStage::ClassificationFailed.is_terminal());
    assert!(!IntakeStage::Extracting.is_terminal());
    assert!(!IntakeStage::Idle.is_terminal());
}
