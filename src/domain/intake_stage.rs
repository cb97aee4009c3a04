use std::fmt;

/// Orchestration states one upload passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeStage {
    Idle,
    FileReceived,
    Classifying,
    Classified,
    ClassificationFailed,
    Extracting,
    Done,
}

impl IntakeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStage::Idle => "IDLE",
            IntakeStage::FileReceived => "FILE_RECEIVED",
            IntakeStage::Classifying => "CLASSIFYING",
            IntakeStage::Classified => "CLASSIFIED",
            IntakeStage::ClassificationFailed => "CLASSIFICATION_FAILED",
            IntakeStage::Extracting => "EXTRACTING",
            IntakeStage::Done => "DONE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, IntakeStage::ClassificationFailed | IntakeStage::Done)
    }
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
