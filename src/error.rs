//! Error types for the life simulation engine

use thiserror::Error;

/// Fatal errors: content defects found while building catalogs, and lifecycle misuse
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid condition `{condition}`: {reason}")]
    InvalidCondition { condition: String, reason: String },

    #[error("Unknown property `{0}`")]
    UnknownProperty(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Talent {id} has grade {grade}, expected 0..=3")]
    InvalidGrade { id: i32, grade: i32 },

    #[error("Talent not found: {0}")]
    UnknownTalent(i32),

    #[error("Event not found: {0}")]
    UnknownEvent(i32),

    #[error("Event {event} branches to missing event {target}")]
    UnresolvedBranch { event: i32, target: i32 },

    #[error("Invalid weight {weight} for event {target}")]
    InvalidWeight { target: i32, weight: f64 },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Cannot {action} while the life is {phase:?}")]
    Phase {
        action: &'static str,
        phase: crate::simulator::LifePhase,
    },

    #[error("No owned talent at position {index} (owned: {owned})")]
    InheritOutOfRange { index: usize, owned: usize },

    #[error("Gave up on {stage} after {attempts} rejected attempts")]
    RetriesExhausted { stage: &'static str, attempts: usize },

    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}

/// Recoverable validation failures raised during selection.
///
/// These are handed to [`SelectionHandler::on_error`](crate::simulator::SelectionHandler::on_error)
/// and the stage that produced them is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Talent {candidate} cannot be owned together with talent {owned}")]
    ExclusiveConflict { candidate: i32, owned: i32 },

    #[error("Talent {0} is not among the offered candidates")]
    UnknownCandidate(i32),

    #[error("Property allocation points incorrect: expected {expected}, got {values:?}")]
    InvalidAllocation { expected: i32, values: [i32; 4] },
}

/// Result type alias for the life simulation engine
pub type Result<T> = std::result::Result<T, LifeError>;
