use pista_core::{Stage, UnknownStageError};
use pista_storage::StorageError;

/// All errors surfaced by the workflow engine.
///
/// Validation reasons are operator-facing Portuguese strings produced by
/// the stage validators; the surrounding messages are diagnostics for the
/// calling layer. Notification failures never appear here; they are
/// swallowed at the dispatch site.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The target stage is irrelevant to this order's variant.
    #[error("stage '{stage}' does not apply to this order variant")]
    InapplicableStage { stage: Stage },

    /// A stage id that is not part of the catalog (string boundary only).
    #[error(transparent)]
    UnknownStage(#[from] UnknownStageError),

    /// The stage's completion criteria are unmet.
    #[error("stage '{stage}' is not ready: {reason}")]
    NotReady { stage: Stage, reason: &'static str },

    /// The order sits in a terminal stage and cannot transition again.
    #[error("order is in terminal stage '{stage}'")]
    TerminalStage { stage: Stage },

    /// Evaluation rating outside 1-5.
    #[error("evaluation rating must be 1-5 stars, got {value}")]
    InvalidRating { value: u8 },

    /// An evaluation was already submitted for this order.
    #[error("order has already been evaluated")]
    AlreadyEvaluated,

    /// The order already holds a delivery slot.
    #[error("order already has a scheduled delivery")]
    AlreadyScheduled,

    /// Delivery scheduling has not been released for this order yet.
    #[error("delivery scheduling has not been released for this order")]
    SchedulingNotReleased,

    /// The requested slot is blocked or already booked.
    #[error("schedule slot '{id}' is unavailable")]
    SlotUnavailable { id: String },

    /// Order intake data incomplete or inconsistent.
    #[error("order intake rejected: {reason}")]
    Intake { reason: &'static str },

    /// A persistence failure from the order store or the audit log. These
    /// abort the operation and propagate as-is.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
