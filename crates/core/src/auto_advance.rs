//! Advisory auto-advance resolution.
//!
//! Pure function. No IO. No side effects. No state mutation.
//!
//! Answers: "given this order's data, which stage would it move to next if
//! the caller asked right now?" The answer is a suggestion consulted after
//! field updates; nothing in the core acts on it on a timer.

use time::OffsetDateTime;

use crate::order::{FinancingStatus, Order, OrderKind};
use crate::stage::Stage;
use crate::timestamp::parse_rfc3339;
use crate::validate::{validate, Readiness};

/// Next stage the order can move to from its current stage, or `None` when
/// a manual decision (or more data) is required.
pub fn next_auto_stage(order: &Order, now: OffsetDateTime) -> Option<Stage> {
    match order.current_status {
        Stage::Created => Some(if order.order_type == OrderKind::Factory {
            Stage::FactoryDocumentation
        } else if order.is_internal_financing() {
            Stage::InternalFinancingReview
        } else {
            Stage::ClientDocumentation
        }),

        Stage::InternalFinancingReview => {
            (order.financiamento_status == Some(FinancingStatus::Approved))
                .then_some(Stage::ClientDocumentation)
        }

        Stage::FactoryDocumentation => {
            when_ready(order, now, Stage::FactoryDocumentation, Stage::FactoryOrdered)
        }

        // Awaiting the manufacturer; no derivable next step.
        Stage::FactoryOrdered => None,

        // Invoicing by the factory converts the factory track back into the
        // common payment flow.
        Stage::FactoryInvoiced => Some(Stage::Payment),

        Stage::ClientDocumentation => {
            when_ready(order, now, Stage::ClientDocumentation, Stage::Invoice)
        }
        Stage::Invoice => when_ready(order, now, Stage::Invoice, Stage::Payment),
        Stage::Payment => when_ready(order, now, Stage::Payment, Stage::Registration),
        Stage::Registration => when_ready(order, now, Stage::Registration, Stage::Scheduling),
        Stage::Scheduling => when_ready(order, now, Stage::Scheduling, Stage::Yard),

        // Delivery-day gating is a collaborator decision.
        Stage::Yard => None,

        Stage::Delivery => when_ready(order, now, Stage::Delivery, Stage::Evaluation),

        Stage::Evaluation => {
            if order.avaliacao_data.as_deref().is_some_and(|d| !d.is_empty()) {
                return Some(Stage::Completed);
            }
            let deadline_elapsed = order
                .avaliacao_prazo_limite
                .as_deref()
                .and_then(parse_rfc3339)
                .is_some_and(|deadline| now > deadline);
            deadline_elapsed.then_some(Stage::Completed)
        }

        Stage::Completed | Stage::Cancelled => None,
    }
}

/// `Some(next)` when `stage`'s own validator already passes, else `None`.
fn when_ready(order: &Order, now: OffsetDateTime, stage: Stage, next: Stage) -> Option<Stage> {
    match validate(stage, order, now) {
        Readiness::Ready => Some(next),
        Readiness::NotReady { .. } => None,
    }
}
