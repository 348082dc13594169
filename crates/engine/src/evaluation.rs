//! The dedicated completion path.
//!
//! `completed` always fails generic validation, so the only ways into it
//! are the client submitting a delivery review or the response deadline
//! elapsing with no review. Both append history like every other
//! transition.

use time::OffsetDateTime;

use pista_core::timestamp::now_rfc3339;
use pista_core::{next_auto_stage, Order, Stage};
use pista_storage::ActionLogEntry;

use crate::{actor_email, actor_name, Actor, WorkflowError};

impl crate::WorkflowEngine {
    /// Record the client's delivery review and complete the order.
    ///
    /// `rating` must be 1-5 stars; a second submission is rejected.
    pub async fn submit_evaluation(
        &self,
        order: &Order,
        rating: u8,
        comment: Option<&str>,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        if order.current_status.is_terminal() {
            return Err(WorkflowError::TerminalStage {
                stage: order.current_status,
            });
        }
        if order
            .avaliacao_data
            .as_deref()
            .is_some_and(|d| !d.is_empty())
        {
            return Err(WorkflowError::AlreadyEvaluated);
        }
        if !(1..=5).contains(&rating) {
            return Err(WorkflowError::InvalidRating { value: rating });
        }

        let mut patch = self.transition_patch(order, Stage::Completed, actor, None);
        patch.avaliacao_estrelas = Some(rating);
        patch.avaliacao_comentario = comment.map(str::to_string);
        patch.avaliacao_data = Some(now_rfc3339());
        let updated = self.orders.update(&order.id, patch).await?;

        self.logs
            .append(ActionLogEntry {
                order_id: order.id.clone(),
                tracking_code: order.tracking_code.clone(),
                action: format!("[AVALIAÇÃO] Cliente avaliou com {rating} estrelas"),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({ "stars": rating, "comment": comment }),
            })
            .await?;

        Ok(updated)
    }

    /// Complete an order whose evaluation window is over.
    ///
    /// Allowed only when the order sits at the evaluation stage and the
    /// auto-advance resolver already answers `completed` (a review was
    /// submitted, or the response deadline elapsed).
    pub async fn complete(
        &self,
        order: &Order,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        let now = OffsetDateTime::now_utc();
        if order.current_status != Stage::Evaluation
            || next_auto_stage(order, now) != Some(Stage::Completed)
        {
            return Err(WorkflowError::NotReady {
                stage: Stage::Completed,
                reason: "Avaliação pendente e prazo de resposta ainda não expirou",
            });
        }

        let patch = self.transition_patch(order, Stage::Completed, actor, None);
        let updated = self.orders.update(&order.id, patch).await?;

        self.logs
            .append(ActionLogEntry {
                order_id: order.id.clone(),
                tracking_code: order.tracking_code.clone(),
                action: "Pedido concluído".to_string(),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({
                    "old_status": order.current_status,
                    "new_status": Stage::Completed,
                }),
            })
            .await?;

        Ok(updated)
    }
}
