//! The cancellation side-exit.

use pista_core::timestamp::now_rfc3339;
use pista_core::{Order, Stage};
use pista_storage::{ActionLogEntry, ScheduleBooking};

use crate::{actor_email, actor_name, notify, Actor, WorkflowError};

impl crate::WorkflowEngine {
    /// Cancel an order from any non-terminal stage.
    ///
    /// Cancellation is an emergency exit: no validator gates it. Orders
    /// already completed or cancelled are the one exception and are
    /// rejected with [`WorkflowError::TerminalStage`].
    ///
    /// A delivery slot held by the order is released best-effort; a
    /// failure there is logged and does not undo the cancellation.
    pub async fn cancel(
        &self,
        order: &Order,
        reason: &str,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        if order.current_status.is_terminal() {
            return Err(WorkflowError::TerminalStage {
                stage: order.current_status,
            });
        }

        let mut patch =
            self.transition_patch(order, Stage::Cancelled, actor, Some(reason.to_string()));
        patch.cancel_reason = Some(reason.to_string());
        patch.cancelled_at = Some(now_rfc3339());
        patch.cancelled_by = Some(actor_email(actor));
        let updated = self.orders.update(&order.id, patch).await?;

        if let Some(slot_id) = order.previous_schedule_id.as_deref() {
            if let Err(err) = self
                .schedules
                .update_booking(slot_id, ScheduleBooking::released())
                .await
            {
                tracing::warn!(slot = %slot_id, error = %err, "failed to release delivery slot");
            }
        }

        self.logs
            .append(ActionLogEntry {
                order_id: order.id.clone(),
                tracking_code: order.tracking_code.clone(),
                action: "Pedido cancelado".to_string(),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({ "reason": reason }),
            })
            .await?;

        if let Some(email) = notify::cancellation_notification(&updated, reason) {
            self.send_best_effort(email).await;
        }

        Ok(updated)
    }
}
