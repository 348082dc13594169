//! Validated stage progression.

use time::{Duration, OffsetDateTime};

use pista_core::timestamp::{now_rfc3339, to_rfc3339};
use pista_core::{is_applicable, validate, HistoryEntry, Order, Readiness, Stage};
use pista_storage::{ActionLogEntry, OrderPatch};

use crate::{actor_email, actor_name, notify, Actor, WorkflowError};

impl crate::WorkflowEngine {
    /// Advance `order` to `target`.
    ///
    /// Rejects the transition when `target` does not apply to this order's
    /// variant or when its completion criteria are unmet; on any failure
    /// the caller's order is untouched and nothing was persisted. On
    /// success the updated order is returned, an audit entry has been
    /// written, and a stage-change notification was attempted (best
    /// effort).
    ///
    /// There is no retry anywhere in this path; retrying is a caller
    /// decision.
    pub async fn advance(
        &self,
        order: &Order,
        target: Stage,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        if !is_applicable(order, target) {
            return Err(WorkflowError::InapplicableStage { stage: target });
        }
        let now = OffsetDateTime::now_utc();
        if let Readiness::NotReady { reason } = validate(target, order, now) {
            return Err(WorkflowError::NotReady { stage: target, reason });
        }

        let mut patch = self.transition_patch(order, target, actor, None);
        if target == Stage::Evaluation {
            let deadline = now + Duration::days(self.config.evaluation_response_days);
            patch.avaliacao_prazo_limite = Some(to_rfc3339(deadline));
        }
        let updated = self.orders.update(&order.id, patch).await?;

        self.logs
            .append(ActionLogEntry {
                order_id: order.id.clone(),
                tracking_code: order.tracking_code.clone(),
                action: format!("Avanço: {} → {}", order.current_status, target),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({
                    "old_status": order.current_status,
                    "new_status": target,
                }),
            })
            .await?;

        if let Some(email) =
            notify::stage_notification(&updated, target, &self.config.public_base_url)
        {
            self.send_best_effort(email).await;
        }

        Ok(updated)
    }

    /// Convenience form of [`advance`](Self::advance) taking a stage id
    /// string; unknown ids fail with [`WorkflowError::UnknownStage`].
    pub async fn advance_by_id(
        &self,
        order: &Order,
        target: &str,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        let stage: Stage = target.parse()?;
        self.advance(order, stage, actor).await
    }

    /// The update every transition shares: stage, public label, bookkeeping
    /// stamps and the history append recording where the order came from.
    pub(crate) fn transition_patch(
        &self,
        order: &Order,
        target: Stage,
        actor: Option<&Actor>,
        reason: Option<String>,
    ) -> OrderPatch {
        let timestamp = now_rfc3339();
        let user = actor_email(actor);
        let mut history = order.status_history.clone();
        history.push(HistoryEntry {
            status: target,
            timestamp: timestamp.clone(),
            user: user.clone(),
            from: order.current_status,
            reason,
        });
        OrderPatch {
            current_status: Some(target),
            status_publico: Some(target.label().to_string()),
            status_history: Some(history),
            last_updated_at: Some(timestamp),
            last_updated_by: Some(user),
            ..OrderPatch::default()
        }
    }
}
