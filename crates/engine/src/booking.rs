//! Delivery slot booking.

use pista_core::{Order, Stage};
use pista_storage::{ActionLogEntry, ScheduleBooking};

use crate::{actor_email, actor_name, notify, Actor, WorkflowError};

impl crate::WorkflowEngine {
    /// Book a released delivery slot for an order awaiting scheduling.
    ///
    /// The order must sit at the scheduling stage with scheduling released
    /// and no date booked yet; the slot must be free and unblocked. Books
    /// the slot, stamps the scheduling fields and performs the yard
    /// transition in one persisted update (a single history append).
    ///
    /// The slot is booked before the order is updated; if the order update
    /// then fails, the storage error surfaces and the caller retries,
    /// consistent with the store's last-write-wins model.
    pub async fn book_delivery_slot(
        &self,
        order: &Order,
        slot_id: &str,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        if order.current_status != Stage::Scheduling {
            return Err(WorkflowError::NotReady {
                stage: Stage::Scheduling,
                reason: "Pedido não está na etapa de agendamento",
            });
        }
        if !order.delivery_scheduling_released {
            return Err(WorkflowError::SchedulingNotReleased);
        }
        if order
            .scheduled_date
            .as_deref()
            .is_some_and(|d| !d.is_empty())
        {
            return Err(WorkflowError::AlreadyScheduled);
        }

        let slot = self.schedules.get(slot_id).await?;
        if slot.is_blocked || slot.is_booked {
            return Err(WorkflowError::SlotUnavailable {
                id: slot_id.to_string(),
            });
        }

        self.schedules
            .update_booking(slot_id, ScheduleBooking::book(&order.id, &order.client_name))
            .await?;

        let mut patch = self.transition_patch(order, Stage::Yard, actor, None);
        patch.scheduled_date = Some(slot.date.clone());
        patch.scheduled_time = Some(slot.time.clone());
        patch.previous_schedule_id = Some(slot.id.clone());
        let updated = self.orders.update(&order.id, patch).await?;

        self.logs
            .append(ActionLogEntry {
                order_id: order.id.clone(),
                tracking_code: order.tracking_code.clone(),
                action: format!("Entrega agendada: {} às {}", slot.date, slot.time),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({
                    "schedule_id": slot.id,
                    "date": slot.date,
                    "time": slot.time,
                }),
            })
            .await?;

        if let Some(email) =
            notify::stage_notification(&updated, Stage::Yard, &self.config.public_base_url)
        {
            self.send_best_effort(email).await;
        }

        Ok(updated)
    }
}
