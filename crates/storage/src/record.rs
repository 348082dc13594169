use serde::{Deserialize, Serialize};

use pista_core::{HistoryEntry, Order, Stage};

/// One audit log entry describing an action taken on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub order_id: String,
    pub tracking_code: String,
    /// Human-readable action line, e.g. `"Avanço: payment → registration"`.
    pub action: String,
    pub actor_email: String,
    pub actor_name: String,
    /// Structured action payload.
    pub details: serde_json::Value,
}

/// A delivery schedule slot, owned by the scheduling backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: String,
    /// `YYYY-MM-DD`, possibly with a trailing `T...` part.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub is_booked: bool,
    /// Blocked slots are withheld from booking by the yard staff.
    #[serde(default)]
    pub is_blocked: bool,
    pub booked_by_order: Option<String>,
    pub booked_by_client: Option<String>,
}

/// Full overwrite of a slot's booking state. The booking triple always
/// travels together; there is no partial form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBooking {
    pub is_booked: bool,
    pub booked_by_order: Option<String>,
    pub booked_by_client: Option<String>,
}

impl ScheduleBooking {
    /// Book the slot for an order.
    pub fn book(order_id: &str, client_name: &str) -> Self {
        ScheduleBooking {
            is_booked: true,
            booked_by_order: Some(order_id.to_string()),
            booked_by_client: Some(client_name.to_string()),
        }
    }

    /// Release the slot back to the pool.
    pub fn released() -> Self {
        ScheduleBooking {
            is_booked: false,
            booked_by_order: None,
            booked_by_client: None,
        }
    }
}

/// Partial update applied to an order by the workflow engine.
///
/// Only the fields the engine itself writes are present; `None` means
/// "leave unchanged". There is no way to write `current_status` without
/// also carrying the history that records the transition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPatch {
    pub current_status: Option<Stage>,
    pub status_publico: Option<String>,
    /// Full replacement of the history vector (append performed by the
    /// engine before the write).
    pub status_history: Option<Vec<HistoryEntry>>,
    pub last_updated_at: Option<String>,
    pub last_updated_by: Option<String>,
    pub avaliacao_prazo_limite: Option<String>,
    pub avaliacao_estrelas: Option<u8>,
    pub avaliacao_comentario: Option<String>,
    pub avaliacao_data: Option<String>,
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancelled_by: Option<String>,
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    pub previous_schedule_id: Option<String>,
}

impl OrderPatch {
    /// Reference merge semantics; backends must behave equivalently.
    pub fn apply_to(&self, order: &mut Order) {
        if let Some(status) = self.current_status {
            order.current_status = status;
        }
        if let Some(label) = &self.status_publico {
            order.status_publico = label.clone();
        }
        if let Some(history) = &self.status_history {
            order.status_history = history.clone();
        }
        if let Some(at) = &self.last_updated_at {
            order.last_updated_at = Some(at.clone());
        }
        if let Some(by) = &self.last_updated_by {
            order.last_updated_by = Some(by.clone());
        }
        if let Some(deadline) = &self.avaliacao_prazo_limite {
            order.avaliacao_prazo_limite = Some(deadline.clone());
        }
        if let Some(stars) = self.avaliacao_estrelas {
            order.avaliacao_estrelas = Some(stars);
        }
        if let Some(comment) = &self.avaliacao_comentario {
            order.avaliacao_comentario = Some(comment.clone());
        }
        if let Some(date) = &self.avaliacao_data {
            order.avaliacao_data = Some(date.clone());
        }
        if let Some(reason) = &self.cancel_reason {
            order.cancel_reason = Some(reason.clone());
        }
        if let Some(at) = &self.cancelled_at {
            order.cancelled_at = Some(at.clone());
        }
        if let Some(by) = &self.cancelled_by {
            order.cancelled_by = Some(by.clone());
        }
        if let Some(date) = &self.scheduled_date {
            order.scheduled_date = Some(date.clone());
        }
        if let Some(time) = &self.scheduled_time {
            order.scheduled_time = Some(time.clone());
        }
        if let Some(id) = &self.previous_schedule_id {
            order.previous_schedule_id = Some(id.clone());
        }
    }
}

/// An outbound e-mail handed to the notification gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}
