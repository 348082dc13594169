//! Shared test harness: an engine wired to the in-memory backends with the
//! concrete store handles kept around for assertions.

use std::sync::Arc;

use pista_core::Order;
use pista_engine::WorkflowEngine;
use pista_storage::memory::{
    MemoryActionLog, MemoryOrderStore, MemoryScheduleStore, RecordingNotifier,
};
use pista_storage::{OrderStore, ScheduleSlot};

pub struct Harness {
    pub engine: WorkflowEngine,
    pub orders: Arc<MemoryOrderStore>,
    pub logs: Arc<MemoryActionLog>,
    pub schedules: Arc<MemoryScheduleStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness() -> Harness {
    harness_with_slots(Vec::new())
}

pub fn harness_with_slots(slots: Vec<ScheduleSlot>) -> Harness {
    let orders = Arc::new(MemoryOrderStore::new());
    let logs = Arc::new(MemoryActionLog::new());
    let schedules = Arc::new(MemoryScheduleStore::with_slots(slots));
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = WorkflowEngine::new(
        orders.clone(),
        logs.clone(),
        schedules.clone(),
        notifier.clone(),
    );
    Harness {
        engine,
        orders,
        logs,
        schedules,
        notifier,
    }
}

/// Seed an order into the store and hand back the stored copy (with id).
pub async fn seed(harness: &Harness, order: Order) -> Order {
    harness
        .orders
        .create(order)
        .await
        .expect("seeding the memory store cannot fail")
}

pub fn free_slot(id: &str, date: &str, time: &str) -> ScheduleSlot {
    ScheduleSlot {
        id: id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        is_booked: false,
        is_blocked: false,
        booked_by_order: None,
        booked_by_client: None,
    }
}
