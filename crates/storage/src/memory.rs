//! In-memory reference backends.
//!
//! These implement the collaborator traits over `Mutex`-guarded vectors:
//! reference semantics for real backends and the harness for engine tests.
//! Locks are never held across an await point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use pista_core::Order;

use crate::error::{NotifyError, StorageError};
use crate::record::{ActionLogEntry, EmailMessage, OrderPatch, ScheduleBooking, ScheduleSlot};
use crate::traits::{ActionLogStore, Notifier, OrderStore, ScheduleStore};

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Default)]
struct OrderShelf {
    next_id: u64,
    orders: Vec<Order>,
}

/// Order store over an in-memory vector. Ids are `ord-1`, `ord-2`, ...
#[derive(Default)]
pub struct MemoryOrderStore {
    inner: Mutex<OrderShelf>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of one order by id, outside the trait for test assertions.
    pub fn get(&self, id: &str) -> Option<Order> {
        let shelf = self.inner.lock().expect("order store lock poisoned");
        shelf.orders.iter().find(|o| o.id == id).cloned()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, mut order: Order) -> Result<Order, StorageError> {
        let mut shelf = self.inner.lock().expect("order store lock poisoned");
        shelf.next_id += 1;
        if order.id.is_empty() {
            order.id = format!("ord-{}", shelf.next_id);
        }
        shelf.orders.push(order.clone());
        Ok(order)
    }

    async fn update(&self, id: &str, patch: OrderPatch) -> Result<Order, StorageError> {
        let mut shelf = self.inner.lock().expect("order store lock poisoned");
        let order = shelf
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StorageError::OrderNotFound { id: id.to_string() })?;
        patch.apply_to(order);
        Ok(order.clone())
    }

    async fn find_by_tracking_code(&self, code: &str) -> Result<Option<Order>, StorageError> {
        let shelf = self.inner.lock().expect("order store lock poisoned");
        Ok(shelf.orders.iter().find(|o| o.tracking_code == code).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, StorageError> {
        let shelf = self.inner.lock().expect("order store lock poisoned");
        let mut orders = shelf.orders.clone();
        orders.sort_by(|a, b| b.last_updated_at.cmp(&a.last_updated_at));
        Ok(orders)
    }
}

// ── Action log ───────────────────────────────────────────────────────

/// Append-only audit log kept in memory.
#[derive(Default)]
pub struct MemoryActionLog {
    entries: Mutex<Vec<ActionLogEntry>>,
}

impl MemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ActionLogEntry> {
        self.entries.lock().expect("action log lock poisoned").clone()
    }
}

#[async_trait]
impl ActionLogStore for MemoryActionLog {
    async fn append(&self, entry: ActionLogEntry) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("action log lock poisoned")
            .push(entry);
        Ok(())
    }
}

/// Audit log that rejects every append. Exercises the contract that an
/// audit failure aborts the transition surface.
#[derive(Default)]
pub struct FailingActionLog;

#[async_trait]
impl ActionLogStore for FailingActionLog {
    async fn append(&self, _entry: ActionLogEntry) -> Result<(), StorageError> {
        Err(StorageError::Backend("audit log unavailable".to_string()))
    }
}

// ── Schedule slots ───────────────────────────────────────────────────

#[derive(Default)]
struct SlotShelf {
    slots: Vec<ScheduleSlot>,
    update_calls: usize,
}

/// Schedule store seeded with a fixed set of slots.
#[derive(Default)]
pub struct MemoryScheduleStore {
    inner: Mutex<SlotShelf>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(slots: Vec<ScheduleSlot>) -> Self {
        MemoryScheduleStore {
            inner: Mutex::new(SlotShelf {
                slots,
                update_calls: 0,
            }),
        }
    }

    /// Snapshot of one slot by id, outside the trait for test assertions.
    pub fn slot(&self, id: &str) -> Option<ScheduleSlot> {
        let shelf = self.inner.lock().expect("schedule store lock poisoned");
        shelf.slots.iter().find(|s| s.id == id).cloned()
    }

    /// Number of `update_booking` calls seen so far.
    pub fn update_calls(&self) -> usize {
        self.inner
            .lock()
            .expect("schedule store lock poisoned")
            .update_calls
    }
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    async fn get(&self, id: &str) -> Result<ScheduleSlot, StorageError> {
        let shelf = self.inner.lock().expect("schedule store lock poisoned");
        shelf
            .slots
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StorageError::ScheduleNotFound { id: id.to_string() })
    }

    async fn update_booking(
        &self,
        id: &str,
        booking: ScheduleBooking,
    ) -> Result<ScheduleSlot, StorageError> {
        let mut shelf = self.inner.lock().expect("schedule store lock poisoned");
        shelf.update_calls += 1;
        let slot = shelf
            .slots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StorageError::ScheduleNotFound { id: id.to_string() })?;
        slot.is_booked = booking.is_booked;
        slot.booked_by_order = booking.booked_by_order;
        slot.booked_by_client = booking.booked_by_client;
        Ok(slot.clone())
    }
}

// ── Notifier ─────────────────────────────────────────────────────────

/// Notifier that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push(email.clone());
        Ok(())
    }
}

/// Notifier that fails every dispatch. Exercises the best-effort contract:
/// a failed notification must never fail the transition that triggered it.
#[derive(Default)]
pub struct FailingNotifier {
    attempted: AtomicBool,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dispatch was attempted at all.
    pub fn was_attempted(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_email(&self, _email: &EmailMessage) -> Result<(), NotifyError> {
        self.attempted.store(true, Ordering::SeqCst);
        Err(NotifyError("mail gateway offline".to_string()))
    }
}
