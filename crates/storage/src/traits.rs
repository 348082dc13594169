use async_trait::async_trait;

use pista_core::Order;

use crate::error::{NotifyError, StorageError};
use crate::record::{ActionLogEntry, EmailMessage, OrderPatch, ScheduleBooking, ScheduleSlot};

/// Persistence for orders.
///
/// ## Concurrency contract
///
/// `update` is last-write-wins: no optimistic-concurrency token travels
/// with the patch, and two concurrent transitions on the same order race at
/// the store with the later write winning. Callers wanting stronger
/// guarantees must serialize transitions per order themselves.
///
/// ## Thread safety
///
/// Implementations must be `Send + Sync + 'static` so the engine can be
/// shared across async task boundaries.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Persist a new order. Id assignment belongs to the store; the order
    /// arrives with an empty `id` and the returned order carries the
    /// assigned one.
    async fn create(&self, order: Order) -> Result<Order, StorageError>;

    /// Apply a partial update and return the resulting order.
    ///
    /// Returns `Err(StorageError::OrderNotFound)` for an unknown id.
    async fn update(&self, id: &str, patch: OrderPatch) -> Result<Order, StorageError>;

    /// Look an order up by its public tracking code.
    async fn find_by_tracking_code(&self, code: &str) -> Result<Option<Order>, StorageError>;

    /// All orders, most recently updated first.
    async fn list(&self) -> Result<Vec<Order>, StorageError>;
}

/// Append-only audit log.
#[async_trait]
pub trait ActionLogStore: Send + Sync + 'static {
    async fn append(&self, entry: ActionLogEntry) -> Result<(), StorageError>;
}

/// Delivery schedule slots.
#[async_trait]
pub trait ScheduleStore: Send + Sync + 'static {
    /// Returns `Err(StorageError::ScheduleNotFound)` for an unknown id.
    async fn get(&self, id: &str) -> Result<ScheduleSlot, StorageError>;

    /// Overwrite a slot's booking state and return the resulting slot.
    async fn update_booking(
        &self,
        id: &str,
        booking: ScheduleBooking,
    ) -> Result<ScheduleSlot, StorageError>;
}

/// Outbound notification gateway.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotifyError>;
}
