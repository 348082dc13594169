//! pista-storage: collaborator interfaces for the workflow engine.
//!
//! The engine never talks to a database, mail gateway or scheduling backend
//! directly; it goes through the traits defined here. Real deployments plug
//! in their own backends; the [`memory`] module ships reference
//! implementations that double as the test harness.

mod error;
mod record;
mod traits;

pub mod memory;

pub use error::{NotifyError, StorageError};
pub use record::{
    ActionLogEntry, EmailMessage, OrderPatch, ScheduleBooking, ScheduleSlot,
};
pub use traits::{ActionLogStore, Notifier, OrderStore, ScheduleStore};
