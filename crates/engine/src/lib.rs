//! pista-engine: the order workflow transition engine.
//!
//! Orchestrates stage transitions over the collaborator interfaces from
//! `pista-storage`: applicability check, validation, persistence, audit
//! logging and best-effort notification. One engine instance serves any
//! number of orders; each operation is a single logical unit of work with
//! no internal parallelism and no in-process locking (the store contract
//! is last-write-wins).
//!
//! # Operations
//!
//! - [`WorkflowEngine::create_order`] -- intake of a new order
//! - [`WorkflowEngine::advance`] -- validated stage progression
//! - [`WorkflowEngine::cancel`] -- the cancellation side-exit
//! - [`WorkflowEngine::complete`] / [`WorkflowEngine::submit_evaluation`]
//!   -- the dedicated completion path
//! - [`WorkflowEngine::book_delivery_slot`] -- delivery slot booking

mod advance;
mod booking;
mod cancel;
mod config;
mod error;
mod evaluation;
mod intake;
mod notify;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pista_storage::{ActionLogStore, EmailMessage, Notifier, OrderStore, ScheduleStore};

pub use config::EngineConfig;
pub use error::WorkflowError;
pub use intake::NewOrderRequest;

/// The user performing an operation, as recorded in history and audit
/// entries. `None` at the call sites means the system itself acted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub email: String,
    pub name: String,
}

pub(crate) fn actor_email(actor: Option<&Actor>) -> String {
    actor.map_or_else(|| "system".to_string(), |a| a.email.clone())
}

pub(crate) fn actor_name(actor: Option<&Actor>) -> String {
    actor.map_or_else(|| "Sistema".to_string(), |a| a.name.clone())
}

/// The workflow transition engine.
///
/// Cheap to clone pointers into; hold it behind an `Arc` (or clone the
/// inner `Arc`s) when sharing across request handlers.
pub struct WorkflowEngine {
    pub(crate) orders: Arc<dyn OrderStore>,
    pub(crate) logs: Arc<dyn ActionLogStore>,
    pub(crate) schedules: Arc<dyn ScheduleStore>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) config: EngineConfig,
}

impl WorkflowEngine {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        logs: Arc<dyn ActionLogStore>,
        schedules: Arc<dyn ScheduleStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_config(orders, logs, schedules, notifier, EngineConfig::default())
    }

    pub fn with_config(
        orders: Arc<dyn OrderStore>,
        logs: Arc<dyn ActionLogStore>,
        schedules: Arc<dyn ScheduleStore>,
        notifier: Arc<dyn Notifier>,
        config: EngineConfig,
    ) -> Self {
        WorkflowEngine {
            orders,
            logs,
            schedules,
            notifier,
            config,
        }
    }

    /// Dispatch a notification, swallowing (and logging) any failure. A
    /// failed e-mail must never fail or roll back the transition that
    /// produced it.
    pub(crate) async fn send_best_effort(&self, email: EmailMessage) {
        if let Err(err) = self.notifier.send_email(&email).await {
            tracing::warn!(to = %email.to, error = %err, "notification dispatch failed");
        }
    }
}
