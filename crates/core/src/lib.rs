//! pista-core: vehicle sales order workflow domain core.
//!
//! Pure domain logic for the fulfillment pipeline: the stage catalog, the
//! order model, per-stage readiness validation, variant applicability and
//! the advisory auto-advance resolver. No I/O happens here; everything in
//! this crate is a total function over order data and an explicit `now`.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Stage`] -- the closed, ordered stage catalog
//! - [`Order`] / [`HistoryEntry`] -- the central entity and its transition log
//! - [`Readiness`] / [`validate()`] -- per-stage completion predicates
//! - [`is_applicable()`] / [`next_applicable_stage()`] -- variant applicability
//! - [`next_auto_stage()`] -- advisory next-stage resolution
//! - [`generate_tracking_code()`] -- `VEH-XXXXXXXX` code generator

pub mod applicability;
pub mod auto_advance;
pub mod order;
pub mod stage;
pub mod timestamp;
pub mod tracking;
pub mod trade_in;
pub mod validate;

// ── Convenience re-exports ───────────────────────────────────────────

pub use applicability::{is_applicable, next_applicable_stage};
pub use auto_advance::next_auto_stage;
pub use order::{
    ClientType, FinancingKind, FinancingStatus, HistoryEntry, Order, OrderKind, PaymentMethod,
    PaymentStatus, TradeInKinship,
};
pub use stage::{Stage, UnknownStageError};
pub use tracking::generate_tracking_code;
pub use validate::{validate, Readiness};
