//! The stage catalog: the closed, ordered set of fulfillment stages.
//!
//! The catalog order is the canonical progression sequence; "next applicable
//! stage" is a linear scan forward from the current position. `cancelled` is
//! a side-exit, not a point on the line, and is skipped by forward scans
//! (see [`crate::applicability::next_applicable_stage`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A stage id that is not part of the catalog.
///
/// Only reachable at the string boundary (`FromStr` / serde); once a value
/// is a [`Stage`], every match over it is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage id: {id}")]
pub struct UnknownStageError {
    pub id: String,
}

/// One stage of the fulfillment pipeline.
///
/// Serde ids are the kebab-case stage ids (`"internal-financing-review"`,
/// `"factory-documentation"`, ...). Variant order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Created,
    InternalFinancingReview,
    FactoryDocumentation,
    FactoryOrdered,
    FactoryInvoiced,
    ClientDocumentation,
    Invoice,
    Payment,
    Registration,
    Scheduling,
    Yard,
    Delivery,
    Evaluation,
    Completed,
    Cancelled,
}

impl Stage {
    /// All stages in canonical progression order.
    pub const CATALOG: [Stage; 15] = [
        Stage::Created,
        Stage::InternalFinancingReview,
        Stage::FactoryDocumentation,
        Stage::FactoryOrdered,
        Stage::FactoryInvoiced,
        Stage::ClientDocumentation,
        Stage::Invoice,
        Stage::Payment,
        Stage::Registration,
        Stage::Scheduling,
        Stage::Yard,
        Stage::Delivery,
        Stage::Evaluation,
        Stage::Completed,
        Stage::Cancelled,
    ];

    /// The stable string id, also the serde form.
    pub fn id(self) -> &'static str {
        match self {
            Stage::Created => "created",
            Stage::InternalFinancingReview => "internal-financing-review",
            Stage::FactoryDocumentation => "factory-documentation",
            Stage::FactoryOrdered => "factory-ordered",
            Stage::FactoryInvoiced => "factory-invoiced",
            Stage::ClientDocumentation => "client-documentation",
            Stage::Invoice => "invoice",
            Stage::Payment => "payment",
            Stage::Registration => "registration",
            Stage::Scheduling => "scheduling",
            Stage::Yard => "yard",
            Stage::Delivery => "delivery",
            Stage::Evaluation => "evaluation",
            Stage::Completed => "completed",
            Stage::Cancelled => "cancelled",
        }
    }

    /// Public-facing display name, as shown to clients on the tracking page.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Created => "Pedido Criado",
            Stage::InternalFinancingReview => "Financiamento em Análise",
            Stage::FactoryDocumentation => "Fábrica - Documentação",
            Stage::FactoryOrdered => "Fábrica - Encomendado",
            Stage::FactoryInvoiced => "Fábrica - Faturado",
            Stage::ClientDocumentation => "Documentação",
            Stage::Invoice => "Nota Fiscal",
            Stage::Payment => "Pagamento",
            Stage::Registration => "Emplacamento",
            Stage::Scheduling => "Agendamento",
            Stage::Yard => "Pátio",
            Stage::Delivery => "Entrega",
            Stage::Evaluation => "Avaliação",
            Stage::Completed => "Concluído",
            Stage::Cancelled => "Cancelado",
        }
    }

    /// Display icon for timeline/dashboard collaborators.
    pub fn icon(self) -> &'static str {
        match self {
            Stage::Created => "📋",
            Stage::InternalFinancingReview => "🏦",
            Stage::FactoryDocumentation => "📄",
            Stage::FactoryOrdered => "🏭",
            Stage::FactoryInvoiced => "🚚",
            Stage::ClientDocumentation => "📄",
            Stage::Invoice => "🧾",
            Stage::Payment => "💳",
            Stage::Registration => "🔧",
            Stage::Scheduling => "📅",
            Stage::Yard => "🅿️",
            Stage::Delivery => "🚗",
            Stage::Evaluation => "⭐",
            Stage::Completed => "✅",
            Stage::Cancelled => "❌",
        }
    }

    /// Index of this stage in [`Stage::CATALOG`].
    ///
    /// Variant declaration order IS catalog order, so the discriminant is
    /// the position.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Terminal stages have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Cancelled)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Created
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Stage {
    type Err = UnknownStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::CATALOG
            .iter()
            .copied()
            .find(|stage| stage.id() == s)
            .ok_or_else(|| UnknownStageError { id: s.to_string() })
    }
}
