//! The order entity and its classification enums.
//!
//! Field names follow the persisted document shape of the external order
//! store (mixed English/Portuguese domain vocabulary); timestamps are
//! RFC 3339 strings, dates are `YYYY-MM-DD` strings, monetary amounts are
//! [`Decimal`]. Every flag defaults to the "not yet" state so partial
//! documents deserialize cleanly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Stock vs factory-ordered vehicle. Immutable after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    #[default]
    #[serde(rename = "pedido_estoque")]
    Stock,
    #[serde(rename = "pedido_fabrica")]
    Factory,
}

/// Client legal type. Immutable after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientType {
    /// Pessoa física (individual).
    #[default]
    #[serde(rename = "pf")]
    Individual,
    /// Pessoa jurídica (business).
    #[serde(rename = "pj")]
    Business,
}

/// Payment method. Immutable after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "boleto")]
    BankSlip,
    #[serde(rename = "financiamento")]
    Financing,
    #[serde(rename = "vista")]
    Cash,
}

/// Where the payment stands, as maintained by the finance desk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "aguardando")]
    Awaiting,
    #[serde(rename = "pago")]
    Paid,
    #[serde(rename = "liberado")]
    Released,
}

/// Financing handled in-house or by an external bank. Only meaningful when
/// the payment method is [`PaymentMethod::Financing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancingKind {
    #[serde(rename = "interno")]
    Internal,
    #[serde(rename = "externo")]
    External,
}

/// Review state of an internal financing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancingStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em_analise")]
    UnderReview,
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "recusado")]
    Rejected,
}

/// The closed set of kinship ties accepted for a trade-in vehicle held in a
/// third party's name. Anything outside this set is not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeInKinship {
    #[serde(rename = "conjuge")]
    Spouse,
    #[serde(rename = "uniao_estavel")]
    CivilUnion,
    #[serde(rename = "pai_mae")]
    Parent,
    #[serde(rename = "filho")]
    Child,
}

impl TradeInKinship {
    /// The stable string id, also the serde form.
    pub fn id(self) -> &'static str {
        match self {
            TradeInKinship::Spouse => "conjuge",
            TradeInKinship::CivilUnion => "uniao_estavel",
            TradeInKinship::Parent => "pai_mae",
            TradeInKinship::Child => "filho",
        }
    }
}

/// One entry of the append-only transition history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub status: Stage,
    /// RFC 3339 timestamp string.
    pub timestamp: String,
    /// E-mail of the acting user, or `"system"`.
    pub user: String,
    /// The current stage at the time this entry was appended.
    pub from: Stage,
    /// Populated only by cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// The central order entity.
///
/// Owned exclusively by the workflow engine while a transition is in
/// progress; concurrent writers are serialized (at most last-write-wins)
/// by the external store, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    // ── Identity ─────────────────────────────────────────────────────
    /// Store-assigned id. Empty until the store has seen the order.
    pub id: String,
    /// `VEH-XXXXXXXX`, immutable and unique once assigned at creation.
    pub tracking_code: String,

    // ── Classification (immutable after creation) ────────────────────
    pub order_type: OrderKind,
    pub client_type: ClientType,
    pub payment_method: PaymentMethod,
    pub financiamento_tipo: Option<FinancingKind>,

    // ── Client ───────────────────────────────────────────────────────
    pub client_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_cpf: Option<String>,

    // ── Vehicle ──────────────────────────────────────────────────────
    pub vehicle_model: String,
    pub vehicle_color: Option<String>,
    pub vehicle_year: Option<String>,
    pub vehicle_plate: Option<String>,

    // ── Payment ──────────────────────────────────────────────────────
    pub payment_status: PaymentStatus,
    pub financiamento_status: Option<FinancingStatus>,
    pub financiamento_valor_total: Option<Decimal>,
    pub financiamento_entrada: Option<Decimal>,
    pub financiamento_parcelas: Option<u32>,
    pub financiamento_pago: bool,
    pub has_entrada: bool,
    pub entrada_valor: Option<Decimal>,
    pub entrada_recebida: bool,
    pub comprovante_banco_recebido: bool,
    pub pagamento_total_confirmado: bool,

    // ── Documents: individual ────────────────────────────────────────
    pub docs_rg: bool,
    pub docs_cnh: bool,
    pub docs_cpf: bool,
    pub docs_comprovante_residencia: bool,

    // ── Documents: business ──────────────────────────────────────────
    pub docs_contrato_social: bool,
    pub docs_cnpj: bool,

    // ── Documents: general (required for every order) ────────────────
    pub docs_coaf_montadora: bool,
    pub docs_coaf_concessionaria: bool,
    pub docs_sinal: bool,
    pub docs_recibo: bool,
    pub docs_registro_sistema: bool,

    // ── Documents: trade-in vehicle ──────────────────────────────────
    pub docs_laudo_cautelar: bool,
    pub docs_pesquisa_multas: bool,
    pub docs_dut_separado: bool,

    // ── Factory track ────────────────────────────────────────────────
    pub fabrica_data_pedido: Option<String>,
    pub fabrica_nf_montadora: Option<String>,
    pub fabrica_data_faturamento: Option<String>,

    // ── Invoice ──────────────────────────────────────────────────────
    pub nf_emitida: bool,
    pub nf_numero: Option<String>,
    pub nf_chave_acesso: Option<String>,
    pub nf_data_emissao: Option<String>,

    // ── Registration ─────────────────────────────────────────────────
    pub emplacamento_concluido: bool,

    // ── Scheduling ───────────────────────────────────────────────────
    pub delivery_scheduling_released: bool,
    /// `YYYY-MM-DD`, possibly with a trailing `T...` part from the store.
    pub scheduled_date: Option<String>,
    pub scheduled_time: Option<String>,
    /// Schedule slot held by this order; released on cancellation.
    pub previous_schedule_id: Option<String>,

    // ── Delivery ─────────────────────────────────────────────────────
    pub entrega_confirmada: bool,
    pub chave_reserva_entregue: bool,
    pub manual_entregue: bool,

    // ── Evaluation ───────────────────────────────────────────────────
    /// Star rating, 1-5 when present.
    pub avaliacao_estrelas: Option<u8>,
    pub avaliacao_comentario: Option<String>,
    /// RFC 3339 submission timestamp.
    pub avaliacao_data: Option<String>,
    /// RFC 3339 response deadline, stamped on entering the evaluation stage.
    pub avaliacao_prazo_limite: Option<String>,

    // ── Trade-in ─────────────────────────────────────────────────────
    pub has_trade_in: bool,
    pub trade_in_plate: Option<String>,
    pub trade_in_owner_is_buyer: Option<bool>,
    pub trade_in_has_bonus: Option<bool>,
    pub trade_in_parentesco_type: Option<TradeInKinship>,
    pub trade_in_no_recent_transfer: bool,
    pub trade_in_requires_manager_approval: bool,

    // ── Workflow state ───────────────────────────────────────────────
    pub current_status: Stage,
    /// Public-facing label, derived from the catalog on each transition.
    pub status_publico: String,
    pub status_history: Vec<HistoryEntry>,

    // ── Cancellation ─────────────────────────────────────────────────
    pub cancel_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub cancelled_by: Option<String>,

    // ── Bookkeeping ──────────────────────────────────────────────────
    pub last_updated_at: Option<String>,
    pub last_updated_by: Option<String>,
}

impl Order {
    /// True when the order uses in-house financing (the variant that routes
    /// through the internal financing review stage).
    pub fn is_internal_financing(&self) -> bool {
        self.payment_method == PaymentMethod::Financing
            && self.financiamento_tipo == Some(FinancingKind::Internal)
    }
}
