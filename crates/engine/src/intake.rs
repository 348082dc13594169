//! Order intake: validation and assembly of a new order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pista_core::timestamp::now_rfc3339;
use pista_core::trade_in::{check_intake, requires_manager_approval, TradeInIntake};
use pista_core::{
    generate_tracking_code, ClientType, FinancingKind, FinancingStatus, Order, OrderKind,
    PaymentMethod, Readiness, Stage, TradeInKinship,
};
use pista_storage::ActionLogEntry;

use crate::{actor_email, actor_name, notify, Actor, WorkflowError};

/// Everything the intake form collects for a new order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewOrderRequest {
    pub order_type: OrderKind,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_cpf: Option<String>,
    pub client_type: ClientType,
    pub vehicle_model: String,
    pub vehicle_color: String,
    pub vehicle_year: Option<String>,
    pub payment_method: PaymentMethod,
    pub financiamento_tipo: Option<FinancingKind>,
    pub financiamento_valor_total: Option<Decimal>,
    pub financiamento_entrada: Option<Decimal>,
    pub financiamento_parcelas: Option<u32>,
    pub has_entrada: bool,
    pub entrada_valor: Option<Decimal>,
    pub has_trade_in: bool,
    pub trade_in_plate: Option<String>,
    pub trade_in_owner_is_buyer: Option<bool>,
    pub trade_in_has_bonus: Option<bool>,
    pub trade_in_parentesco_type: Option<TradeInKinship>,
    pub trade_in_no_recent_transfer: bool,
}

fn validate_request(request: &NewOrderRequest) -> Result<(), WorkflowError> {
    if request.client_name.is_empty()
        || request.client_email.is_empty()
        || request.client_phone.is_empty()
    {
        return Err(WorkflowError::Intake {
            reason: "Preencha nome, e-mail e telefone do cliente",
        });
    }
    if !request.client_email.contains('@') {
        return Err(WorkflowError::Intake {
            reason: "E-mail inválido",
        });
    }
    if request.vehicle_model.is_empty() || request.vehicle_color.is_empty() {
        return Err(WorkflowError::Intake {
            reason: "Preencha o modelo e a cor do veículo",
        });
    }
    if request.has_trade_in {
        let intake = TradeInIntake {
            plate: request.trade_in_plate.as_deref(),
            owner_is_buyer: request.trade_in_owner_is_buyer,
            has_bonus: request.trade_in_has_bonus,
            kinship: request.trade_in_parentesco_type,
            no_recent_transfer: request.trade_in_no_recent_transfer,
        };
        if let Readiness::NotReady { reason } = check_intake(intake) {
            return Err(WorkflowError::Intake { reason });
        }
    }
    Ok(())
}

impl crate::WorkflowEngine {
    /// Validate the intake data, assemble and persist a new order.
    ///
    /// The order starts at the `created` stage with a fresh tracking code
    /// and an empty history; the manager approval flag is derived here,
    /// never trusted from the request. When approval is required the
    /// manager is alerted by e-mail (best effort).
    pub async fn create_order(
        &self,
        request: NewOrderRequest,
        actor: Option<&Actor>,
    ) -> Result<Order, WorkflowError> {
        validate_request(&request)?;

        let timestamp = now_rfc3339();
        let internal_financing = request.payment_method == PaymentMethod::Financing
            && request.financiamento_tipo == Some(FinancingKind::Internal);
        let requires_approval = request.has_trade_in
            && requires_manager_approval(
                request.trade_in_owner_is_buyer,
                request.trade_in_has_bonus,
            );

        let order = Order {
            id: String::new(),
            tracking_code: generate_tracking_code(),
            order_type: request.order_type,
            client_type: request.client_type,
            payment_method: request.payment_method,
            financiamento_tipo: request.financiamento_tipo,
            client_name: request.client_name,
            client_email: Some(request.client_email),
            client_phone: Some(request.client_phone),
            client_cpf: request.client_cpf,
            vehicle_model: request.vehicle_model,
            vehicle_color: Some(request.vehicle_color),
            vehicle_year: request.vehicle_year,
            financiamento_status: internal_financing.then_some(FinancingStatus::Pending),
            financiamento_valor_total: request.financiamento_valor_total,
            financiamento_entrada: request.financiamento_entrada,
            financiamento_parcelas: request.financiamento_parcelas,
            has_entrada: request.has_entrada,
            entrada_valor: request.entrada_valor,
            has_trade_in: request.has_trade_in,
            trade_in_plate: request.trade_in_plate,
            trade_in_owner_is_buyer: request.trade_in_owner_is_buyer,
            trade_in_has_bonus: request.trade_in_has_bonus,
            trade_in_parentesco_type: request.trade_in_parentesco_type,
            trade_in_no_recent_transfer: request.trade_in_no_recent_transfer,
            trade_in_requires_manager_approval: requires_approval,
            current_status: Stage::Created,
            status_publico: Stage::Created.label().to_string(),
            last_updated_at: Some(timestamp),
            last_updated_by: Some(actor_email(actor)),
            ..Order::default()
        };

        let created = self.orders.create(order).await?;

        self.logs
            .append(ActionLogEntry {
                order_id: created.id.clone(),
                tracking_code: created.tracking_code.clone(),
                action: "Pedido criado".to_string(),
                actor_email: actor_email(actor),
                actor_name: actor_name(actor),
                details: serde_json::json!({
                    "client_name": created.client_name,
                    "vehicle": created.vehicle_model,
                    "order_type": created.order_type,
                }),
            })
            .await?;

        if created.trade_in_requires_manager_approval {
            let email = notify::manager_approval_notification(&created, &self.config);
            self.send_best_effort(email).await;
        }

        Ok(created)
    }
}
