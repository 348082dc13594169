//! Notification catalog.
//!
//! One template per client-visible milestone. Stages without a template
//! (and orders without a client e-mail) produce no message at all.

use pista_core::{Order, Stage};
use pista_storage::EmailMessage;

use crate::EngineConfig;

fn client_email(order: &Order) -> Option<String> {
    order.client_email.clone().filter(|e| !e.is_empty())
}

/// The stage-change e-mail for `stage`, or `None` when that stage has no
/// client-facing notification.
pub(crate) fn stage_notification(
    order: &Order,
    stage: Stage,
    base_url: &str,
) -> Option<EmailMessage> {
    let to = client_email(order)?;
    let (subject, body) = match stage {
        Stage::Created => (
            "✅ Pedido Confirmado",
            format!(
                "Olá {},\n\nSeu pedido foi confirmado!\n\nVeículo: {}\nCódigo: {}\n\nAcompanhe: {}/tracking?code={}",
                order.client_name,
                order.vehicle_model,
                order.tracking_code,
                base_url,
                order.tracking_code,
            ),
        ),
        Stage::Invoice => (
            "📄 Nota Fiscal Emitida",
            format!(
                "Olá {},\n\nA nota fiscal foi emitida!\n\nNúmero: {}\nChave: {}",
                order.client_name,
                order.nf_numero.as_deref().unwrap_or("-"),
                order.nf_chave_acesso.as_deref().unwrap_or("-"),
            ),
        ),
        Stage::Payment => (
            "✅ Pagamento Confirmado",
            format!(
                "Olá {},\n\nSeu pagamento foi confirmado!\n\nAcompanhe: {}/tracking?code={}",
                order.client_name, base_url, order.tracking_code,
            ),
        ),
        Stage::Scheduling => (
            "🎉 Veículo Pronto!",
            format!(
                "Olá {},\n\nSeu {} está pronto!\n\nAgende: {}/pedido?code={}",
                order.client_name, order.vehicle_model, base_url, order.tracking_code,
            ),
        ),
        Stage::Yard => (
            "📅 Entrega Agendada",
            format!(
                "Olá {},\n\nSua entrega foi agendada!\n\nData: {}\nHorário: {}",
                order.client_name,
                order.scheduled_date.as_deref().unwrap_or("-"),
                order.scheduled_time.as_deref().unwrap_or("-"),
            ),
        ),
        Stage::Delivery => (
            "🚗 Entrega Realizada",
            format!(
                "Olá {},\n\nParabéns! Seu veículo foi entregue!\n\nAvalie: {}/avaliacao?code={}",
                order.client_name, base_url, order.tracking_code,
            ),
        ),
        _ => return None,
    };
    Some(EmailMessage {
        to,
        subject: subject.to_string(),
        body,
    })
}

/// The cancellation e-mail, when the order has a client e-mail.
pub(crate) fn cancellation_notification(order: &Order, reason: &str) -> Option<EmailMessage> {
    let to = client_email(order)?;
    Some(EmailMessage {
        to,
        subject: "❌ Pedido Cancelado".to_string(),
        body: format!(
            "Olá {},\n\nSeu pedido foi cancelado.\n\nMotivo: {}\nCódigo: {}",
            order.client_name, reason, order.tracking_code,
        ),
    })
}

/// Urgent manager alert for a trade-in that needs approval.
pub(crate) fn manager_approval_notification(order: &Order, config: &EngineConfig) -> EmailMessage {
    let kinship = order.trade_in_parentesco_type.map_or("-", |k| k.id());
    EmailMessage {
        to: config.manager_email.clone(),
        subject: "🚨 URGENTE: Aprovação de Trade-In Necessária".to_string(),
        body: format!(
            "Olá Gerente,\n\nUm novo pedido requer sua aprovação urgente:\n\n\
             🚗 Pedido: {}\n👤 Cliente: {}\n🚙 Veículo: {}\n\n\
             ⚠️ MOTIVO: Veículo usado com bônus em nome de terceiro\n\n\
             📋 Parentesco: {}\n🚗 Placa usado: {}\n\n\
             Acompanhe: {}/orderdetails?id={}",
            order.tracking_code,
            order.client_name,
            order.vehicle_model,
            kinship,
            order.trade_in_plate.as_deref().unwrap_or("-"),
            config.public_base_url,
            order.id,
        ),
    }
}
