//! Per-stage readiness validation.
//!
//! One predicate per stage, total over [`Stage`]. Validators answer whether
//! the order's recorded data is sufficient to consider the target stage
//! complete; they never perform I/O and take `now` explicitly so the
//! date-sensitive predicates stay pure.
//!
//! Validators return [`Readiness`], not errors: "not ready" is an expected,
//! frequent answer, and the auto-advance resolver branches on it directly.
//! Checks short-circuit on the first failing condition, so the reason
//! always names the first missing requirement in checklist order.

use time::OffsetDateTime;

use crate::order::{ClientType, Order, PaymentMethod, PaymentStatus};
use crate::stage::Stage;
use crate::timestamp::parse_date_part;

/// Outcome of a stage validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady {
        /// Operator-facing reason naming the first missing requirement.
        reason: &'static str,
    },
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }

    fn not_ready(reason: &'static str) -> Self {
        Readiness::NotReady { reason }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Validate the order's data against the completion criteria of `stage`.
pub fn validate(stage: Stage, order: &Order, now: OffsetDateTime) -> Readiness {
    match stage {
        Stage::Created | Stage::InternalFinancingReview | Stage::Evaluation => Readiness::Ready,

        Stage::FactoryDocumentation | Stage::ClientDocumentation => documents_complete(order),

        Stage::FactoryOrdered => {
            if !present(&order.fabrica_data_pedido) {
                return Readiness::not_ready("Data do pedido na montadora não informada");
            }
            Readiness::Ready
        }

        Stage::FactoryInvoiced => {
            if !present(&order.fabrica_nf_montadora) || !present(&order.fabrica_data_faturamento) {
                return Readiness::not_ready("Dados de faturamento da montadora incompletos");
            }
            Readiness::Ready
        }

        Stage::Invoice => {
            if !order.nf_emitida {
                return Readiness::not_ready("Nota fiscal não foi emitida");
            }
            if !present(&order.nf_numero)
                || !present(&order.nf_chave_acesso)
                || !present(&order.nf_data_emissao)
            {
                return Readiness::not_ready("Dados da nota fiscal incompletos");
            }
            Readiness::Ready
        }

        Stage::Payment => {
            let paid = matches!(
                order.payment_status,
                PaymentStatus::Paid | PaymentStatus::Released
            );
            if !paid {
                return Readiness::not_ready("Pagamento ainda não foi confirmado");
            }
            if order.payment_method == PaymentMethod::Pix && !order.comprovante_banco_recebido {
                return Readiness::not_ready("Comprovante de pagamento PIX não foi recebido");
            }
            if order.payment_method == PaymentMethod::Financing && !order.financiamento_pago {
                return Readiness::not_ready("Pagamento do financiamento não foi confirmado");
            }
            if order.has_entrada && !order.entrada_recebida {
                return Readiness::not_ready("Entrada não foi recebida");
            }
            if !order.pagamento_total_confirmado {
                return Readiness::not_ready(
                    "Pagamento total ainda não foi confirmado pelo setor financeiro",
                );
            }
            Readiness::Ready
        }

        Stage::Registration => {
            if !order.emplacamento_concluido {
                return Readiness::not_ready("Emplacamento ainda não foi concluído");
            }
            let Some(plate) = order.vehicle_plate.as_deref().filter(|p| !p.is_empty()) else {
                return Readiness::not_ready("Placa do veículo não foi informada");
            };
            if !is_valid_plate(plate) {
                return Readiness::not_ready("Formato de placa inválido. Use ABC1234 ou ABC1D23");
            }
            Readiness::Ready
        }

        Stage::Scheduling => {
            if !present(&order.scheduled_date) || !present(&order.scheduled_time) {
                return Readiness::not_ready("Entrega ainda não foi agendada");
            }
            let Some(scheduled) = order.scheduled_date.as_deref().and_then(parse_date_part)
            else {
                return Readiness::not_ready("Data agendada inválida");
            };
            if scheduled < now.date() {
                return Readiness::not_ready(
                    "Data agendada está no passado. É necessário reagendar.",
                );
            }
            Readiness::Ready
        }

        Stage::Yard => {
            if !present(&order.scheduled_date) {
                return Readiness::not_ready("Não há data de entrega agendada");
            }
            Readiness::Ready
        }

        Stage::Delivery => {
            if !order.entrega_confirmada {
                return Readiness::not_ready("Entrega ainda não foi confirmada");
            }
            Readiness::Ready
        }

        // Terminal stages are reachable only through the dedicated
        // completion/cancellation paths, never via generic validation.
        Stage::Completed => {
            Readiness::not_ready("Conclusão ocorre apenas pelo fluxo de avaliação")
        }
        Stage::Cancelled => {
            Readiness::not_ready("Cancelamento ocorre apenas pelo fluxo de cancelamento")
        }
    }
}

/// Document checklist shared by the factory and client documentation stages.
fn documents_complete(order: &Order) -> Readiness {
    match order.client_type {
        ClientType::Individual => {
            if !order.docs_rg && !order.docs_cnh {
                return Readiness::not_ready("Envie RG ou CNH");
            }
            if !order.docs_cpf || !order.docs_comprovante_residencia {
                return Readiness::not_ready("Documentos de pessoa física incompletos");
            }
        }
        ClientType::Business => {
            if !order.docs_contrato_social || !order.docs_cnpj {
                return Readiness::not_ready("Documentos de pessoa jurídica incompletos");
            }
        }
    }

    if !order.docs_coaf_montadora
        || !order.docs_coaf_concessionaria
        || !order.docs_sinal
        || !order.docs_recibo
        || !order.docs_registro_sistema
    {
        return Readiness::not_ready("Documentos gerais incompletos");
    }

    if order.has_trade_in
        && (!order.docs_laudo_cautelar || !order.docs_pesquisa_multas || !order.docs_dut_separado)
    {
        return Readiness::not_ready("Documentos do usado incompletos");
    }

    Readiness::Ready
}

/// Mercosul-era plate check: three letters (I, O and Q excluded) followed by
/// either four digits (legacy `ABC1234`) or digit, letter, two digits
/// (`ABC1D23`). Case-insensitive, no separator.
pub fn is_valid_plate(plate: &str) -> bool {
    fn plate_letter(c: u8) -> bool {
        c.is_ascii_uppercase() && !matches!(c, b'I' | b'O' | b'Q')
    }

    let upper = plate.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if bytes.len() != 7 {
        return false;
    }
    if !bytes[..3].iter().all(|&c| plate_letter(c)) {
        return false;
    }
    let legacy = bytes[3..].iter().all(|c| c.is_ascii_digit());
    let mercosul = bytes[3].is_ascii_digit()
        && plate_letter(bytes[4])
        && bytes[5].is_ascii_digit()
        && bytes[6].is_ascii_digit();
    legacy || mercosul
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::FinancingKind;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-06-10 12:00:00 UTC);

    fn reason(readiness: Readiness) -> &'static str {
        match readiness {
            Readiness::Ready => panic!("expected NotReady"),
            Readiness::NotReady { reason } => reason,
        }
    }

    fn order_with_general_docs() -> Order {
        Order {
            docs_coaf_montadora: true,
            docs_coaf_concessionaria: true,
            docs_sinal: true,
            docs_recibo: true,
            docs_registro_sistema: true,
            ..Order::default()
        }
    }

    #[test]
    fn trivial_stages_are_always_ready() {
        let order = Order::default();
        for stage in [Stage::Created, Stage::InternalFinancingReview, Stage::Evaluation] {
            assert!(validate(stage, &order, NOW).is_ready());
        }
    }

    #[test]
    fn terminal_stages_never_validate() {
        let order = Order::default();
        assert!(!validate(Stage::Completed, &order, NOW).is_ready());
        assert!(!validate(Stage::Cancelled, &order, NOW).is_ready());
    }

    #[test]
    fn individual_needs_rg_or_cnh_then_cpf_and_residence() {
        let mut order = order_with_general_docs();
        assert_eq!(
            reason(validate(Stage::ClientDocumentation, &order, NOW)),
            "Envie RG ou CNH"
        );
        order.docs_cnh = true;
        assert_eq!(
            reason(validate(Stage::ClientDocumentation, &order, NOW)),
            "Documentos de pessoa física incompletos"
        );
        order.docs_cpf = true;
        order.docs_comprovante_residencia = true;
        assert!(validate(Stage::ClientDocumentation, &order, NOW).is_ready());
    }

    #[test]
    fn business_needs_charter_and_tax_id() {
        let mut order = Order {
            client_type: ClientType::Business,
            ..order_with_general_docs()
        };
        assert_eq!(
            reason(validate(Stage::ClientDocumentation, &order, NOW)),
            "Documentos de pessoa jurídica incompletos"
        );
        order.docs_contrato_social = true;
        order.docs_cnpj = true;
        assert!(validate(Stage::ClientDocumentation, &order, NOW).is_ready());
    }

    #[test]
    fn missing_general_documents_block_documentation() {
        let order = Order {
            docs_cnh: true,
            docs_cpf: true,
            docs_comprovante_residencia: true,
            ..Order::default()
        };
        assert_eq!(
            reason(validate(Stage::ClientDocumentation, &order, NOW)),
            "Documentos gerais incompletos"
        );
    }

    #[test]
    fn trade_in_documents_required_only_when_trade_in_present() {
        let mut order = Order {
            docs_cnh: true,
            docs_cpf: true,
            docs_comprovante_residencia: true,
            ..order_with_general_docs()
        };
        assert!(validate(Stage::ClientDocumentation, &order, NOW).is_ready());
        order.has_trade_in = true;
        assert_eq!(
            reason(validate(Stage::ClientDocumentation, &order, NOW)),
            "Documentos do usado incompletos"
        );
        order.docs_laudo_cautelar = true;
        order.docs_pesquisa_multas = true;
        order.docs_dut_separado = true;
        assert!(validate(Stage::ClientDocumentation, &order, NOW).is_ready());
    }

    #[test]
    fn factory_stages_require_manufacturer_data() {
        let mut order = Order::default();
        assert!(!validate(Stage::FactoryOrdered, &order, NOW).is_ready());
        order.fabrica_data_pedido = Some("2026-05-01".into());
        assert!(validate(Stage::FactoryOrdered, &order, NOW).is_ready());

        assert!(!validate(Stage::FactoryInvoiced, &order, NOW).is_ready());
        order.fabrica_nf_montadora = Some("55123".into());
        order.fabrica_data_faturamento = Some("2026-06-01".into());
        assert!(validate(Stage::FactoryInvoiced, &order, NOW).is_ready());
    }

    #[test]
    fn invoice_requires_issue_flag_then_all_fields() {
        let mut order = Order::default();
        assert_eq!(
            reason(validate(Stage::Invoice, &order, NOW)),
            "Nota fiscal não foi emitida"
        );
        order.nf_emitida = true;
        order.nf_numero = Some("000123456".into());
        assert_eq!(
            reason(validate(Stage::Invoice, &order, NOW)),
            "Dados da nota fiscal incompletos"
        );
        order.nf_chave_acesso = Some("3526-chave".into());
        order.nf_data_emissao = Some("2026-06-01".into());
        assert!(validate(Stage::Invoice, &order, NOW).is_ready());
    }

    #[test]
    fn payment_checks_run_in_checklist_order() {
        let mut order = Order {
            payment_method: PaymentMethod::Pix,
            ..Order::default()
        };
        assert_eq!(
            reason(validate(Stage::Payment, &order, NOW)),
            "Pagamento ainda não foi confirmado"
        );
        order.payment_status = PaymentStatus::Paid;
        assert_eq!(
            reason(validate(Stage::Payment, &order, NOW)),
            "Comprovante de pagamento PIX não foi recebido"
        );
        order.comprovante_banco_recebido = true;
        assert_eq!(
            reason(validate(Stage::Payment, &order, NOW)),
            "Pagamento total ainda não foi confirmado pelo setor financeiro"
        );
        order.pagamento_total_confirmado = true;
        assert!(validate(Stage::Payment, &order, NOW).is_ready());
    }

    #[test]
    fn financing_payment_requires_financing_settled() {
        let order = Order {
            payment_method: PaymentMethod::Financing,
            financiamento_tipo: Some(FinancingKind::External),
            payment_status: PaymentStatus::Released,
            pagamento_total_confirmado: true,
            ..Order::default()
        };
        assert_eq!(
            reason(validate(Stage::Payment, &order, NOW)),
            "Pagamento do financiamento não foi confirmado"
        );
    }

    #[test]
    fn down_payment_must_be_received_when_present() {
        let mut order = Order {
            payment_method: PaymentMethod::Cash,
            payment_status: PaymentStatus::Paid,
            has_entrada: true,
            pagamento_total_confirmado: true,
            ..Order::default()
        };
        assert_eq!(
            reason(validate(Stage::Payment, &order, NOW)),
            "Entrada não foi recebida"
        );
        order.entrada_recebida = true;
        assert!(validate(Stage::Payment, &order, NOW).is_ready());
    }

    #[test]
    fn registration_validates_plate_format() {
        let mut order = Order {
            emplacamento_concluido: true,
            ..Order::default()
        };
        assert_eq!(
            reason(validate(Stage::Registration, &order, NOW)),
            "Placa do veículo não foi informada"
        );
        order.vehicle_plate = Some("ABI1234".into());
        assert_eq!(
            reason(validate(Stage::Registration, &order, NOW)),
            "Formato de placa inválido. Use ABC1234 ou ABC1D23"
        );
        order.vehicle_plate = Some("abc1d23".into());
        assert!(validate(Stage::Registration, &order, NOW).is_ready());
    }

    #[test]
    fn plate_patterns() {
        assert!(is_valid_plate("ABC1234"));
        assert!(is_valid_plate("ABC1D23"));
        assert!(!is_valid_plate("ABI1234")); // I excluded
        assert!(!is_valid_plate("AB1234")); // wrong length
        assert!(!is_valid_plate("ABC1O23")); // O excluded in mercosul letter
        assert!(!is_valid_plate("ABC-1234")); // separator not accepted
        assert!(!is_valid_plate("QBC1234")); // Q excluded
    }

    #[test]
    fn scheduling_rejects_past_and_malformed_dates() {
        let mut order = Order::default();
        assert_eq!(
            reason(validate(Stage::Scheduling, &order, NOW)),
            "Entrega ainda não foi agendada"
        );
        order.scheduled_date = Some("2026-06-09".into());
        order.scheduled_time = Some("14:00".into());
        assert_eq!(
            reason(validate(Stage::Scheduling, &order, NOW)),
            "Data agendada está no passado. É necessário reagendar."
        );
        order.scheduled_date = Some("2026-06-10".into());
        assert!(validate(Stage::Scheduling, &order, NOW).is_ready());
        order.scheduled_date = Some("amanhã".into());
        assert_eq!(
            reason(validate(Stage::Scheduling, &order, NOW)),
            "Data agendada inválida"
        );
    }

    #[test]
    fn yard_needs_only_a_scheduled_date() {
        let mut order = Order::default();
        assert!(!validate(Stage::Yard, &order, NOW).is_ready());
        order.scheduled_date = Some("2026-06-20".into());
        assert!(validate(Stage::Yard, &order, NOW).is_ready());
    }

    #[test]
    fn delivery_requires_confirmation() {
        let mut order = Order::default();
        assert!(!validate(Stage::Delivery, &order, NOW).is_ready());
        order.entrega_confirmada = true;
        assert!(validate(Stage::Delivery, &order, NOW).is_ready());
    }
}
