//! Stage applicability: which stages are relevant to which order variant.
//!
//! Used both to filter the stages shown to a client/operator and to reject
//! an attempted advance into an inapplicable stage.

use crate::order::{Order, OrderKind};
use crate::stage::Stage;

/// Whether `stage` is relevant to this order's variant.
///
/// The internal financing review only exists for in-house financing; the
/// three factory stages only exist for factory orders; client documentation
/// and factory documentation are mutually exclusive by variant. Everything
/// else applies unconditionally.
pub fn is_applicable(order: &Order, stage: Stage) -> bool {
    match stage {
        Stage::InternalFinancingReview => order.is_internal_financing(),
        Stage::FactoryDocumentation | Stage::FactoryOrdered | Stage::FactoryInvoiced => {
            order.order_type == OrderKind::Factory
        }
        Stage::ClientDocumentation => order.order_type != OrderKind::Factory,
        _ => true,
    }
}

/// First applicable stage strictly after `from` in catalog order.
///
/// `cancelled` is a side-exit and never shows up in a forward scan.
pub fn next_applicable_stage(order: &Order, from: Stage) -> Option<Stage> {
    Stage::CATALOG[from.position() + 1..]
        .iter()
        .copied()
        .filter(|stage| *stage != Stage::Cancelled)
        .find(|stage| is_applicable(order, *stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{FinancingKind, PaymentMethod};

    fn stock_pix_order() -> Order {
        Order::default()
    }

    fn factory_order() -> Order {
        Order {
            order_type: OrderKind::Factory,
            ..Order::default()
        }
    }

    fn internal_financing_order() -> Order {
        Order {
            payment_method: PaymentMethod::Financing,
            financiamento_tipo: Some(FinancingKind::Internal),
            ..Order::default()
        }
    }

    #[test]
    fn internal_financing_review_needs_internal_financing() {
        assert!(is_applicable(
            &internal_financing_order(),
            Stage::InternalFinancingReview
        ));
        assert!(!is_applicable(&stock_pix_order(), Stage::InternalFinancingReview));

        let external = Order {
            payment_method: PaymentMethod::Financing,
            financiamento_tipo: Some(FinancingKind::External),
            ..Order::default()
        };
        assert!(!is_applicable(&external, Stage::InternalFinancingReview));
    }

    #[test]
    fn factory_stages_apply_only_to_factory_orders() {
        for stage in [
            Stage::FactoryDocumentation,
            Stage::FactoryOrdered,
            Stage::FactoryInvoiced,
        ] {
            assert!(is_applicable(&factory_order(), stage));
            assert!(!is_applicable(&stock_pix_order(), stage));
        }
    }

    #[test]
    fn documentation_stages_are_mutually_exclusive_by_variant() {
        assert!(is_applicable(&stock_pix_order(), Stage::ClientDocumentation));
        assert!(!is_applicable(&factory_order(), Stage::ClientDocumentation));
        assert!(is_applicable(&factory_order(), Stage::FactoryDocumentation));
    }

    #[test]
    fn common_stages_apply_to_everything() {
        for order in [stock_pix_order(), factory_order(), internal_financing_order()] {
            for stage in [
                Stage::Created,
                Stage::Invoice,
                Stage::Payment,
                Stage::Registration,
                Stage::Scheduling,
                Stage::Yard,
                Stage::Delivery,
                Stage::Evaluation,
                Stage::Completed,
                Stage::Cancelled,
            ] {
                assert!(is_applicable(&order, stage), "{stage} should apply");
            }
        }
    }

    #[test]
    fn forward_scan_skips_inapplicable_stages() {
        // Stock order right after creation: the factory track and the
        // internal financing review are skipped over.
        assert_eq!(
            next_applicable_stage(&stock_pix_order(), Stage::Created),
            Some(Stage::ClientDocumentation)
        );
        // Factory order skips client documentation.
        assert_eq!(
            next_applicable_stage(&factory_order(), Stage::FactoryInvoiced),
            Some(Stage::Invoice)
        );
    }

    #[test]
    fn forward_scan_never_yields_cancelled() {
        assert_eq!(
            next_applicable_stage(&stock_pix_order(), Stage::Completed),
            None
        );
        assert_eq!(
            next_applicable_stage(&stock_pix_order(), Stage::Evaluation),
            Some(Stage::Completed)
        );
    }

    #[test]
    fn scan_is_pure_and_repeatable() {
        let order = internal_financing_order();
        let first = next_applicable_stage(&order, Stage::Created);
        for _ in 0..10 {
            assert_eq!(next_applicable_stage(&order, Stage::Created), first);
        }
        assert_eq!(first, Some(Stage::InternalFinancingReview));
    }
}
