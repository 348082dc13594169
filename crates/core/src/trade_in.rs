//! Trade-in intake policy.
//!
//! A trade-in vehicle held in a third party's name and carrying a bonus is
//! only accepted for a closed set of kinship ties, requires confirmation
//! that the vehicle was not transferred in the last three months, and puts
//! the order behind a manager approval gate.

use crate::order::TradeInKinship;
use crate::validate::Readiness;

/// The answers collected by the intake form for a trade-in vehicle.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeInIntake<'a> {
    pub plate: Option<&'a str>,
    pub owner_is_buyer: Option<bool>,
    pub has_bonus: Option<bool>,
    pub kinship: Option<TradeInKinship>,
    pub no_recent_transfer: bool,
}

/// Manager approval is required exactly when the trade-in is not in the
/// buyer's name AND carries a bonus. Derived server-side; never trusted
/// from the request.
pub fn requires_manager_approval(owner_is_buyer: Option<bool>, has_bonus: Option<bool>) -> bool {
    owner_is_buyer == Some(false) && has_bonus == Some(true)
}

/// Completeness check of the trade-in block, in intake-form order.
pub fn check_intake(intake: TradeInIntake<'_>) -> Readiness {
    if intake.plate.is_none_or(str::is_empty) {
        return Readiness::NotReady {
            reason: "Preencha a placa do veículo usado",
        };
    }
    let Some(owner_is_buyer) = intake.owner_is_buyer else {
        return Readiness::NotReady {
            reason: "Informe se o usado está no nome do cliente",
        };
    };
    if owner_is_buyer {
        return Readiness::Ready;
    }
    let Some(has_bonus) = intake.has_bonus else {
        return Readiness::NotReady {
            reason: "Informe se há bônus na troca",
        };
    };
    if !has_bonus {
        return Readiness::Ready;
    }
    if intake.kinship.is_none() {
        return Readiness::NotReady {
            reason: "Selecione o tipo de parentesco",
        };
    }
    if !intake.no_recent_transfer {
        return Readiness::NotReady {
            reason: "Confirme que o veículo não foi transferido recentemente",
        };
    }
    Readiness::Ready
}
